use std::io::Cursor;
use std::path::PathBuf;

use tempfile::TempDir;

use bookgraph::{
    cli::{ReaderSource, Session},
    models::PopularityMode,
    services::{Catalogue, SimilarityGraph},
    AppError, Config, EmptyResult, Library,
};

const CATALOGUE: &str = "\
id,title,author,genre,rating
1,Foundation,A,Sci-Fi,4.2
2,Earthsea,A,Fantasy,4.0
3,Solaris,B,Sci-Fi,3.9
";

/// Writes `content` to a catalogue file inside a directory removed on drop
fn write_catalogue(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.csv");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

fn open_library(content: &str) -> Library {
    let (_dir, path) = write_catalogue(content);
    let config = Config {
        catalogue_path: path,
        ..Config::default()
    };
    let (library, _) = Library::open(&config).unwrap();
    library
}

fn run_session(library: &mut Library, script: &str) -> String {
    let mut out = Vec::new();
    Session::new(library, ReaderSource::new(Cursor::new(script.to_string())), &mut out)
        .run()
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_open_builds_graph_over_catalogue() {
    let library = open_library(CATALOGUE);
    assert_eq!(library.catalogue.len(), 3);
    assert_eq!(library.graph.node_count(), 3);
    assert_eq!(library.graph.edge_count(), 2);
    assert_eq!(library.graph.neighbors(0).collect::<Vec<_>>(), vec![2, 1]);
}

#[test]
fn test_shared_author_file_forms_one_edge() {
    let (_dir, path) = write_catalogue(
        "id,title,author,genre,rating\n1,One,A,Drama,3.0\n2,Two,A,Poetry,3.5\n3,Three,C,History,4.0\n",
    );
    let (catalogue, report) = Catalogue::load(&path, 1000).unwrap();
    assert_eq!(report.loaded, 3);
    let graph = SimilarityGraph::build(catalogue.all());
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.has_edge(0, 1) && graph.has_edge(1, 0));
}

#[test]
fn test_catalogue_fixture_is_removed() {
    let (dir, path) = write_catalogue(CATALOGUE);
    let root = dir.path().to_path_buf();
    assert!(path.exists());
    drop(dir);
    assert!(!root.exists());
}

#[test]
fn test_missing_catalogue_is_reported() {
    let config = Config {
        catalogue_path: PathBuf::from("/nonexistent/bookgraph/books.csv"),
        ..Config::default()
    };
    assert!(matches!(
        Library::open(&config),
        Err(AppError::InputSourceUnavailable { .. })
    ));
}

#[test]
fn test_header_only_catalogue_is_empty() {
    let (_dir, path) = write_catalogue("id,title,author,genre,rating\n");
    let config = Config {
        catalogue_path: path,
        ..Config::default()
    };
    assert!(matches!(Library::open(&config), Err(AppError::EmptyCatalogue)));
}

#[test]
fn test_capacity_from_config_truncates() {
    let (_dir, path) = write_catalogue(CATALOGUE);
    let config = Config {
        catalogue_path: path,
        max_books: 2,
        ..Config::default()
    };
    let (library, report) = Library::open(&config).unwrap();
    assert_eq!(library.catalogue.len(), 2);
    assert!(report.truncated());
}

#[test]
fn test_full_session_underrated_recommendation() {
    let mut library = open_library(CATALOGUE);
    let output = run_session(
        &mut library,
        "2\n1\nAda\n1\n1\n0\n3\n6\n1\nSci-Fi\n2\n7\n",
    );

    assert!(output.contains("Added \"Foundation\" to Ada's preferences."));
    assert!(output.contains("User added successfully!"));
    assert!(output.contains("\"Foundation\" (ID: 1)"));

    let recommendations = output
        .split("--- Recommendations for Ada ---")
        .nth(1)
        .expect("recommendation table");
    assert!(recommendations.contains("Solaris"));
    assert!(!recommendations.contains("Earthsea"));
    assert!(output.ends_with("Exiting...\n"));
}

#[test]
fn test_full_session_popular_is_empty() {
    let mut library = open_library(CATALOGUE);
    let output = run_session(
        &mut library,
        "2\n1\nAda\n1\n1\n0\n6\n1\nSci-Fi\n1\n7\n",
    );
    assert!(output.contains(
        "No popular recommendations found in the genre \"Sci-Fi\" based on your preferences."
    ));
}

#[test]
fn test_session_ends_on_closed_input() {
    let mut library = open_library(CATALOGUE);
    let output = run_session(&mut library, "1\n");
    assert!(output.contains("--- All Books ---"));
    assert!(output.ends_with("Exiting...\n"));
}

#[test]
fn test_popularity_tracks_distinct_users() {
    let mut library = open_library(CATALOGUE);
    for id in 1..=7 {
        let mut registration = library.begin_registration(id, "reader").unwrap();
        registration.add_preference(2).unwrap();
        assert!(matches!(
            registration.add_preference(2),
            Err(AppError::DuplicatePreference { .. })
        ));
        registration.commit();
    }
    assert_eq!(library.catalogue.get(1).unwrap().popularity, 7);

    // Earthsea is now popular; a Foundation reader in Fantasy gets it
    let mut registration = library.begin_registration(100, "fan").unwrap();
    registration.add_preference(1).unwrap();
    registration.commit();

    let picks = library
        .recommend(100, "Fantasy", PopularityMode::Popular)
        .unwrap();
    assert_eq!(picks, vec![1]);

    let err = library
        .recommend(100, "Fantasy", PopularityMode::Underrated)
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::NoResults(EmptyResult::NoPopularityMatch { .. })
    ));
}
