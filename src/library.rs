use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{PopularityMode, User},
    services::{
        catalogue::{Catalogue, LoadReport},
        graph::SimilarityGraph,
        recommendations,
        registration::Registration,
        user_directory::UserDirectory,
    },
};

/// Everything one session works on: the catalogue, the graph built over it
/// and the registered users.
pub struct Library {
    pub catalogue: Catalogue,
    pub graph: SimilarityGraph,
    pub users: UserDirectory,
    allow_duplicate_user_ids: bool,
}

impl Library {
    /// Loads the configured catalogue and builds the graph.
    ///
    /// An empty catalogue is an error: nothing else can work without books.
    pub fn open(config: &Config) -> AppResult<(Self, LoadReport)> {
        config.validate()?;
        let (catalogue, report) = Catalogue::load(&config.catalogue_path, config.max_books)?;
        if catalogue.is_empty() {
            return Err(AppError::EmptyCatalogue);
        }
        Ok((Self::from_catalogue(catalogue, config), report))
    }

    /// Builds a library around an already loaded catalogue
    pub fn from_catalogue(catalogue: Catalogue, config: &Config) -> Self {
        let graph = SimilarityGraph::build(catalogue.all());
        Self {
            catalogue,
            graph,
            users: UserDirectory::new(config.user_buckets, config.max_users),
            allow_duplicate_user_ids: config.allow_duplicate_user_ids,
        }
    }

    /// Fails early if a user with `id` cannot be registered
    pub fn check_new_user(&self, id: i64) -> AppResult<()> {
        if self.users.is_full() {
            return Err(AppError::CapacityExceeded {
                what: "User",
                limit: self.users.capacity(),
            });
        }
        if !self.allow_duplicate_user_ids && self.users.contains(id) {
            return Err(AppError::DuplicateUser(id));
        }
        Ok(())
    }

    /// Starts registering a user. Nothing is stored until the registration
    /// is committed.
    pub fn begin_registration(&mut self, id: i64, name: &str) -> AppResult<Registration<'_>> {
        self.check_new_user(id)?;
        Ok(Registration::new(
            &mut self.catalogue,
            &mut self.users,
            User::new(id, name),
        ))
    }

    pub fn find_user(&self, id: i64) -> AppResult<&User> {
        self.users.find(id).ok_or(AppError::UserNotFound(id))
    }

    /// Recommends books for the user with `user_id`, as catalogue positions
    pub fn recommend(
        &self,
        user_id: i64,
        genre: &str,
        mode: PopularityMode,
    ) -> AppResult<Vec<usize>> {
        let user = self.find_user(user_id)?;
        let picks = recommendations::recommend(&self.catalogue, &self.graph, user, genre, mode)?;
        Ok(picks)
    }

    /// Frees the graph and the user directory
    pub fn shutdown(&mut self) {
        tracing::info!(users = self.users.len(), "Releasing library");
        self.graph.release();
        self.users.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmptyResult;
    use crate::models::Book;

    fn scenario_library(config: &Config) -> Library {
        let catalogue = Catalogue::from_books(vec![
            Book::new(1, "Foundation", "A", "Sci-Fi", 4.2),
            Book::new(2, "Earthsea", "A", "Fantasy", 4.0),
            Book::new(3, "Solaris", "B", "Sci-Fi", 3.9),
        ]);
        Library::from_catalogue(catalogue, config)
    }

    fn register(library: &mut Library, id: i64, books: &[i64]) {
        let mut registration = library.begin_registration(id, "reader").unwrap();
        for &book in books {
            registration.add_preference(book).unwrap();
        }
        registration.commit();
    }

    #[test]
    fn test_graph_matches_catalogue() {
        let library = scenario_library(&Config::default());
        assert_eq!(library.graph.node_count(), library.catalogue.len());
    }

    #[test]
    fn test_recommend_end_to_end() {
        let mut library = scenario_library(&Config::default());
        register(&mut library, 1, &[1]);

        let picks = library
            .recommend(1, "Sci-Fi", PopularityMode::Underrated)
            .unwrap();
        assert_eq!(picks, vec![2]);

        let err = library
            .recommend(1, "Sci-Fi", PopularityMode::Popular)
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::NoResults(EmptyResult::NoPopularityMatch { .. })
        ));
    }

    #[test]
    fn test_recommend_unknown_user() {
        let library = scenario_library(&Config::default());
        assert!(matches!(
            library.recommend(9, "Sci-Fi", PopularityMode::Popular),
            Err(AppError::UserNotFound(9))
        ));
    }

    #[test]
    fn test_duplicate_user_rejected_by_default() {
        let mut library = scenario_library(&Config::default());
        register(&mut library, 1, &[]);
        assert!(matches!(
            library.begin_registration(1, "again"),
            Err(AppError::DuplicateUser(1))
        ));
    }

    #[test]
    fn test_duplicate_user_shadows_when_allowed() {
        let config = Config {
            allow_duplicate_user_ids: true,
            ..Config::default()
        };
        let mut library = scenario_library(&config);
        register(&mut library, 1, &[1]);
        register(&mut library, 1, &[3]);
        assert_eq!(library.find_user(1).unwrap().preferences(), &[2]);
        assert_eq!(library.catalogue.get(0).unwrap().popularity, 1);
        assert_eq!(library.catalogue.get(2).unwrap().popularity, 1);
    }

    #[test]
    fn test_user_capacity() {
        let config = Config {
            max_users: 1,
            ..Config::default()
        };
        let mut library = scenario_library(&config);
        register(&mut library, 1, &[]);
        assert!(matches!(
            library.check_new_user(2),
            Err(AppError::CapacityExceeded { limit: 1, .. })
        ));
    }

    #[test]
    fn test_shutdown_releases() {
        let mut library = scenario_library(&Config::default());
        register(&mut library, 1, &[1]);
        library.shutdown();
        assert!(library.users.is_empty());
        assert_eq!(library.graph.node_count(), 0);
    }
}
