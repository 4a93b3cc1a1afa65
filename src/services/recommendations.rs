use std::collections::HashSet;

use crate::{
    error::EmptyResult,
    models::{PopularityMode, User},
};

use super::{catalogue::Catalogue, graph::SimilarityGraph, traversal::Traversal};

/// Upper bound on the number of books returned by one request
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Generates recommendations for `user` in `genre`.
///
/// The graph is walked once per preferred book with shared traversal state.
/// The discovered books are then narrowed stage by stage: preferred books
/// out, duplicates out, genre match, popularity class, sorted by popularity
/// (stable, highest first) and capped at [`MAX_RECOMMENDATIONS`].
///
/// Returns catalogue positions. A stage that leaves nothing ends the request
/// with the matching [`EmptyResult`].
pub fn recommend(
    catalogue: &Catalogue,
    graph: &SimilarityGraph,
    user: &User,
    genre: &str,
    mode: PopularityMode,
) -> Result<Vec<usize>, EmptyResult> {
    if user.preferences().is_empty() {
        return Err(EmptyResult::NoPreferences);
    }
    if !catalogue.has_genre(genre) {
        return Err(EmptyResult::GenreNotFound(genre.to_string()));
    }

    let mut traversal = Traversal::new(graph);
    for &seed in user.preferences() {
        traversal.visit_from(seed);
    }
    let discovered = traversal.into_discovered();
    if discovered.is_empty() {
        return Err(EmptyResult::NoReachableBooks);
    }

    let not_preferred = discovered.into_iter().filter(|&i| !user.prefers(i));

    let mut seen = HashSet::new();
    let unique: Vec<usize> = not_preferred.filter(|&i| seen.insert(i)).collect();
    if unique.is_empty() {
        return Err(EmptyResult::AllReachablePreferred);
    }

    let in_genre: Vec<usize> = unique
        .into_iter()
        .filter(|&i| catalogue.get(i).is_some_and(|b| b.genre == genre))
        .collect();
    if in_genre.is_empty() {
        return Err(EmptyResult::NoGenreMatch {
            genre: genre.to_string(),
        });
    }

    let popularity = |i: usize| catalogue.get(i).map_or(0, |b| b.popularity);

    let mut ranked: Vec<usize> = in_genre
        .into_iter()
        .filter(|&i| mode.admits(popularity(i)))
        .collect();
    if ranked.is_empty() {
        return Err(EmptyResult::NoPopularityMatch {
            genre: genre.to_string(),
            mode,
        });
    }

    ranked.sort_by(|&a, &b| popularity(b).cmp(&popularity(a)));
    ranked.truncate(MAX_RECOMMENDATIONS);

    tracing::debug!(
        user_id = user.id,
        genre,
        %mode,
        returned = ranked.len(),
        "Recommendations generated"
    );

    Ok(ranked)
}
