use std::path::PathBuf;

use crate::models::PopularityMode;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Could not open file {}: {source}", .path.display())]
    InputSourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalogue read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No books loaded. Please check the CSV file.")]
    EmptyCatalogue,

    #[error("{what} limit reached ({limit})")]
    CapacityExceeded { what: &'static str, limit: usize },

    #[error("User not found!")]
    UserNotFound(i64),

    #[error("Book ID {0} not found! Please try again.")]
    BookIdNotFound(i64),

    #[error("Book \"{title}\" is already in preferences.")]
    DuplicatePreference { title: String },

    #[error("User ID {0} already exists! User not added.")]
    DuplicateUser(i64),

    #[error(transparent)]
    NoResults(#[from] EmptyResult),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stage at which a recommendation request ran out of candidates.
///
/// Each variant is a distinct outcome the operator sees; none of them is a
/// failure of the system itself.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmptyResult {
    #[error("User has no preferred books to base recommendations on.")]
    NoPreferences,

    #[error("Genre \"{0}\" not found in the library. Please check the genre and try again.")]
    GenreNotFound(String),

    #[error("No books are connected to the user's preferences.")]
    NoReachableBooks,

    #[error("No recommendations available based on current preferences.")]
    AllReachablePreferred,

    #[error("No recommendations found in the genre \"{genre}\" based on your preferences.")]
    NoGenreMatch { genre: String },

    #[error("No {mode} recommendations found in the genre \"{genre}\" based on your preferences.")]
    NoPopularityMatch { genre: String, mode: PopularityMode },
}

pub type AppResult<T> = Result<T, AppError>;
