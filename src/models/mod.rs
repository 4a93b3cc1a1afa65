use std::fmt::Display;

pub mod book;
pub mod user;

pub use book::Book;
pub use user::User;

/// Books with popularity above this count are "popular"
pub const POPULAR_THRESHOLD: u32 = 5;

/// Books with popularity at or below this count are "underrated"
pub const UNDERRATED_THRESHOLD: u32 = 2;

/// Popularity class used by listings and the recommendation filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PopularityMode {
    #[default]
    Popular,
    Underrated,
}

impl PopularityMode {
    /// Returns true if a book with this popularity belongs to the class
    pub fn admits(self, popularity: u32) -> bool {
        match self {
            PopularityMode::Popular => popularity > POPULAR_THRESHOLD,
            PopularityMode::Underrated => popularity <= UNDERRATED_THRESHOLD,
        }
    }

    pub fn threshold(self) -> u32 {
        match self {
            PopularityMode::Popular => POPULAR_THRESHOLD,
            PopularityMode::Underrated => UNDERRATED_THRESHOLD,
        }
    }
}

impl Display for PopularityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PopularityMode::Popular => write!(f, "popular"),
            PopularityMode::Underrated => write!(f, "underrated"),
        }
    }
}
