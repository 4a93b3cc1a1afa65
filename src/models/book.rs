/// Longest title kept from the catalogue file, in characters
pub const MAX_TITLE_LEN: usize = 99;
/// Longest author name kept from the catalogue file, in characters
pub const MAX_AUTHOR_LEN: usize = 99;
/// Longest genre kept from the catalogue file, in characters
pub const MAX_GENRE_LEN: usize = 49;

/// A book of the catalogue.
///
/// `id` is assigned by the catalogue file and need not be dense. Graph code
/// never sees it: books are addressed by their position in the catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    /// Informational only, never used for ranking
    pub rating: f32,
    /// Number of users holding this book in their preferences
    pub popularity: u32,
}

impl Book {
    /// Creates a book with zero popularity, truncating over-long text fields
    pub fn new(
        id: i64,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        rating: f32,
    ) -> Self {
        Self {
            id,
            title: bounded(title.into(), MAX_TITLE_LEN),
            author: bounded(author.into(), MAX_AUTHOR_LEN),
            genre: bounded(genre.into(), MAX_GENRE_LEN),
            rating,
            popularity: 0,
        }
    }

    /// Books are similar when they share an author or a genre
    pub fn is_similar_to(&self, other: &Book) -> bool {
        self.author == other.author || self.genre == other.genre
    }
}

/// Cuts `text` down to at most `max` characters
pub fn bounded(mut text: String, max: usize) -> String {
    if let Some((cut, _)) = text.char_indices().nth(max) {
        text.truncate(cut);
    }
    text
}
