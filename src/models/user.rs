use super::book::bounded;

/// Longest user name kept, in characters
pub const MAX_NAME_LEN: usize = 99;

/// A registered reader and the catalogue positions of their preferred books
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    preferences: Vec<usize>,
}

impl User {
    /// Creates a user without preferences
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: bounded(name.into(), MAX_NAME_LEN),
            preferences: Vec::new(),
        }
    }

    /// Catalogue indices in the order they were registered
    pub fn preferences(&self) -> &[usize] {
        &self.preferences
    }

    pub fn prefers(&self, index: usize) -> bool {
        self.preferences.contains(&index)
    }

    /// Records a preference, returning false if it was already present
    pub(crate) fn add_preference(&mut self, index: usize) -> bool {
        if self.prefers(index) {
            return false;
        }
        self.preferences.push(index);
        true
    }
}
