use crate::{
    error::{AppError, AppResult},
    models::{Book, User},
};

use super::{catalogue::Catalogue, user_directory::UserDirectory};

/// A user being registered.
///
/// Preferences are validated as they are added but popularity is only
/// bumped on [`Registration::commit`], so dropping an unfinished
/// registration leaves the catalogue untouched.
pub struct Registration<'a> {
    catalogue: &'a mut Catalogue,
    users: &'a mut UserDirectory,
    user: User,
    preference_limit: usize,
}

impl<'a> Registration<'a> {
    pub(crate) fn new(
        catalogue: &'a mut Catalogue,
        users: &'a mut UserDirectory,
        user: User,
    ) -> Self {
        let preference_limit = catalogue.capacity().max(catalogue.len());
        Self {
            catalogue,
            users,
            user,
            preference_limit,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// True while more preferences may be added
    pub fn has_room(&self) -> bool {
        self.user.preferences().len() < self.preference_limit
    }

    /// Fails with `CapacityExceeded` once the preference limit is reached
    pub fn ensure_room(&self) -> AppResult<()> {
        if self.has_room() {
            return Ok(());
        }
        Err(AppError::CapacityExceeded {
            what: "Preference",
            limit: self.preference_limit,
        })
    }

    /// Adds the book with `book_id` to the preferences
    pub fn add_preference(&mut self, book_id: i64) -> AppResult<&Book> {
        self.ensure_room()?;

        let index = self
            .catalogue
            .position_of(book_id)
            .ok_or(AppError::BookIdNotFound(book_id))?;

        if !self.user.add_preference(index) {
            let title = self
                .catalogue
                .get(index)
                .map(|b| b.title.clone())
                .unwrap_or_default();
            return Err(AppError::DuplicatePreference { title });
        }

        self.catalogue
            .get(index)
            .ok_or(AppError::BookIdNotFound(book_id))
    }

    /// Bumps popularity of every preferred book and stores the user
    pub fn commit(self) -> User {
        for &index in self.user.preferences() {
            self.catalogue.increment_popularity(index);
        }

        tracing::info!(
            user_id = self.user.id,
            preferences = self.user.preferences().len(),
            "User registered"
        );

        self.users.insert(self.user.clone());
        self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (Catalogue, UserDirectory) {
        let catalogue = Catalogue::from_books(vec![
            Book::new(10, "Dune", "Frank Herbert", "Sci-Fi", 4.5),
            Book::new(20, "Emma", "Jane Austen", "Romance", 4.0),
        ]);
        (catalogue, UserDirectory::new(101, 100))
    }

    #[test]
    fn test_commit_increments_popularity() {
        let (mut catalogue, mut users) = fixtures();
        let mut registration = Registration::new(&mut catalogue, &mut users, User::new(1, "Ada"));
        assert_eq!(registration.add_preference(20).unwrap().title, "Emma");
        let user = registration.commit();

        assert_eq!(user.preferences(), &[1]);
        assert_eq!(catalogue.get(1).unwrap().popularity, 1);
        assert_eq!(catalogue.get(0).unwrap().popularity, 0);
        assert!(users.find(1).is_some());
    }

    #[test]
    fn test_duplicate_preference_counts_once() {
        let (mut catalogue, mut users) = fixtures();
        let mut registration = Registration::new(&mut catalogue, &mut users, User::new(1, "Ada"));
        registration.add_preference(10).unwrap();
        let second = registration.add_preference(10);
        assert!(matches!(
            second,
            Err(AppError::DuplicatePreference { ref title }) if title == "Dune"
        ));
        registration.commit();
        assert_eq!(catalogue.get(0).unwrap().popularity, 1);
    }

    #[test]
    fn test_unknown_book_id() {
        let (mut catalogue, mut users) = fixtures();
        let mut registration = Registration::new(&mut catalogue, &mut users, User::new(1, "Ada"));
        assert!(matches!(
            registration.add_preference(99),
            Err(AppError::BookIdNotFound(99))
        ));
        assert!(registration.user().preferences().is_empty());
    }

    #[test]
    fn test_abandoned_registration_leaves_catalogue_alone() {
        let (mut catalogue, mut users) = fixtures();
        {
            let mut registration =
                Registration::new(&mut catalogue, &mut users, User::new(1, "Ada"));
            registration.add_preference(10).unwrap();
        }
        assert_eq!(catalogue.get(0).unwrap().popularity, 0);
        assert!(users.is_empty());
    }

    #[test]
    fn test_preference_limit() {
        let (mut catalogue, _) = Catalogue::from_reader(
            "id,title,author,genre,rating\n10,Dune,Frank Herbert,Sci-Fi,4.5\n".as_bytes(),
            1,
        )
        .unwrap();
        let mut users = UserDirectory::new(3, 3);
        let mut registration = Registration::new(&mut catalogue, &mut users, User::new(1, "Ada"));
        registration.add_preference(10).unwrap();
        assert!(!registration.has_room());
        assert!(registration.ensure_room().is_err());
        assert!(matches!(
            registration.add_preference(10),
            Err(AppError::CapacityExceeded { limit: 1, .. })
        ));
    }

    #[test]
    fn test_popularity_equals_distinct_users() {
        let (mut catalogue, mut users) = fixtures();
        for id in 1..=3 {
            let mut registration =
                Registration::new(&mut catalogue, &mut users, User::new(id, "reader"));
            registration.add_preference(10).unwrap();
            if id == 2 {
                registration.add_preference(20).unwrap();
            }
            registration.commit();
        }
        assert_eq!(catalogue.get(0).unwrap().popularity, 3);
        assert_eq!(catalogue.get(1).unwrap().popularity, 1);
    }
}
