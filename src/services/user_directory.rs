use crate::{
    error::{AppError, AppResult},
    models::User,
};

/// Fixed-bucket hash table of registered users.
///
/// Bucket index is `id mod bucket_count`. Each bucket is a chain kept
/// newest-first, so enumeration runs bucket by bucket and, inside a bucket,
/// from the latest insert to the oldest.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    // Chains are stored oldest-first and walked in reverse.
    buckets: Vec<Vec<User>>,
    capacity: usize,
    len: usize,
}

impl UserDirectory {
    /// Creates an empty directory. `bucket_count` must be positive.
    pub fn new(bucket_count: usize, capacity: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); bucket_count.max(1)],
            capacity,
            len: 0,
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_index(&self, id: i64) -> usize {
        id.rem_euclid(self.buckets.len() as i64) as usize
    }

    /// Prepends `user` to its bucket chain without checking for an existing id.
    /// A later insert with the same id shadows the earlier one in [`find`].
    ///
    /// [`find`]: UserDirectory::find
    pub fn insert(&mut self, user: User) {
        let index = self.bucket_index(user.id);
        tracing::debug!(user_id = user.id, bucket = index, "Inserting user");
        self.buckets[index].push(user);
        self.len += 1;
    }

    /// Inserts `user` unless its id is already registered
    pub fn try_insert(&mut self, user: User) -> AppResult<()> {
        if self.contains(user.id) {
            return Err(AppError::DuplicateUser(user.id));
        }
        self.insert(user);
        Ok(())
    }

    /// First match in chain order, i.e. the most recently inserted user with `id`
    pub fn find(&self, id: i64) -> Option<&User> {
        self.buckets[self.bucket_index(id)]
            .iter()
            .rev()
            .find(|u| u.id == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.find(id).is_some()
    }

    /// All users in bucket order, then chain order
    pub fn iter(&self) -> impl Iterator<Item = &User> + '_ {
        self.buckets.iter().flat_map(|chain| chain.iter().rev())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.len >= self.capacity
    }

    /// Drops every user record and the chain storage
    pub fn release(&mut self) {
        for chain in &mut self.buckets {
            *chain = Vec::new();
        }
        self.len = 0;
    }
}
