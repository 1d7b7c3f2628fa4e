use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::utils::StringHashMap;

/// A thread-safe wrapper around either map variant.
///
/// Every public operation acquires the lock exactly once: a read lock for queries and a
/// write lock for anything that can change the table, including the resize an insertion
/// may trigger. Readers therefore never observe a half-migrated table. Values leave the
/// lock as clones.
///
/// A panic inside another holder of the lock does not make the map unusable; the
/// poisoned guard is taken over as is, since every operation leaves the table consistent
/// between statements that can panic.
#[derive(Debug, Default)]
pub struct LockedHashMap<M> {
    /// The wrapped map
    inner: RwLock<M>,
}

impl<M: StringHashMap> LockedHashMap<M> {
    /// Wraps `map` in a lock
    #[must_use]
    pub const fn new(map: M) -> Self {
        Self { inner: RwLock::new(map) }
    }

    /// Acquires the read lock
    fn read(&self) -> RwLockReadGuard<'_, M> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires the write lock
    fn write(&self) -> RwLockWriteGuard<'_, M> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts a key-value pair, returning the previous value for the key
    pub fn put(&self, key: impl Into<String>, value: M::Value) -> Option<M::Value> {
        self.write().put(key.into(), value)
    }

    /// Returns a copy of the value stored for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<M::Value>
    where
        M::Value: Clone,
    {
        self.read().get(key).cloned()
    }

    /// Returns true if the map holds a live entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// Removes a key and returns its value
    pub fn remove(&self, key: &str) -> Option<M::Value> {
        self.write().remove(key)
    }

    /// Applies `f` to the value stored for `key` under the write lock, or inserts
    /// `default` if there is none. Returns the value now stored.
    pub fn upsert<F>(&self, key: &str, default: M::Value, f: F) -> M::Value
    where
        M::Value: Clone,
        F: FnOnce(&M::Value) -> M::Value,
    {
        let mut map = self.write();
        let value = map.get(key).map_or(default, f);
        map.put(key.to_string(), value.clone());
        value
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().get_size()
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots in the table
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.read().get_capacity()
    }

    /// Returns the current load factor
    #[must_use]
    pub fn table_load(&self) -> f64 {
        self.read().table_load()
    }

    /// Returns the number of empty slots
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.read().empty_buckets()
    }

    /// Removes every entry while keeping the capacity
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Rehashes the table to the requested capacity
    pub fn resize_table(&self, new_capacity: usize) {
        self.write().resize_table(new_capacity);
    }

    /// Returns a snapshot of every stored pair, taken under a single read lock
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(String, M::Value)>
    where
        M::Value: Clone,
    {
        self.read().get_keys_and_values()
    }

    /// Consumes the wrapper and returns the map
    #[must_use]
    pub fn into_inner(self) -> M {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
