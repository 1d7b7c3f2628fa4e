use std::{fmt, mem, slice};

use log::debug;

use crate::{
    chain::{self, Chain},
    hash::{HashFunction, hash_function_1},
    prime::next_prime,
    utils::StringHashMap,
};

/// Initial capacity used by `Default`
pub const DEFAULT_CAPACITY: usize = 11;

/// The table grows before an insertion once `size / capacity` reaches this value
pub const MAX_LOAD_FACTOR: f64 = 1.0;

/// A string-keyed hash map using separate chaining.
///
/// Every slot owns a chain of nodes; colliding keys share the chain of their slot. The
/// capacity is always prime, and the table grows to the next prime above twice its
/// capacity before any insertion made while the load factor is at least 1.0.
#[derive(Debug, Clone)]
pub struct ChainedHashMap<V> {
    /// One chain per slot
    buckets: Vec<Chain<V>>,
    /// Current number of entries across all chains
    size: usize,
    /// Maps a key to its slot (modulo the capacity)
    hash_function: HashFunction,
}

impl<V> Default for ChainedHashMap<V> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<V> From<(usize, HashFunction)> for ChainedHashMap<V> {
    fn from((capacity, hash_function): (usize, HashFunction)) -> Self {
        Self::new(capacity, hash_function)
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for ChainedHashMap<V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for ChainedHashMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

/// Allocates `capacity` empty chains
fn empty_chains<V>(capacity: usize) -> Vec<Chain<V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Chain::default);
    buckets
}

impl<V> ChainedHashMap<V> {
    /// Creates a map whose capacity is the smallest prime at or above `capacity`
    #[must_use]
    pub fn new(capacity: usize, hash_function: HashFunction) -> Self {
        Self { buckets: empty_chains(next_prime(capacity)), size: 0, hash_function }
    }

    /// Creates a map with the given initial capacity, hashing with `hash_function_1`
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, hash_function_1)
    }

    /// Gets the slot index of `key` in a table of `capacity` slots
    #[allow(clippy::arithmetic_side_effects)]
    fn index(&self, key: &str, capacity: usize) -> usize {
        (self.hash_function)(key) % capacity
    }

    /// Returns the chain `key` belongs to
    fn chain(&self, key: &str) -> Option<&Chain<V>> {
        self.buckets.get(self.index(key, self.buckets.len()))
    }

    /// Returns the chain `key` belongs to, mutably
    fn chain_mut(&mut self, key: &str) -> Option<&mut Chain<V>> {
        let index = self.index(key, self.buckets.len());
        self.buckets.get_mut(index)
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    ///
    /// Grows the table first if the load factor is at least 1.0.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        if self.table_load() >= MAX_LOAD_FACTOR {
            self.grow();
        }

        let key = key.into();
        let chain = self.chain_mut(&key)?;
        if let Some(existing) = chain.find_mut(&key) {
            return Some(mem::replace(existing, value));
        }

        chain.insert(key, value);
        self.size += 1;
        None
    }

    /// Retrieves the value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain(key)?.find(key)
    }

    /// Gets a mutable reference to the value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.chain_mut(key)?.find_mut(key)
    }

    /// Returns true if the map holds an entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes a key from its chain and returns its value
    #[allow(clippy::arithmetic_side_effects)]
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let removed = self.chain_mut(key)?.remove(key)?;
        self.size -= 1;
        Some(removed)
    }

    /// Doubles the capacity, rounded up to a prime
    pub fn grow(&mut self) {
        self.resize_table(next_prime(self.buckets.len().saturating_mul(2)));
    }

    /// Moves every node into a table of `next_prime(new_capacity)` chains.
    ///
    /// A request for fewer than one slot is ignored. Shrinking below the current size is
    /// allowed; chains simply get longer until the next insertion grows the table again.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            debug!("ignoring resize to {new_capacity} slots");
            return;
        }

        let capacity = next_prime(new_capacity);
        debug!(
            "resizing table from {} to {capacity} slots ({} entries)",
            self.buckets.len(),
            self.size
        );

        let mut new_buckets = empty_chains(capacity);
        for mut chain in mem::take(&mut self.buckets) {
            while let Some((key, value)) = chain.pop_front() {
                if let Some(target) = new_buckets.get_mut(self.index(&key, capacity)) {
                    target.insert(key, value);
                }
            }
        }
        self.buckets = new_buckets;
    }

    /// Returns the number of entries
    #[must_use]
    pub const fn get_size(&self) -> usize {
        self.size
    }

    /// Returns the number of entries
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots in the table
    #[must_use]
    pub const fn get_capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor of the map
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns the number of slots whose chain is empty
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Returns the length of the longest chain
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Chain::len).max().unwrap_or(0)
    }

    /// Removes every node from every chain, keeping the capacity
    #[allow(clippy::arithmetic_side_effects)]
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            while chain.pop_front().is_some() {
                self.size -= 1;
            }
        }
    }

    /// Returns an iterator over the key-value pairs in slot order, then chain order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        let mut buckets = self.buckets.iter();
        let nodes = buckets.next().map(Chain::iter);
        Iter { buckets, nodes }
    }

    /// Returns every key-value pair in slot order, then chain order
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }
}

impl<V> StringHashMap for ChainedHashMap<V> {
    type Value = V;

    fn put(&mut self, key: String, value: V) -> Option<V> {
        Self::put(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        Self::get(self, key)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        Self::remove(self, key)
    }

    fn get_size(&self) -> usize {
        self.size
    }

    fn get_capacity(&self) -> usize {
        self.buckets.len()
    }

    fn empty_buckets(&self) -> usize {
        Self::empty_buckets(self)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn resize_table(&mut self, new_capacity: usize) {
        Self::resize_table(self, new_capacity);
    }

    fn get_keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        Self::get_keys_and_values(self)
    }
}

impl<V: fmt::Display> fmt::Display for ChainedHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            write!(f, "{index}:")?;
            for (key, value) in chain.iter() {
                write!(f, " -> ({key}: {value})")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the key-value pairs of a `ChainedHashMap`
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Chains not yet visited
    buckets: slice::Iter<'a, Chain<V>>,
    /// Remaining nodes of the chain being visited
    nodes: Option<chain::Iter<'a, V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.nodes.as_mut()?.next() {
                return Some(pair);
            }
            self.nodes = Some(self.buckets.next()?.iter());
        }
    }
}

impl<'a, V> IntoIterator for &'a ChainedHashMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
