use std::{fmt, mem};

use log::debug;

use crate::{
    error::MapError,
    hash::{HashFunction, hash_function_1},
    prime::{LARGEST_PRIME, next_prime},
    utils::StringHashMap,
};

/// Initial capacity used by `Default`
pub const DEFAULT_CAPACITY: usize = 11;

/// The table grows before an insertion once `size / capacity` reaches this value
pub const MAX_LOAD_FACTOR: f64 = 0.5;

/// A key-value pair owned by a slot
#[derive(Debug, Clone)]
struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
}

/// The state of a single slot in the table
#[derive(Debug, Clone)]
enum Slot<V> {
    /// Nothing has been stored here since the last clear or resize
    Empty,
    /// A live entry
    Occupied(Entry<V>),
    /// An entry was removed from here. Lookups must keep probing past it.
    Tombstone,
}

impl<V> Slot<V> {
    /// Returns the live entry in this slot, if any
    const fn entry(&self) -> Option<&Entry<V>> {
        match self {
            Self::Occupied(entry) => Some(entry),
            Self::Empty | Self::Tombstone => None,
        }
    }
}

/// The quadratic probe sequence `home + i^2 (mod capacity)` for `i` in `0..capacity`
#[derive(Debug, Clone)]
struct QuadraticProbe {
    /// Slot index of the next probe
    index: usize,
    /// Number of probes already yielded
    step: usize,
    /// Table length
    capacity: usize,
}

impl QuadraticProbe {
    /// Starts a probe sequence at `home`
    const fn new(home: usize, capacity: usize) -> Self {
        Self { index: home, step: 0, capacity }
    }
}

impl Iterator for QuadraticProbe {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.capacity {
            return None;
        }
        let current = self.index;
        // (i + 1)^2 - i^2 = 2i + 1
        let offset = (2 * self.step + 1) % self.capacity;
        self.index = (self.index + offset) % self.capacity;
        self.step += 1;
        Some(current)
    }
}

/// A string-keyed hash map using open addressing with quadratic probing.
///
/// The capacity is always prime, and the table grows to the next prime above twice its
/// capacity before any insertion made while the load factor is at least 0.5. Together
/// these guarantee the probe sequence of an insertion reaches a free slot.
///
/// Removing a key leaves a tombstone in its slot so that keys placed further along the
/// same probe sequence stay reachable. Tombstones are reused by later insertions and
/// dropped on resize or clear.
///
/// Note: This implementation is not thread-safe. For shared access, wrap it in a
/// `LockedHashMap`.
#[derive(Debug, Clone)]
pub struct QuadraticHashMap<V> {
    /// The slots of the table
    slots: Vec<Slot<V>>,
    /// Current number of live entries
    size: usize,
    /// Maps a key to its home slot (modulo the capacity)
    hash_function: HashFunction,
}

impl<V> Default for QuadraticHashMap<V> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<V> From<(usize, HashFunction)> for QuadraticHashMap<V> {
    fn from((capacity, hash_function): (usize, HashFunction)) -> Self {
        Self::new(capacity, hash_function)
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for QuadraticHashMap<V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for QuadraticHashMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

/// Allocates `capacity` empty slots
fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || Slot::Empty);
    slots
}

impl<V> QuadraticHashMap<V> {
    /// Creates a map whose capacity is the smallest prime at or above `capacity`
    #[must_use]
    pub fn new(capacity: usize, hash_function: HashFunction) -> Self {
        Self { slots: empty_slots(next_prime(capacity)), size: 0, hash_function }
    }

    /// Creates a map with the given initial capacity, hashing with `hash_function_1`
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, hash_function_1)
    }

    /// Returns the home slot of `key` in a table of `capacity` slots
    #[allow(clippy::arithmetic_side_effects)]
    fn home(&self, key: &str, capacity: usize) -> usize {
        (self.hash_function)(key) % capacity
    }

    /// Finds the slot holding `key`, or the slot a new entry for `key` should go to.
    ///
    /// The search only stops early at an empty slot or a live match, so keys stay unique
    /// even when a tombstone appears earlier in the sequence. The first tombstone seen is
    /// preferred over the empty slot that ends the search.
    fn find_slot(&self, key: &str) -> Result<usize, MapError> {
        let capacity = self.slots.len();
        let mut first_tombstone = None;

        for index in QuadraticProbe::new(self.home(key, capacity), capacity) {
            match self.slots.get(index) {
                None | Some(Slot::Empty) => return Ok(first_tombstone.unwrap_or(index)),
                Some(Slot::Tombstone) => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Some(Slot::Occupied(entry)) if entry.key == key => return Ok(index),
                Some(Slot::Occupied(_)) => {}
            }
        }

        first_tombstone.ok_or_else(|| MapError::ProbeExhausted { key: key.to_string(), capacity })
    }

    /// Returns the index of the slot holding a live entry for `key`
    fn position(&self, key: &str) -> Option<usize> {
        let capacity = self.slots.len();

        for index in QuadraticProbe::new(self.home(key, capacity), capacity) {
            match self.slots.get(index) {
                None | Some(Slot::Empty) => return None,
                Some(Slot::Occupied(entry)) if entry.key == key => return Some(index),
                Some(Slot::Occupied(_) | Slot::Tombstone) => {}
            }
        }

        None
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    ///
    /// Grows the table first if the load factor is at least 0.5.
    ///
    /// # Errors
    ///
    /// Returns `MapError::ProbeExhausted` if no slot on the key's probe sequence can take
    /// the entry. The growth policy makes this unreachable for a consistent table.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn try_put(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>, MapError> {
        if self.table_load() >= MAX_LOAD_FACTOR {
            self.resize_table(self.get_capacity().saturating_mul(2));
        }

        let key = key.into();
        let index = self.find_slot(&key)?;
        let capacity = self.get_capacity();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or_else(|| MapError::ProbeExhausted { key: key.clone(), capacity })?;

        match slot {
            Slot::Occupied(entry) => Ok(Some(mem::replace(&mut entry.value, value))),
            vacant => {
                *vacant = Slot::Occupied(Entry { key, value });
                self.size += 1;
                Ok(None)
            }
        }
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    ///
    /// # Panics
    ///
    /// Panics if the probe sequence is exhausted, which means the table invariants were
    /// broken. See `try_put` for the fallible form.
    #[allow(clippy::panic)]
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        match self.try_put(key, value) {
            Ok(previous) => previous,
            Err(err) => panic!("{err}"),
        }
    }

    /// Retrieves the value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.position(key)?;
        self.slots.get(index).and_then(Slot::entry).map(|entry| &entry.value)
    }

    /// Gets a mutable reference to the value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.position(key)?;
        match self.slots.get_mut(index) {
            Some(Slot::Occupied(entry)) => Some(&mut entry.value),
            _ => None,
        }
    }

    /// Returns true if the map holds a live entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Removes a key, leaving a tombstone in its slot, and returns its value
    #[allow(clippy::arithmetic_side_effects)]
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.position(key)?;
        let slot = self.slots.get_mut(index)?;

        match mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.size -= 1;
                Some(entry.value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Computes a slot index for every live entry, in slot order, in a fresh table of
    /// `capacity` slots
    fn plan_rehash(&self, capacity: usize) -> Result<Vec<usize>, MapError> {
        let mut taken = vec![false; capacity];
        let mut targets = Vec::with_capacity(self.size);

        for entry in self.slots.iter().filter_map(Slot::entry) {
            let target = QuadraticProbe::new(self.home(&entry.key, capacity), capacity)
                .find(|&index| taken.get(index).is_some_and(|used| !used))
                .ok_or_else(|| MapError::ProbeExhausted { key: entry.key.clone(), capacity })?;
            if let Some(flag) = taken.get_mut(target) {
                *flag = true;
            }
            targets.push(target);
        }

        Ok(targets)
    }

    /// Rehashes every live entry into a table of `next_prime(new_capacity)` slots.
    ///
    /// Requests below the current size are ignored. Tombstones are dropped. If the
    /// requested table cannot hold every entry on its probe sequence, the next prime up
    /// is tried instead.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < self.size {
            debug!("ignoring resize to {new_capacity}: below the {} live entries", self.size);
            return;
        }

        let mut capacity = next_prime(new_capacity);
        let targets = loop {
            match self.plan_rehash(capacity) {
                Ok(targets) => break targets,
                Err(err) if capacity < LARGEST_PRIME => {
                    debug!("{err}; retrying with a larger table");
                    capacity = next_prime(capacity + 1);
                }
                Err(err) => {
                    debug!("{err}; keeping the current table");
                    return;
                }
            }
        };

        debug!(
            "resizing table from {} to {capacity} slots ({} entries)",
            self.slots.len(),
            self.size
        );

        let old_slots = mem::replace(&mut self.slots, empty_slots(capacity));
        let live = old_slots.into_iter().filter(|slot| matches!(slot, Slot::Occupied(_)));
        for (slot, target) in live.zip(targets) {
            if let Some(new_slot) = self.slots.get_mut(target) {
                *new_slot = slot;
            }
        }
    }

    /// Returns the number of live entries
    #[must_use]
    pub const fn get_size(&self) -> usize {
        self.size
    }

    /// Returns the number of live entries
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots in the table
    #[must_use]
    pub const fn get_capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the current load factor of the map
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.slots.len() as f64
    }

    /// Returns the number of empty slots. Tombstones do not count as empty.
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.slots.iter().filter(|slot| matches!(slot, Slot::Empty)).count()
    }

    /// Empties every slot, keeping the capacity
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.size = 0;
    }

    /// Returns an iterator over the live key-value pairs in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: &self.slots, index: 0 }
    }

    /// Returns every live key-value pair in slot order
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }
}

impl<V> StringHashMap for QuadraticHashMap<V> {
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

    fn contains_key(&self, key: &str) -> bool {
        Self::contains_key(self, key)
    }

    fn get_size(&self) -> usize {
        self.size
    }

    fn get_capacity(&self) -> usize {
        self.slots.len()
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

impl<V: fmt::Display> fmt::Display for QuadraticHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{index}: None")?,
                Slot::Tombstone => writeln!(f, "{index}: TS")?,
                Slot::Occupied(entry) => {
                    writeln!(f, "{index}: K: {} V: {}", entry.key, entry.value)?;
                }
            }
        }
        Ok(())
    }
}

/// Iterator over the live key-value pairs of a `QuadraticHashMap`
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Reference to the slots of the map
    slots: &'a [Slot<V>],
    /// Current position in the iteration
    index: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Occupied(entry) = slot {
                return Some((entry.key.as_str(), &entry.value));
            }
        }
        None
    }
}

impl<'a, V> IntoIterator for &'a QuadraticHashMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
