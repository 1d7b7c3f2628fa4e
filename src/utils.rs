//! The contract shared by both map variants and helpers built on it

use crate::hash::HashFunction;

/// Operations common to every string-keyed map in this crate.
///
/// Both `QuadraticHashMap` and `ChainedHashMap` implement this trait, which lets
/// generic code (and `LockedHashMap`) work with either collision strategy.
pub trait StringHashMap {
    /// The type of the stored values
    type Value;

    /// Inserts or overwrites `key`, returning the previous value if there was one
    fn put(&mut self, key: String, value: Self::Value) -> Option<Self::Value>;

    /// Returns a reference to the value stored for `key`
    fn get(&self, key: &str) -> Option<&Self::Value>;

    /// Removes `key`, returning its value. Missing keys are ignored.
    fn remove(&mut self, key: &str) -> Option<Self::Value>;

    /// Returns true if the map holds a live entry for `key`
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of live entries
    fn get_size(&self) -> usize;

    /// Number of slots in the table. Always prime.
    fn get_capacity(&self) -> usize;

    /// Ratio of live entries to slots
    #[allow(clippy::cast_precision_loss)]
    fn table_load(&self) -> f64 {
        self.get_size() as f64 / self.get_capacity() as f64
    }

    /// Number of slots holding nothing at all
    fn empty_buckets(&self) -> usize;

    /// Removes every entry while keeping the capacity
    fn clear(&mut self);

    /// Rehashes every live entry into a table of at least `new_capacity` slots
    fn resize_table(&mut self, new_capacity: usize);

    /// Returns every stored pair in table order
    fn get_keys_and_values(&self) -> Vec<(String, Self::Value)>
    where
        Self::Value: Clone;

    /// Returns the keys in table order
    fn keys(&self) -> Vec<String>
    where
        Self::Value: Clone,
    {
        self.get_keys_and_values().into_iter().map(|(k, _)| k).collect()
    }

    /// Returns the values in table order
    fn values(&self) -> Vec<Self::Value>
    where
        Self::Value: Clone,
    {
        self.get_keys_and_values().into_iter().map(|(_, v)| v).collect()
    }
}

/// Builds a map of type `M` from key-value pairs using the given initial capacity and
/// hash function
pub fn from_pairs<M, K, I>(capacity: usize, hash_function: HashFunction, pairs: I) -> M
where
    M: StringHashMap + From<(usize, HashFunction)>,
    K: Into<String>,
    I: IntoIterator<Item = (K, M::Value)>,
{
    let mut map = M::from((capacity, hash_function));

    for (key, value) in pairs {
        map.put(key.into(), value);
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChainedHashMap, QuadraticHashMap, hash::hash_function_2};

    /// Exercises the shared contract the same way for either variant
    fn check_contract<M>(mut map: M)
    where
        M: StringHashMap<Value = i32>,
    {
        assert_eq!(map.put("a".to_string(), 1), None);
        assert_eq!(map.put("b".to_string(), 2), None);
        assert_eq!(map.put("a".to_string(), 10), Some(1));
        assert_eq!(map.get_size(), 2);
        assert!(map.contains_key("a"));
        assert!(!map.contains_key("c"));

        let mut keys = map.keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);

        let mut values = map.values();
        values.sort_unstable();
        assert_eq!(values, vec![2, 10]);

        assert_eq!(map.remove("a"), Some(10));
        assert_eq!(map.remove("a"), None);
        assert_eq!(map.get_size(), 1);

        let capacity = map.get_capacity();
        map.clear();
        assert_eq!(map.get_size(), 0);
        assert_eq!(map.get_capacity(), capacity);
        assert_eq!(map.empty_buckets(), capacity);
        assert!(map.get_keys_and_values().is_empty());
    }

    #[test]
    fn test_contract_for_both_variants() {
        check_contract(QuadraticHashMap::with_capacity(11));
        check_contract(ChainedHashMap::with_capacity(11));
    }

    #[test]
    fn test_from_pairs() {
        let data = vec![("a", 1), ("b", 2), ("c", 3)];

        let map: QuadraticHashMap<i32> = from_pairs(7, hash_function_2, data.clone());
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("c"), Some(&3));
        assert_eq!(map.len(), 3);
        assert_eq!(map.get_capacity(), 7);

        let map: ChainedHashMap<i32> = from_pairs(7, hash_function_2, data);
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.len(), 3);
    }
}
