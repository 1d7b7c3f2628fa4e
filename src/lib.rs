//! # Prime Map
//!
//! String-keyed hash maps built from scratch around prime table sizes.
//!
//! This crate provides two hash map implementations with the same API:
//!
//! - `QuadraticHashMap`: open addressing with quadratic probing and tombstone deletion,
//!   kept below a load factor of 0.5
//! - `ChainedHashMap`: separate chaining with one linked chain per slot, kept below a
//!   load factor of 1.0
//!
//! Both round every capacity up to the next prime, grow to the next prime above twice the
//! capacity when an insertion finds the load factor at its threshold, and rehash entries
//! one by one into the new table. `LockedHashMap` wraps either variant for shared use,
//! and `find_mode` shows the chained map at work as a frequency counter.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primemap::{QuadraticHashMap, hash_function_1};
//!
//! // Capacity 20 is rounded up to the prime 23
//! let mut map = QuadraticHashMap::new(20, hash_function_1);
//! assert_eq!(map.get_capacity(), 23);
//!
//! // Insert values
//! map.put("apple", 1);
//! map.put("banana", 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple", 10);
//! assert_eq!(map.get("apple"), Some(&10));
//! assert_eq!(map.get_size(), 2);
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Separate Chaining
//!
//! ```rust
//! use primemap::{ChainedHashMap, hash_function_2};
//!
//! let mut map = ChainedHashMap::new(3, hash_function_2);
//! for i in 0..10 {
//!     map.put(format!("key{i}"), i);
//! }
//!
//! // The table grew from 3 to 7 and then to 17 slots
//! assert_eq!(map.get_capacity(), 17);
//! assert_eq!(map.get_keys_and_values().len(), 10);
//! ```
//!
//! ## Shared Usage
//!
//! ```rust
//! use primemap::{ChainedHashMap, LockedHashMap};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let map = Arc::new(LockedHashMap::new(ChainedHashMap::with_capacity(11)));
//!
//! let handles: Vec<_> = (0..2)
//!     .map(|t| {
//!         let map = Arc::clone(&map);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 map.put(format!("key-{t}-{i}"), i);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(map.len(), 200);
//! ```

/// Owned linked chain backing each slot of the chained map
mod chain;
/// Module implementing the separate chaining hash map
mod chained_hashmap;
/// Error types
mod error;
/// String hash functions
mod hash;
/// Module implementing a lock-protected wrapper for shared access
mod locked_map;
/// Mode computation built on the chained map
mod mode;
/// Prime table sizing
mod prime;
/// Module implementing the open addressing hash map with quadratic probing
mod quadratic_hashmap;
/// The contract shared by both maps
mod utils;

pub use chained_hashmap::ChainedHashMap;
pub use error::MapError;
pub use hash::{HashFunction, hash_function_1, hash_function_2, sip_hash};
pub use locked_map::LockedHashMap;
pub use mode::find_mode;
pub use prime::{LARGEST_PRIME, is_prime, next_prime};
pub use quadratic_hashmap::QuadraticHashMap;
pub use utils::{StringHashMap, from_pairs};

/// Items specific to the open addressing variant
pub mod quadratic {
    pub use crate::quadratic_hashmap::{DEFAULT_CAPACITY, Iter, MAX_LOAD_FACTOR};
}

/// Items specific to the separate chaining variant
pub mod chained {
    pub use crate::chained_hashmap::{DEFAULT_CAPACITY, Iter, MAX_LOAD_FACTOR};
}
