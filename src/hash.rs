//! String hash functions accepted by the maps.
//!
//! A map only assumes its hash function is deterministic. Any `fn(&str) -> usize`
//! can be passed to the constructors; the ones below are provided for convenience.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// The hash function type stored by both map variants
pub type HashFunction = fn(&str) -> usize;

/// Sums the code points of the key.
///
/// Anagrams collide, which makes this function handy for exercising collision paths.
#[must_use]
pub fn hash_function_1(key: &str) -> usize {
    key.chars().fold(0, |hash, c| hash.wrapping_add(c as usize))
}

/// Sums the code points of the key weighted by their 1-based position.
#[must_use]
pub fn hash_function_2(key: &str) -> usize {
    key.chars()
        .zip(1usize..)
        .fold(0, |hash, (c, position)| hash.wrapping_add(position.wrapping_mul(c as usize)))
}

/// Hashes the key with the standard library's `DefaultHasher`.
///
/// `DefaultHasher::new()` always starts from the same keys, so the result is stable
/// within a build of the program.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn sip_hash(key: &str) -> usize {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_function_1_sums_code_points() {
        assert_eq!(hash_function_1(""), 0);
        assert_eq!(hash_function_1("a"), 97);
        assert_eq!(hash_function_1("ab"), 97 + 98);
        assert_eq!(hash_function_1("ab"), hash_function_1("ba"));
    }

    #[test]
    fn test_hash_function_2_weights_positions() {
        assert_eq!(hash_function_2(""), 0);
        assert_eq!(hash_function_2("ab"), 97 + 2 * 98);
        assert_eq!(hash_function_2("ba"), 98 + 2 * 97);
        assert_ne!(hash_function_2("ab"), hash_function_2("ba"));
    }

    #[test]
    fn test_sip_hash_is_deterministic() {
        assert_eq!(sip_hash("key1"), sip_hash("key1"));
        assert_ne!(sip_hash("key1"), sip_hash("key2"));
    }
}
