//! Owned singly linked chain used as the bucket of `ChainedHashMap`

use std::fmt;

/// A node of the chain
struct Node<V> {
    /// The key stored in the node
    key: String,
    /// The value associated with the key
    value: V,
    /// The rest of the chain
    next: Option<Box<Node<V>>>,
}

impl<V: fmt::Debug> fmt::Debug for Node<V> {
    // Leaves out `next`, which would recurse once per node
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// A singly linked list of key-value nodes. New nodes go to the head.
///
/// `Clone`, `Debug` and `Drop` walk the nodes in a loop, so a chain holding every entry
/// of the map does not exhaust the stack.
pub(crate) struct Chain<V> {
    /// First node, if any
    head: Option<Box<Node<V>>>,
    /// Number of nodes
    len: usize,
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self { head: None, len: 0 }
    }
}

impl<V> Chain<V> {
    /// Returns the number of nodes
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the chain has no nodes
    pub(crate) const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Pushes a new node at the head without checking for an existing key
    #[allow(clippy::arithmetic_side_effects)]
    pub(crate) fn insert(&mut self, key: String, value: V) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { key, value, next }));
        self.len += 1;
    }

    /// Returns the value of the first node holding `key`
    pub(crate) fn find(&self, key: &str) -> Option<&V> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value of the first node holding `key`
    pub(crate) fn find_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut cursor = self.head.as_deref_mut();
        while let Some(node) = cursor {
            if node.key == key {
                return Some(&mut node.value);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }

    /// Unlinks the first node holding `key` and returns its value
    #[allow(clippy::arithmetic_side_effects)]
    pub(crate) fn remove(&mut self, key: &str) -> Option<V> {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| node.key != key) {
            cursor = &mut cursor.as_mut()?.next;
        }

        let mut removed = cursor.take()?;
        *cursor = removed.next.take();
        self.len -= 1;
        Some(removed.value)
    }

    /// Unlinks the head node and returns its pair
    #[allow(clippy::arithmetic_side_effects)]
    pub(crate) fn pop_front(&mut self) -> Option<(String, V)> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        self.len -= 1;
        Some((node.key, node.value))
    }

    /// Returns an iterator over the pairs from head to tail
    pub(crate) fn iter(&self) -> Iter<'_, V> {
        Iter { next: self.head.as_deref() }
    }
}

impl<V: Clone> Clone for Chain<V> {
    fn clone(&self) -> Self {
        let pairs: Vec<(&str, &V)> = self.iter().collect();
        let mut chain = Self::default();
        for (key, value) in pairs.into_iter().rev() {
            chain.insert(key.to_string(), value.clone());
        }
        chain
    }
}

impl<V: fmt::Debug> fmt::Debug for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<V> Drop for Chain<V> {
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

/// Iterator over the pairs of a chain
#[derive(Debug, Clone)]
pub(crate) struct Iter<'a, V> {
    /// The node to yield next
    next: Option<&'a Node<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some((node.key.as_str(), &node.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_of(keys: &[&str]) -> Chain<usize> {
        let mut chain = Chain::default();
        for (i, key) in keys.iter().enumerate() {
            chain.insert((*key).to_string(), i);
        }
        chain
    }

    #[test]
    fn test_insert_goes_to_head() {
        let chain = chain_of(&["a", "b", "c"]);
        let keys: Vec<&str> = chain.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["c", "b", "a"]);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn test_find_and_find_mut() {
        let mut chain = chain_of(&["a", "b"]);
        assert_eq!(chain.find("a"), Some(&0));
        assert_eq!(chain.find("z"), None);

        if let Some(value) = chain.find_mut("b") {
            *value = 7;
        }
        assert_eq!(chain.find("b"), Some(&7));
        assert_eq!(chain.find_mut("z"), None);
    }

    #[test]
    fn test_remove_head_middle_and_tail() {
        let mut chain = chain_of(&["a", "b", "c", "d"]);

        assert_eq!(chain.remove("d"), Some(3));
        assert_eq!(chain.remove("b"), Some(1));
        assert_eq!(chain.remove("a"), Some(0));
        assert_eq!(chain.remove("a"), None);

        let keys: Vec<&str> = chain.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["c"]);
        assert_eq!(chain.len(), 1);

        assert_eq!(chain.remove("c"), Some(2));
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn test_pop_front() {
        let mut chain = chain_of(&["a", "b"]);
        assert_eq!(chain.pop_front(), Some(("b".to_string(), 1)));
        assert_eq!(chain.pop_front(), Some(("a".to_string(), 0)));
        assert_eq!(chain.pop_front(), None);
        assert!(chain.is_empty());
    }

    #[test]
    fn test_long_chain_drops_without_overflow() {
        let mut chain = Chain::default();
        for i in 0..200_000 {
            chain.insert(i.to_string(), i);
        }
        assert_eq!(chain.len(), 200_000);
        drop(chain);
    }

    #[test]
    fn test_clone_keeps_order() {
        let chain = chain_of(&["a", "b", "c"]);
        let copy = chain.clone();
        assert!(chain.iter().eq(copy.iter()));
        assert_eq!(copy.len(), 3);
        assert_eq!(format!("{copy:?}"), r#"[("c", 2), ("b", 1), ("a", 0)]"#);
    }

    #[test]
    fn test_long_chain_clones_and_formats_without_overflow() {
        let mut chain = Chain::default();
        for i in 0..200_000 {
            chain.insert(i.to_string(), i);
        }

        let copy = chain.clone();
        assert_eq!(copy.len(), 200_000);
        assert!(chain.iter().eq(copy.iter()));

        let formatted = format!("{copy:?}");
        assert!(formatted.starts_with(r#"[("199999", 199999), ("199998", 199998)"#));
        assert!(formatted.ends_with(r#"("0", 0)]"#));
    }
}
