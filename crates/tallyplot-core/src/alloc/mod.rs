//! Hashed collection types used across tallyplot.
//!
//! This module provides:
//! - Re-exports of AHash-backed hash collections
//! - [`IndexMap`], an insertion-ordered map with the same hasher, used where
//!   grouping must remember first-seen order

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

/// Insertion-ordered hash map using AHash.
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, RandomState>;

/// Create an empty [`IndexMap`] with room for `capacity` entries.
pub fn index_map_with_capacity<K, V>(capacity: usize) -> IndexMap<K, V> {
    IndexMap::with_capacity_and_hasher(capacity, RandomState::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert("key", "value");
        assert_eq!(map.get("key"), Some(&"value"));
    }

    #[test]
    fn test_hashset_ahash() {
        let mut set = HashSet::new();
        set.insert(42);
        assert!(set.contains(&42));
    }

    #[test]
    fn test_index_map_keeps_first_seen_order() {
        let mut map = index_map_with_capacity(4);
        for key in ["b", "a", "b", "c", "a"] {
            *map.entry(key).or_insert(0) += 1;
        }
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(map["b"], 2);
    }
}
