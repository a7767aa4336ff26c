//! Helpers for identifier lists

use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Remove the first occurrence of `value` from `list`
///
/// Returns true if an element was removed.
pub fn remove_value<T: PartialEq>(list: &mut Vec<T>, value: &T) -> bool {
    match list.iter().position(|v| v == value) {
        Some(idx) => {
            list.remove(idx);
            true
        }
        None => false,
    }
}

/// Drop repeated values, keeping each value at its last position
///
/// A re-arriving identifier moves to where it arrived last, so the same rule
/// applies inside a single batch.
pub fn dedupe_keep_last<T: Eq + Hash + Clone>(values: Vec<T>) -> Vec<T> {
    let mut seen = FxHashSet::default();
    let mut kept: Vec<T> = values
        .into_iter()
        .rev()
        .filter(|v| seen.insert(v.clone()))
        .collect();
    kept.reverse();
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_value_present() {
        let mut list = vec!["a", "b", "c"];
        assert!(remove_value(&mut list, &"b"));
        assert_eq!(list, vec!["a", "c"]);
    }

    #[test]
    fn test_remove_value_absent() {
        let mut list = vec![1, 2];
        assert!(!remove_value(&mut list, &3));
        assert_eq!(list, vec![1, 2]);
    }

    #[test]
    fn test_remove_value_first_occurrence_only() {
        let mut list = vec![1, 2, 1];
        assert!(remove_value(&mut list, &1));
        assert_eq!(list, vec![2, 1]);
    }

    #[test]
    fn test_dedupe_keep_last() {
        assert_eq!(dedupe_keep_last(vec![1, 2, 1, 3]), vec![2, 1, 3]);
        assert_eq!(dedupe_keep_last(vec![1, 1, 1]), vec![1]);
        assert_eq!(dedupe_keep_last(Vec::<i32>::new()), Vec::<i32>::new());
    }

    #[test]
    fn test_dedupe_preserves_unique_order() {
        assert_eq!(dedupe_keep_last(vec!["c", "a", "b"]), vec!["c", "a", "b"]);
    }
}
