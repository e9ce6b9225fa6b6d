//! Tests for the IndexVec module.

use super::*;

crate::define_idx!(TestId);

// ============================================================================
// BASIC OPERATIONS
// ============================================================================

#[test]
fn test_new_and_empty() {
    let vec: IndexVec<TestId, i32> = IndexVec::new();
    assert!(vec.is_empty());
    assert_eq!(vec.len(), 0);
    assert_eq!(vec.next_index(), TestId(0));
}

#[test]
fn test_push_returns_sequential_ids() {
    let mut vec: IndexVec<TestId, &str> = IndexVec::new();
    let a = vec.push("types");
    let b = vec.push("control");

    assert_eq!(a, TestId(0));
    assert_eq!(b, TestId(1));
    assert_eq!(vec[b], "control");
    assert_eq!(vec.next_index(), TestId(2));
}

#[test]
fn test_get_out_of_bounds() {
    let mut vec: IndexVec<TestId, i32> = IndexVec::new();
    vec.push(1);
    assert_eq!(vec.get(TestId(0)), Some(&1));
    assert_eq!(vec.get(TestId(5)), None);
}

#[test]
fn test_index_mut() {
    let mut vec: IndexVec<TestId, i32> = IndexVec::new();
    let id = vec.push(1);
    vec[id] += 41;
    *vec.get_mut(id).unwrap() += 0;
    assert_eq!(vec[id], 42);
}

// ============================================================================
// ITERATION
// ============================================================================

#[test]
fn test_iter_enumerated() {
    let vec: IndexVec<TestId, char> = "abc".chars().collect();
    let pairs: Vec<_> = vec.iter_enumerated().map(|(i, &c)| (i.0, c)).collect();
    assert_eq!(pairs, vec![(0, 'a'), (1, 'b'), (2, 'c')]);
}

#[test]
fn test_indices_reverse() {
    let vec: IndexVec<TestId, i32> = vec![1, 2, 3].into();
    let ids: Vec<_> = vec.indices().rev().collect();
    assert_eq!(ids, vec![TestId(2), TestId(1), TestId(0)]);
}

fn last_index<I: Idx, T>(vec: &IndexVec<I, T>) -> Option<I> {
    vec.indices().next_back()
}

#[test]
fn test_indices_from_generic_code() {
    let vec: IndexVec<TestId, String> = vec!["a".to_string(), "b".to_string()].into();
    assert_eq!(last_index(&vec), Some(TestId(1)));
    assert_eq!(last_index(&IndexVec::<usize, ()>::new()), None);
}

#[test]
fn test_equality_ignores_index_type() {
    let a: IndexVec<TestId, i32> = vec![1, 2].into();
    let b: IndexVec<TestId, i32> = [1, 2].into_iter().collect();
    assert_eq!(a, b);
    assert_eq!(format!("{:?}", a), "[1, 2]");
}

#[test]
fn test_usize_index() {
    let mut vec: IndexVec<usize, i32> = IndexVec::default();
    let i = vec.push(7);
    assert_eq!(i, 0);
    assert_eq!(vec.as_slice(), &[7]);
}
