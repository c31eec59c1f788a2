//! Utilities for testing equivalence between a structure and a reference model from `std`.
use crate::trace::{DequeOp, DictionaryOp};
use backyard_core::Dictionary;
use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

/// A double-ended queue that is only ever popped from the front.
pub trait Deque<T> {
    fn push_back(&mut self, item: T);
    fn push_front(&mut self, item: T);
    fn pop_front(&mut self) -> Option<T>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Verifies that `dictionary` behaves exactly like a [`HashSet`] driven by the same `trace`.
///
/// # Panics
///
/// - If any lookup result, removal result or length ever differs from the reference.
/// - If an insert fails.
/// - If after the trace any item of the reference is missing from the dictionary.
pub fn dictionary_equivalence<T, D>(dictionary: &mut D, trace: &[DictionaryOp<T>])
where
    T: Copy + Eq + Hash + Debug,
    D: Dictionary<T>,
{
    let mut reference = HashSet::new();

    for (step, op) in trace.iter().enumerate() {
        match *op {
            DictionaryOp::Insert(item) => {
                if let Err(error) = dictionary.insert(item) {
                    panic!("Step {}: inserting {:?} failed: {}", step, item, error);
                }
                reference.insert(item);
            }
            DictionaryOp::Remove(item) => {
                assert_eq!(
                    dictionary.remove(&item),
                    reference.remove(&item),
                    "Step {}: removal of {:?} differs",
                    step,
                    item,
                );
            }
            DictionaryOp::Contains(item) => {
                assert_eq!(
                    dictionary.contains(&item),
                    reference.contains(&item),
                    "Step {}: lookup of {:?} differs",
                    step,
                    item,
                );
            }
        }
        assert_eq!(
            dictionary.len(),
            reference.len(),
            "Step {}: length differs after {:?}",
            step,
            op,
        );
    }

    for item in &reference {
        assert!(dictionary.contains(item), "{:?} is missing", item);
    }
}

/// Verifies that `deque` pops values in exactly the same order as a [`VecDeque`] driven by the
/// same `trace`.
///
/// # Panics
///
/// - If any popped value or length differs from the reference.
pub fn deque_equivalence<T, Q>(deque: &mut Q, trace: &[DequeOp<T>])
where
    T: Copy + PartialEq + Debug,
    Q: Deque<T>,
{
    let mut reference = VecDeque::new();

    for (step, op) in trace.iter().enumerate() {
        match *op {
            DequeOp::PushBack(item) => {
                deque.push_back(item);
                reference.push_back(item);
            }
            DequeOp::PushFront(item) => {
                deque.push_front(item);
                reference.push_front(item);
            }
            DequeOp::PopFront => {
                assert_eq!(
                    deque.pop_front(),
                    reference.pop_front(),
                    "Step {}: popped values differ",
                    step,
                );
            }
        }
        assert_eq!(deque.len(), reference.len(), "Step {}: length differs", step);
    }

    while let Some(expected) = reference.pop_front() {
        assert_eq!(deque.pop_front(), Some(expected), "Draining differs");
    }
    assert_eq!(deque.pop_front(), None, "Deque must be drained");
}
