//! Random operation traces for driving a structure and its reference model side by side.
use crate::generate::Generate;
use rand::Rng;
use std::hash::Hash;

/// A single operation on a [`backyard_core::Dictionary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryOp<T> {
    Insert(T),
    Remove(T),
    Contains(T),
}

/// A single operation on a double-ended queue that is only ever popped from the front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DequeOp<T> {
    PushBack(T),
    PushFront(T),
    PopFront,
}

/// Generates a dictionary trace over a fixed pool of `keys`.
///
/// Drawing keys from a small pool makes repeated inserts, removals of present keys and lookups
/// of absent keys all frequent. Inserts are twice as likely as removals, so the dictionary grows
/// over the course of the trace.
pub fn generate_dictionary_trace<R: Rng, T: Copy>(
    rng: &mut R,
    keys: &[T],
    len: usize,
) -> Vec<DictionaryOp<T>> {
    debug_assert!(!keys.is_empty(), r#""keys" must not be empty"#);

    (0..len)
        .map(|_| {
            let key = keys[rng.random_range(0..keys.len())];
            match rng.random_range(0..4) {
                0 | 1 => DictionaryOp::Insert(key),
                2 => DictionaryOp::Remove(key),
                _ => DictionaryOp::Contains(key),
            }
        })
        .collect()
}

/// Generates a deque trace of pushes of unique values and pops.
///
/// The number of queued values never exceeds `max_len`: once it is reached the next operation is
/// always a pop.
pub fn generate_deque_trace<R, T>(
    rng: &mut R,
    params: &T::GenerateParams,
    len: usize,
    max_len: usize,
) -> Vec<DequeOp<T>>
where
    R: Rng,
    T: Generate<R> + Hash + Eq + Clone,
{
    debug_assert!(max_len > 0, r#""max_len" must be greater than 0"#);

    let mut values = T::generate_many(rng, params, len).into_iter();
    let mut queued: usize = 0;
    let mut trace = Vec::with_capacity(len);

    for _ in 0..len {
        let choice = if queued >= max_len {
            2
        } else {
            rng.random_range(0..3)
        };
        let op = match choice {
            0 => DequeOp::PushBack(values.next().unwrap()),
            1 => DequeOp::PushFront(values.next().unwrap()),
            _ => DequeOp::PopFront,
        };
        match op {
            DequeOp::PopFront => queued = queued.saturating_sub(1),
            _ => queued += 1,
        }
        trace.push(op);
    }
    trace
}
