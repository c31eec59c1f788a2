//! A fixed-capacity set with constant-time insertion, lookup and clearing.
//!
//! Uses the same `k`-probe placement as [`crate::queue::ConstantTimeQueue`], but instead of a
//! linked list the probe slots point into a dense array of elements, and every element points
//! back at its slot. A slot is live only when both pointers agree and the element index is below
//! the current length, so clearing the set is just resetting the length.
use crate::hashing::CarterWegmanHash;
use backyard_core::{BackyardError, HashFunction, HashInput};
use log::debug;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Element of the dense array: the item and the probe slot it occupies.
#[derive(Debug, Clone, Copy)]
struct Element<T> {
    item: T,
    slot: usize,
}

/// Constant-time set with a hard limit on the number of elements.
#[derive(Debug, Clone)]
pub struct ConstantTimeCollection<T> {
    elements: Vec<Element<T>>,
    max_elements: usize,
    slots: Box<[usize]>,
    hashers: Box<[CarterWegmanHash]>,
    sub_array_size: usize,
    num_rebuilds: usize,
}

impl<T: HashInput> ConstantTimeCollection<T> {
    const STRUCTURE: &'static str = "cycle detector";

    /// Create an empty collection.
    ///
    /// # Parameters
    ///
    /// - `max_elements`: Maximum number of elements, must not exceed `n * k`.
    /// - `n`: Size of each sub-array of probe slots.
    /// - `k`: Number of sub-arrays, which is also the number of probes per item.
    /// - `seed`: Seed for the probe hash functions.
    pub fn new(max_elements: usize, n: usize, k: usize, seed: u64) -> Self {
        debug_assert!(n > 0 && k > 0, r#""n" and "k" must be greater than 0"#);
        debug_assert!(
            max_elements <= n * k,
            r#""max_elements" must not exceed the number of slots "n * k""#,
        );

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        Self {
            elements: Vec::with_capacity(max_elements),
            max_elements,
            slots: vec![0; n * k].into_boxed_slice(),
            hashers: (0..k)
                .map(|_| CarterWegmanHash::from_seed(rng.next_u64(), n as u64))
                .collect(),
            sub_array_size: n,
            num_rebuilds: 0,
        }
    }

    #[inline]
    fn probes<'a>(&'a self, item: &'a T) -> impl Iterator<Item = usize> + 'a {
        self.hashers
            .iter()
            .enumerate()
            .map(move |(i, h)| i * self.sub_array_size + h.hash(item) as usize)
    }

    /// Get the element occupying the `slot`, if the slot is live.
    #[inline]
    fn occupant(&self, slot: usize) -> Option<&Element<T>> {
        self.elements
            .get(self.slots[slot])
            .filter(|element| element.slot == slot)
    }

    fn try_place(&mut self, item: T) -> bool {
        let free = self.probes(&item).find(|&slot| self.occupant(slot).is_none());
        match free {
            Some(slot) => {
                self.slots[slot] = self.elements.len();
                self.elements.push(Element { item, slot });
                true
            }
            None => false,
        }
    }

    /// Re-sample all probe functions and re-insert the new item followed by the current ones.
    fn rebuild(&mut self, item: T) {
        let mut items = Vec::with_capacity(self.elements.len() + 1);
        items.push(item);
        items.extend(self.elements.iter().map(|element| element.item));

        loop {
            self.num_rebuilds += 1;
            debug!(
                "Rebuilding the collection (rebuild #{}, {} items, capacity {})",
                self.num_rebuilds,
                items.len(),
                self.max_elements,
            );

            for hasher in self.hashers.iter_mut() {
                hasher.randomize_parameters();
            }
            self.clear();

            if items.iter().all(|&item| self.try_place(item)) {
                return;
            }
        }
    }

    /// Insert the `item`. Inserting a present item changes nothing.
    ///
    /// # Errors
    ///
    /// - [`BackyardError::CapacityExceeded`] if the item is new and the collection already holds
    ///   `max_elements` items.
    pub fn insert(&mut self, item: T) -> Result<(), BackyardError> {
        if self.contains(&item) {
            return Ok(());
        }
        if self.elements.len() == self.max_elements {
            return Err(BackyardError::CapacityExceeded {
                structure: Self::STRUCTURE,
                capacity: self.max_elements,
            });
        }
        if !self.try_place(item) {
            self.rebuild(item);
        }
        Ok(())
    }

    pub fn contains(&self, item: &T) -> bool {
        self.probes(item)
            .any(|slot| matches!(self.occupant(slot), Some(element) if element.item == *item))
    }

    /// Remove all items in constant time. Keeps the current hash functions.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_elements
    }

    /// Number of rebuilds performed since construction.
    pub fn num_rebuilds(&self) -> usize {
        self.num_rebuilds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_insert_and_contains() {
        let mut collection = ConstantTimeCollection::<u64>::new(3, 5, 3, 0);
        for item in [42, 13, 7] {
            collection.insert(item).unwrap();
        }

        assert!(collection.contains(&42));
        assert!(collection.contains(&13));
        assert!(collection.contains(&7));
        assert!(!collection.contains(&99));
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn test_rebuild_preserves_membership() {
        let mut collection = ConstantTimeCollection::<u64>::new(9, 3, 3, 1);
        // Filling all 9 slots is very likely to force multiple rebuilds.
        for item in 0..9 {
            collection.insert(item).unwrap();
        }

        for item in 0..9 {
            assert!(collection.contains(&item), "{} is missing", item);
        }
        assert!(!collection.contains(&20));
    }

    #[test]
    fn test_clear() {
        let mut collection = ConstantTimeCollection::<u64>::new(10, 5, 3, 2);
        collection.insert(42).unwrap();
        collection.insert(13).unwrap();

        collection.clear();
        assert!(collection.is_empty());
        assert!(!collection.contains(&42));
        assert!(!collection.contains(&13));

        collection.insert(51).unwrap();
        collection.insert(13).unwrap();
        assert!(!collection.is_empty());
        assert!(collection.contains(&51));
        assert!(collection.contains(&13));
        assert!(!collection.contains(&42));
    }

    #[test]
    fn test_duplicate_inserts() {
        let mut collection = ConstantTimeCollection::<u64>::new(10, 5, 3, 3);
        for _ in 0..3 {
            collection.insert(42).unwrap();
        }

        assert_eq!(collection.len(), 1);
        collection.insert(13).unwrap();
        assert!(collection.contains(&42) && collection.contains(&13));
    }

    #[test]
    fn test_alternating_inserts_and_clears() {
        let mut collection = ConstantTimeCollection::<u64>::new(10, 5, 3, 4);
        for round in 0..5 {
            for i in 0..5 {
                collection.insert(i + round * 10).unwrap();
            }
            for i in 0..5 {
                assert!(collection.contains(&(i + round * 10)));
            }

            collection.clear();
            for i in 0..5 {
                assert!(!collection.contains(&(i + round * 10)));
            }
        }
    }

    #[test]
    fn test_insert_beyond_capacity_fails() {
        let mut collection = ConstantTimeCollection::<(u32, bool)>::new(2, 5, 3, 5);
        collection.insert((1, true)).unwrap();
        collection.insert((1, false)).unwrap();
        // Present items are still accepted at capacity.
        collection.insert((1, true)).unwrap();

        assert_eq!(
            collection.insert((2, true)),
            Err(BackyardError::CapacityExceeded {
                structure: "cycle detector",
                capacity: 2,
            }),
        );
        assert_eq!(collection.len(), 2);
        assert!(!collection.contains(&(2, true)));
    }
}
