//! Cycle detection for eviction chains.
use crate::collection::ConstantTimeCollection;
use backyard_core::{BackyardError, HashInput};

/// Records the `(item, table)` pairs displaced during an eviction chain and reports when the
/// chain keeps revisiting them.
///
/// A chain that revisits a pair once may still terminate (a cuckoo walk can pass through a cycle
/// and come back out of it), so the first repeat is only remembered. Only a repeat observed while
/// that is remembered is reported.
#[derive(Debug, Clone)]
pub struct CycleDetector<T> {
    seen: ConstantTimeCollection<T>,
    duplicate: bool,
}

impl<T: HashInput> CycleDetector<T> {
    /// Create an empty detector, see [`ConstantTimeCollection::new`] for the parameters.
    pub fn new(max_elements: usize, n: usize, k: usize, seed: u64) -> Self {
        Self {
            seen: ConstantTimeCollection::new(max_elements, n, k, seed),
            duplicate: false,
        }
    }

    /// Record the `item`.
    ///
    /// # Errors
    ///
    /// - [`BackyardError::CapacityExceeded`] if the chain has recorded more distinct items than
    ///   the detector was sized for.
    pub fn insert(&mut self, item: T) -> Result<(), BackyardError> {
        self.seen.insert(item)
    }

    /// Check whether the `item` has been recorded, with second-hit semantics.
    ///
    /// # Notes
    ///
    /// - The first hit since the last [`CycleDetector::reset`] returns `false` and arms the
    ///   detector, every hit after that returns `true`. That's why the method takes `&mut self`.
    pub fn contains(&mut self, item: &T) -> bool {
        if !self.seen.contains(item) {
            return false;
        }
        if self.duplicate {
            true
        } else {
            self.duplicate = true;
            false
        }
    }

    /// Forget all recorded items and disarm the detector.
    pub fn reset(&mut self) {
        self.seen.clear();
        self.duplicate = false;
    }

    /// Number of recorded items.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.seen.capacity()
    }
}
