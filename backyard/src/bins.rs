//! First level of the dictionary: an array of small fixed-capacity bins.
use crate::hashing::TornadoHash;
use backyard_core::{HashFunction, HashInput};

/// A fixed-capacity group of slots sharing a single bin index.
///
/// Operations are linear scans over the slots, which is constant time as long as the capacity
/// stays small.
#[derive(Debug, Clone)]
pub struct Bin<T> {
    slots: Box<[Option<T>]>,
    len: usize,
}

impl<T: HashInput> Bin<T> {
    /// Create an empty bin with the given `capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Store the `item` in the first free slot, returns `false` if the bin is full.
    pub fn insert(&mut self, item: T) -> bool {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(item);
                self.len += 1;
                true
            }
            None => false,
        }
    }

    /// Free the slot holding the `item`, returns `false` if it wasn't there.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.slots.iter_mut().find(|slot| slot.as_ref() == Some(item)) {
            Some(slot) => {
                *slot = None;
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.slots.iter().any(|slot| slot.as_ref() == Some(item))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn has_space(&self) -> bool {
        self.len < self.slots.len()
    }
}

/// Collection of [`Bin`]s addressed by a placement hash of the item.
#[derive(Debug, Clone)]
pub struct Bins<T, H = TornadoHash> {
    bins: Box<[Bin<T>]>,
    hasher: H,
    len: usize,
}

impl<T: HashInput, H: HashFunction> Bins<T, H> {
    /// Create `num_bins` empty bins of `bin_capacity` slots each.
    ///
    /// # Parameters
    ///
    /// - `num_bins`: Number of bins, also the range of the placement hash.
    /// - `bin_capacity`: Number of slots per bin.
    /// - `seed`: Seed of the placement hash function.
    pub fn new(num_bins: usize, bin_capacity: usize, seed: u64) -> Self {
        debug_assert!(num_bins > 0, r#""num_bins" must be greater than 0"#);

        Self {
            bins: (0..num_bins).map(|_| Bin::new(bin_capacity)).collect(),
            hasher: H::from_seed(seed, num_bins as u64),
            len: 0,
        }
    }

    #[inline]
    fn bin_idx(&self, item: &T) -> usize {
        self.hasher.hash(item) as usize
    }

    /// Store the `item` in its bin, returns `false` if the bin is full.
    pub fn insert(&mut self, item: T) -> bool {
        let idx = self.bin_idx(&item);
        if self.bins[idx].insert(item) {
            self.len += 1;
            true
        } else {
            false
        }
    }

    pub fn remove(&mut self, item: &T) -> bool {
        let idx = self.bin_idx(item);
        if self.bins[idx].remove(item) {
            self.len -= 1;
            true
        } else {
            false
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.bins[self.bin_idx(item)].contains(item)
    }

    /// Total number of items over all bins.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    /// Get the bin the `item` hashes to.
    pub fn bin(&self, item: &T) -> &Bin<T> {
        &self.bins[self.bin_idx(item)]
    }
}
