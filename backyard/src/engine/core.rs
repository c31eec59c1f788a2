//! Declares core types for [`BackyardCuckoo`].
use crate::bins::Bins;
use crate::detector::CycleDetector;
use crate::hashing::TornadoHash;
use crate::queue::ConstantTimeQueue;
use backyard_core::{HashFunction, Item};

/// Dictionary based on backyard cuckoo hashing.
///
/// # Guarantees
///
/// - O(1) worst-case lookups and removals: one bin, two table slots and `2 * k` queue probes.
/// - O(1) amortized insertions: every insertion performs at most a fixed number of placement steps
///   and leaves unfinished work in the queue for the following insertions. Occasional rebuilds of
///   the queue or the cycle detector make individual calls slower.
///
/// # Notes
///
/// - An item whose placement could not be finished stays in the queue until later insertions get
///   to it. It is present for all purposes in the meantime, but if no further insertions happen it
///   may stay there indefinitely.
///
/// # Examples
///
/// ```rust
/// use backyard::engine::{BackyardCuckoo, Config};
///
/// let mut dictionary = BackyardCuckoo::<u32>::new(&Config::default(), 42).unwrap();
/// dictionary.insert(42).unwrap();
/// dictionary.insert(13).unwrap();
///
/// assert!(dictionary.contains(&42));
/// assert!(dictionary.remove(&42));
/// assert!(!dictionary.contains(&42));
/// assert_eq!(dictionary.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct BackyardCuckoo<T, H = TornadoHash> {
    pub(super) bins: Bins<T, H>,
    pub(super) tables: [Box<[Option<T>]>; 2],
    pub(super) table_hashers: [H; 2],
    pub(super) queue: ConstantTimeQueue<(T, bool)>,
    pub(super) detector: CycleDetector<(T, bool)>,
    pub(super) insert_iterations: usize,
    pub(super) len: usize,
}

/// Where an item is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Bin,
    /// One of the two cuckoo tables, by index.
    CuckooTable(usize),
    /// The queue, with the tag of the table the item is going to try next.
    Queue(bool),
}

/// Number of items held by each of the structures.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub bins: usize,
    pub cuckoo_tables: usize,
    pub queue: usize,
    /// Pairs recorded by the current eviction chain.
    pub detector: usize,
}

impl<T: Item, H: HashFunction> BackyardCuckoo<T, H> {
    #[inline]
    pub(super) fn table_slot(&self, table: usize, item: &T) -> usize {
        self.table_hashers[table].hash(item) as usize
    }

    #[inline]
    pub(super) fn table_holds(&self, table: usize, item: &T) -> bool {
        self.tables[table][self.table_slot(table, item)].as_ref() == Some(item)
    }

    /// Get every location that holds the `item`, in lookup order.
    ///
    /// For a consistent dictionary the result has at most one element.
    pub fn locations(&self, item: &T) -> Vec<Location> {
        let mut locations = Vec::new();
        if self.bins.contains(item) {
            locations.push(Location::Bin);
        }
        for table in 0..2 {
            if self.table_holds(table, item) {
                locations.push(Location::CuckooTable(table));
            }
        }
        for tag in [true, false] {
            if self.queue.contains(&(*item, tag)) {
                locations.push(Location::Queue(tag));
            }
        }
        locations
    }

    /// Get the location of the `item`, if it is present.
    pub fn location(&self, item: &T) -> Option<Location> {
        self.locations(item).first().copied()
    }

    /// Get the number of items held by each structure.
    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            bins: self.bins.len(),
            cuckoo_tables: self.len - self.bins.len() - self.queue.len(),
            queue: self.queue.len(),
            detector: self.detector.len(),
        }
    }

    /// Get the number of present items.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of each of the two cuckoo tables.
    pub fn cuckoo_table_size(&self) -> usize {
        self.tables[0].len()
    }
}
