//! Implements constructors for [`BackyardCuckoo`].
use crate::bins::Bins;
use crate::detector::CycleDetector;
use crate::engine::{BackyardCuckoo, Config};
use crate::queue::ConstantTimeQueue;
use backyard_core::{BackyardError, HashFunction, Item};
use log::warn;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

impl<T: Item, H: HashFunction> BackyardCuckoo<T, H> {
    /// Creates an empty dictionary.
    ///
    /// # Parameters
    ///
    /// - `config`: Dimensions of the structures.
    /// - `seed`: The seed for the random number generator that seeds all the hash functions.
    ///   The same seed and the same sequence of operations always produce the same layout.
    ///
    /// # Errors
    ///
    /// - [`BackyardError::InvalidConfig`] if `config` doesn't pass [`Config::validate`].
    pub fn new(config: &Config, seed: u64) -> Result<Self, BackyardError> {
        config.validate()?;

        if config.detector_elements < config.insert_iterations {
            warn!(
                "Cycle detector holds {} pairs but an insertion may perform {} steps, \
                 long eviction chains will fail with a capacity violation",
                config.detector_elements, config.insert_iterations,
            );
        }

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let table_size = config.cuckoo_table_size;

        Ok(Self {
            bins: Bins::new(config.num_bins, config.bin_capacity, rng.next_u64()),
            tables: [
                vec![None; table_size].into_boxed_slice(),
                vec![None; table_size].into_boxed_slice(),
            ],
            table_hashers: [
                H::from_seed(rng.next_u64(), table_size as u64),
                H::from_seed(rng.next_u64(), table_size as u64),
            ],
            queue: ConstantTimeQueue::new(config.queue_n, config.queue_k, rng.next_u64()),
            detector: CycleDetector::new(
                config.detector_elements,
                config.detector_n,
                config.detector_k,
                rng.next_u64(),
            ),
            insert_iterations: config.insert_iterations,
            len: 0,
        })
    }
}
