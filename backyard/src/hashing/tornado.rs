//! Table-driven hashing in the spirit of tabulation/tornado hashing.
//!
//! Every input byte selects a random 64-bit word from its own lookup table and the words are
//! XOR-folded together. A second pass then folds the bytes of the intermediate hash through the
//! same tables, which spreads small input differences over the whole word.
//!
//! Much faster than [`super::CarterWegmanHash`] but without a proven independence guarantee,
//! so it is used for bulk placement (bins and cuckoo tables) only.
use super::common::{NUM_TORNADO_TABLES, TORNADO_TABLE_SIZE};
use backyard_core::{HashFunction, HashInput};
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Lookup tables of a single function.
pub type TornadoTables = [[u64; TORNADO_TABLE_SIZE]; NUM_TORNADO_TABLES];

/// Hashes the lowest `width` bytes of `word` into a full 64-bit value.
#[inline]
pub fn tornado(word: u128, width: usize, tables: &TornadoTables) -> u64 {
    debug_assert!(width <= 16, r#""width" must be <= 16"#);

    let bytes = word.to_le_bytes();
    let mut hash: u64 = 0;
    for (i, &byte) in bytes[..width].iter().enumerate() {
        // Bytes past the eighth reuse the tables, rotated to keep them apart from the first ones.
        hash ^= tables[i % NUM_TORNADO_TABLES][byte as usize]
            .rotate_left(8 * (i / NUM_TORNADO_TABLES) as u32);
    }

    let mut derived = hash;
    for (i, &byte) in hash.to_le_bytes().iter().enumerate() {
        derived ^= tables[i][byte as usize].rotate_left(u32::BITS);
    }
    derived
}

/// Re-samplable tornado hash function.
#[derive(Debug, Clone)]
pub struct TornadoHash {
    rng: Xoshiro256PlusPlus,
    range: u64,
    tables: Box<TornadoTables>,
}

impl TornadoHash {
    fn fill_tables(&mut self) {
        for table in self.tables.iter_mut() {
            for word in table.iter_mut() {
                *word = self.rng.next_u64();
            }
        }
    }
}

impl HashFunction for TornadoHash {
    fn from_seed(seed: u64, range: u64) -> Self {
        debug_assert!(range > 0, r#""range" must be greater than 0"#);

        let mut hasher = Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            range,
            tables: Box::new([[0; TORNADO_TABLE_SIZE]; NUM_TORNADO_TABLES]),
        };
        hasher.fill_tables();
        hasher
    }

    fn range(&self) -> u64 {
        self.range
    }

    fn set_range(&mut self, range: u64) {
        debug_assert!(range > 0, r#""range" must be greater than 0"#);
        self.range = range;
    }

    fn randomize_parameters(&mut self) {
        self.fill_tables();
    }

    #[inline]
    fn hash<T: HashInput>(&self, item: &T) -> u64 {
        tornado(item.to_word(), T::WIDTH, &self.tables) % self.range
    }
}
