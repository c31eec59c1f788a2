//! Implementation of the multiply-mod-prime hashing scheme from [Carter & Wegman, 1979].
//!
//! The family is pairwise independent, which is what the probing structures
//! ([`crate::queue::ConstantTimeQueue`], [`crate::collection::ConstantTimeCollection`]) rely on
//! for their rebuild-probability bounds.
//!
//! [Carter & Wegman, 1979]: https://doi.org/10.1016/0022-0000(79)90044-8
use super::common::sample_prime;
use backyard_core::{HashFunction, HashInput};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Parameters of a single function of the family.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CarterWegmanState {
    multiplier: u64,
    offset: u64,
    prime: u64,
}

impl CarterWegmanState {
    /// Draw a prime from the pool, then `a` from `[1, p)` and `b` from `[0, p)`.
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        let prime = sample_prime(rng);
        Self {
            multiplier: rng.random_range(1..prime),
            offset: rng.random_range(0..prime),
            prime,
        }
    }
}

/// Hashes an encoded word into `[0, range)` as `((a * x + b) mod p) mod range`.
#[inline]
pub fn carter_wegman(word: u128, range: u64, state: &CarterWegmanState) -> u64 {
    debug_assert!(range > 0, r#""range" must be greater than 0"#);
    debug_assert!(
        state.multiplier > 0 && state.multiplier < state.prime,
        r#""multiplier" must be in the range [1, prime-1]"#,
    );

    let prime = state.prime as u128;
    let x = word % prime;
    ((state.multiplier as u128 * x + state.offset as u128) % prime % range as u128) as u64
}

/// Re-samplable Carter-Wegman hash function.
#[derive(Debug, Clone)]
pub struct CarterWegmanHash {
    rng: Xoshiro256PlusPlus,
    range: u64,
    state: CarterWegmanState,
}

impl CarterWegmanHash {
    /// Get the current parameters.
    pub fn state(&self) -> &CarterWegmanState {
        &self.state
    }
}

impl HashFunction for CarterWegmanHash {
    fn from_seed(seed: u64, range: u64) -> Self {
        debug_assert!(range > 0, r#""range" must be greater than 0"#);

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let state = CarterWegmanState::sample(&mut rng);
        Self { rng, range, state }
    }

    fn range(&self) -> u64 {
        self.range
    }

    fn set_range(&mut self, range: u64) {
        debug_assert!(range > 0, r#""range" must be greater than 0"#);
        self.range = range;
    }

    fn randomize_parameters(&mut self) {
        self.state = CarterWegmanState::sample(&mut self.rng);
    }

    #[inline]
    fn hash<T: HashInput>(&self, item: &T) -> u64 {
        carter_wegman(item.to_word(), self.range, &self.state)
    }
}
