//! Core trait declarations for the whole project.
use crate::error::BackyardError;
use std::fmt::Debug;

/// A value that can be fed into the hash functions of the project.
///
/// The value is encoded into a single 128-bit word. The encoding must be injective for the type,
/// since both hash families operate on the encoded word only.
pub trait HashInput: Copy + Eq + Debug {
    /// Number of significant low-order bytes of the encoded word.
    const WIDTH: usize;

    /// Encode the value.
    fn to_word(&self) -> u128;
}

/// An item that can be stored in the dictionary.
///
/// Restricted to values whose encoding fits into 64 bits, so that an item can be paired with a
/// table tag without losing injectivity.
pub trait Item: HashInput {}

macro_rules! impl_item_int {
    ($($t:ty => $u:ty),*) => {
        $(
            impl HashInput for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                #[inline]
                fn to_word(&self) -> u128 {
                    // Going through the unsigned type of the same width avoids sign extension.
                    (*self as $u) as u128
                }
            }

            impl Item for $t {}
        )*
    };
}

impl_item_int!(
    u8 => u8, i8 => u8,
    u16 => u16, i16 => u16,
    u32 => u32, i32 => u32,
    u64 => u64, i64 => u64,
    usize => usize, isize => usize
);

/// Pairs are encoded as `first + second * 2 ** 64`.
impl<T: Item> HashInput for (T, bool) {
    const WIDTH: usize = u64::BITS as usize / 8 + 1;

    #[inline]
    fn to_word(&self) -> u128 {
        self.0.to_word() | ((self.1 as u128) << u64::BITS)
    }
}

impl HashInput for u128 {
    const WIDTH: usize = 16;

    #[inline]
    fn to_word(&self) -> u128 {
        *self
    }
}

impl HashInput for i128 {
    const WIDTH: usize = 16;

    #[inline]
    fn to_word(&self) -> u128 {
        *self as u128
    }
}

/// A randomized hash function that can be re-sampled in place.
///
/// Implementations own their source of randomness, so that re-sampling never depends on global
/// state and a given seed always reproduces the same sequence of functions.
pub trait HashFunction {
    /// Create a new function with the output range `[0, range)`.
    ///
    /// `seed` seeds the instance's own PRNG, which is then used to draw the initial parameters
    /// and every subsequent re-sampling.
    fn from_seed(seed: u64, range: u64) -> Self;

    /// Get the size of the output range.
    fn range(&self) -> u64;

    /// Set the size of the output range without touching the other parameters.
    fn set_range(&mut self, range: u64);

    /// Draw fresh parameters, invalidating every previously computed hash value.
    fn randomize_parameters(&mut self);

    /// Hash the given `item` into `[0, range)`.
    fn hash<T: HashInput>(&self, item: &T) -> u64;
}

/// A mutable set of items supporting constant-time operations.
pub trait Dictionary<T> {
    /// Insert the given `item`. Inserting an already present item changes nothing.
    fn insert(&mut self, item: T) -> Result<(), BackyardError>;

    /// Remove the given `item`, returns `false` if it wasn't present.
    fn remove(&mut self, item: &T) -> bool;

    /// Check whether the given `item` is present.
    fn contains(&self, item: &T) -> bool;

    /// Get the number of present items.
    fn len(&self) -> usize;

    /// Check if the dictionary is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_encoding_does_not_sign_extend() {
        assert_eq!((-1_i32).to_word(), u32::MAX as u128);
        assert_eq!((-1_i8).to_word(), u8::MAX as u128);
    }

    #[test]
    fn test_pair_encoding_is_injective_over_the_flag() {
        assert_ne!((7_u64, true).to_word(), (7_u64, false).to_word());
        assert_ne!((u64::MAX, false).to_word(), (0_u64, true).to_word());
        assert_eq!((7_u32, false).to_word(), 7);
        assert_eq!((7_u32, true).to_word(), 7 + (1 << 64));
    }
}
