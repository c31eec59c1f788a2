use rand::Rng;

/// Pool of large primes the Carter-Wegman family draws its modulus from.
///
/// All of them are below `2 ** 57`, so that `a * (x mod p) + b` always fits into `u128`.
pub const LARGE_PRIMES: [u64; 10] = [
    96_249_602_706_718_843,
    16_195_944_769_656_221,
    61_243_980_399_666_923,
    91_165_090_352_484_931,
    70_653_361_301_029_763,
    17_239_878_924_401_069,
    26_263_798_480_984_763,
    34_752_750_108_724_387,
    78_183_116_390_846_231,
    99_471_240_469_200_793,
];

/// Pick one of the [`LARGE_PRIMES`] uniformly at random.
#[inline]
pub fn sample_prime<R: Rng>(rng: &mut R) -> u64 {
    LARGE_PRIMES[rng.random_range(0..LARGE_PRIMES.len())]
}

/// Number of lookup tables used by the tornado hash - one per byte of a 64-bit word.
pub const NUM_TORNADO_TABLES: usize = 8;

/// Number of entries in each tornado lookup table - one per byte value.
pub const TORNADO_TABLE_SIZE: usize = 256;
