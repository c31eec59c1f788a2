//! Data generation utilities useful for testing and benchmarking.
use rand::Rng;
use std::collections::HashSet;
use std::hash::Hash;

/// Provides capabilities to generate random values of the implementer-type.
pub trait Generate<R: Rng>: Sized {
    /// Parameters for data-generation specific for the type.
    type GenerateParams: Default;

    /// Generates a single random value of the type.
    fn generate(rng: &mut R, params: &Self::GenerateParams) -> Self;

    /// Generates a vector of **unique** random values of the type in generation order.
    ///
    /// # Panics
    ///
    /// - If `params` don't allow for `size` unique values the call never returns, so keep the
    ///   requested size well below the size of the domain.
    fn generate_many(rng: &mut R, params: &Self::GenerateParams, size: usize) -> Vec<Self>
    where
        Self: Hash + Eq + Clone,
    {
        let mut seen = HashSet::with_capacity(size);
        let mut values = Vec::with_capacity(size);
        while values.len() < size {
            let value = Self::generate(rng, params);
            if seen.insert(value.clone()) {
                values.push(value);
            }
        }
        values
    }
}

/// Parameters for [`Generate`] implementations that generate numeric values.
pub struct NumParams<T> {
    min: T,
    max: T,
}

impl<T> NumParams<T> {
    /// Creates a new instance of [`NumParams`] with the specified minimum and maximum values.
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

macro_rules! impl_generate_num {
    ($($type:ty),*) => {
        $(
            impl Default for NumParams<$type> {
                fn default() -> Self {
                    Self { min: <$type>::MIN, max: <$type>::MAX }
                }
            }

            impl<R: Rng> Generate<R> for $type
            {
                type GenerateParams = NumParams<$type>;

                fn generate(rng: &mut R, params: &Self::GenerateParams) -> Self {
                    rng.random_range(params.min..=params.max)
                }
            }

            impl<R: Rng> Generate<R> for ($type, bool) {
                type GenerateParams = NumParams<$type>;

                fn generate(rng: &mut R, params: &Self::GenerateParams) -> Self {
                    (<$type as Generate<R>>::generate(rng, params), rng.random())
                }
            }
        )*
    };
}

impl_generate_num!(u8, i8, u16, i16, u32, i32, u64, i64);

#[cfg(test)]
mod tests {
    use super::*;
    use compose_idents::compose_idents;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_generate_many_is_unique_and_bounded() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let values = u32::generate_many(&mut rng, &NumParams::new(10, 60), 50);

        assert_eq!(values.iter().collect::<HashSet<_>>().len(), 50);
        assert!(values.iter().all(|v| (10..=60).contains(v)));
    }

    macro_rules! impl_test_generate_pairs {
        ($type:ty) => {
            compose_idents!(test_fn = [test_generate_pairs_, $type], {
                #[test]
                fn test_fn() {
                    let mut rng = ChaCha20Rng::seed_from_u64(1);
                    let params = NumParams::<$type>::new(0, 9);
                    let pairs = <($type, bool)>::generate_many(&mut rng, &params, 20);

                    // The whole domain is 10 values times 2 flags.
                    assert_eq!(pairs.iter().collect::<HashSet<_>>().len(), 20);
                    assert!(pairs.iter().any(|(_, flag)| *flag));
                    assert!(pairs.iter().any(|(_, flag)| !*flag));
                    assert!(pairs.iter().all(|(value, _)| (0..=9).contains(value)));
                }
            });
        };
    }

    impl_test_generate_pairs!(u8);
    impl_test_generate_pairs!(i32);
    impl_test_generate_pairs!(u64);
}
