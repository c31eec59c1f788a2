//! Implements empirical statistical tests for hash function families.
use crate::generate::Generate;
use ndarray::prelude::*;
use ndarray::{ScalarOperand, Zip};
use num_traits::{Float, Num, NumAssignOps, ToPrimitive};
use rand::prelude::*;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::fmt::Debug;

/// A family of hash functions: takes a PRNG and a requested number of buckets, returns a freshly
/// sampled function and the actual number of buckets it hashes into.
pub type HashFunctionFamily<R, K> = dyn Fn(&mut R, usize) -> (Box<dyn Fn(&K) -> usize>, usize);

/// Creates a contingency matrix from two equally sized 1-D arrays.
pub fn make_contingency_matrix<T, C>(
    x: &Array1<T>,
    y: &Array1<T>,
    num_categories: usize,
) -> Array2<C>
where
    T: Num + ToPrimitive,
    C: Num + ToPrimitive + NumAssignOps + From<f32> + Copy,
{
    debug_assert_eq!(x.len(), y.len(), r#""x" and "y" must have equal length"#);
    debug_assert!(num_categories > 0, "Must have at least 1 category");

    let mut contingency = Array2::<C>::zeros((num_categories, num_categories));
    Zip::from(x).and(y).for_each(|xv, yv| {
        let xix: usize = xv.to_usize().unwrap();
        let yix: usize = yv.to_usize().unwrap();

        debug_assert!(
            xix < num_categories && yix < num_categories,
            r#"values must be below "num_categories" {}"#,
            num_categories
        );

        contingency[[xix, yix]] += 1.0_f32.into();
    });
    if contingency.iter().any(|x| *x == 0.0_f32.into()) {
        contingency.mapv_inplace(|x| x + 0.1_f32.into());
    }
    contingency
}

/// An aggregation of p-values from multiple runs of a statistical test.
#[derive(Debug)]
pub struct PValueAggregation {
    pub outcome: bool,
    pub alpha: f64,
    pub expected_passes: f64,
    pub num_passes: usize,
    pub uniformity: Chi2Statistic<f64>,
}

/// Aggregates test results from multiple runs of a statistical test.
///
/// # Notes
///
/// Based on [Bassham et al. (2010)], section 4.2: the proportion of passing runs must stay within
/// a 3-sigma confidence interval and the p-values themselves must be uniformly distributed.
///
/// [Bassham et al. (2010)]: https://doi.org/10.6028/NIST.SP.800-22r1a
pub fn aggregate_p_values(p_values: &Array1<f64>, alpha: f64) -> PValueAggregation {
    let num_trials = p_values.len() as f64;
    let pass_rate = 1.0 - alpha;
    let confidence = 3.0 * ((pass_rate * (1.0 - pass_rate)) / num_trials).sqrt();
    let expected_passes = num_trials * (pass_rate - confidence);
    let num_passes = p_values.iter().filter(|&&p| p >= alpha).count();

    // P-values are binned into deciles before checking them for uniformity.
    let mut deciles = Array1::<f64>::zeros(10);
    for &p in p_values {
        deciles[((p * 10.0) as usize).min(9)] += 1.0;
    }
    let uniformity = chi2_uniformity(&deciles);

    let outcome = num_passes as f64 >= expected_passes && uniformity.p_value > alpha;

    PValueAggregation {
        outcome,
        alpha,
        expected_passes,
        num_passes,
        uniformity,
    }
}

/// A result of a Chi-square test.
#[derive(Debug)]
pub struct Chi2Statistic<V> {
    pub chi2: V,
    pub dof: usize,
    pub p_value: V,
}

/// Calculates the chi-square statistic.
pub fn chi2<V>(observed: &[V], expected: &[V], dof: Option<usize>) -> Chi2Statistic<V>
where
    V: Float + NumAssignOps + From<f64>,
{
    debug_assert_eq!(observed.len(), expected.len(), "Dimensions must match");
    let chi2: V = Zip::from(observed)
        .and(expected)
        .fold(0.0.into(), |acc, &obs, &exp| {
            let diff = obs - exp;
            acc + diff.powf(2.0.into()) / exp
        });

    let dof = dof.unwrap_or(observed.len() - 1);
    let dist = ChiSquared::new(dof as f64).unwrap();
    let p_value = (1.0 - dist.cdf(chi2.to_f64().unwrap())).into();

    Chi2Statistic { chi2, dof, p_value }
}

/// Performs a Chi-square independence test.
pub fn chi2_independence<V>(contingency: &Array2<V>) -> Chi2Statistic<V>
where
    V: Float + NumAssignOps + From<f64> + ScalarOperand,
{
    let row_sums = contingency.sum_axis(Axis(1));
    let col_sums = contingency.sum_axis(Axis(0));
    let total_sum = row_sums.sum();

    let expected = (&row_sums.insert_axis(Axis(1)) * &col_sums.insert_axis(Axis(0))) / total_sum;
    let dof = (contingency.nrows() - 1) * (contingency.ncols() - 1);
    chi2(
        contingency.as_slice().unwrap(),
        expected.as_slice().unwrap(),
        Some(dof),
    )
}

/// Performs a Chi-square uniformity test.
pub fn chi2_uniformity<V>(observed: &Array1<V>) -> Chi2Statistic<V>
where
    V: Float + NumAssignOps + From<f64> + ScalarOperand,
{
    let total_sum = observed.sum();
    let num_cells = observed.len();
    let expected_value = total_sum / (num_cells as f64).into();

    let expected = Array1::<V>::from_elem(observed.dim(), expected_value);

    chi2(
        observed.as_slice().unwrap(),
        expected.as_slice().unwrap(),
        None,
    )
}

/// Tests a hash function family for pairwise independence.
///
/// For each trial two distinct keys are drawn, and then a fresh function is sampled from the
/// family for every observation. The joint distribution of the pair of hash values must be
/// independent and uniform over all pairs of buckets.
pub fn pairwise_independence<R, K>(
    rng: &mut R,
    family: &HashFunctionFamily<R, K>,
    raw_num_buckets: usize,
    num_samples_per_bucket: u32,
    num_trials: u32,
    alpha: f64,
) where
    R: Rng,
    K: PartialEq + Generate<R> + Debug,
{
    let (_, num_buckets) = family(rng, raw_num_buckets);
    let num_possible_pairs = num_buckets.pow(2);
    let num_observations = num_samples_per_bucket as usize * num_possible_pairs;

    let mut independence_p_values = Vec::with_capacity(num_trials as usize);
    let mut uniformity_p_values = Vec::with_capacity(num_trials as usize);

    for _ in 0..num_trials {
        let params = <K as Generate<R>>::GenerateParams::default();
        let (x, y) = loop {
            let x = K::generate(rng, &params);
            let y = K::generate(rng, &params);
            if x != y {
                break (x, y);
            }
        };

        let mut hxs = Array1::<usize>::zeros(num_observations);
        let mut hys = Array1::<usize>::zeros(num_observations);
        for i in 0..num_observations {
            let (hash_function, _) = family(rng, num_buckets);
            hxs[i] = hash_function(&x);
            hys[i] = hash_function(&y);
        }

        let contingency: Array2<f64> = make_contingency_matrix(&hxs, &hys, num_buckets);
        independence_p_values.push(chi2_independence(&contingency).p_value);
        let cells = Array1::from_iter(contingency.iter().copied());
        uniformity_p_values.push(chi2_uniformity(&cells).p_value);
    }

    let independence_result = aggregate_p_values(&Array1::from(independence_p_values), alpha);
    let uniformity_result = aggregate_p_values(&Array1::from(uniformity_p_values), alpha);

    assert!(
        independence_result.outcome,
        "Pairwise independence test has failed:\n{:?}",
        independence_result,
    );
    assert!(
        uniformity_result.outcome,
        "Pairwise uniformity test has failed:\n{:?}",
        uniformity_result,
    );
}

/// Tests that a single function spreads `num_keys` distinct keys uniformly over its buckets.
pub fn load_uniformity<R, K>(
    rng: &mut R,
    hash_function: &dyn Fn(&K) -> usize,
    num_buckets: usize,
    num_keys: usize,
    alpha: f64,
) where
    R: Rng,
    K: Generate<R> + std::hash::Hash + Eq + Clone,
{
    let keys = K::generate_many(rng, &<K as Generate<R>>::GenerateParams::default(), num_keys);
    let mut loads = Array1::<f64>::zeros(num_buckets);
    for key in &keys {
        loads[hash_function(key)] += 1.0;
    }

    let statistic = chi2_uniformity(&loads);
    assert!(
        statistic.p_value > alpha,
        "Load uniformity test has failed:\n{:?}",
        statistic,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chi2_uniformity_accepts_flat_counts() {
        let observed = Array1::from(vec![100.0, 100.0, 100.0, 100.0]);
        let statistic = chi2_uniformity(&observed);

        assert_eq!(statistic.dof, 3);
        assert!(statistic.chi2.abs() < 1e-12);
        assert!(statistic.p_value > 0.99);
    }

    #[test]
    fn test_chi2_uniformity_rejects_skewed_counts() {
        let observed = Array1::from(vec![400.0, 0.0, 0.0, 0.0]);

        assert!(chi2_uniformity(&observed).p_value < 0.01);
    }

    #[test]
    fn test_contingency_matrix_counts_pairs() {
        let x = Array1::from(vec![0_usize, 1, 1]);
        let y = Array1::from(vec![1_usize, 0, 0]);
        let contingency: Array2<f64> = make_contingency_matrix(&x, &y, 2);

        // Empty cells are smoothed by 0.1.
        assert!((contingency[[1, 0]] - 2.1).abs() < 1e-6);
        assert!((contingency[[0, 1]] - 1.1).abs() < 1e-6);
        assert!((contingency[[0, 0]] - 0.1).abs() < 1e-6);
    }
}
