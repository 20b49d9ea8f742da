//! Discrete Distribution.

use crate::error::*;
use crate::lanes::*;
use crate::pbrt::*;
use crate::rng::ONE_MINUS_EPSILON;
use itertools::Itertools;
use std::fmt;

/// Represents a discrete probability distribution over the indices
/// [0, N) built from non-negative weights, and provides methods to sample an
/// index in O(log N).
///
/// The raw weights can be edited in place through `weights_mut()`. Doing so
/// leaves the table stale until `refresh()` recomputes it.
#[derive(Clone, Debug)]
pub struct DiscreteDistribution {
    /// Unnormalized weights as supplied by the caller.
    weights: Vec<Float>,

    /// Normalized weights.
    pmf: Vec<Float>,

    /// Running sum of `pmf`. The last entry is exactly 1.
    cdf: Vec<Float>,

    /// Sum of `weights`.
    normalization: Float,

    /// True when `weights` were handed out mutably since the last refresh.
    stale: bool,
}

/// Tables derived from a weight array.
struct Tables {
    pmf: Vec<Float>,
    cdf: Vec<Float>,
    normalization: Float,
}

impl DiscreteDistribution {
    /// Returns a new `DiscreteDistribution` for the given weights.
    ///
    /// Fails with `DegenerateDistribution` if the weights are empty, contain
    /// a negative or non-finite entry, or sum to zero.
    ///
    /// * `weights` - Unnormalized non-negative weights.
    pub fn new(weights: Vec<Float>) -> Result<Self> {
        let tables = compute_tables(&weights)?;
        debug!(
            "Built discrete distribution with {} entries, normalization {}.",
            weights.len(),
            tables.normalization
        );
        Ok(Self {
            weights,
            pmf: tables.pmf,
            cdf: tables.cdf,
            normalization: tables.normalization,
            stale: false,
        })
    }

    /// Recomputes the normalized tables from the current weights.
    ///
    /// On failure the distribution stays stale and must not be sampled.
    pub fn refresh(&mut self) -> Result<()> {
        let tables = compute_tables(&self.weights)?;
        self.pmf = tables.pmf;
        self.cdf = tables.cdf;
        self.normalization = tables.normalization;
        self.stale = false;
        debug!(
            "Refreshed discrete distribution with {} entries, normalization {}.",
            self.weights.len(),
            self.normalization
        );
        Ok(())
    }

    /// Returns the number of entries.
    pub fn size(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if the weights were edited since the last refresh.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Returns the unnormalized weights.
    pub fn weights(&self) -> &[Float] {
        &self.weights
    }

    /// Returns the unnormalized weights for editing and marks the
    /// distribution stale. Call `refresh()` before sampling again.
    pub fn weights_mut(&mut self) -> &mut Vec<Float> {
        self.stale = true;
        &mut self.weights
    }

    /// Returns the normalized weights.
    pub fn pmf(&self) -> &[Float] {
        debug_assert!(!self.stale, "pmf() on a stale distribution");
        &self.pmf
    }

    /// Returns the normalized CDF.
    pub fn cdf(&self) -> &[Float] {
        debug_assert!(!self.stale, "cdf() on a stale distribution");
        &self.cdf
    }

    /// Returns the sum of all weights.
    pub fn normalization(&self) -> Float {
        self.normalization
    }

    /// Returns the unnormalized weight at `index`.
    ///
    /// * `index` - Entry index.
    pub fn eval_pmf(&self, index: usize) -> Float {
        self.weights[index]
    }

    /// Returns the probability of sampling `index`.
    ///
    /// * `index` - Entry index.
    pub fn eval_pmf_normalized(&self, index: usize) -> Float {
        self.pmf()[index]
    }

    /// Returns the probability of sampling an index <= `index`.
    ///
    /// * `index` - Entry index.
    pub fn eval_cdf_normalized(&self, index: usize) -> Float {
        self.cdf()[index]
    }

    /// Return a sampled index and its probability given a random sample.
    ///
    /// The index is the first one whose CDF value reaches `u`, so `u = 0`
    /// always maps to index 0 and `u` close to 1 maps to the last index.
    ///
    /// * `u` - The random sample in [0, 1).
    #[inline]
    pub fn sample(&self, u: Float) -> (usize, Float) {
        let cdf = self.cdf();
        let index = lower_bound(cdf.len(), u, |i| cdf[i]);
        (index, self.pmf[index])
    }

    /// Like `sample()` but also returns `u` remapped to [0, 1) within the
    /// selected entry so it can be reused for another decision.
    ///
    /// * `u` - The random sample in [0, 1).
    pub fn sample_reuse(&self, u: Float) -> (usize, Float, Float) {
        let (index, pmf) = self.sample(u);
        let lo = if index == 0 { 0.0 } else { self.cdf[index - 1] };
        let u_remapped = if pmf > 0.0 {
            clamp((u - lo) / pmf, 0.0, ONE_MINUS_EPSILON)
        } else {
            0.0
        };
        (index, pmf, u_remapped)
    }

    /// Samples every lane of `u` independently. Each lane yields the same
    /// result as `sample()` on that lane.
    ///
    /// * `u` - The random samples in [0, 1).
    pub fn sample_lanes<L: FloatLanes>(&self, u: L) -> (L::Indices, L) {
        let indices = <L::Indices as IndexLanes>::from_fn(|i| self.sample(u.lane(i)).0);
        (indices, gather(self.pmf(), indices))
    }

    /// Samples a batch of random numbers in order.
    ///
    /// * `u` - The random samples in [0, 1).
    pub fn sample_batch(&self, u: &[Float]) -> Vec<(usize, Float)> {
        trace!("Sampling batch of {} values.", u.len());
        u.iter().map(|&u| self.sample(u)).collect()
    }

    /// A weighted point set has no mean value.
    pub fn mean(&self) -> Result<Float> {
        Err(SpectrumError::not_supported(
            "mean",
            "a discrete distribution has no continuous mean; use normalization() instead",
        ))
    }
}

impl fmt::Display for DiscreteDistribution {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DiscreteDistribution[")?;
        writeln!(f, "  size = {},", self.size())?;
        writeln!(f, "  normalization = {},", self.normalization)?;
        writeln!(f, "  pmf = [{}]", self.weights.iter().join(", "))?;
        write!(f, "]")
    }
}

/// Validates `weights` and builds the normalized tables.
///
/// * `weights` - Unnormalized weights.
fn compute_tables(weights: &[Float]) -> Result<Tables> {
    if weights.is_empty() {
        return Err(SpectrumError::DegenerateDistribution(
            "the distribution is empty".to_string(),
        ));
    }

    // Accumulate in double precision so long lists keep an accurate CDF.
    let mut running = Vec::with_capacity(weights.len());
    let mut sum = 0.0_f64;
    for (i, &w) in weights.iter().enumerate() {
        if !w.is_finite() || w < 0.0 {
            return Err(SpectrumError::DegenerateDistribution(format!(
                "entry {i} is negative or not finite ({w})"
            )));
        }
        sum += w as f64;
        running.push(sum);
    }

    if sum <= 0.0 {
        return Err(SpectrumError::DegenerateDistribution(
            "no probability mass found".to_string(),
        ));
    }

    let pmf = weights.iter().map(|&w| (w as f64 / sum) as Float).collect();
    let mut cdf: Vec<Float> = running.iter().map(|&c| (c / sum) as Float).collect();
    if let Some(last) = cdf.last_mut() {
        *last = 1.0;
    }

    Ok(Tables {
        pmf,
        cdf,
        normalization: sum as Float,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    fn weights_strategy() -> impl Strategy<Value = Vec<Float>> {
        prop::collection::vec(0.0..100.0f32, 1..32)
            .prop_filter("needs probability mass", |w| w.iter().any(|&v| v > 0.0))
    }

    #[test]
    fn worked_example() {
        let d = DiscreteDistribution::new(vec![1.0, 2.0, 3.0]).unwrap();
        let expected_pmf = [1.0 / 6.0, 2.0 / 6.0, 3.0 / 6.0];
        let expected_cdf = [1.0 / 6.0, 3.0 / 6.0, 1.0];
        for i in 0..3 {
            assert!(approx_eq!(f32, d.pmf()[i], expected_pmf[i], ulps = 2));
            assert!(approx_eq!(f32, d.cdf()[i], expected_cdf[i], ulps = 2));
        }
        assert_eq!(d.normalization(), 6.0);

        let (index, pmf) = d.sample(0.5);
        assert_eq!(index, 1);
        assert!(approx_eq!(f32, pmf, 2.0 / 6.0, ulps = 2));
    }

    #[test]
    fn indexed_lookups() {
        let d = DiscreteDistribution::new(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(d.eval_pmf(2), 3.0);
        assert!(approx_eq!(f32, d.eval_pmf_normalized(0), 1.0 / 6.0, ulps = 2));
        assert!(approx_eq!(f32, d.eval_cdf_normalized(1), 0.5, ulps = 2));
        assert_eq!(d.eval_cdf_normalized(2), 1.0);
        assert_eq!(d.eval_pmf_normalized(1), d.sample(0.5).1);
    }

    #[test]
    fn boundary_samples() {
        let d = DiscreteDistribution::new(vec![1.0, 2.0, 2.0, 1.0]).unwrap();
        assert_eq!(d.sample(0.0).0, 0);
        assert_eq!(d.sample(ONE_MINUS_EPSILON).0, 3);
        assert_eq!(d.sample(1.0).0, 3);
        assert_eq!(d.sample(0.25).0, 1);
        assert_eq!(d.sample(0.75).0, 2);
    }

    #[test]
    fn zero_weights_are_degenerate() {
        let err = DiscreteDistribution::new(vec![0.0, 0.0]).unwrap_err();
        assert!(matches!(err, SpectrumError::DegenerateDistribution(_)));
    }

    #[test]
    fn negative_weights_are_degenerate() {
        let err = DiscreteDistribution::new(vec![1.0, -1.0]).unwrap_err();
        assert!(matches!(err, SpectrumError::DegenerateDistribution(_)));
        assert!(err.to_string().contains("entry 1"));
    }

    #[test]
    fn empty_and_nan_weights_are_degenerate() {
        assert!(DiscreteDistribution::new(vec![]).is_err());
        assert!(DiscreteDistribution::new(vec![1.0, Float::NAN]).is_err());
    }

    #[test]
    fn mean_not_supported() {
        let d = DiscreteDistribution::new(vec![1.0]).unwrap();
        assert!(d.mean().unwrap_err().is_not_supported());
    }

    #[test]
    fn edit_marks_stale_until_refresh() {
        let mut d = DiscreteDistribution::new(vec![1.0, 1.0]).unwrap();
        assert!(!d.is_stale());
        d.weights_mut()[1] = 3.0;
        assert!(d.is_stale());
        d.refresh().unwrap();
        assert!(!d.is_stale());
        assert!(approx_eq!(f32, d.pmf()[1], 0.75, ulps = 2));
    }

    #[test]
    fn failed_refresh_stays_stale() {
        let mut d = DiscreteDistribution::new(vec![1.0, 1.0]).unwrap();
        *d.weights_mut() = vec![0.0, 0.0];
        assert!(d.refresh().is_err());
        assert!(d.is_stale());
    }

    #[test]
    fn refresh_is_idempotent() {
        let mut d = DiscreteDistribution::new(vec![0.3, 1.7, 2.9, 0.1]).unwrap();
        let pmf = d.pmf().to_vec();
        let cdf = d.cdf().to_vec();
        d.refresh().unwrap();
        d.refresh().unwrap();
        assert!(pmf.iter().zip(d.pmf()).all(|(a, b)| a.to_bits() == b.to_bits()));
        assert!(cdf.iter().zip(d.cdf()).all(|(a, b)| a.to_bits() == b.to_bits()));
    }

    #[test]
    fn sample_reuse_remaps_within_bucket() {
        let d = DiscreteDistribution::new(vec![1.0, 1.0]).unwrap();
        let (index, pmf, u) = d.sample_reuse(0.75);
        assert_eq!(index, 1);
        assert_eq!(pmf, 0.5);
        assert!(approx_eq!(f32, u, 0.5, ulps = 2));
    }

    #[test]
    fn display_lists_raw_weights() {
        let d = DiscreteDistribution::new(vec![1.0; 4]).unwrap();
        assert!(d.to_string().contains("pmf = [1, 1, 1, 1]"));
    }

    proptest! {
        #[test]
        fn pmf_sums_to_one(w in weights_strategy()) {
            let d = DiscreteDistribution::new(w).unwrap();
            let sum: Float = d.pmf().iter().sum();
            prop_assert!(approx_eq!(f32, sum, 1.0, epsilon = 1e-4));
            prop_assert_eq!(*d.cdf().last().unwrap(), 1.0);
            prop_assert!(d.cdf().windows(2).all(|c| c[0] <= c[1]));
        }

        #[test]
        fn sampling_is_monotone(w in weights_strategy(), u1 in 0.0..1.0f32, u2 in 0.0..1.0f32) {
            let d = DiscreteDistribution::new(w).unwrap();
            let (lo, hi) = if u1 <= u2 { (u1, u2) } else { (u2, u1) };
            prop_assert!(d.sample(lo).0 <= d.sample(hi).0);
            prop_assert!(d.sample(hi).0 < d.size());
        }

        #[test]
        fn lanes_match_scalar(w in weights_strategy(), u in prop::array::uniform4(0.0..1.0f32)) {
            let d = DiscreteDistribution::new(w).unwrap();
            let (indices, pmfs) = d.sample_lanes(u);
            for i in 0..4 {
                let (index, pmf) = d.sample(u[i]);
                prop_assert_eq!(indices[i], index);
                prop_assert_eq!(pmfs[i].to_bits(), pmf.to_bits());
            }
        }

        #[test]
        fn batch_matches_scalar(w in weights_strategy(), u in prop::collection::vec(0.0..1.0f32, 0..64)) {
            let d = DiscreteDistribution::new(w).unwrap();
            let batch = d.sample_batch(&u);
            prop_assert_eq!(batch.len(), u.len());
            for (b, &v) in batch.iter().zip(u.iter()) {
                prop_assert_eq!(*b, d.sample(v));
            }
        }
    }
}
