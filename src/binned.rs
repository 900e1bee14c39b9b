//! Binned density approximation for sampling arbitrary densities.
//!
//! A [`BinnedDensity`] evaluates a non-negative function at the midpoints of
//! `n` equal-width bins, normalizes the weights and keeps their cumulative
//! sums. A draw picks a bin by searching the cumulative table with one
//! uniform and places the sample uniformly inside the bin with a second.
//!
//! Supports that are not finite go through the tangent map
//! `x = tan(z·π/2)`, which sends `(−1, 1)` onto the real line. The binned
//! density is then built over `z` for `g(x(z)) / cos²(z·π/2)` and draws are
//! mapped back through `x(z)`.
//!
//! # Complexity
//! Construction O(n); each draw O(log n).

use std::f64::consts::FRAC_PI_2;

use rand::Rng;

use crate::error::{check_support, DensityError, Result};
use crate::grid::locate_bin;
use crate::random::{uniform, uniform_open};
use crate::stats::prefix_sums;

/// Piecewise-constant approximation of a density over `n` equal bins.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedDensity {
    edges: Vec<f64>,
    cumulative: Vec<f64>,
}

impl BinnedDensity {
    /// Bins `g` over `[lower, upper]` into `n_bins` equal-width bins.
    ///
    /// # Errors
    /// - [`DensityError::InvalidParameter`] if `n_bins == 0` or the sampled
    ///   weights do not sum to a positive finite value.
    /// - [`DensityError::Domain`]/[`DensityError::NotFinite`] for a bad interval.
    ///
    /// # Examples
    /// ```
    /// use u_density::BinnedDensity;
    /// let b = BinnedDensity::build(|x| x, 0.0, 1.0, 4).unwrap();
    /// assert_eq!(b.cumulative()[0], 0.0);
    /// assert_eq!(b.cumulative()[4], 1.0);
    /// // midpoints 1/8, 3/8, 5/8, 7/8 ⇒ weights 1:3:5:7
    /// assert!((b.cumulative()[1] - 1.0 / 16.0).abs() < 1e-15);
    /// ```
    pub fn build<F>(g: F, lower: f64, upper: f64, n_bins: usize) -> Result<Self>
    where
        F: Fn(f64) -> f64,
    {
        crate::error::check_finite_support(lower, upper)?;
        if n_bins == 0 {
            return Err(DensityError::InvalidParameter(
                "binned density needs at least one bin".to_string(),
            ));
        }

        let width = (upper - lower) / n_bins as f64;
        let mut edges: Vec<f64> = (0..=n_bins).map(|k| lower + k as f64 * width).collect();
        edges[n_bins] = upper;

        let weights: Vec<f64> = edges
            .windows(2)
            .map(|w| g(0.5 * (w[0] + w[1])).max(0.0))
            .collect();
        let mut cumulative = prefix_sums(&weights);
        let total = cumulative[n_bins];
        if !(total > 0.0) || !total.is_finite() {
            return Err(DensityError::InvalidParameter(format!(
                "density has no usable mass on [{lower}, {upper}] (bin weight sum {total})"
            )));
        }
        for c in cumulative.iter_mut() {
            *c /= total;
        }
        cumulative[n_bins] = 1.0;

        log::trace!("binned density over [{lower}, {upper}] with {n_bins} bins");
        Ok(Self { edges, cumulative })
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Normalized cumulative bin mass; starts at 0 and ends at 1.
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Index of the bin selected by a uniform `u ∈ [0, 1)`.
    pub fn locate(&self, u: f64) -> usize {
        locate_bin(&self.cumulative, u)
    }

    /// Draws one sample.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> f64 {
        let i = self.locate(uniform(rng));
        let (lo, hi) = (self.edges[i], self.edges[i + 1]);
        lo + uniform_open(rng) * (hi - lo)
    }
}

/// Maps `z ∈ (−1, 1)` to the real line: `x = tan(z·π/2)`.
pub fn tangent_to_real(z: f64) -> f64 {
    (z * FRAC_PI_2).tan()
}

/// Inverse of [`tangent_to_real`]: `z = atan(x)·2/π`; `±∞` maps to `±1`.
pub fn real_to_tangent(x: f64) -> f64 {
    x.atan() / FRAC_PI_2
}

/// Reusable sampler over a fixed binned density.
///
/// Pinning the sampler avoids rebuilding the bins on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedSampler {
    binned: BinnedDensity,
    tangent: bool,
}

impl BinnedSampler {
    /// Bins `g` over its support, tangent-mapping it when a bound is infinite.
    pub fn new<F>(g: F, lower: f64, upper: f64, n_bins: usize) -> Result<Self>
    where
        F: Fn(f64) -> f64,
    {
        check_support(lower, upper)?;
        if lower.is_finite() && upper.is_finite() {
            let binned = BinnedDensity::build(g, lower, upper, n_bins)?;
            return Ok(Self {
                binned,
                tangent: false,
            });
        }

        let (z_lo, z_hi) = (real_to_tangent(lower), real_to_tangent(upper));
        let mapped = |z: f64| {
            let c = (z * FRAC_PI_2).cos();
            g(tangent_to_real(z)) / (c * c)
        };
        let binned = BinnedDensity::build(mapped, z_lo, z_hi, n_bins)?;
        Ok(Self {
            binned,
            tangent: true,
        })
    }

    pub fn binned(&self) -> &BinnedDensity {
        &self.binned
    }

    /// Whether draws are made in tangent-mapped space.
    pub fn is_tangent_mapped(&self) -> bool {
        self.tangent
    }

    pub fn draw<R: Rng>(&self, rng: &mut R) -> f64 {
        let v = self.binned.draw(rng);
        if self.tangent {
            tangent_to_real(v)
        } else {
            v
        }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.draw(rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::stats::SampleMoments;

    #[test]
    fn test_build_shape() {
        let b = BinnedDensity::build(|_| 1.0, 0.0, 2.0, 4).unwrap();
        assert_eq!(b.n_bins(), 4);
        assert_eq!(b.edges(), &[0.0, 0.5, 1.0, 1.5, 2.0]);
        let expected = [0.0, 0.25, 0.5, 0.75, 1.0];
        for (c, e) in b.cumulative().iter().zip(expected) {
            assert!((c - e).abs() < 1e-15);
        }
    }

    #[test]
    fn test_build_errors() {
        assert!(BinnedDensity::build(|_| 1.0, 0.0, 1.0, 0).is_err());
        assert!(BinnedDensity::build(|_| 1.0, 1.0, 0.0, 10).is_err());
        assert!(BinnedDensity::build(|_| 0.0, 0.0, 1.0, 10).is_err());
        assert!(BinnedDensity::build(|_| 1.0, 0.0, f64::INFINITY, 10).is_err());
    }

    #[test]
    fn test_locate_skips_empty_bins() {
        // second and third bins carry no mass
        let b = BinnedDensity::build(|x| if x > 0.25 && x < 0.75 { 0.0 } else { 1.0 }, 0.0, 1.0, 4)
            .unwrap();
        assert_eq!(b.locate(0.0), 0);
        assert_eq!(b.locate(0.5), 3);
        assert_eq!(b.locate(0.99), 3);
    }

    #[test]
    fn test_draw_uniform_moments() {
        let b = BinnedDensity::build(|_| 1.0, 0.0, 1.0, 300).unwrap();
        let mut rng = create_rng(42);
        let m = SampleMoments::from_slice(&(0..10_000).map(|_| b.draw(&mut rng)).collect::<Vec<_>>());
        assert!((m.mean().unwrap() - 0.5).abs() < 0.05);
        let sd = m.std_dev().unwrap();
        assert!(sd > 0.07 && sd < 0.35);
    }

    #[test]
    fn test_tangent_map_roundtrip() {
        for &x in &[-50.0, -1.0, 0.0, 0.3, 7.5] {
            assert!((tangent_to_real(real_to_tangent(x)) - x).abs() < 1e-9 * (1.0 + x.abs()));
        }
        assert_eq!(real_to_tangent(f64::INFINITY), 1.0);
        assert_eq!(real_to_tangent(f64::NEG_INFINITY), -1.0);
    }

    #[test]
    fn test_sampler_standard_normal_infinite_support() {
        let sampler = BinnedSampler::new(
            |x| (-0.5 * x * x).exp(),
            f64::NEG_INFINITY,
            f64::INFINITY,
            300,
        )
        .unwrap();
        assert!(sampler.is_tangent_mapped());
        let mut rng = create_rng(2024);
        let xs = sampler.sample(&mut rng, 10_000);
        let m = SampleMoments::from_slice(&xs);
        assert!(m.mean().unwrap().abs() < 0.1);
        let sd = m.std_dev().unwrap();
        assert!(sd > 0.9 && sd < 1.1, "sd = {sd}");
    }

    #[test]
    fn test_sampler_half_line() {
        let sampler = BinnedSampler::new(|x| (-x).exp(), 0.0, f64::INFINITY, 400).unwrap();
        let mut rng = create_rng(5);
        let xs = sampler.sample(&mut rng, 10_000);
        assert!(xs.iter().all(|&x| x >= 0.0));
        let m = SampleMoments::from_slice(&xs);
        assert!((m.mean().unwrap() - 1.0).abs() < 0.1);
    }

    #[test]
    fn test_sampler_finite_support_not_mapped() {
        let sampler = BinnedSampler::new(|_| 1.0, -1.0, 1.0, 10).unwrap();
        assert!(!sampler.is_tangent_mapped());
        assert_eq!(sampler.binned().n_bins(), 10);
    }
}
