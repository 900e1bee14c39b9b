//! Univariate distributions defined by an unnormalized density.
//!
//! A [`Distribution`] wraps a density and its support and computes the
//! normalization constant eagerly at construction. Three strategies are
//! selected at construction time:
//!
//! | Strategy | Normalization / CDF | Quantile | Sampling |
//! |---|---|---|---|
//! | callable | [`Density::integral`] or adaptive quadrature | bisection | [`BinnedSampler`] |
//! | constant grid | closed-form bin sums | closed-form | closed-form quantile |
//! | linear grid | closed-form trapezoids | quadratic root | closed-form quantile |
//!
//! Distributions are immutable after construction and cheap to clone.
//!
//! # Limitations
//! The density is not checked for non-negativity or integrability; a
//! malformed density produces silently wrong results.

use std::fmt;
use std::sync::Arc;

use rand::Rng;

use crate::analytic;
use crate::binned::{real_to_tangent, tangent_to_real, BinnedSampler};
use crate::error::{check_support, DensityError, Result};
use crate::grid::{GridInterpolant, Interpolation};
use crate::integrate::AdaptiveQuadrature;
use crate::quantile::GridQuantile;
use crate::random::default_rng;

/// Default number of bins for the generic sampling path.
pub const DEFAULT_SAMPLING_BINS: usize = 300;

const BISECTION_TOL: f64 = 1e-12;
const BISECTION_MAX_ITER: usize = 200;

/// An unnormalized, non-negative density.
///
/// Implement [`integral`](Density::integral) to supply a closed form; it then
/// replaces adaptive quadrature for normalization and CDF evaluation.
///
/// # Examples
/// ```
/// use u_density::{Density, Distribution};
///
/// /// 1 + cos(x), with a closed-form antiderivative x + sin(x).
/// struct Raised;
///
/// impl Density for Raised {
///     fn evaluate(&self, x: f64) -> f64 {
///         1.0 + x.cos()
///     }
///     fn integral(&self, a: f64, b: f64) -> Option<f64> {
///         Some((b + b.sin()) - (a + a.sin()))
///     }
/// }
///
/// let pi = std::f64::consts::PI;
/// let d = Distribution::from_density(Raised, (-pi, pi), 300).unwrap();
/// assert!((d.normalization() - 2.0 * pi).abs() < 1e-12);
/// assert!((d.cdf(0.0) - 0.5).abs() < 1e-12);
/// ```
pub trait Density {
    /// Raw density at `x`.
    fn evaluate(&self, x: f64) -> f64;

    /// Exact integral over `[a, b]`, if known. `a` may be `−∞` and `b` `+∞`.
    fn integral(&self, _a: f64, _b: f64) -> Option<f64> {
        None
    }
}

/// Adapts a closure to [`Density`].
#[derive(Clone, Copy)]
pub struct FnDensity<F>(pub F);

impl<F: Fn(f64) -> f64> Density for FnDensity<F> {
    fn evaluate(&self, x: f64) -> f64 {
        (self.0)(x)
    }
}

impl Density for GridInterpolant {
    fn evaluate(&self, x: f64) -> f64 {
        if x >= self.lower() && x <= self.upper() {
            self.value_at(x)
        } else {
            0.0
        }
    }

    /// Integral over `[a, b]` intersected with the knot range.
    fn integral(&self, a: f64, b: f64) -> Option<f64> {
        let (lo, hi) = (a.max(self.lower()), b.min(self.upper()));
        if lo >= hi {
            return Some(0.0);
        }
        analytic::integral(self, lo, hi).ok()
    }
}

type SharedDensity = Arc<dyn Density + Send + Sync>;

#[derive(Clone)]
enum Model {
    Callable(SharedDensity),
    Grid {
        interp: GridInterpolant,
        table: GridQuantile,
    },
}

/// A normalized univariate distribution over a support interval.
#[derive(Clone)]
pub struct Distribution {
    model: Model,
    normalization: f64,
    lower: f64,
    upper: f64,
    sampling_bin_count: usize,
    quadrature: AdaptiveQuadrature,
}

impl fmt::Debug for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.model {
            Model::Callable(_) => "callable",
            Model::Grid { interp, .. } => match interp.scheme() {
                Interpolation::Constant => "constant grid",
                Interpolation::Linear => "linear grid",
            },
        };
        f.debug_struct("Distribution")
            .field("kind", &kind)
            .field("support", &(self.lower, self.upper))
            .field("normalization", &self.normalization)
            .field("sampling_bin_count", &self.sampling_bin_count)
            .finish()
    }
}

impl Distribution {
    /// Creates a distribution from a closure and support `(lower, upper)`.
    ///
    /// # Errors
    /// - [`DensityError::Domain`] if `lower >= upper`.
    /// - [`DensityError::InvalidParameter`] if the density integrates to a
    ///   non-positive or non-finite value.
    ///
    /// # Examples
    /// ```
    /// use u_density::Distribution;
    /// let d = Distribution::new(|x: f64| (-0.5 * x * x).exp(), (f64::NEG_INFINITY, f64::INFINITY)).unwrap();
    /// assert!((d.cdf(0.0) - 0.5).abs() < 1e-9);
    /// assert_eq!(d.density(f64::NAN), 0.0);
    /// ```
    pub fn new<F>(density: F, support: (f64, f64)) -> Result<Self>
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::with_sampling_bins(density, support, DEFAULT_SAMPLING_BINS)
    }

    /// Like [`new`](Self::new) with an explicit generic-path bin count.
    pub fn with_sampling_bins<F>(density: F, support: (f64, f64), sampling_bin_count: usize) -> Result<Self>
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::from_density(FnDensity(density), support, sampling_bin_count)
    }

    /// Creates a distribution from any [`Density`] implementation.
    pub fn from_density<D>(density: D, support: (f64, f64), sampling_bin_count: usize) -> Result<Self>
    where
        D: Density + Send + Sync + 'static,
    {
        Self::callable(Arc::new(density), support, sampling_bin_count, AdaptiveQuadrature::default())
    }

    fn callable(
        density: SharedDensity,
        (lower, upper): (f64, f64),
        sampling_bin_count: usize,
        quadrature: AdaptiveQuadrature,
    ) -> Result<Self> {
        check_support(lower, upper)?;
        check_bins(sampling_bin_count)?;
        let normalization = match density.integral(lower, upper) {
            Some(v) => v,
            None => quadrature.integrate(|x| density.evaluate(x), lower, upper)?.value,
        };
        check_normalization(normalization)?;
        log::debug!("normalization over [{lower}, {upper}] = {normalization}");
        Ok(Self {
            model: Model::Callable(density),
            normalization,
            lower,
            upper,
            sampling_bin_count,
            quadrature,
        })
    }

    /// Samples `density` at `grid` and interpolates between the knots.
    pub fn from_grid<F>(density: F, grid: Vec<f64>, scheme: Interpolation) -> Result<Self>
    where
        F: Fn(f64) -> f64,
    {
        Self::from_interpolant(GridInterpolant::from_fn(density, grid, scheme)?)
    }

    /// Wraps pre-sampled raw density values.
    pub fn from_grid_values(grid: Vec<f64>, values: Vec<f64>, scheme: Interpolation) -> Result<Self> {
        Self::from_interpolant(GridInterpolant::new(grid, values, scheme)?)
    }

    /// Wraps an interpolant; the bin count is `n` (constant) or `n − 1` (linear).
    pub fn from_interpolant(interp: GridInterpolant) -> Result<Self> {
        let bins = interp.bin_count();
        Self::from_interpolant_with_bins(interp, bins)
    }

    pub(crate) fn from_interpolant_with_bins(interp: GridInterpolant, sampling_bin_count: usize) -> Result<Self> {
        check_bins(sampling_bin_count)?;
        let (lower, upper) = (interp.lower(), interp.upper());
        let normalization = analytic::integral(&interp, lower, upper)?;
        check_normalization(normalization)?;
        let table = GridQuantile::new(&interp, normalization)?;
        log::debug!(
            "grid normalization over [{lower}, {upper}] with {} knots = {normalization}",
            interp.len()
        );
        Ok(Self {
            model: Model::Grid { interp, table },
            normalization,
            lower,
            upper,
            sampling_bin_count,
            quadrature: AdaptiveQuadrature::default(),
        })
    }

    /// Replaces the integrator, renormalizing callable densities with it.
    pub fn with_quadrature(self, quadrature: AdaptiveQuadrature) -> Result<Self> {
        match self.model {
            Model::Callable(density) => Self::callable(
                density,
                (self.lower, self.upper),
                self.sampling_bin_count,
                quadrature,
            ),
            Model::Grid { .. } => Ok(Self { quadrature, ..self }),
        }
    }

    pub fn support(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    pub fn minimum(&self) -> f64 {
        self.lower
    }

    pub fn maximum(&self) -> f64 {
        self.upper
    }

    /// Integral of the raw density over the support.
    pub fn normalization(&self) -> f64 {
        self.normalization
    }

    pub fn sampling_bin_count(&self) -> usize {
        self.sampling_bin_count
    }

    /// The backing interpolant for grid-backed distributions.
    pub fn interpolant(&self) -> Option<&GridInterpolant> {
        match &self.model {
            Model::Grid { interp, .. } => Some(interp),
            Model::Callable(_) => None,
        }
    }

    pub fn is_grid_backed(&self) -> bool {
        matches!(self.model, Model::Grid { .. })
    }

    fn has_finite_support(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }

    pub(crate) fn require_finite_support(&self) -> Result<()> {
        if self.has_finite_support() {
            Ok(())
        } else {
            Err(DensityError::UnsupportedOperation(format!(
                "operation requires finite support, got [{}, {}]",
                self.lower, self.upper
            )))
        }
    }

    fn raw(&self, x: f64) -> f64 {
        match &self.model {
            Model::Callable(d) => d.evaluate(x),
            Model::Grid { interp, .. } => interp.value_at(x),
        }
    }

    /// Normalized density; exactly zero outside the support.
    pub fn density(&self, x: f64) -> f64 {
        if x >= self.lower && x <= self.upper {
            self.raw(x) / self.normalization
        } else {
            0.0
        }
    }

    /// Cumulative distribution function.
    ///
    /// 0 at or below the lower bound, 1 at or above the upper bound.
    pub fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x <= self.lower {
            return 0.0;
        }
        if x >= self.upper {
            return 1.0;
        }
        match &self.model {
            Model::Grid { table, .. } => table.cdf(x),
            Model::Callable(d) => {
                let mass = match d.integral(self.lower, x) {
                    Some(v) => v,
                    None => self
                        .quadrature
                        .integrate(|t| d.evaluate(t), self.lower, x)
                        .map_or(f64::NAN, |q| q.value),
                };
                (mass / self.normalization).clamp(0.0, 1.0)
            }
        }
    }

    /// Inverse CDF.
    ///
    /// `u ≤ 0` gives the lower bound and `u ≥ 1` the upper bound. Grid-backed
    /// distributions invert in closed form; callable ones bisect the CDF,
    /// in tangent-mapped coordinates when the support is not finite.
    pub fn quantile(&self, u: f64) -> f64 {
        if u.is_nan() {
            return f64::NAN;
        }
        if u <= 0.0 {
            return self.lower;
        }
        if u >= 1.0 {
            return self.upper;
        }
        match &self.model {
            Model::Grid { table, .. } => table.quantile(u),
            Model::Callable(_) => self.bisect_quantile(u),
        }
    }

    fn bisect_quantile(&self, u: f64) -> f64 {
        let tangent = !self.has_finite_support();
        let to_x = |v: f64| if tangent { tangent_to_real(v) } else { v };
        let (mut lo, mut hi) = if tangent {
            (real_to_tangent(self.lower), real_to_tangent(self.upper))
        } else {
            (self.lower, self.upper)
        };
        for _ in 0..BISECTION_MAX_ITER {
            let mid = 0.5 * (lo + hi);
            if hi - lo <= BISECTION_TOL * (1.0 + mid.abs()) {
                break;
            }
            if self.cdf(to_x(mid)) < u {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        to_x(0.5 * (lo + hi))
    }

    /// Draws `n` samples.
    ///
    /// Grid-backed distributions map uniforms through the closed-form
    /// quantile. Callable ones build a fresh [`BinnedSampler`] with
    /// `sampling_bin_count` bins on every call; use
    /// [`binned_sampler`](Self::binned_sampler) to reuse one.
    ///
    /// # Errors
    /// [`DensityError::InvalidParameter`] if the binned approximation of a
    /// callable density has no mass.
    pub fn sample<R: Rng>(&self, rng: &mut R, n: usize) -> Result<Vec<f64>> {
        match &self.model {
            Model::Grid { table, .. } => Ok(table.sample(rng, n)),
            Model::Callable(_) => Ok(self.binned_sampler()?.sample(rng, n)),
        }
    }

    /// [`sample`](Self::sample) using the thread-local generator.
    pub fn sample_default(&self, n: usize) -> Result<Vec<f64>> {
        self.sample(&mut default_rng(), n)
    }

    /// A reusable binned sampler over this distribution's raw density.
    pub fn binned_sampler(&self) -> Result<BinnedSampler> {
        BinnedSampler::new(|x| self.raw(x), self.lower, self.upper, self.sampling_bin_count)
    }

    /// `∫ g(x)·f(x) dx` over the support with the normalized density `f`.
    fn expectation<G>(&self, g: G) -> Result<f64>
    where
        G: Fn(f64) -> f64,
    {
        let integrand = |x: f64| g(x) * self.raw(x);
        let total = match &self.model {
            // Kronrod rules are exact on each polynomial piece, so integrate bin by bin.
            Model::Grid { interp, .. } => {
                let mut parts = Vec::with_capacity(interp.bin_count());
                for w in interp.edges().windows(2) {
                    parts.push(self.quadrature.integrate(integrand, w[0], w[1])?.value);
                }
                crate::stats::kahan_sum(&parts)
            }
            Model::Callable(_) => {
                self.quadrature
                    .integrate(integrand, self.lower, self.upper)?
                    .value
            }
        };
        Ok(total / self.normalization)
    }

    pub fn mean(&self) -> Result<f64> {
        self.expectation(|x| x)
    }

    /// Second central moment.
    pub fn variance(&self) -> Result<f64> {
        let mu = self.mean()?;
        self.expectation(|x| (x - mu).powi(2))
    }

    pub fn std_dev(&self) -> Result<f64> {
        self.variance().map(f64::sqrt)
    }

    /// Third standardized moment.
    pub fn skewness(&self) -> Result<f64> {
        let mu = self.mean()?;
        let var = self.expectation(|x| (x - mu).powi(2))?;
        let m3 = self.expectation(|x| (x - mu).powi(3))?;
        Ok(m3 / var.powf(1.5))
    }

    /// Excess kurtosis: fourth standardized moment minus 3.
    pub fn kurtosis(&self) -> Result<f64> {
        let mu = self.mean()?;
        let var = self.expectation(|x| (x - mu).powi(2))?;
        let m4 = self.expectation(|x| (x - mu).powi(4))?;
        Ok(m4 / (var * var) - 3.0)
    }
}

fn check_bins(bins: usize) -> Result<()> {
    if bins == 0 {
        return Err(DensityError::InvalidParameter(
            "sampling bin count must be positive".to_string(),
        ));
    }
    Ok(())
}

fn check_normalization(z: f64) -> Result<()> {
    if !(z > 0.0) || !z.is_finite() {
        return Err(DensityError::InvalidParameter(format!(
            "density must integrate to a positive finite value over its support, got {z}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::stats::SampleMoments;
    use std::f64::consts::PI;

    fn standard_normal() -> Distribution {
        Distribution::new(
            |x: f64| (-0.5 * x * x).exp(),
            (f64::NEG_INFINITY, f64::INFINITY),
        )
        .unwrap()
    }

    fn uniform_02() -> Distribution {
        Distribution::new(|_| 1.0, (0.0, 2.0)).unwrap()
    }

    #[test]
    fn test_construct_rejects_bad_support() {
        assert!(matches!(
            Distribution::new(|_| 1.0, (1.0, 1.0)),
            Err(DensityError::Domain { .. })
        ));
        assert!(Distribution::new(|_| 1.0, (2.0, 1.0)).is_err());
        assert!(Distribution::with_sampling_bins(|_| 1.0, (0.0, 1.0), 0).is_err());
    }

    #[test]
    fn test_construct_rejects_zero_mass() {
        assert!(matches!(
            Distribution::new(|_| 0.0, (0.0, 1.0)),
            Err(DensityError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_normalization_and_density() {
        let d = standard_normal();
        assert!((d.normalization() - (2.0 * PI).sqrt()).abs() < 1e-9);
        assert!((d.density(0.0) - 1.0 / (2.0 * PI).sqrt()).abs() < 1e-10);
        let u = uniform_02();
        assert!((u.density(1.0) - 0.5).abs() < 1e-12);
        assert_eq!(u.density(-0.1), 0.0);
        assert_eq!(u.density(2.1), 0.0);
        assert_eq!(u.minimum(), 0.0);
        assert_eq!(u.maximum(), 2.0);
        assert_eq!(u.support(), (0.0, 2.0));
        assert_eq!(u.sampling_bin_count(), DEFAULT_SAMPLING_BINS);
        assert!(!u.is_grid_backed());
        assert!(u.interpolant().is_none());
    }

    #[test]
    fn test_cdf_callable() {
        let u = uniform_02();
        assert_eq!(u.cdf(0.0), 0.0);
        assert_eq!(u.cdf(2.0), 1.0);
        assert!((u.cdf(0.5) - 0.25).abs() < 1e-12);
        let n = standard_normal();
        assert!((n.cdf(1.0) - 0.841_344_746_068_543).abs() < 1e-9);
    }

    #[test]
    fn test_quantile_callable_bisection() {
        let u = uniform_02();
        assert!((u.quantile(0.25) - 0.5).abs() < 1e-9);
        assert_eq!(u.quantile(0.0), 0.0);
        assert_eq!(u.quantile(1.0), 2.0);
        let n = standard_normal();
        assert!((n.quantile(0.841_344_746_068_543) - 1.0).abs() < 1e-6);
        assert!(n.quantile(0.5).abs() < 1e-8);
        assert_eq!(n.quantile(1.0), f64::INFINITY);
    }

    #[test]
    fn test_moments_standard_normal() {
        let d = standard_normal();
        assert!(d.mean().unwrap().abs() < 1e-7);
        assert!((d.variance().unwrap() - 1.0).abs() < 1e-7);
        assert!(d.skewness().unwrap().abs() < 1e-7);
        assert!(d.kurtosis().unwrap().abs() < 1e-7);
    }

    #[test]
    fn test_moments_uniform() {
        let d = uniform_02();
        assert!((d.mean().unwrap() - 1.0).abs() < 1e-7);
        assert!((d.variance().unwrap() - 1.0 / 3.0).abs() < 1e-7);
        assert!((d.std_dev().unwrap() - (1.0_f64 / 3.0).sqrt()).abs() < 1e-7);
        assert!(d.skewness().unwrap().abs() < 1e-7);
        assert!((d.kurtosis().unwrap() + 1.2).abs() < 1e-7);
    }

    #[test]
    fn test_sample_uniform_generic_path() {
        let d = Distribution::new(|_| 1.0, (0.0, 1.0)).unwrap();
        let mut rng = create_rng(42);
        let xs = d.sample(&mut rng, 10_000).unwrap();
        let m = SampleMoments::from_slice(&xs);
        let mean = m.mean().unwrap();
        let sd = m.std_dev().unwrap();
        assert!(mean > 0.45 && mean < 0.55);
        assert!(sd > 0.07 && sd < 0.35);
    }

    #[test]
    fn test_sample_standard_normal_tangent_path() {
        let d = standard_normal();
        let mut rng = create_rng(7);
        let xs = d.sample(&mut rng, 10_000).unwrap();
        let m = SampleMoments::from_slice(&xs);
        assert!(m.mean().unwrap().abs() < 0.1);
        let sd = m.std_dev().unwrap();
        assert!(sd > 0.9 && sd < 1.1, "sd = {sd}");
    }

    #[test]
    fn test_sample_default_rng() {
        let d = uniform_02();
        let xs = d.sample_default(100).unwrap();
        assert_eq!(xs.len(), 100);
        assert!(xs.iter().all(|&x| (0.0..=2.0).contains(&x)));
    }

    #[test]
    fn test_grid_backed_constant() {
        let d = Distribution::from_grid_values(
            vec![1.0, 2.0, 3.0],
            vec![1.0, 3.0, 2.0],
            Interpolation::Constant,
        )
        .unwrap();
        assert!(d.is_grid_backed());
        assert_eq!(d.sampling_bin_count(), 3);
        assert!((d.normalization() - 4.5).abs() < 1e-12);
        assert!((d.cdf(2.5) - 3.5 / 4.5).abs() < 1e-12);
        assert!((d.density(2.0) - 3.0 / 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_grid_backed_linear_bins_and_moments() {
        let grid: Vec<f64> = (0..=100).map(|k| k as f64 / 100.0).collect();
        let d = Distribution::from_grid(|x| 2.0 * x, grid, Interpolation::Linear).unwrap();
        assert_eq!(d.sampling_bin_count(), 100);
        assert!((d.normalization() - 1.0).abs() < 1e-12);
        assert!((d.mean().unwrap() - 2.0 / 3.0).abs() < 1e-10);
        assert!((d.variance().unwrap() - 1.0 / 18.0).abs() < 1e-10);
        assert!((d.quantile(0.25) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_closed_form_density_extension() {
        struct Periodic;
        impl Density for Periodic {
            fn evaluate(&self, x: f64) -> f64 {
                1.0 + (2.0 * x).sin()
            }
            fn integral(&self, a: f64, b: f64) -> Option<f64> {
                Some((b - 0.5 * (2.0 * b).cos()) - (a - 0.5 * (2.0 * a).cos()))
            }
        }
        let d = Distribution::from_density(Periodic, (0.0, 2.0 * PI), 300).unwrap();
        assert!((d.normalization() - 2.0 * PI).abs() < 1e-12);
        // F(π/2) = (π/2 + 1) / 2π
        assert!((d.cdf(PI / 2.0) - (PI / 2.0 + 1.0) / (2.0 * PI)).abs() < 1e-12);
    }

    #[test]
    fn test_interpolant_as_density_uses_closed_form() {
        let interp = GridInterpolant::new(
            vec![1.0, 2.0, 3.0],
            vec![1.0, 3.0, 2.0],
            Interpolation::Constant,
        )
        .unwrap();
        assert_eq!(Density::evaluate(&interp, 0.5), 0.0);
        assert!((interp.integral(0.0, 2.5).unwrap() - 3.5).abs() < 1e-12);
        assert_eq!(interp.integral(0.0, 0.5), Some(0.0));
        assert_eq!(interp.integral(3.5, 4.0), Some(0.0));

        // support wider than the knots: mass is clipped to [1, 3]
        let d = Distribution::from_density(interp.clone(), (0.0, 4.0), 50).unwrap();
        assert!(!d.is_grid_backed());
        assert!((d.normalization() - 4.5).abs() < 1e-12);
        assert_eq!(d.density(0.5), 0.0);
        assert_eq!(d.density(3.5), 0.0);
        assert!((d.density(2.0) - 3.0 / 4.5).abs() < 1e-12);
        assert!((d.cdf(2.5) - 3.5 / 4.5).abs() < 1e-12);

        let unbounded =
            Distribution::from_density(interp, (f64::NEG_INFINITY, f64::INFINITY), 50).unwrap();
        assert!((unbounded.normalization() - 4.5).abs() < 1e-12);
        assert!((unbounded.cdf(1.5) - 0.5 / 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_with_quadrature_renormalizes() {
        let d = uniform_02()
            .with_quadrature(AdaptiveQuadrature::new(1e-6, 1e-6, 50))
            .unwrap();
        assert!((d.normalization() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_require_finite_support() {
        assert!(uniform_02().require_finite_support().is_ok());
        assert!(matches!(
            standard_normal().require_finite_support(),
            Err(DensityError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_debug_output() {
        let s = format!("{:?}", uniform_02());
        assert!(s.contains("callable"));
        assert!(s.contains("normalization"));
    }
}
