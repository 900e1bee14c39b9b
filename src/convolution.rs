//! FFT convolution of sampled densities.
//!
//! The density of `X + Y` for independent `X`, `Y` is the continuous
//! convolution `(f ∗ g)(t) = ∫ f(s)·g(t − s) ds`. Sampling both densities
//! on a common step `Δ` turns it into a discrete linear convolution scaled
//! by `Δ`, which is computed as a pointwise product in frequency space.
//!
//! # Grid bookkeeping
//! Inputs of lengths `M` and `N` starting at `t₁` and `t₂` produce
//! `M + N − 1` samples starting at `t₁ + t₂`. The working FFT length is
//! either exactly `M + N − 1` or, when padding is requested, the next
//! power of two; samples beyond `M + N − 1` are discarded.
//!
//! # Limitations
//! Both inputs must have finite support. Infinite supports are never
//! truncated automatically.

use num_complex::Complex;
use rustfft::FftPlanner;

use crate::distribution::Distribution;
use crate::error::{DensityError, Result};
use crate::grid::{GridInterpolant, Interpolation};

/// Result lengths above this emit a warning.
pub const LARGE_GRID_WARNING: usize = 1 << 16;

/// Options for [`convolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvolutionOptions {
    /// Samples per input across its own support; the finer step wins.
    pub gridsize: usize,
    /// Pad the FFT length to the next power of two.
    pub pad_to_pow2: bool,
}

impl Default for ConvolutionOptions {
    fn default() -> Self {
        Self {
            gridsize: 1000,
            pad_to_pow2: true,
        }
    }
}

impl ConvolutionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gridsize(mut self, gridsize: usize) -> Self {
        self.gridsize = gridsize;
        self
    }

    pub fn with_pad_to_pow2(mut self, pad: bool) -> Self {
        self.pad_to_pow2 = pad;
        self
    }
}

/// Convolved density samples on a uniform grid `start + k·step`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledConvolution {
    pub start: f64,
    pub step: f64,
    pub values: Vec<f64>,
}

impl SampledConvolution {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Abscissae of the samples.
    pub fn grid(&self) -> Vec<f64> {
        (0..self.values.len())
            .map(|k| self.start + k as f64 * self.step)
            .collect()
    }

    /// Wraps the samples as a linearly interpolated distribution whose
    /// sampling bin count equals the grid length.
    ///
    /// Negative round-off from the inverse transform is clipped to zero.
    pub fn into_distribution(self) -> Result<Distribution> {
        let bins = self.values.len();
        let values = self.values.into_iter().map(|v| v.max(0.0)).collect();
        let interp = GridInterpolant::uniform(self.start, self.step, values, Interpolation::Linear)?;
        Distribution::from_interpolant_with_bins(interp, bins)
    }
}

/// Convolves two sampled densities sharing the step `step`.
///
/// `offset1` and `offset2` are the abscissae of the first sample of each
/// input. The result is `step`-scaled so that it approximates the
/// continuous convolution.
///
/// # Errors
/// [`DensityError::InvalidParameter`] if either input is empty or `step`
/// is not positive and finite.
///
/// # Examples
/// ```
/// use u_density::convolution::convolve_samples;
/// let c = convolve_samples(&[1.0, 1.0], &[1.0, 2.0, 3.0], 0.5, 1.0, -1.0, true).unwrap();
/// assert_eq!(c.len(), 4);
/// assert_eq!(c.start, 0.0);
/// let expected = [0.5, 1.5, 2.5, 1.5];
/// for (v, e) in c.values.iter().zip(expected) {
///     assert!((v - e).abs() < 1e-12);
/// }
/// ```
pub fn convolve_samples(
    y1: &[f64],
    y2: &[f64],
    step: f64,
    offset1: f64,
    offset2: f64,
    pad_to_pow2: bool,
) -> Result<SampledConvolution> {
    if y1.is_empty() || y2.is_empty() {
        return Err(DensityError::InvalidParameter(
            "convolution inputs must be non-empty".to_string(),
        ));
    }
    if !(step > 0.0) || !step.is_finite() {
        return Err(DensityError::InvalidParameter(format!(
            "convolution step must be positive and finite, got {step}"
        )));
    }

    let full = y1.len() + y2.len() - 1;
    let work = if pad_to_pow2 {
        full.next_power_of_two()
    } else {
        full
    };
    if full > LARGE_GRID_WARNING {
        log::warn!(
            "convolution grid has {full} samples (> {LARGE_GRID_WARNING}); consider a smaller gridsize"
        );
    }
    log::debug!(
        "fft convolution: lengths {} and {}, output {full}, transform {work}, step {step}",
        y1.len(),
        y2.len()
    );

    let mut values = fft_linear_convolution(y1, y2, work);
    values.truncate(full);
    for v in values.iter_mut() {
        *v *= step;
    }

    Ok(SampledConvolution {
        start: offset1 + offset2,
        step,
        values,
    })
}

fn fft_linear_convolution(y1: &[f64], y2: &[f64], len: usize) -> Vec<f64> {
    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(len);
    let inverse = planner.plan_fft_inverse(len);

    let mut a = zero_padded(y1, len);
    let mut b = zero_padded(y2, len);
    forward.process(&mut a);
    forward.process(&mut b);
    for (x, y) in a.iter_mut().zip(&b) {
        *x *= *y;
    }
    inverse.process(&mut a);

    // rustfft leaves the inverse unnormalized
    let scale = 1.0 / len as f64;
    a.into_iter().map(|c| c.re * scale).collect()
}

fn zero_padded(y: &[f64], len: usize) -> Vec<Complex<f64>> {
    let mut out = vec![Complex::new(0.0, 0.0); len];
    for (slot, &v) in out.iter_mut().zip(y) {
        slot.re = v;
    }
    out
}

/// Samples `d`'s normalized density at `lower + k·step` for every such point
/// not beyond the upper bound.
///
/// When `step` does not divide the width, the partial step below the upper
/// bound is dropped rather than extended past it. A last point that lands on
/// the bound only up to round-off is snapped onto it.
fn sample_on_step(d: &Distribution, step: f64) -> Vec<f64> {
    let (lower, upper) = d.support();
    let n = ((upper - lower) / step + 1e-9).floor() as usize + 1;
    (0..n)
        .map(|k| d.density((lower + k as f64 * step).min(upper)))
        .collect()
}

/// Distribution of the sum of two independent variables.
///
/// Each input gets the step `(b − a)/(gridsize − 1)`; the smaller one is
/// used for both. The result is a linear-grid distribution starting at
/// `a₁ + a₂`.
///
/// # Errors
/// - [`DensityError::UnsupportedOperation`] if either support is not finite.
/// - [`DensityError::InvalidParameter`] if `gridsize < 2`.
///
/// # Examples
/// ```
/// use u_density::{convolve, ConvolutionOptions, Distribution};
/// let u = Distribution::new(|_| 1.0, (0.0, 1.0)).unwrap();
/// let tri = convolve(&u, &u, ConvolutionOptions::default().with_gridsize(201)).unwrap();
/// assert_eq!(tri.minimum(), 0.0);
/// assert!((tri.maximum() - 2.0).abs() < 1e-9);
/// assert!((tri.cdf(1.0) - 0.5).abs() < 1e-6);
/// ```
pub fn convolve(d1: &Distribution, d2: &Distribution, options: ConvolutionOptions) -> Result<Distribution> {
    d1.require_finite_support()?;
    d2.require_finite_support()?;
    if options.gridsize < 2 {
        return Err(DensityError::InvalidParameter(format!(
            "convolution gridsize must be at least 2, got {}",
            options.gridsize
        )));
    }

    let intervals = (options.gridsize - 1) as f64;
    let (a1, b1) = d1.support();
    let (a2, b2) = d2.support();
    let step = ((b1 - a1) / intervals).min((b2 - a2) / intervals);

    let y1 = sample_on_step(d1, step);
    let y2 = sample_on_step(d2, step);
    convolve_samples(&y1, &y2, step, a1, a2, options.pad_to_pow2)?.into_distribution()
}
