//! Closed-form inverse CDF for grid-backed densities.
//!
//! A [`GridQuantile`] is precomputed once from an interpolant and its
//! normalization: bin edges, normalized values and the normalized CDF at
//! every edge. Evaluating `F⁻¹(u)` is then a binary search for the bin whose
//! cumulative range contains `u`, followed by an exact inversion inside that
//! bin:
//!
//! - **Constant** bins have a linear CDF, inverted by proportion.
//! - **Linear** bins have a quadratic CDF. With offset `s` from the left edge
//!   the equation is `½·a·s² + b·s + c = 0`, where `a` is the normalized
//!   slope, `b` the normalized left value and `c = F(x₀) − u`.

use rand::Rng;

use crate::analytic::{bin_masses, linear_ramp_integral};
use crate::error::{DensityError, Result};
use crate::grid::{locate_bin, GridInterpolant, Interpolation};
use crate::random::uniform;
use crate::stats::prefix_sums;

/// Relative size of the quadratic term below which a linear bin is solved
/// as if its density were flat.
const FLAT_BIN_TOL: f64 = 1e-12;

/// Negative discriminants smaller than this (relative to `b²`) are treated as
/// round-off and clamped silently.
const DISCRIMINANT_NOISE: f64 = 1e-10;

/// Precomputed CDF table and inverse for a grid interpolant.
#[derive(Debug, Clone, PartialEq)]
pub struct GridQuantile {
    scheme: Interpolation,
    edges: Vec<f64>,
    values: Vec<f64>,
    cumulative: Vec<f64>,
}

impl GridQuantile {
    /// Builds the table for `interp` normalized by `normalization`.
    ///
    /// # Errors
    /// [`DensityError::InvalidParameter`] if `normalization` is not positive
    /// and finite.
    pub fn new(interp: &GridInterpolant, normalization: f64) -> Result<Self> {
        if !(normalization > 0.0) || !normalization.is_finite() {
            return Err(DensityError::InvalidParameter(format!(
                "normalization must be positive and finite, got {normalization}"
            )));
        }
        let masses: Vec<f64> = bin_masses(interp)
            .into_iter()
            .map(|m| m / normalization)
            .collect();
        let mut cumulative = prefix_sums(&masses);
        // keep the table monotone even if a raw value was slightly negative
        for i in 1..cumulative.len() {
            if cumulative[i] < cumulative[i - 1] {
                cumulative[i] = cumulative[i - 1];
            }
        }
        Ok(Self {
            scheme: interp.scheme(),
            edges: interp.edges().to_vec(),
            values: interp.values().iter().map(|v| v / normalization).collect(),
            cumulative,
        })
    }

    pub fn scheme(&self) -> Interpolation {
        self.scheme
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Normalized CDF at every bin edge.
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn lower(&self) -> f64 {
        self.edges[0]
    }

    pub fn upper(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// CDF at `x`: 0 at or below the lower knot, 1 at or above the upper.
    pub fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x <= self.lower() {
            return 0.0;
        }
        if x >= self.upper() {
            return 1.0;
        }
        let i = locate_bin(&self.edges, x);
        let s = x - self.edges[i];
        let partial = match self.scheme {
            Interpolation::Constant => s * self.values[i],
            Interpolation::Linear => {
                let h = self.edges[i + 1] - self.edges[i];
                let slope = (self.values[i + 1] - self.values[i]) / h;
                linear_ramp_integral(self.values[i], slope, s)
            }
        };
        (self.cumulative[i] + partial).clamp(0.0, 1.0)
    }

    /// Inverse CDF: the `x` with `cdf(x) = u`.
    ///
    /// `u ≤ 0` maps to the lower knot and `u ≥ 1` to the upper knot. A
    /// zero-mass bin resolves to its left edge.
    pub fn quantile(&self, u: f64) -> f64 {
        if u.is_nan() {
            return f64::NAN;
        }
        if u <= 0.0 {
            return self.lower();
        }
        if u >= 1.0 {
            return self.upper();
        }
        let i = locate_bin(&self.cumulative, u);
        let (x0, x1) = (self.edges[i], self.edges[i + 1]);
        match self.scheme {
            Interpolation::Constant => {
                let weight = self.cumulative[i + 1] - self.cumulative[i];
                invert_constant_bin(x0, x1, self.cumulative[i], weight, u)
            }
            Interpolation::Linear => {
                let h = x1 - x0;
                let a = (self.values[i + 1] - self.values[i]) / h;
                let b = self.values[i];
                let c = self.cumulative[i] - u;
                x0 + solve_linear_bin(a, b, c, h)
            }
        }
    }

    /// Draws `n` independent samples by mapping uniforms through
    /// [`quantile`](Self::quantile).
    pub fn sample<R: Rng>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.quantile(uniform(rng))).collect()
    }
}

/// Inverts the linear CDF of a constant bin `[x0, x1]` starting at `cum_lo`.
pub fn invert_constant_bin(x0: f64, x1: f64, cum_lo: f64, weight: f64, u: f64) -> f64 {
    if weight <= 0.0 {
        return x0;
    }
    let frac = ((u - cum_lo) / weight).clamp(0.0, 1.0);
    x0 + frac * (x1 - x0)
}

/// Offset `s ∈ [0, h]` solving `½·a·s² + b·s + c = 0` within a linear bin.
///
/// Root policy: a root inside `[0, h]` wins; if both are inside, the one
/// nearer the bin centre wins; if neither is, the root nearest the bin is
/// clamped into it. When the quadratic term is negligible over the bin the
/// linear solve `s = −c/b` is used instead.
///
/// # Examples
/// ```
/// use u_density::quantile::solve_linear_bin;
/// // density 2s on [0, 1]: CDF s², so u = 0.25 ⇒ s = 0.5
/// let s = solve_linear_bin(2.0, 0.0, -0.25, 1.0);
/// assert!((s - 0.5).abs() < 1e-12);
/// ```
pub fn solve_linear_bin(a: f64, b: f64, c: f64, h: f64) -> f64 {
    if (0.5 * a * h * h).abs() <= FLAT_BIN_TOL * (b * h).abs() {
        if b == 0.0 {
            return 0.0;
        }
        return (-c / b).clamp(0.0, h);
    }

    let mut disc = b * b - 2.0 * a * c;
    if disc < 0.0 {
        if disc < -DISCRIMINANT_NOISE * (b * b).max(f64::MIN_POSITIVE) {
            log::warn!("clamping negative discriminant {disc:e} in linear-bin inversion (a={a}, b={b}, c={c})");
        }
        disc = 0.0;
    }

    // stable pair: q = -(b + sign(b)·√disc), roots q/a and 2c/q
    let sqrt_disc = disc.sqrt();
    let q = -(b + b.signum() * sqrt_disc);
    let (r1, r2) = if q == 0.0 {
        let r = -b / a;
        (r, r)
    } else {
        (q / a, 2.0 * c / q)
    };

    choose_root(r1, r2, h)
}

fn choose_root(r1: f64, r2: f64, h: f64) -> f64 {
    let slack = 1e-9 * h;
    let inside = |r: f64| r.is_finite() && r >= -slack && r <= h + slack;
    let center = 0.5 * h;
    let chosen = match (inside(r1), inside(r2)) {
        (true, true) => {
            if (r1 - center).abs() <= (r2 - center).abs() {
                r1
            } else {
                r2
            }
        }
        (true, false) => r1,
        (false, true) => r2,
        (false, false) => {
            let distance = |r: f64| {
                if r.is_finite() {
                    (r - r.clamp(0.0, h)).abs()
                } else {
                    f64::INFINITY
                }
            };
            if distance(r1) <= distance(r2) {
                r1
            } else {
                r2
            }
        }
    };
    if chosen.is_finite() {
        chosen.clamp(0.0, h)
    } else {
        0.0
    }
}
