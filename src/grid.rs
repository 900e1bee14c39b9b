//! Functions sampled on an ordered 1-D grid.
//!
//! A [`GridInterpolant`] holds knot positions, co-indexed raw values and an
//! [`Interpolation`] scheme:
//!
//! - **Constant**: each knot owns a bin whose edges are the midpoints to its
//!   neighbours; the first and last bins are half-bins ending at the outer
//!   knots. The function is flat across a bin.
//! - **Linear**: consecutive knots bound a bin and the function is the
//!   straight line between their values.
//!
//! Knots are validated (finite, strictly increasing, at least two); values
//! are stored as given.

use crate::error::{DensityError, Result};

/// Interpolation scheme between knots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interpolation {
    Constant,
    Linear,
}

/// A function known at a strictly increasing set of knots.
#[derive(Debug, Clone, PartialEq)]
pub struct GridInterpolant {
    grid: Vec<f64>,
    values: Vec<f64>,
    scheme: Interpolation,
    edges: Vec<f64>,
}

impl GridInterpolant {
    /// Creates an interpolant from knots and co-indexed values.
    ///
    /// # Errors
    /// [`DensityError::InvalidGrid`] if there are fewer than two knots, the
    /// lengths differ, or the knots are not finite and strictly increasing.
    ///
    /// # Examples
    /// ```
    /// use u_density::{GridInterpolant, Interpolation};
    /// let g = GridInterpolant::new(vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 0.0], Interpolation::Linear).unwrap();
    /// assert_eq!(g.evaluate(0.5).unwrap(), 1.0);
    /// assert!(g.evaluate(3.0).is_err());
    /// ```
    pub fn new(grid: Vec<f64>, values: Vec<f64>, scheme: Interpolation) -> Result<Self> {
        if grid.len() < 2 {
            return Err(DensityError::InvalidGrid(format!(
                "at least 2 knots required, got {}",
                grid.len()
            )));
        }
        if grid.len() != values.len() {
            return Err(DensityError::InvalidGrid(format!(
                "{} knots but {} values",
                grid.len(),
                values.len()
            )));
        }
        if let Some(bad) = grid.iter().position(|g| !g.is_finite()) {
            return Err(DensityError::InvalidGrid(format!(
                "knot {bad} is not finite ({})",
                grid[bad]
            )));
        }
        if let Some(i) = grid.windows(2).position(|w| w[0] >= w[1]) {
            return Err(DensityError::InvalidGrid(format!(
                "knots must be strictly increasing: grid[{i}] = {} >= grid[{}] = {}",
                grid[i],
                i + 1,
                grid[i + 1]
            )));
        }
        let edges = bin_edges(&grid, scheme);
        Ok(Self {
            grid,
            values,
            scheme,
            edges,
        })
    }

    /// Samples `f` at every knot.
    pub fn from_fn<F>(f: F, grid: Vec<f64>, scheme: Interpolation) -> Result<Self>
    where
        F: Fn(f64) -> f64,
    {
        let values = grid.iter().map(|&x| f(x)).collect();
        Self::new(grid, values, scheme)
    }

    /// Knots at `start + k·step` for `k in 0..values.len()`.
    pub fn uniform(start: f64, step: f64, values: Vec<f64>, scheme: Interpolation) -> Result<Self> {
        if !(step > 0.0) || !step.is_finite() {
            return Err(DensityError::InvalidGrid(format!(
                "step must be positive and finite, got {step}"
            )));
        }
        let grid = (0..values.len()).map(|k| start + k as f64 * step).collect();
        Self::new(grid, values, scheme)
    }

    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn scheme(&self) -> Interpolation {
        self.scheme
    }

    /// Number of knots.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// Always `false`: construction requires at least two knots.
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn lower(&self) -> f64 {
        self.grid[0]
    }

    pub fn upper(&self) -> f64 {
        self.grid[self.grid.len() - 1]
    }

    /// Bin boundaries for the scheme.
    ///
    /// Constant: `n + 1` edges (outer knots plus interior midpoints).
    /// Linear: the `n` knots themselves.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins: `n` for constant, `n − 1` for linear.
    pub fn bin_count(&self) -> usize {
        self.edges.len() - 1
    }

    /// Evaluates the interpolant.
    ///
    /// # Errors
    /// [`DensityError::OutOfBounds`] outside `[grid[0], grid[n-1]]`.
    pub fn evaluate(&self, x: f64) -> Result<f64> {
        self.check_in_range(x)?;
        Ok(self.value_at(x))
    }

    pub(crate) fn check_in_range(&self, x: f64) -> Result<()> {
        if !(x >= self.lower() && x <= self.upper()) {
            return Err(DensityError::OutOfBounds {
                x,
                lower: self.lower(),
                upper: self.upper(),
            });
        }
        Ok(())
    }

    /// Evaluates without a range check; `x` is clamped into the last bin.
    pub(crate) fn value_at(&self, x: f64) -> f64 {
        let i = locate_bin(&self.edges, x);
        match self.scheme {
            Interpolation::Constant => self.values[i],
            Interpolation::Linear => {
                let (x0, x1) = (self.grid[i], self.grid[i + 1]);
                let (v0, v1) = (self.values[i], self.values[i + 1]);
                v0 + (v1 - v0) * (x - x0) / (x1 - x0)
            }
        }
    }
}

fn bin_edges(grid: &[f64], scheme: Interpolation) -> Vec<f64> {
    match scheme {
        Interpolation::Linear => grid.to_vec(),
        Interpolation::Constant => {
            let n = grid.len();
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(grid[0]);
            edges.extend(grid.windows(2).map(|w| 0.5 * (w[0] + w[1])));
            edges.push(grid[n - 1]);
            edges
        }
    }
}

/// Index `i` of the bin `[sorted[i], sorted[i+1])` containing `key`.
///
/// `sorted` must be nondecreasing with at least two entries. Keys below the
/// first entry map to bin 0 and keys at or above the last map to the final
/// bin. Among repeated entries the last bin starting at or before `key` wins,
/// so a key landing on a flat run of a cumulative table selects the bin
/// whose upper boundary actually exceeds it.
///
/// # Examples
/// ```
/// use u_density::grid::locate_bin;
/// let edges = [0.0, 1.0, 2.0, 3.0];
/// assert_eq!(locate_bin(&edges, 1.5), 1);
/// assert_eq!(locate_bin(&edges, 1.0), 1);
/// assert_eq!(locate_bin(&edges, 3.0), 2);
/// assert_eq!(locate_bin(&edges, -4.0), 0);
/// ```
pub fn locate_bin(sorted: &[f64], key: f64) -> usize {
    debug_assert!(sorted.len() >= 2);
    let last_bin = sorted.len() - 2;
    sorted
        .partition_point(|&e| e <= key)
        .saturating_sub(1)
        .min(last_bin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_edges() {
        let g = GridInterpolant::new(vec![1.0, 2.0, 3.0], vec![1.0, 3.0, 2.0], Interpolation::Constant)
            .unwrap();
        assert_eq!(g.edges(), &[1.0, 1.5, 2.5, 3.0]);
        assert_eq!(g.bin_count(), 3);
    }

    #[test]
    fn test_linear_edges_are_knots() {
        let g = GridInterpolant::new(vec![0.0, 1.0, 4.0], vec![1.0, 1.0, 1.0], Interpolation::Linear)
            .unwrap();
        assert_eq!(g.edges(), g.grid());
        assert_eq!(g.bin_count(), 2);
    }

    #[test]
    fn test_constant_evaluate_nearest_knot() {
        let g = GridInterpolant::new(vec![1.0, 2.0, 3.0], vec![1.0, 3.0, 2.0], Interpolation::Constant)
            .unwrap();
        assert_eq!(g.evaluate(1.2).unwrap(), 1.0);
        assert_eq!(g.evaluate(1.6).unwrap(), 3.0);
        assert_eq!(g.evaluate(2.4).unwrap(), 3.0);
        assert_eq!(g.evaluate(2.9).unwrap(), 2.0);
        assert_eq!(g.evaluate(3.0).unwrap(), 2.0);
    }

    #[test]
    fn test_linear_evaluate() {
        let g = GridInterpolant::new(vec![0.0, 2.0, 3.0], vec![0.0, 4.0, 1.0], Interpolation::Linear)
            .unwrap();
        assert!((g.evaluate(1.0).unwrap() - 2.0).abs() < 1e-15);
        assert!((g.evaluate(2.5).unwrap() - 2.5).abs() < 1e-15);
        assert_eq!(g.evaluate(3.0).unwrap(), 1.0);
        assert_eq!(g.evaluate(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_evaluate_out_of_bounds() {
        let g = GridInterpolant::new(vec![0.0, 1.0], vec![1.0, 1.0], Interpolation::Linear).unwrap();
        assert!(matches!(
            g.evaluate(1.5),
            Err(DensityError::OutOfBounds { .. })
        ));
        assert!(g.evaluate(f64::NAN).is_err());
    }

    #[test]
    fn test_invalid_grids() {
        use Interpolation::Linear;
        assert!(GridInterpolant::new(vec![0.0], vec![1.0], Linear).is_err());
        assert!(GridInterpolant::new(vec![0.0, 1.0], vec![1.0], Linear).is_err());
        assert!(GridInterpolant::new(vec![0.0, 0.0], vec![1.0, 1.0], Linear).is_err());
        assert!(GridInterpolant::new(vec![1.0, 0.0], vec![1.0, 1.0], Linear).is_err());
        assert!(GridInterpolant::new(vec![0.0, f64::INFINITY], vec![1.0, 1.0], Linear).is_err());
    }

    #[test]
    fn test_uniform_grid() {
        let g = GridInterpolant::uniform(-1.0, 0.5, vec![0.0; 5], Interpolation::Linear).unwrap();
        assert_eq!(g.grid(), &[-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert!(GridInterpolant::uniform(0.0, 0.0, vec![0.0; 3], Interpolation::Linear).is_err());
    }

    #[test]
    fn test_from_fn() {
        let g = GridInterpolant::from_fn(|x| x * x, vec![0.0, 1.0, 2.0], Interpolation::Linear).unwrap();
        assert_eq!(g.values(), &[0.0, 1.0, 4.0]);
        assert_eq!(g.len(), 3);
        assert!(!g.is_empty());
    }

    #[test]
    fn test_locate_bin_flat_runs() {
        // cumulative table with a zero-mass second bin
        let cum = [0.0, 0.5, 0.5, 1.0];
        assert_eq!(locate_bin(&cum, 0.25), 0);
        assert_eq!(locate_bin(&cum, 0.5), 2);
        assert_eq!(locate_bin(&cum, 0.75), 2);
        assert_eq!(locate_bin(&cum, 1.0), 2);
    }
}
