//! Error type shared by every fallible operation in the crate.
//!
//! Construction-time failures (bad support, bad grid) abort object creation;
//! query-time failures abort only the offending call. Numerical warnings are
//! never errors: they go through the `log` facade.

use thiserror::Error;

/// Errors raised by density construction, integration and convolution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DensityError {
    /// Support bounds are unordered or NaN.
    #[error("invalid support: lower bound {lower} must be strictly below upper bound {upper}")]
    Domain { lower: f64, upper: f64 },

    /// A finite support was required but at least one bound is infinite.
    #[error("support [{lower}, {upper}] must be finite")]
    NotFinite { lower: f64, upper: f64 },

    /// A point lies outside the knot range of a grid interpolant.
    #[error("x = {x} lies outside the grid range [{lower}, {upper}]")]
    OutOfBounds { x: f64, lower: f64, upper: f64 },

    /// The operation is not defined for the given inputs.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Knot positions or co-indexed values are malformed.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// A scalar parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DensityError>;

/// Checks that `lower < upper` and neither bound is NaN.
pub(crate) fn check_support(lower: f64, upper: f64) -> Result<()> {
    if lower.is_nan() || upper.is_nan() || lower >= upper {
        return Err(DensityError::Domain { lower, upper });
    }
    Ok(())
}

/// Checks that the support is ordered and both bounds are finite.
pub(crate) fn check_finite_support(lower: f64, upper: f64) -> Result<()> {
    check_support(lower, upper)?;
    if !lower.is_finite() || !upper.is_finite() {
        return Err(DensityError::NotFinite { lower, upper });
    }
    Ok(())
}
