//! Financial statistics composed from the primitive reductions.
//!
//! Nothing here touches lane groups directly; each function is a handful of
//! calls into [`crate::api`] and [`crate::core::reduce`].

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::api::{average, dot_product};
use crate::core::{reduce, SquaredDeviationOp};
use crate::error::{ReduceError, Result};
use crate::simd::SimdElement;
use crate::types::{Numeric, Real};

/// Trading days used to annualise daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Weighted portfolio return: Σ returnᵢ·weightᵢ.
///
/// # Errors
///
/// [`ReduceError::LengthMismatch`] when the two series differ in length.
///
/// # Example
///
/// ```
/// use simd_reduce::portfolio_return;
///
/// let returns = [0.05f64, 0.02, -0.01, 0.03];
/// let weights = [0.4f64, 0.3, 0.1, 0.2];
/// let r = portfolio_return(&returns, &weights).unwrap();
/// assert!((r - 0.031).abs() < 1e-12);
/// ```
pub fn portfolio_return<T: SimdElement>(returns: &[T], weights: &[T]) -> Result<T> {
    dot_product(returns, weights)
}

/// Sample variance, Σ(xᵢ − x̄)² / (n − 1).
///
/// # Errors
///
/// [`ReduceError::InsufficientData`] with fewer than two observations.
pub fn variance<T: SimdElement + Real>(returns: &[T]) -> Result<T> {
    sample_variance("variance", returns)
}

/// Sample standard deviation of `returns`.
///
/// # Errors
///
/// [`ReduceError::InsufficientData`] with fewer than two observations.
pub fn volatility<T: SimdElement + Real>(returns: &[T]) -> Result<T> {
    sample_variance("volatility", returns).map(Real::sqrt)
}

/// Volatility scaled by √`periods_per_year`, e.g. [`TRADING_DAYS_PER_YEAR`]
/// for daily returns.
///
/// # Errors
///
/// [`ReduceError::InsufficientData`] with fewer than two observations.
pub fn annualized_volatility<T: SimdElement + Real>(
    returns: &[T],
    periods_per_year: f64,
) -> Result<T> {
    let vol = sample_variance("annualized_volatility", returns)?.sqrt();
    Ok(vol.mul(T::from_f64(periods_per_year.sqrt())))
}

/// Parametric (Gaussian) value at risk: −(mean + z·volatility).
///
/// `z` comes from [`z_score`], a four-step table rather than the inverse
/// normal CDF.
///
/// # Errors
///
/// [`ReduceError::InsufficientData`] with fewer than two observations.
pub fn value_at_risk<T: SimdElement + Real>(returns: &[T], confidence: f64) -> Result<T> {
    let variance = sample_variance("value_at_risk", returns)?;
    let mean = average(returns)?;
    let z = T::from_f64(z_score(confidence));
    Ok(-mean.add(z.mul(variance.sqrt())))
}

/// Stepwise z-score lookup used by [`value_at_risk`].
///
/// | confidence | z |
/// |------------|-------|
/// | ≥ 0.99 | 2.326 |
/// | ≥ 0.95 | 1.645 |
/// | ≥ 0.90 | 1.282 |
/// | otherwise | 1.0 |
pub fn z_score(confidence: f64) -> f64 {
    if confidence >= 0.99 {
        2.326
    } else if confidence >= 0.95 {
        1.645
    } else if confidence >= 0.90 {
        1.282
    } else {
        1.0
    }
}

/// Row-major matrix times vector: `result[i] = dot(row_i, vector)`.
///
/// `matrix` holds `rows × cols` elements. With the `parallel` feature the
/// rows are spread over the rayon pool.
///
/// # Errors
///
/// [`ReduceError::DimensionMismatch`] when `matrix.len() != rows * cols` or
/// when `cols != vector.len()`.
///
/// # Example
///
/// ```
/// use simd_reduce::matrix_vector_multiply;
///
/// let m = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0]; // 2x3
/// let v = [1.0f64, 0.0, -1.0];
/// assert_eq!(matrix_vector_multiply(&m, 2, 3, &v).unwrap(), vec![-2.0, -2.0]);
/// ```
pub fn matrix_vector_multiply<T: SimdElement>(
    matrix: &[T],
    rows: usize,
    cols: usize,
    vector: &[T],
) -> Result<Vec<T>> {
    let expected = rows.checked_mul(cols).ok_or_else(|| {
        ReduceError::DimensionMismatch(format!("{}x{} matrix overflows usize", rows, cols))
    })?;
    if matrix.len() != expected {
        return Err(ReduceError::DimensionMismatch(format!(
            "matrix: expected {} elements for {}x{}, got {}",
            expected,
            rows,
            cols,
            matrix.len()
        )));
    }
    if cols != vector.len() {
        return Err(ReduceError::DimensionMismatch(format!(
            "matrix has {} columns, vector has {} elements",
            cols,
            vector.len()
        )));
    }
    if cols == 0 {
        return Ok(vec![T::zero(); rows]);
    }

    #[cfg(feature = "parallel")]
    {
        matrix
            .par_chunks_exact(cols)
            .map(|row| dot_product(row, vector))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        matrix
            .chunks_exact(cols)
            .map(|row| dot_product(row, vector))
            .collect()
    }
}

fn sample_variance<T: SimdElement + Real>(operation: &'static str, data: &[T]) -> Result<T> {
    if data.len() < 2 {
        return Err(ReduceError::InsufficientData {
            operation,
            required: 2,
            actual: data.len(),
        });
    }
    let mean = average(data)?;
    let squared = reduce(data, &SquaredDeviationOp::new(mean));
    Ok(squared / T::from_usize(data.len() - 1))
}
