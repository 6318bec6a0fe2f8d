use crate::core::{reduce, reduce_pair, DotOp, MaxOp, MinOp, SquaredDistanceOp, SumOp};
use crate::error::{ReduceError, Result};
use crate::simd::{capabilities, should_vectorize, SimdElement};
use crate::types::Real;

/// Sum of all elements. An empty buffer sums to zero.
///
/// # Example
///
/// ```
/// use simd_reduce::sum;
///
/// assert_eq!(sum(&[1.0f64, 2.0, 3.0, 4.0, 5.0]), 15.0);
/// assert_eq!(sum::<i32>(&[]), 0);
/// ```
pub fn sum<T: SimdElement>(data: &[T]) -> T {
    reduce(data, &SumOp)
}

/// Arithmetic mean, computed as `sum(data) / data.len()`.
///
/// Floats average in their own width; integers average to `f64`.
///
/// # Errors
///
/// [`ReduceError::EmptyInput`] when `data` is empty.
///
/// # Example
///
/// ```
/// use simd_reduce::average;
///
/// assert_eq!(average(&[1.0f64, 2.0, 3.0, 4.0, 5.0]).unwrap(), 3.0);
/// assert_eq!(average(&[1i32, 2]).unwrap(), 1.5);
/// ```
pub fn average<T: SimdElement>(data: &[T]) -> Result<T::Mean> {
    if data.is_empty() {
        return Err(ReduceError::empty("average"));
    }
    Ok(T::mean(sum(data), data.len()))
}

/// Smallest element.
///
/// # Errors
///
/// [`ReduceError::EmptyInput`] when `data` is empty.
pub fn min<T: SimdElement>(data: &[T]) -> Result<T> {
    if data.is_empty() {
        return Err(ReduceError::empty("min"));
    }
    Ok(reduce(data, &MinOp))
}

/// Largest element.
///
/// # Errors
///
/// [`ReduceError::EmptyInput`] when `data` is empty.
pub fn max<T: SimdElement>(data: &[T]) -> Result<T> {
    if data.is_empty() {
        return Err(ReduceError::empty("max"));
    }
    Ok(reduce(data, &MaxOp))
}

/// Elements satisfying `predicate`, in their original order.
///
/// On the vector path the scan walks the buffer one lane group at a time,
/// but the predicate itself is still evaluated element by element.
///
/// # Example
///
/// ```
/// use simd_reduce::where_simd;
///
/// let data: Vec<i64> = (1..=20).collect();
/// let even = where_simd(&data, |x| x % 2 == 0);
/// assert_eq!(even, vec![2, 4, 6, 8, 10, 12, 14, 16, 18, 20]);
/// ```
pub fn where_simd<T, F>(data: &[T], mut predicate: F) -> Vec<T>
where
    T: SimdElement,
    F: FnMut(T) -> bool,
{
    let caps = capabilities();
    let lanes = caps.lanes_for::<T>();
    let mut out = Vec::new();

    if !should_vectorize(data.len(), lanes, caps.hardware_acceleration) {
        out.extend(data.iter().copied().filter(|&x| predicate(x)));
        return out;
    }

    let groups = data.chunks_exact(lanes);
    let tail = groups.remainder();
    for group in groups {
        for &x in group {
            if predicate(x) {
                out.push(x);
            }
        }
    }
    out.extend(tail.iter().copied().filter(|&x| predicate(x)));
    out
}

/// Σ aᵢ·bᵢ
///
/// # Errors
///
/// [`ReduceError::LengthMismatch`] when `a` and `b` differ in length.
///
/// # Example
///
/// ```
/// use simd_reduce::dot_product;
///
/// assert_eq!(dot_product(&[1.0f64, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap(), 32.0);
/// assert!(dot_product(&[1.0f64, 2.0], &[1.0]).is_err());
/// ```
pub fn dot_product<T: SimdElement>(a: &[T], b: &[T]) -> Result<T> {
    reduce_pair(a, b, &DotOp)
}

/// √Σ (aᵢ − bᵢ)²
///
/// # Errors
///
/// [`ReduceError::LengthMismatch`] when `a` and `b` differ in length.
pub fn euclidean_distance<T: SimdElement + Real>(a: &[T], b: &[T]) -> Result<T> {
    reduce_pair(a, b, &SquaredDistanceOp).map(Real::sqrt)
}

/// Lowest and highest element in one call.
///
/// # Errors
///
/// [`ReduceError::EmptyInput`] when `data` is empty.
pub fn min_max<T: SimdElement>(data: &[T]) -> Result<(T, T)> {
    if data.is_empty() {
        return Err(ReduceError::empty("min_max"));
    }
    Ok((reduce(data, &MinOp), reduce(data, &MaxOp)))
}
