//! Reduction results stamped with dispatch and timing metadata.

use std::time::{Duration, Instant};

use crate::error::Result;
use crate::simd::capabilities;
use crate::types::Numeric;

/// A reduction value plus the facts reporting layers surface next to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReductionResult<T> {
    pub value: T,
    pub element_count: usize,
    /// Whether the dispatch policy sent a buffer of this length and element
    /// type down the vector path.
    pub used_simd: bool,
    pub elapsed: Duration,
}

impl<T> ReductionResult<T> {
    /// Time `op(data)` and record whether it was vectorized.
    ///
    /// # Example
    ///
    /// ```
    /// use simd_reduce::{sum, ReductionResult};
    ///
    /// let data = vec![1.5f64; 1000];
    /// let r = ReductionResult::capture(&data, |d| sum(d));
    /// assert_eq!(r.value, 1500.0);
    /// assert_eq!(r.element_count, 1000);
    /// ```
    pub fn capture<E, F>(data: &[E], op: F) -> Self
    where
        E: Numeric,
        F: FnOnce(&[E]) -> T,
    {
        let used_simd = capabilities().would_vectorize::<E>(data.len());
        let start = Instant::now();
        let value = op(data);
        let elapsed = start.elapsed();
        tracing::trace!(
            kind = %E::KIND,
            len = data.len(),
            used_simd,
            elapsed_ns = elapsed.as_nanos() as u64,
            "reduction captured"
        );
        Self {
            value,
            element_count: data.len(),
            used_simd,
            elapsed,
        }
    }

    /// [`ReductionResult::capture`] for fallible operations.
    ///
    /// # Errors
    ///
    /// Whatever `op` returns.
    pub fn try_capture<E, F>(data: &[E], op: F) -> Result<Self>
    where
        E: Numeric,
        F: FnOnce(&[E]) -> Result<T>,
    {
        let captured = ReductionResult::capture(data, op);
        Ok(ReductionResult {
            value: captured.value?,
            element_count: captured.element_count,
            used_simd: captured.used_simd,
            elapsed: captured.elapsed,
        })
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ReductionResult<U> {
        ReductionResult {
            value: f(self.value),
            element_count: self.element_count,
            used_simd: self.used_simd,
            elapsed: self.elapsed,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::api::{average, max, sum};
    use crate::error::ReduceError;

    #[test]
    fn test_capture_short_buffer_is_scalar() {
        let r = ReductionResult::capture(&[1i32, 2, 3], |d| sum(d));
        assert_eq!(r.value, 6);
        assert_eq!(r.element_count, 3);
        assert!(!r.used_simd);
    }

    #[test]
    fn test_capture_matches_policy() {
        let data = vec![2.0f32; 4096];
        let r = ReductionResult::capture(&data, |d| sum(d));
        assert_eq!(r.value, 8192.0);
        assert_eq!(r.used_simd, capabilities().would_vectorize::<f32>(4096));
        assert_eq!(r.used_simd, capabilities().hardware_acceleration);
    }

    #[test]
    fn test_try_capture() {
        let r = ReductionResult::try_capture(&[1i64, 2], |d| average(d)).unwrap();
        assert_eq!(r.value, 1.5);

        let empty: [f64; 0] = [];
        assert_eq!(
            ReductionResult::try_capture(&empty, |d| max(d)).unwrap_err(),
            ReduceError::EmptyInput { operation: "max" }
        );
    }

    #[test]
    fn test_map_keeps_metadata() {
        let r = ReductionResult::capture(&[3i32, 4], |d| sum(d)).map(|v| v * 2);
        assert_eq!(r.value, 14);
        assert_eq!(r.element_count, 2);
    }
}
