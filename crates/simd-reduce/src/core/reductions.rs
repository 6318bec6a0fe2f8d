use crate::simd::LaneGroup;
use crate::types::Numeric;

/// The algebra of a single-operand reduction.
///
/// `scalar` and `lane` must apply the same associative operation, and
/// `identity` must be its neutral element, so that splitting a buffer into
/// lane groups and a tail cannot change the result (up to floating-point
/// reassociation).
pub trait Reduction<T: Numeric> {
    /// Neutral element; also the initial value of every accumulator lane.
    fn identity(&self) -> T;

    /// Folds one lane group into the accumulator.
    fn lane<V: LaneGroup<T>>(&self, acc: V, x: V) -> V;

    /// Folds one element into a scalar accumulator.
    fn scalar(&self, acc: T, x: T) -> T;

    /// Merges two partial results; used to collapse accumulator lanes.
    fn combine(&self, a: T, b: T) -> T;
}

/// The algebra of a reduction over two equal-length operands.
pub trait PairReduction<T: Numeric> {
    fn identity(&self) -> T;
    fn lane<V: LaneGroup<T>>(&self, acc: V, x: V, y: V) -> V;
    fn scalar(&self, acc: T, x: T, y: T) -> T;
    fn combine(&self, a: T, b: T) -> T;
}

/// Σ xᵢ
#[derive(Debug, Clone, Copy, Default)]
pub struct SumOp;

impl<T: Numeric> Reduction<T> for SumOp {
    #[inline(always)]
    fn identity(&self) -> T {
        T::zero()
    }

    #[inline(always)]
    fn lane<V: LaneGroup<T>>(&self, acc: V, x: V) -> V {
        acc.add(x)
    }

    #[inline(always)]
    fn scalar(&self, acc: T, x: T) -> T {
        acc.add(x)
    }

    #[inline(always)]
    fn combine(&self, a: T, b: T) -> T {
        a.add(b)
    }
}

/// min xᵢ. The identity is the largest value of `T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinOp;

impl<T: Numeric> Reduction<T> for MinOp {
    #[inline(always)]
    fn identity(&self) -> T {
        T::max_value()
    }

    #[inline(always)]
    fn lane<V: LaneGroup<T>>(&self, acc: V, x: V) -> V {
        acc.min(x)
    }

    #[inline(always)]
    fn scalar(&self, acc: T, x: T) -> T {
        acc.minimum(x)
    }

    #[inline(always)]
    fn combine(&self, a: T, b: T) -> T {
        a.minimum(b)
    }
}

/// max xᵢ. The identity is the smallest value of `T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxOp;

impl<T: Numeric> Reduction<T> for MaxOp {
    #[inline(always)]
    fn identity(&self) -> T {
        T::min_value()
    }

    #[inline(always)]
    fn lane<V: LaneGroup<T>>(&self, acc: V, x: V) -> V {
        acc.max(x)
    }

    #[inline(always)]
    fn scalar(&self, acc: T, x: T) -> T {
        acc.maximum(x)
    }

    #[inline(always)]
    fn combine(&self, a: T, b: T) -> T {
        a.maximum(b)
    }
}

/// Σ (xᵢ − mean)², the numerator of the sample variance.
#[derive(Debug, Clone, Copy)]
pub struct SquaredDeviationOp<T> {
    pub mean: T,
}

impl<T: Numeric> SquaredDeviationOp<T> {
    pub fn new(mean: T) -> Self {
        Self { mean }
    }
}

impl<T: Numeric> Reduction<T> for SquaredDeviationOp<T> {
    #[inline(always)]
    fn identity(&self) -> T {
        T::zero()
    }

    #[inline(always)]
    fn lane<V: LaneGroup<T>>(&self, acc: V, x: V) -> V {
        let d = x.sub(x.broadcast(self.mean));
        acc.add(d.mul(d))
    }

    #[inline(always)]
    fn scalar(&self, acc: T, x: T) -> T {
        let d = x.sub(self.mean);
        acc.add(d.mul(d))
    }

    #[inline(always)]
    fn combine(&self, a: T, b: T) -> T {
        a.add(b)
    }
}

/// Σ xᵢ·yᵢ
#[derive(Debug, Clone, Copy, Default)]
pub struct DotOp;

impl<T: Numeric> PairReduction<T> for DotOp {
    #[inline(always)]
    fn identity(&self) -> T {
        T::zero()
    }

    #[inline(always)]
    fn lane<V: LaneGroup<T>>(&self, acc: V, x: V, y: V) -> V {
        acc.add(x.mul(y))
    }

    #[inline(always)]
    fn scalar(&self, acc: T, x: T, y: T) -> T {
        acc.add(x.mul(y))
    }

    #[inline(always)]
    fn combine(&self, a: T, b: T) -> T {
        a.add(b)
    }
}

/// Σ (xᵢ − yᵢ)², the squared Euclidean distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredDistanceOp;

impl<T: Numeric> PairReduction<T> for SquaredDistanceOp {
    #[inline(always)]
    fn identity(&self) -> T {
        T::zero()
    }

    #[inline(always)]
    fn lane<V: LaneGroup<T>>(&self, acc: V, x: V, y: V) -> V {
        let d = x.sub(y);
        acc.add(d.mul(d))
    }

    #[inline(always)]
    fn scalar(&self, acc: T, x: T, y: T) -> T {
        let d = x.sub(y);
        acc.add(d.mul(d))
    }

    #[inline(always)]
    fn combine(&self, a: T, b: T) -> T {
        a.add(b)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::core::fold_scalar;

    #[test]
    fn test_identities_are_neutral() {
        for x in [-3.5f64, 0.0, 2.0, 1e300] {
            assert_eq!(SumOp.scalar(Reduction::<f64>::identity(&SumOp), x), x);
            assert_eq!(MinOp.scalar(Reduction::<f64>::identity(&MinOp), x), x);
            assert_eq!(MaxOp.scalar(Reduction::<f64>::identity(&MaxOp), x), x);
        }
        for x in [i32::MIN, -1, 0, i32::MAX] {
            assert_eq!(MinOp.scalar(Reduction::<i32>::identity(&MinOp), x), x);
            assert_eq!(MaxOp.scalar(Reduction::<i32>::identity(&MaxOp), x), x);
        }
    }

    #[test]
    fn test_min_of_infinity_only() {
        assert_eq!(fold_scalar(&[f64::INFINITY], &MinOp), f64::INFINITY);
        assert_eq!(fold_scalar(&[f32::NEG_INFINITY], &MaxOp), f32::NEG_INFINITY);
    }

    #[test]
    fn test_squared_deviation() {
        let op = SquaredDeviationOp::new(2.0f64);
        assert_eq!(fold_scalar(&[1.0, 2.0, 3.0], &op), 2.0);
    }

    #[test]
    fn test_pair_scalar_ops() {
        assert_eq!(DotOp.scalar(1.0f64, 2.0, 3.0), 7.0);
        assert_eq!(SquaredDistanceOp.scalar(0i64, 1, 4), 9);
    }
}
