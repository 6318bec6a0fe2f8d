use super::reductions::{PairReduction, Reduction};
use crate::error::{ReduceError, Result};
use crate::simd::dispatch::{fold_pairs_vectorized, fold_vectorized};
use crate::simd::{capabilities, should_vectorize, LaneGroup, SimdElement, MAX_LANES};
use crate::types::Numeric;

/// Reduces `data` with `reduction`, taking the vector path when the host
/// supports it and the buffer is long enough.
///
/// # Example
///
/// ```
/// use simd_reduce::core::{reduce, MaxOp, SumOp};
///
/// let data: Vec<i32> = (1..=100).collect();
/// assert_eq!(reduce(&data, &SumOp), 5050);
/// assert_eq!(reduce(&data, &MaxOp), 100);
/// ```
pub fn reduce<T, R>(data: &[T], reduction: &R) -> T
where
    T: SimdElement,
    R: Reduction<T>,
{
    let caps = capabilities();
    let lanes = caps.lanes_for::<T>();
    let vectorize = should_vectorize(data.len(), lanes, caps.hardware_acceleration);
    tracing::trace!(
        kind = T::KIND.name(),
        len = data.len(),
        lanes,
        vectorize,
        "reduce"
    );

    if vectorize {
        // SAFETY: the level comes from the cached probe of this CPU.
        unsafe { fold_vectorized(caps.level, data, reduction) }
    } else {
        fold_scalar(data, reduction)
    }
}

/// Reduces two equal-length operands lane by lane.
///
/// # Errors
///
/// [`ReduceError::LengthMismatch`] when `a` and `b` differ in length.
pub fn reduce_pair<T, R>(a: &[T], b: &[T], reduction: &R) -> Result<T>
where
    T: SimdElement,
    R: PairReduction<T>,
{
    ReduceError::check_lengths(a.len(), b.len())?;

    let caps = capabilities();
    let lanes = caps.lanes_for::<T>();
    let vectorize = should_vectorize(a.len(), lanes, caps.hardware_acceleration);
    tracing::trace!(
        kind = T::KIND.name(),
        len = a.len(),
        lanes,
        vectorize,
        "reduce_pair"
    );

    let value = if vectorize {
        // SAFETY: level from the cached probe; lengths checked above.
        unsafe { fold_pairs_vectorized(caps.level, a, b, reduction) }
    } else {
        fold_scalar_pairs(a, b, reduction)
    };
    Ok(value)
}

/// Linear scan with the scalar operator.
#[inline]
pub fn fold_scalar<T: Numeric, R: Reduction<T>>(data: &[T], reduction: &R) -> T {
    data.iter()
        .fold(reduction.identity(), |acc, &x| reduction.scalar(acc, x))
}

/// Linear scan over two operands. Extra elements of the longer one are ignored.
#[inline]
pub fn fold_scalar_pairs<T: Numeric, R: PairReduction<T>>(a: &[T], b: &[T], reduction: &R) -> T {
    a.iter()
        .zip(b)
        .fold(reduction.identity(), |acc, (&x, &y)| reduction.scalar(acc, x, y))
}

/// The chunked kernel over lane group `V`.
///
/// Splits `data` into `len / LANES` full groups and a `len % LANES` tail,
/// folds every group into one accumulator with the lane operator, collapses
/// the accumulator with the combine operator, then folds the tail into that
/// scalar with the scalar operator.
///
/// # Safety
///
/// The running CPU must support `V`'s instruction set.
#[inline(always)]
pub unsafe fn fold_lanes<T, V, R>(data: &[T], reduction: &R) -> T
where
    T: Numeric,
    V: LaneGroup<T>,
    R: Reduction<T>,
{
    let groups = data.chunks_exact(V::LANES);
    let tail = groups.remainder();

    let mut acc = V::splat(reduction.identity());
    for group in groups {
        acc = reduction.lane(acc, V::load(group.as_ptr()));
    }

    let seed = horizontal::<T, V>(acc, reduction.identity(), |a, b| reduction.combine(a, b));
    tail.iter().fold(seed, |s, &x| reduction.scalar(s, x))
}

/// Two-operand form of [`fold_lanes`].
///
/// # Safety
///
/// The running CPU must support `V`'s instruction set.
#[inline(always)]
pub unsafe fn fold_lane_pairs<T, V, R>(a: &[T], b: &[T], reduction: &R) -> T
where
    T: Numeric,
    V: LaneGroup<T>,
    R: PairReduction<T>,
{
    let len = a.len().min(b.len());
    let split = len - len % V::LANES;
    let (a_body, a_tail) = a[..len].split_at(split);
    let (b_body, b_tail) = b[..len].split_at(split);

    let mut acc = V::splat(reduction.identity());
    for (ga, gb) in a_body
        .chunks_exact(V::LANES)
        .zip(b_body.chunks_exact(V::LANES))
    {
        acc = reduction.lane(acc, V::load(ga.as_ptr()), V::load(gb.as_ptr()));
    }

    let seed = horizontal::<T, V>(acc, reduction.identity(), |x, y| reduction.combine(x, y));
    a_tail
        .iter()
        .zip(b_tail)
        .fold(seed, |s, (&x, &y)| reduction.scalar(s, x, y))
}

/// Collapses the lanes of `acc` into one scalar, left to right.
#[inline(always)]
fn horizontal<T, V>(acc: V, identity: T, combine: impl Fn(T, T) -> T) -> T
where
    T: Numeric,
    V: LaneGroup<T>,
{
    if V::LANES <= MAX_LANES {
        let mut lanes = [T::zero(); MAX_LANES];
        acc.store(&mut lanes[..V::LANES]);
        lanes[..V::LANES].iter().fold(identity, |s, &x| combine(s, x))
    } else {
        let mut lanes = vec![T::zero(); V::LANES];
        acc.store(&mut lanes);
        lanes.into_iter().fold(identity, combine)
    }
}
