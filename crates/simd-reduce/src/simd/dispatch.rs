//! Runtime kernel selection.

use super::detect::SimdLevel;
#[cfg(target_arch = "x86_64")]
use super::kernels::{avx2, Avx2F32, Avx2F64, Avx2I32, Avx2I64};
use super::kernels::LaneGroup;
#[cfg(target_arch = "aarch64")]
use super::kernels::{neon, NeonF32, NeonF64, NeonI32, NeonI64};
use crate::core::{fold_scalar, fold_scalar_pairs, PairReduction, Reduction};
use crate::types::Numeric;

/// Decides whether a buffer is long enough for the vector path.
///
/// Below two full lane groups the setup and horizontal combine cost more than
/// the vector throughput saves, so the scalar loop is used instead.
#[inline]
pub const fn should_vectorize(len: usize, lane_count: usize, hw_available: bool) -> bool {
    hw_available && len >= lane_count.saturating_mul(2)
}

/// Element types with a lane group for every instruction set the crate
/// dispatches to on the current target.
pub trait SimdElement: Numeric {
    #[cfg(target_arch = "x86_64")]
    type Avx2: LaneGroup<Self>;

    #[cfg(target_arch = "aarch64")]
    type Neon: LaneGroup<Self>;
}

macro_rules! impl_simd_element {
    ($($elem:ty => $avx2:ty, $neon:ty);* $(;)?) => {
        $(
            impl SimdElement for $elem {
                #[cfg(target_arch = "x86_64")]
                type Avx2 = $avx2;

                #[cfg(target_arch = "aarch64")]
                type Neon = $neon;
            }
        )*
    };
}

impl_simd_element! {
    f32 => Avx2F32, NeonF32;
    f64 => Avx2F64, NeonF64;
    i32 => Avx2I32, NeonI32;
    i64 => Avx2I64, NeonI64;
}

/// Routes a unary reduction to the lane group for `level`.
///
/// Levels with no lane group on this target fall back to the scalar loop.
///
/// # Safety
///
/// The running CPU must support `level`.
pub(crate) unsafe fn fold_vectorized<T, R>(level: SimdLevel, data: &[T], reduction: &R) -> T
where
    T: SimdElement,
    R: Reduction<T>,
{
    match level {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => avx2::reduce::<T, T::Avx2, R>(data, reduction),
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon => neon::reduce::<T, T::Neon, R>(data, reduction),
        _ => fold_scalar(data, reduction),
    }
}

/// Routes a two-operand reduction to the lane group for `level`.
///
/// # Safety
///
/// The running CPU must support `level`, and `a` and `b` must have equal length.
pub(crate) unsafe fn fold_pairs_vectorized<T, R>(
    level: SimdLevel,
    a: &[T],
    b: &[T],
    reduction: &R,
) -> T
where
    T: SimdElement,
    R: PairReduction<T>,
{
    match level {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => avx2::reduce_pairs::<T, T::Avx2, R>(a, b, reduction),
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon => neon::reduce_pairs::<T, T::Neon, R>(a, b, reduction),
        _ => fold_scalar_pairs(a, b, reduction),
    }
}
