//! NEON lane groups (128-bit registers).

use std::arch::aarch64::*;

use super::LaneGroup;
use crate::core::{fold_lane_pairs, fold_lanes, PairReduction, Reduction};
use crate::types::Numeric;

/// Runs the chunked kernel with NEON code generation enabled.
///
/// # Safety
///
/// The CPU must support NEON.
#[target_feature(enable = "neon")]
pub unsafe fn reduce<T, V, R>(data: &[T], reduction: &R) -> T
where
    T: Numeric,
    V: LaneGroup<T>,
    R: Reduction<T>,
{
    fold_lanes::<T, V, R>(data, reduction)
}

/// Two-operand variant of [`reduce`].
///
/// # Safety
///
/// The CPU must support NEON.
#[target_feature(enable = "neon")]
pub unsafe fn reduce_pairs<T, V, R>(a: &[T], b: &[T], reduction: &R) -> T
where
    T: Numeric,
    V: LaneGroup<T>,
    R: PairReduction<T>,
{
    fold_lane_pairs::<T, V, R>(a, b, reduction)
}

macro_rules! impl_neon {
    (
        $name:ident, $elem:ty, $reg:ty, $lanes:expr,
        load = $load:ident, dup = $dup:ident, store = $store:ident,
        add = $add:ident, sub = $sub:ident, mul = $mul:ident,
        min = $min:ident, max = $max:ident
    ) => {
        #[doc = concat!("NEON lane group of ", stringify!($lanes), " `", stringify!($elem), "` values.")]
        #[derive(Clone, Copy)]
        pub struct $name($reg);

        impl LaneGroup<$elem> for $name {
            const LANES: usize = $lanes;

            #[inline(always)]
            unsafe fn load(ptr: *const $elem) -> Self {
                Self($load(ptr))
            }

            #[inline(always)]
            unsafe fn splat(value: $elem) -> Self {
                Self($dup(value))
            }

            #[inline(always)]
            fn broadcast(self, value: $elem) -> Self {
                unsafe { Self::splat(value) }
            }

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                unsafe { Self($add(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                unsafe { Self($sub(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                unsafe { Self($mul(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn min(self, rhs: Self) -> Self {
                unsafe { Self($min(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn max(self, rhs: Self) -> Self {
                unsafe { Self($max(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn store(self, out: &mut [$elem]) {
                assert!(out.len() >= $lanes);
                unsafe { $store(out.as_mut_ptr(), self.0) }
            }
        }
    };
}

impl_neon!(
    NeonF32, f32, float32x4_t, 4,
    load = vld1q_f32, dup = vdupq_n_f32, store = vst1q_f32,
    add = vaddq_f32, sub = vsubq_f32, mul = vmulq_f32,
    min = vminq_f32, max = vmaxq_f32
);

impl_neon!(
    NeonF64, f64, float64x2_t, 2,
    load = vld1q_f64, dup = vdupq_n_f64, store = vst1q_f64,
    add = vaddq_f64, sub = vsubq_f64, mul = vmulq_f64,
    min = vminq_f64, max = vmaxq_f64
);

impl_neon!(
    NeonI32, i32, int32x4_t, 4,
    load = vld1q_s32, dup = vdupq_n_s32, store = vst1q_s32,
    add = vaddq_s32, sub = vsubq_s32, mul = vmulq_s32,
    min = vminq_s32, max = vmaxq_s32
);

/// NEON lane group of 2 `i64` values.
///
/// NEON lacks 64-bit multiply and min/max; those are emulated.
#[derive(Clone, Copy)]
pub struct NeonI64(int64x2_t);

impl NeonI64 {
    #[inline(always)]
    fn to_array(self) -> [i64; 2] {
        let mut out = [0i64; 2];
        self.store(&mut out);
        out
    }
}

impl LaneGroup<i64> for NeonI64 {
    const LANES: usize = 2;

    #[inline(always)]
    unsafe fn load(ptr: *const i64) -> Self {
        Self(vld1q_s64(ptr))
    }

    #[inline(always)]
    unsafe fn splat(value: i64) -> Self {
        Self(vdupq_n_s64(value))
    }

    #[inline(always)]
    fn broadcast(self, value: i64) -> Self {
        unsafe { Self::splat(value) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(vaddq_s64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(vsubq_s64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        let a = self.to_array();
        let b = rhs.to_array();
        let product = [a[0].wrapping_mul(b[0]), a[1].wrapping_mul(b[1])];
        unsafe { Self::load(product.as_ptr()) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Self(vbslq_s64(vcgtq_s64(self.0, rhs.0), rhs.0, self.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Self(vbslq_s64(vcgtq_s64(self.0, rhs.0), self.0, rhs.0)) }
    }

    #[inline(always)]
    fn store(self, out: &mut [i64]) {
        assert!(out.len() >= 2);
        unsafe { vst1q_s64(out.as_mut_ptr(), self.0) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_lane_ops() {
        if !std::arch::is_aarch64_feature_detected!("neon") {
            return;
        }
        let a = [1.0f32, -2.0, 3.0, -4.0];
        let b = [0.5f32, 0.5, 5.0, -5.0];
        let (va, vb) = unsafe { (NeonF32::load(a.as_ptr()), NeonF32::load(b.as_ptr())) };

        let mut out = [0.0f32; 4];
        va.sub(vb).store(&mut out);
        assert_eq!(out, [0.5, -2.5, -2.0, 1.0]);
        va.min(vb).store(&mut out);
        assert_eq!(out, [0.5, -2.0, 3.0, -5.0]);
    }

    #[test]
    fn test_i64_emulated_ops() {
        if !std::arch::is_aarch64_feature_detected!("neon") {
            return;
        }
        let a = [i64::MAX, -7];
        let b = [2i64, 9];
        let (va, vb) = unsafe { (NeonI64::load(a.as_ptr()), NeonI64::load(b.as_ptr())) };

        let mut out = [0i64; 2];
        va.mul(vb).store(&mut out);
        assert_eq!(out, [-2, -63]);
        va.min(vb).store(&mut out);
        assert_eq!(out, [2, -7]);
        va.max(vb).store(&mut out);
        assert_eq!(out, [i64::MAX, 9]);
    }
}
