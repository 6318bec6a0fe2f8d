//! AVX2 lane groups (256-bit registers).

use std::arch::x86_64::*;

use super::LaneGroup;
use crate::core::{fold_lane_pairs, fold_lanes, PairReduction, Reduction};
use crate::types::Numeric;

/// Runs the chunked kernel with AVX2 code generation enabled.
///
/// # Safety
///
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
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
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub unsafe fn reduce_pairs<T, V, R>(a: &[T], b: &[T], reduction: &R) -> T
where
    T: Numeric,
    V: LaneGroup<T>,
    R: PairReduction<T>,
{
    fold_lane_pairs::<T, V, R>(a, b, reduction)
}

macro_rules! impl_avx2_float {
    (
        $name:ident, $elem:ty, $reg:ty, $lanes:expr,
        load = $load:ident, set1 = $set1:ident, store = $store:ident,
        add = $add:ident, sub = $sub:ident, mul = $mul:ident,
        min = $min:ident, max = $max:ident
    ) => {
        #[doc = concat!("AVX2 lane group of ", stringify!($lanes), " `", stringify!($elem), "` values.")]
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
                Self($set1(value))
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

impl_avx2_float!(
    Avx2F32, f32, __m256, 8,
    load = _mm256_loadu_ps, set1 = _mm256_set1_ps, store = _mm256_storeu_ps,
    add = _mm256_add_ps, sub = _mm256_sub_ps, mul = _mm256_mul_ps,
    min = _mm256_min_ps, max = _mm256_max_ps
);

impl_avx2_float!(
    Avx2F64, f64, __m256d, 4,
    load = _mm256_loadu_pd, set1 = _mm256_set1_pd, store = _mm256_storeu_pd,
    add = _mm256_add_pd, sub = _mm256_sub_pd, mul = _mm256_mul_pd,
    min = _mm256_min_pd, max = _mm256_max_pd
);

/// AVX2 lane group of 8 `i32` values.
#[derive(Clone, Copy)]
pub struct Avx2I32(__m256i);

impl LaneGroup<i32> for Avx2I32 {
    const LANES: usize = 8;

    #[inline(always)]
    unsafe fn load(ptr: *const i32) -> Self {
        Self(_mm256_loadu_si256(ptr as *const __m256i))
    }

    #[inline(always)]
    unsafe fn splat(value: i32) -> Self {
        Self(_mm256_set1_epi32(value))
    }

    #[inline(always)]
    fn broadcast(self, value: i32) -> Self {
        unsafe { Self::splat(value) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_add_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_sub_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_mullo_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_min_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_max_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn store(self, out: &mut [i32]) {
        assert!(out.len() >= 8);
        unsafe { _mm256_storeu_si256(out.as_mut_ptr() as *mut __m256i, self.0) }
    }
}

/// AVX2 lane group of 4 `i64` values.
///
/// AVX2 has no 64-bit multiply or min/max; min/max are built from a signed
/// compare plus blend, and multiply goes lane by lane.
#[derive(Clone, Copy)]
pub struct Avx2I64(__m256i);

impl Avx2I64 {
    #[inline(always)]
    fn to_array(self) -> [i64; 4] {
        let mut out = [0i64; 4];
        self.store(&mut out);
        out
    }
}

impl LaneGroup<i64> for Avx2I64 {
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn load(ptr: *const i64) -> Self {
        Self(_mm256_loadu_si256(ptr as *const __m256i))
    }

    #[inline(always)]
    unsafe fn splat(value: i64) -> Self {
        Self(_mm256_set1_epi64x(value))
    }

    #[inline(always)]
    fn broadcast(self, value: i64) -> Self {
        unsafe { Self::splat(value) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_add_epi64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_sub_epi64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        let a = self.to_array();
        let b = rhs.to_array();
        let product: [i64; 4] = std::array::from_fn(|i| a[i].wrapping_mul(b[i]));
        unsafe { Self::load(product.as_ptr()) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe {
            let gt = _mm256_cmpgt_epi64(self.0, rhs.0);
            Self(_mm256_blendv_epi8(self.0, rhs.0, gt))
        }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe {
            let gt = _mm256_cmpgt_epi64(self.0, rhs.0);
            Self(_mm256_blendv_epi8(rhs.0, self.0, gt))
        }
    }

    #[inline(always)]
    fn store(self, out: &mut [i64]) {
        assert!(out.len() >= 4);
        unsafe { _mm256_storeu_si256(out.as_mut_ptr() as *mut __m256i, self.0) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_avx2() -> bool {
        is_x86_feature_detected!("avx2")
    }

    #[test]
    fn test_f64_lane_ops() {
        if !has_avx2() {
            return;
        }
        let a = [1.0f64, -2.0, 3.0, -4.0];
        let b = [0.5f64, 0.5, 5.0, -5.0];
        let (va, vb) = unsafe { (Avx2F64::load(a.as_ptr()), Avx2F64::load(b.as_ptr())) };

        let mut out = [0.0f64; 4];
        va.add(vb).store(&mut out);
        assert_eq!(out, [1.5, -1.5, 8.0, -9.0]);
        va.min(vb).store(&mut out);
        assert_eq!(out, [0.5, -2.0, 3.0, -5.0]);
        va.max(vb).store(&mut out);
        assert_eq!(out, [1.0, 0.5, 5.0, -4.0]);
    }

    #[test]
    fn test_i64_emulated_ops() {
        if !has_avx2() {
            return;
        }
        let a = [i64::MAX, -7, 3, 0];
        let b = [2i64, 9, -3, i64::MIN];
        let (va, vb) = unsafe { (Avx2I64::load(a.as_ptr()), Avx2I64::load(b.as_ptr())) };

        let mut out = [0i64; 4];
        va.mul(vb).store(&mut out);
        assert_eq!(out, [-2, -63, -9, 0]);
        va.min(vb).store(&mut out);
        assert_eq!(out, [2, -7, -3, i64::MIN]);
        va.max(vb).store(&mut out);
        assert_eq!(out, [i64::MAX, 9, 3, 0]);
    }

    #[test]
    fn test_i32_mul_wraps() {
        if !has_avx2() {
            return;
        }
        let a = [i32::MAX; 8];
        let va = unsafe { Avx2I32::load(a.as_ptr()) };
        let mut out = [0i32; 8];
        va.mul(va.broadcast(2)).store(&mut out);
        assert_eq!(out, [i32::MAX.wrapping_mul(2); 8]);
    }
}
