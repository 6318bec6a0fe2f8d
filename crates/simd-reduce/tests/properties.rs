//! Property tests for the reduction surface.
//!
//! These check that the vector path agrees with a plain scalar scan and that
//! the derived operations keep their algebraic relationships.

#![allow(clippy::float_cmp)]

use proptest::prelude::*;
use simd_reduce::core::{fold_lanes, fold_scalar, fold_scalar_pairs, DotOp, MaxOp, MinOp, SumOp};
use simd_reduce::simd::Portable;
use simd_reduce::{
    average, dot_product, euclidean_distance, max, min, process_in_chunks,
    process_without_aliasing, sum, where_simd,
};

// ============================================================
// Vector path vs scalar path
// ============================================================

proptest! {
    #[test]
    fn sum_matches_scalar_i32(data in prop::collection::vec(any::<i32>(), 0..600)) {
        prop_assert_eq!(sum(&data), fold_scalar(&data, &SumOp));
    }

    #[test]
    fn sum_matches_scalar_i64(data in prop::collection::vec(any::<i64>(), 0..600)) {
        prop_assert_eq!(sum(&data), fold_scalar(&data, &SumOp));
    }

    #[test]
    fn sum_matches_scalar_f64(data in prop::collection::vec(-1e6f64..1e6, 0..600)) {
        let vector = sum(&data);
        let scalar = fold_scalar(&data, &SumOp);
        let tolerance = 1e-9 * (data.len() as f64 + 1.0) * 1e6;
        prop_assert!((vector - scalar).abs() <= tolerance, "{} vs {}", vector, scalar);
    }

    #[test]
    fn sum_matches_scalar_f32(data in prop::collection::vec(-1e3f32..1e3, 0..600)) {
        let vector = sum(&data) as f64;
        let exact: f64 = data.iter().map(|&x| x as f64).sum();
        let tolerance = 1e-4 * (data.len() as f64 + 1.0) * 1e3;
        prop_assert!((vector - exact).abs() <= tolerance);
    }

    #[test]
    fn min_max_match_scalar(data in prop::collection::vec(any::<i32>(), 1..600)) {
        prop_assert_eq!(min(&data).unwrap(), fold_scalar(&data, &MinOp));
        prop_assert_eq!(max(&data).unwrap(), fold_scalar(&data, &MaxOp));
    }

    #[test]
    fn dot_matches_scalar(
        pairs in prop::collection::vec((any::<i64>(), any::<i64>()), 0..400)
    ) {
        let (a, b): (Vec<i64>, Vec<i64>) = pairs.into_iter().unzip();
        prop_assert_eq!(dot_product(&a, &b).unwrap(), fold_scalar_pairs(&a, &b, &DotOp));
    }

    #[test]
    fn portable_kernel_matches_scalar(data in prop::collection::vec(any::<i64>(), 0..200)) {
        let expected = fold_scalar(&data, &SumOp);
        let three = unsafe { fold_lanes::<i64, Portable<i64, 3>, _>(&data, &SumOp) };
        let eight = unsafe { fold_lanes::<i64, Portable<i64, 8>, _>(&data, &SumOp) };
        prop_assert_eq!(three, expected);
        prop_assert_eq!(eight, expected);
    }
}

// ============================================================
// Algebraic relationships
// ============================================================

proptest! {
    #[test]
    fn chunked_sum_equals_sum(
        data in prop::collection::vec(any::<i32>(), 1..500),
        chunk in 1usize..600,
    ) {
        let chunk = chunk.min(data.len());
        prop_assert_eq!(process_in_chunks(&data, chunk, |c| sum(c)).unwrap(), sum(&data));
    }

    #[test]
    fn extrema_bound_every_element(data in prop::collection::vec(-1e9f64..1e9, 1..500)) {
        let lo = min(&data).unwrap();
        let hi = max(&data).unwrap();
        for &x in &data {
            prop_assert!(lo <= x && x <= hi);
        }
        prop_assert!(data.contains(&lo));
        prop_assert!(data.contains(&hi));
    }

    #[test]
    fn average_is_sum_over_len(data in prop::collection::vec(-1e6f64..1e6, 1..500)) {
        prop_assert_eq!(average(&data).unwrap(), sum(&data) / data.len() as f64);
    }

    #[test]
    fn reductions_are_idempotent(data in prop::collection::vec(-1e3f32..1e3, 0..500)) {
        prop_assert_eq!(sum(&data).to_bits(), sum(&data).to_bits());
        prop_assert_eq!(min(&data).ok(), min(&data).ok());
    }

    #[test]
    fn where_matches_filter(data in prop::collection::vec(any::<i32>(), 0..500), pivot in any::<i32>()) {
        let expected: Vec<i32> = data.iter().copied().filter(|&x| x < pivot).collect();
        prop_assert_eq!(where_simd(&data, |x| x < pivot), expected);
    }

    #[test]
    fn distance_is_symmetric(
        pairs in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 0..300)
    ) {
        let (a, b): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let ab = euclidean_distance(&a, &b).unwrap();
        let ba = euclidean_distance(&b, &a).unwrap();
        prop_assert_eq!(ab, ba);
        prop_assert!(ab >= 0.0);
    }

    #[test]
    fn aliasing_copy_matches_copy_within(
        mut data in prop::collection::vec(any::<i32>(), 1..64),
        src_start in 0usize..64,
        dst_start in 0usize..64,
        len in 0usize..64,
    ) {
        let n = data.len();
        let src_start = src_start % n;
        let dst_start = dst_start % n;
        let len = len.min(n - src_start).min(n - dst_start);

        let mut expected = data.clone();
        expected.copy_within(src_start..src_start + len, dst_start);

        process_without_aliasing(
            &mut data,
            dst_start..dst_start + len,
            src_start..src_start + len,
            |dst, src| {
                for i in 0..dst.len() {
                    dst[i] = src[i];
                }
            },
        )
        .unwrap();
        prop_assert_eq!(data, expected);
    }
}
