//! End-to-end scenarios over the public surface.

#![allow(clippy::float_cmp)]

use simd_reduce::core::{fold_lanes, fold_scalar, SumOp};
use simd_reduce::simd::{should_vectorize, Portable};
use simd_reduce::{
    average, capabilities, dot_product, euclidean_distance, max, min, portfolio_return,
    process_in_chunks, sum, value_at_risk, volatility, where_simd, NumericSlice, NumericValue,
    ReduceError, ReductionResult, ScalarKind,
};

#[test]
fn test_basic_reductions() {
    let floats = [1.0f64, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(sum(&floats), 15.0);
    assert_eq!(average(&floats).unwrap(), 3.0);
    assert_eq!(min(&floats).unwrap(), 1.0);
    assert_eq!(max(&floats).unwrap(), 5.0);

    let floats32 = [1.0f32, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(sum(&floats32), 15.0);
    assert_eq!(average(&floats32).unwrap(), 3.0);

    let ints = [1i64, 2, 3, 4, 5];
    assert_eq!(sum(&ints), 15);
    assert_eq!(average(&ints).unwrap(), 3.0);
    assert_eq!(min(&ints).unwrap(), 1);
    assert_eq!(max(&ints).unwrap(), 5);
}

#[test]
fn test_pairwise_reductions() {
    assert_eq!(
        dot_product(&[1.0f64, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap(),
        32.0
    );
    let d = euclidean_distance(&[1.0f64, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
    assert!((d - 27.0f64.sqrt()).abs() < 1e-12);
    assert!((d - 5.196).abs() < 1e-3);
}

#[test]
fn test_financial_scenario() {
    let r = portfolio_return(&[0.05f64, 0.02, -0.01, 0.03], &[0.4, 0.3, 0.1, 0.2]).unwrap();
    assert!((r - 0.031).abs() < 1e-12);

    let returns = [0.01f64, 0.02, -0.01, 0.03];
    let mean = 0.0125;
    let ss: f64 = returns.iter().map(|x| (x - mean) * (x - mean)).sum();
    let expected = (ss / 3.0).sqrt();
    let vol = volatility(&returns).unwrap();
    assert!((vol - expected).abs() < 1e-12);

    let var = value_at_risk(&returns, 0.95).unwrap();
    assert!((var + mean + 1.645 * expected).abs() < 1e-12);
}

#[test]
fn test_failures_are_typed() {
    let empty: [f64; 0] = [];
    assert_eq!(
        average(&empty).unwrap_err(),
        ReduceError::EmptyInput {
            operation: "average"
        }
    );
    assert_eq!(
        dot_product(&[1.0f64, 2.0, 3.0], &[1.0, 2.0]).unwrap_err(),
        ReduceError::LengthMismatch { left: 3, right: 2 }
    );
    assert!(matches!(
        volatility(&[0.01f64]),
        Err(ReduceError::InsufficientData { required: 2, .. })
    ));
    assert!(matches!(
        "complex128".parse::<ScalarKind>(),
        Err(ReduceError::UnsupportedType(_))
    ));
}

#[test]
fn test_dispatch_boundaries() {
    for lanes in [2usize, 4, 8] {
        assert!(!should_vectorize(lanes - 1, lanes, true));
        assert!(!should_vectorize(lanes, lanes, true));
        assert!(should_vectorize(2 * lanes, lanes, true));
        assert!(!should_vectorize(1 << 20, lanes, false));
    }
}

#[test]
fn test_kernel_with_exact_lane_group() {
    // One full group and an empty remainder.
    let data = [3i32, -1, 4, 1];
    let via_lanes = unsafe { fold_lanes::<i32, Portable<i32, 4>, _>(&data, &SumOp) };
    assert_eq!(via_lanes, 7);
    assert_eq!(via_lanes, fold_scalar(&data, &SumOp));
}

#[test]
fn test_every_length_around_lane_width() {
    let lanes = capabilities().lanes_for::<f64>().max(1);
    for len in 0..=(4 * lanes + 3) {
        let data: Vec<i64> = (0..len as i64).map(|i| i * i - 5).collect();
        assert_eq!(sum(&data), data.iter().sum::<i64>(), "len {}", len);
        if len > 0 {
            assert_eq!(min(&data).unwrap(), *data.iter().min().unwrap());
            assert_eq!(max(&data).unwrap(), *data.iter().max().unwrap());
        }
    }
}

#[test]
fn test_where_and_chunks_agree_with_sum() {
    let data: Vec<i32> = (-500..500).collect();
    let positives = where_simd(&data, |x| x > 0);
    assert_eq!(positives.len(), 499);
    assert_eq!(sum(&positives), 499 * 500 / 2);
    assert_eq!(process_in_chunks(&data, 33, |c| sum(c)).unwrap(), sum(&data));
}

#[test]
fn test_capabilities_are_stable_across_threads() {
    let first = capabilities();
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(capabilities))
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), first);
    }
    assert!(!first.to_string().is_empty());
}

#[test]
fn test_dynamic_surface() {
    let kind: ScalarKind = "double".parse().unwrap();
    assert_eq!(kind, ScalarKind::F64);

    let data = vec![2.5f64, 3.5];
    let slice = NumericSlice::from(&data);
    assert_eq!(slice.kind(), kind);
    let total = slice.sum().checked_add(NumericValue::F64(4.0)).unwrap();
    assert_eq!(total, NumericValue::F64(10.0));
}

#[test]
fn test_reduction_result_reports_simd_use() {
    let data: Vec<f32> = (0..10_000).map(|i| i as f32).collect();
    let captured = ReductionResult::try_capture(&data, |d| max(d)).unwrap();
    assert_eq!(captured.value, 9999.0);
    assert_eq!(captured.element_count, 10_000);
    assert_eq!(captured.used_simd, capabilities().hardware_acceleration);
}
