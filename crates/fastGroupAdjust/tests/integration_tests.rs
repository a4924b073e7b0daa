//! Integration tests for the parallel group adjustment crate.
//!
//! These tests run complete workflows through the `fastGroupAdjust` prelude:
//! - Sequential and parallel execution on reference series
//! - `ndarray` inputs, including views
//! - Agreement and determinism of the parallel passes on large series
//! - Error propagation and optional outputs

use approx::assert_abs_diff_eq;
use fastGroupAdjust::prelude::*;
use ndarray::{Array1, s};

// ============================================================================
// Helper Functions
// ============================================================================

fn synthetic(n: usize) -> (Vec<f64>, Vec<u32>, Vec<u32>, Vec<u32>) {
    let vals: Vec<f64> = (0..n)
        .map(|i| {
            if i % 17 == 3 {
                f64::NAN
            } else {
                ((i * 7919) % 1000) as f64 / 10.0
            }
        })
        .collect();
    let g1: Vec<u32> = (0..n).map(|i| (i % 3) as u32).collect();
    let g2: Vec<u32> = (0..n).map(|i| ((i * 31) % 97) as u32).collect();
    let g3: Vec<u32> = (0..n).map(|i| ((i / 5) % 2011) as u32).collect();
    (vals, g1, g2, g3)
}

fn assert_series_close(a: &[f64], b: &[f64], epsilon: f64) {
    assert_eq!(a.len(), b.len());
    for (i, (&x, &y)) in a.iter().zip(b.iter()).enumerate() {
        if x.is_nan() || y.is_nan() {
            assert!(x.is_nan() && y.is_nan(), "NaN mismatch at {i}: {x} vs {y}");
        } else {
            assert_abs_diff_eq!(x, y, epsilon = epsilon);
        }
    }
}

/// Test the sequential path reproduces the two-grouping worked example.
#[test]
fn test_batch_sequential() {
    let vals = vec![1.0, 2.0, 3.0];

    let res = GroupAdjust::new()
        .weights(&[0.35, 0.65])
        .adapter(Batch)
        .parallel(false)
        .build()
        .unwrap()
        .adjust(&vals, &[vec!["USA"; 3], vec!["MA", "MA", "CT"]])
        .unwrap();

    assert_abs_diff_eq!(res.adjusted[0], -0.675, epsilon = 1e-12);
    assert_abs_diff_eq!(res.adjusted[1], 0.325, epsilon = 1e-12);
    assert_abs_diff_eq!(res.adjusted[2], 0.35, epsilon = 1e-12);
}

/// Test the parallel default on a small series.
#[test]
fn test_batch_parallel() {
    let vals = vec![1.0, 2.0, 3.0, 8.0, 5.0];

    let model = GroupAdjust::new()
        .weights(&[0.65, 0.35])
        .adapter(Batch)
        .build()
        .unwrap();
    assert_eq!(model.is_parallel(), cfg!(feature = "cpu"));

    let res = model
        .adjust(&vals, &[vec!["USA"; 5], vec!["MA", "RI", "CT", "CT", "CT"]])
        .unwrap();

    let expected = [-1.82, -1.17, -1.33666, 3.66333, 0.66333];
    for (a, e) in res.adjusted.iter().zip(expected.iter()) {
        assert_abs_diff_eq!(*a, *e, epsilon = 1e-5);
    }
}

/// Test missing values propagate through the parallel passes.
#[test]
fn test_missing_values_parallel() {
    let vals = values_from_options(&[Some(1.0), None, Some(3.0), Some(5.0), Some(8.0), Some(7.0)]);
    let grps_2 = vec!["MA", "RI", "RI", "CT", "CT", "CT"];

    let out = group_adjust(&vals, &[vec!["USA"; 6], grps_2], &[0.65, 0.35]).unwrap();

    assert_series_close(
        &out,
        &[-2.47, f64::NAN, -1.170, -0.4533333, 2.54666666, 1.54666666],
        1e-5,
    );
}

/// Test `ndarray` value series.
#[test]
fn test_ndarray_integration() {
    let vals = Array1::from_vec(vec![1.0, 2.0, 3.0, 8.0, 5.0]);
    let grps_2 = ["MA", "MA", "MA", "RI", "RI"];
    let grps_3 = ["WEYMOUTH", "BOSTON", "BOSTON", "PROVIDENCE", "PROVIDENCE"];

    let out = group_adjust(&vals, &[["USA"; 5], grps_2, grps_3], &[0.15, 0.35, 0.5]).unwrap();

    let expected = [-0.770, -0.520, 0.480, 1.905, -1.095];
    for (a, e) in out.iter().zip(expected.iter()) {
        assert_abs_diff_eq!(*a, *e, epsilon = 1e-5);
    }
}

/// Test contiguous `ndarray` views are accepted.
#[test]
fn test_ndarray_view_contiguous() {
    let vals = Array1::from_vec(vec![0.0, 1.0, 3.0, 100.0]);
    let view = vals.slice(s![..3]);

    let out = group_adjust(&view, &[[1, 1, 1]], &[1.0]).unwrap();

    assert_series_close(&out, &[-4.0 / 3.0, -1.0 / 3.0, 5.0 / 3.0], 1e-12);
}

/// Test strided views are rejected.
#[test]
fn test_ndarray_non_contiguous_rejected() {
    let vals = Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
    let strided = vals.slice(s![..;2]);

    let err = group_adjust(&strided, &[[0, 0]], &[1.0]).unwrap_err();

    assert!(matches!(err, GroupAdjustError::InvalidInput(_)));
}

/// Test shape and weight errors surface unchanged.
#[test]
fn test_shape_errors_parallel() {
    let vals = vec![1.0, 2.0, 3.0];

    let err = group_adjust(&vals, &[vec![0, 0, 0], vec![0]], &[0.5, 0.5]).unwrap_err();
    assert!(err.is_shape_mismatch());

    let err = group_adjust(&vals, &[vec![0, 0, 0]], &[0.5, 0.5]).unwrap_err();
    assert!(err.is_shape_mismatch());

    let err = group_adjust(&vals, &[vec![0, 0, 0]], &[-0.5]).unwrap_err();
    assert!(err.is_invalid_weight());
}

/// Test parallel and sequential runs agree on a large series.
#[test]
fn test_large_parallel_matches_sequential() {
    let (vals, g1, g2, g3) = synthetic(100_000);
    let groupings = [g1, g2, g3];

    let run = |parallel: bool| {
        GroupAdjust::new()
            .weights(&[0.2, 0.3, 0.5])
            .return_weighted_means()
            .return_diagnostics()
            .adapter(Batch)
            .parallel(parallel)
            .build()
            .unwrap()
            .adjust(&vals, &groupings)
            .unwrap()
    };

    let seq = run(false);
    let par = run(true);

    assert_series_close(&seq.adjusted, &par.adjusted, 1e-9);
    assert_series_close(
        seq.weighted_means.as_ref().unwrap(),
        par.weighted_means.as_ref().unwrap(),
        1e-9,
    );

    let (ds, dp) = (seq.diagnostics.unwrap(), par.diagnostics.unwrap());
    assert_eq!(ds.n_missing_outputs, dp.n_missing_outputs);
    assert_eq!(ds.groupings, dp.groupings);
}

/// Test repeated parallel runs are bit-identical.
#[test]
fn test_large_parallel_deterministic() {
    let (vals, g1, g2, _) = synthetic(60_000);

    let a = group_adjust(&vals, &[g1.clone(), g2.clone()], &[0.5, 0.5]).unwrap();
    let b = group_adjust(&vals, &[g1, g2], &[0.5, 0.5]).unwrap();

    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.to_bits(), y.to_bits());
    }
}

/// Test the Skip policy under parallel execution.
#[test]
fn test_skip_policy_parallel() {
    let n = 40_000;
    let vals: Vec<f64> = (0..n)
        .map(|i| if i % 2 == 0 { f64::NAN } else { i as f64 })
        .collect();
    // Even records form all-missing groups in the first grouping.
    let g1: Vec<usize> = (0..n).map(|i| i % 2).collect();
    let g2: Vec<usize> = (0..n).map(|i| i % 4 / 2).collect();

    let run = |parallel: bool| {
        GroupAdjust::new()
            .weights(&[0.5, 0.5])
            .undefined_mean(Skip)
            .return_weighted_means()
            .adapter(Batch)
            .parallel(parallel)
            .build()
            .unwrap()
            .adjust(&vals, &[g1.clone(), g2.clone()])
            .unwrap()
    };

    let seq = run(false);
    let par = run(true);
    let wm = par.weighted_means.as_ref().unwrap();

    assert!(!wm[0].is_nan());
    assert!(par.adjusted[0].is_nan());
    assert_series_close(
        seq.weighted_means.as_ref().unwrap(),
        wm,
        1e-9,
    );
}

/// Test mean tables from the parallel mean pass.
#[test]
fn test_group_means_parallel() {
    let (vals, g1, _, _) = synthetic(30_000);

    let res = GroupAdjust::new()
        .weights(&[1.0])
        .return_group_means()
        .adapter(Batch)
        .build()
        .unwrap()
        .adjust(&vals, &[g1])
        .unwrap();

    let table = &res.group_means.as_ref().unwrap()[0];
    assert_eq!(table.labels, vec![0, 1, 2]);
    assert_eq!(table.sizes.iter().sum::<usize>(), 30_000);
}

/// Test a built processor is reusable across series of different lengths.
#[test]
fn test_processor_reuse() {
    let model = GroupAdjust::new()
        .weights(&[1.0])
        .adapter(Batch)
        .build()
        .unwrap();

    assert_eq!(model.weights(), &[1.0]);

    let a = model.adjust(&vec![1.0, 3.0], &[[0, 0]]).unwrap();
    let b = model.adjust(&vec![2.0, 4.0, 9.0], &[[0, 0, 1]]).unwrap();
    let err = model.adjust(&vec![1.0, 2.0], &[[0]]).unwrap_err();

    assert_eq!(a.adjusted, vec![-1.0, 1.0]);
    assert_eq!(b.adjusted, vec![-1.0, 1.0, 0.0]);
    assert!(err.is_shape_mismatch());
}

/// Test weights are validated once, at build, in both execution modes.
#[test]
fn test_build_validates_weights() {
    for parallel in [true, false] {
        let err = GroupAdjust::new()
            .weights(&[0.5, f64::NAN])
            .adapter(Batch)
            .parallel(parallel)
            .build()
            .unwrap_err();
        assert!(err.is_invalid_weight());

        let model = GroupAdjust::new()
            .weights(&[1.0])
            .adapter(Batch)
            .parallel(parallel)
            .build()
            .unwrap();
        assert_eq!(model.is_parallel(), parallel && cfg!(feature = "cpu"));
    }
}
