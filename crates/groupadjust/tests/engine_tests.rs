#![cfg(feature = "dev")]
//! Tests for the engine and evaluation layers.
//!
//! These tests verify:
//! - Input validation order and error payloads
//! - The executor with default and custom passes
//! - Diagnostics computation
//! - Adapter builder propagation
//!
//! ## Test Organization
//!
//! 1. **Validator** - Shapes, weights, duplicates
//! 2. **Executor** - Outputs, pass hooks
//! 3. **Diagnostics** - Statistics and display
//! 4. **Adapter** - Builder propagation

use approx::assert_abs_diff_eq;

use groupadjust::internals::adapters::batch::BatchGroupAdjustBuilder;
use groupadjust::internals::algorithms::combination::UndefinedMeanPolicy;
use groupadjust::internals::api::{Batch, GroupAdjustBuilder};
use groupadjust::internals::engine::executor::{AdjustConfig, GroupAdjustExecutor};
use groupadjust::internals::engine::validator::Validator;
use groupadjust::internals::evaluation::diagnostics::{Diagnostics, GroupingSummary};
use groupadjust::internals::math::accumulator::GroupAccumulator;
use groupadjust::internals::primitives::errors::GroupAdjustError;

// ============================================================================
// Helper Functions
// ============================================================================

fn config(weights: &[f64]) -> AdjustConfig<f64> {
    AdjustConfig {
        weights: weights.to_vec(),
        undefined_mean: UndefinedMeanPolicy::Propagate,
        return_weighted_means: false,
        return_group_means: false,
        custom_mean_pass: None,
        custom_combine_pass: None,
        custom_demean_pass: None,
    }
}

fn doubling_mean_pass(values: &[f64], codes: &[usize], n_groups: usize) -> GroupAccumulator<f64> {
    let mut acc = GroupAccumulator::new(n_groups);
    acc.accumulate(values, codes);
    for s in acc.sums.iter_mut() {
        *s *= 2.0;
    }
    acc
}

fn zero_demean_pass(_values: &[f64], weighted: &mut [f64]) {
    weighted.iter_mut().for_each(|w| *w = 0.0);
}

// ============================================================================
// Validator Tests
// ============================================================================

/// Test matching shapes pass validation.
#[test]
fn test_validate_shapes_ok() {
    let g = vec!["a", "b", "c"];
    assert!(Validator::validate_shapes(3, &[g.clone(), g], 2).is_ok());
}

/// Test an empty series with empty groupings is valid.
#[test]
fn test_validate_shapes_empty_series() {
    let g: Vec<u8> = Vec::new();
    assert!(Validator::validate_shapes(0, &[g], 1).is_ok());
}

/// Test validation reports the first offending grouping.
#[test]
fn test_validate_shapes_reports_grouping() {
    let good = vec![1, 2, 3];
    let bad = vec![1, 2];
    let res = Validator::validate_shapes(3, &[good.clone(), good, bad], 3);

    assert_eq!(
        res,
        Err(GroupAdjustError::MismatchedGroupingLength {
            grouping: 2,
            expected: 3,
            got: 2
        })
    );
}

/// Test weight count is checked before grouping lengths.
#[test]
fn test_validate_shapes_order() {
    let bad = vec![1];
    let res = Validator::validate_shapes(3, &[bad], 2);

    assert!(matches!(
        res,
        Err(GroupAdjustError::MismatchedWeights {
            groupings: 1,
            weights: 2
        })
    ));
}

/// Test zero groupings.
#[test]
fn test_validate_shapes_no_groupings() {
    let groupings: Vec<Vec<i32>> = Vec::new();
    assert_eq!(
        Validator::validate_shapes(3, &groupings, 0),
        Err(GroupAdjustError::NoGroupings)
    );
}

/// Test weight validation accepts zero and rejects bad values with their index.
#[test]
fn test_validate_weights() {
    assert!(Validator::validate_weights(&[0.0, 0.3, 2.0]).is_ok());
    assert_eq!(
        Validator::validate_weights::<f64>(&[]),
        Err(GroupAdjustError::NoGroupings)
    );

    let res = Validator::validate_weights(&[0.5, -1.0]);
    assert_eq!(
        res,
        Err(GroupAdjustError::InvalidWeight {
            index: 1,
            value: -1.0
        })
    );

    let res = Validator::validate_weights(&[f64::NEG_INFINITY]);
    assert!(res.unwrap_err().is_invalid_weight());
}

/// Test duplicate detection.
#[test]
fn test_validate_no_duplicates() {
    assert!(Validator::validate_no_duplicates(None).is_ok());
    assert_eq!(
        Validator::validate_no_duplicates(Some("weights")),
        Err(GroupAdjustError::DuplicateParameter {
            parameter: "weights"
        })
    );
}

// ============================================================================
// Executor Tests
// ============================================================================

/// Test the executor returns requested outputs only.
#[test]
fn test_executor_outputs() {
    let vals = [1.0, 2.0, 3.0];
    let groupings = [["USA", "USA", "USA"], ["MA", "MA", "CT"]];

    let mut cfg = config(&[0.35, 0.65]);
    let out = GroupAdjustExecutor::run_with_config(&vals, &groupings, &cfg);
    assert!(out.weighted_means.is_none());
    assert!(out.group_means.is_none());
    assert_eq!(
        out.groupings,
        vec![
            GroupingSummary {
                n_groups: 1,
                n_empty_groups: 0
            },
            GroupingSummary {
                n_groups: 2,
                n_empty_groups: 0
            },
        ]
    );

    cfg.return_weighted_means = true;
    cfg.return_group_means = true;
    let out = GroupAdjustExecutor::run_with_config(&vals, &groupings, &cfg);
    let tables = out.group_means.unwrap();
    assert_eq!(tables[1].labels, vec!["MA", "CT"]);
    assert_abs_diff_eq!(out.weighted_means.unwrap()[2], 2.65, epsilon = 1e-12);
    assert_abs_diff_eq!(out.adjusted[0], -0.675, epsilon = 1e-12);
}

/// Test a custom mean pass replaces the default one.
#[test]
fn test_executor_custom_mean_pass() {
    let mut cfg = config(&[1.0]);
    cfg.custom_mean_pass = Some(doubling_mean_pass);

    let out = GroupAdjustExecutor::run_with_config(&[1.0, 3.0], &[[0, 0]], &cfg);

    // mean doubled to 4
    assert_abs_diff_eq!(out.adjusted[0], -3.0);
    assert_abs_diff_eq!(out.adjusted[1], -1.0);
}

/// Test a custom demean pass replaces the default one.
#[test]
fn test_executor_custom_demean_pass() {
    let mut cfg = config(&[1.0]);
    cfg.custom_demean_pass = Some(zero_demean_pass);

    let out = GroupAdjustExecutor::run_with_config(&[1.0, 3.0], &[[0, 0]], &cfg);

    assert_eq!(out.adjusted, vec![0.0, 0.0]);
}

// ============================================================================
// Diagnostics Tests
// ============================================================================

/// Test diagnostics over a series with missing entries.
#[test]
fn test_diagnostics_compute() {
    let values = [1.0, f64::NAN, 3.0, 5.0];
    let adjusted = [-1.0, f64::NAN, 1.0, f64::NAN];
    let groupings = vec![GroupingSummary {
        n_groups: 2,
        n_empty_groups: 1,
    }];

    let diag = Diagnostics::compute(&values, &adjusted, &[0.25, 0.5], groupings);

    assert_eq!(diag.n_records, 4);
    assert_eq!(diag.n_missing_values, 1);
    assert_eq!(diag.n_missing_outputs, 2);
    assert_abs_diff_eq!(diag.weight_sum, 0.75);
    assert_abs_diff_eq!(diag.output_mean, 0.0);
    assert_abs_diff_eq!(diag.output_sd, 2.0f64.sqrt(), epsilon = 1e-12);
    assert_eq!(diag.total_groups(), 2);
}

/// Test diagnostics with one or zero defined outputs.
#[test]
fn test_diagnostics_degenerate() {
    let one = Diagnostics::compute(&[2.0], &[0.5], &[1.0], Vec::new());
    assert_abs_diff_eq!(one.output_mean, 0.5);
    assert_abs_diff_eq!(one.output_sd, 0.0);

    let none = Diagnostics::<f64>::compute(&[f64::NAN], &[f64::NAN], &[1.0], Vec::new());
    assert!(none.output_mean.is_nan());
    assert!(none.output_sd.is_nan());
}

/// Test diagnostics display.
#[test]
fn test_diagnostics_display() {
    let groupings = vec![GroupingSummary {
        n_groups: 3,
        n_empty_groups: 1,
    }];
    let diag = Diagnostics::compute(&[1.0, 2.0], &[0.0, 0.0], &[1.0], groupings);
    let text = format!("{}", diag);

    assert!(text.contains("Group Adjustment Diagnostics:"));
    assert!(text.contains("Grouping 0: 3 groups (1 empty)"));
}

// ============================================================================
// Adapter Tests
// ============================================================================

/// Test the batch builder defaults.
#[test]
fn test_batch_builder_defaults() {
    let builder = BatchGroupAdjustBuilder::<f64>::default();

    assert!(builder.weights.is_none());
    assert_eq!(builder.undefined_mean, UndefinedMeanPolicy::Propagate);
    assert!(!builder.return_weighted_means);
    assert!(!builder.return_group_means);
    assert!(!builder.return_diagnostics);
    assert!(builder.parallel.is_none());
}

/// Test options propagate from the generic builder to the batch builder.
#[test]
fn test_builder_propagation() {
    let builder = GroupAdjustBuilder::new()
        .weights(&[0.2, 0.8])
        .undefined_mean(UndefinedMeanPolicy::Skip)
        .return_group_means()
        .custom_mean_pass(doubling_mean_pass)
        .parallel(true)
        .adapter(Batch);

    assert_eq!(builder.weights, Some(vec![0.2, 0.8]));
    assert_eq!(builder.undefined_mean, UndefinedMeanPolicy::Skip);
    assert!(builder.return_group_means);
    assert!(!builder.return_weighted_means);
    assert!(builder.custom_mean_pass.is_some());
    assert_eq!(builder.parallel, Some(true));

    let model = builder.build().unwrap();
    assert_eq!(model.weights(), &[0.2, 0.8]);
}

/// Test a deferred adapter error surfaces at build.
#[test]
fn test_deferred_error() {
    let mut builder = GroupAdjustBuilder::new().weights(&[1.0]).adapter(Batch);
    builder.deferred_error = Some(GroupAdjustError::InvalidInput("late".into()));

    assert_eq!(
        builder.build().unwrap_err(),
        GroupAdjustError::InvalidInput("late".into())
    );
}

/// Test setting the undefined-mean policy twice is a duplicate.
#[test]
fn test_duplicate_policy() {
    let res = GroupAdjustBuilder::new()
        .weights(&[1.0])
        .undefined_mean(UndefinedMeanPolicy::Skip)
        .undefined_mean(UndefinedMeanPolicy::Propagate)
        .adapter(Batch)
        .build();

    assert!(matches!(
        res,
        Err(GroupAdjustError::DuplicateParameter {
            parameter: "undefined_mean"
        })
    ));
}
