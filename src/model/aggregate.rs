//! Trial reduction and share computation.
//!
//! `combine_trials` collapses the repeated trials of one experiment into mean
//! stage timings and mean per-operator prepare/execute timings. Operator means
//! are normalized by trial count, not sample count: an operator that runs
//! several times per trial has its per-trial total counted once per trial.
//!
//! `compute_shares` augments an aggregate with each operator's fraction of
//! the aggregate-wide prepare, execute, and combined totals.
//!
//! Operator maps are keyed in first-seen order (the order names were first
//! encountered while scanning trials), which is why they are IndexMaps.

use crate::error::{EvalError, Result};
use crate::model::ExperimentKey;
use crate::source::TrialRecord;
use indexmap::IndexMap;

/// Mean prepare/execute time of one operator, microseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OperatorTimes {
    pub prepare: f64,
    pub execute: f64,
}

/// The reduction of one experiment's trials.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentAggregate {
    pub compile_time: f64,
    pub execution_time: f64,
    pub optimize_time: f64,
    /// Sum of the three stage means.
    pub total_time: f64,
    pub operators: IndexMap<String, OperatorTimes>,
}

/// Per-operator means plus share-of-total fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatorShares {
    pub prepare_mean: f64,
    pub execute_mean: f64,
    pub prepare_share: f64,
    pub execute_share: f64,
    pub total_share: f64,
}

/// An `ExperimentAggregate` augmented with shares and the aggregate-wide
/// operator totals the shares were computed against. Derived and read-only;
/// rebuilt from scratch whenever the underlying aggregate changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedAggregate {
    pub compile_time: f64,
    pub execution_time: f64,
    pub optimize_time: f64,
    pub total_time: f64,
    pub prepare_total: f64,
    pub execute_total: f64,
    pub grand_total: f64,
    pub operators: IndexMap<String, OperatorShares>,
}

/// Reduce the trials of one experiment into one aggregate.
///
/// Stage sums stay integral until the final division so the means carry no
/// intermediate truncation. An operator absent from a trial contributes zero
/// to its sums for that trial; the division by trial count is unconditional.
pub fn combine_trials(key: &ExperimentKey, trials: &[TrialRecord]) -> Result<ExperimentAggregate> {
    if trials.is_empty() {
        return Err(EvalError::EmptyInput {
            query_id: key.query_id.clone(),
            engine: key.engine.clone(),
        });
    }
    let count = trials.len() as f64;

    let mut compile_sum: u64 = 0;
    let mut execution_sum: u64 = 0;
    let mut optimize_sum: u64 = 0;
    let mut sums: IndexMap<String, OperatorTimes> = IndexMap::new();

    for trial in trials {
        compile_sum += trial.pipeline_compile_time;
        execution_sum += trial.pipeline_execution_time;
        optimize_sum += trial.pipeline_optimize_time;

        for op in &trial.operators {
            let entry = sums.entry(op.name.clone()).or_default();
            if op.prepare {
                entry.prepare += op.walltime;
            } else {
                entry.execute += op.walltime;
            }
        }
    }

    let compile_time = compile_sum as f64 / count;
    let execution_time = execution_sum as f64 / count;
    let optimize_time = optimize_sum as f64 / count;

    let operators = sums
        .into_iter()
        .map(|(name, t)| {
            (
                name,
                OperatorTimes {
                    prepare: t.prepare / count,
                    execute: t.execute / count,
                },
            )
        })
        .collect();

    Ok(ExperimentAggregate {
        compile_time,
        execution_time,
        optimize_time,
        total_time: compile_time + execution_time + optimize_time,
        operators,
    })
}

/// Compute share-of-total fractions for every operator in an aggregate.
///
/// A zero `prepare_total` or `grand_total` yields zero shares for that metric.
/// A zero `execute_total` with operator data present has no defined fallback
/// and is rejected as `DegenerateTotal`; with no operators at all there is
/// nothing to divide and the result simply carries an empty map.
pub fn compute_shares(key: &ExperimentKey, agg: ExperimentAggregate) -> Result<SharedAggregate> {
    let prepare_total: f64 = agg.operators.values().map(|t| t.prepare).sum();
    let execute_total: f64 = agg.operators.values().map(|t| t.execute).sum();
    let grand_total = prepare_total + execute_total;

    if !agg.operators.is_empty() && execute_total == 0.0 {
        return Err(EvalError::DegenerateTotal {
            query_id: key.query_id.clone(),
            engine: key.engine.clone(),
            metric: "execute",
        });
    }

    let operators = agg
        .operators
        .into_iter()
        .map(|(name, t)| {
            let prepare_share = if prepare_total != 0.0 {
                t.prepare / prepare_total
            } else {
                0.0
            };
            // execute_total is nonzero whenever this closure runs.
            let execute_share = t.execute / execute_total;
            let total_share = if grand_total != 0.0 {
                (t.prepare + t.execute) / grand_total
            } else {
                0.0
            };
            (
                name,
                OperatorShares {
                    prepare_mean: t.prepare,
                    execute_mean: t.execute,
                    prepare_share,
                    execute_share,
                    total_share,
                },
            )
        })
        .collect();

    Ok(SharedAggregate {
        compile_time: agg.compile_time,
        execution_time: agg.execution_time,
        optimize_time: agg.optimize_time,
        total_time: agg.total_time,
        prepare_total,
        execute_total,
        grand_total,
        operators,
    })
}
