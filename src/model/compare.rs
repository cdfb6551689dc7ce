//! Pairwise engine comparison over the experiment index.
//!
//! For every query that has aggregates for both configured engines, seven
//! metrics are paired: the four pipeline-stage means and the three operator
//! totals. Queries with only one side are skipped; a zero base value makes
//! the percentage fields undefined and they carry the infinite sentinel
//! instead of a number.

use crate::model::index::{ExperimentIndex, IndexedAggregate};
use std::fmt;

/// The two engines a comparison run is configured with. `engine_a` is the
/// baseline; percentages express `engine_b` relative to it.
#[derive(Debug, Clone)]
pub struct EnginePair {
    pub engine_a: String,
    pub engine_b: String,
}

/// Metric row labels, in output order.
pub const METRICS: [&str; 7] = [
    "compile pipeline",
    "execution pipeline",
    "optimize pipeline",
    "total pipeline",
    "prepare operators",
    "execute operators",
    "total operators",
];

/// A percentage that may be undefined when the comparison base is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Percent {
    Finite(f64),
    Infinite,
}

impl Percent {
    pub fn as_finite(self) -> Option<f64> {
        match self {
            Percent::Finite(p) => Some(p),
            Percent::Infinite => None,
        }
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percent::Finite(p) => write!(f, "{:.2}", p),
            Percent::Infinite => write!(f, "inf"),
        }
    }
}

/// One metric paired between the two engines for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub metric: &'static str,
    pub value_a: f64,
    pub value_b: f64,
    pub diff: f64,
    pub percent: Percent,
    pub percent_delta: Percent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryComparison {
    pub query_id: String,
    pub rows: Vec<ComparisonRow>,
}

/// Compare the two configured engines for every query that has both sides.
pub fn compare_engines(index: &ExperimentIndex, engines: &EnginePair) -> Vec<QueryComparison> {
    let mut out = Vec::new();

    for (query_id, by_engine) in index.queries() {
        let (Some(a), Some(b)) = (
            by_engine.get(&engines.engine_a),
            by_engine.get(&engines.engine_b),
        ) else {
            // One-sided queries are excluded, not an error.
            continue;
        };

        let values_a = metric_values(a);
        let values_b = metric_values(b);

        let rows = METRICS
            .iter()
            .zip(values_a.iter().zip(values_b.iter()))
            .map(|(&metric, (&value_a, &value_b))| compare_metric(metric, value_a, value_b))
            .collect();

        out.push(QueryComparison {
            query_id: query_id.to_string(),
            rows,
        });
    }

    out
}

/// The seven metric values of one indexed aggregate, in `METRICS` order.
fn metric_values(entry: &IndexedAggregate) -> [f64; 7] {
    let agg = &entry.aggregate;
    [
        agg.compile_time,
        agg.execution_time,
        agg.optimize_time,
        agg.total_time,
        entry.operator_totals.prepare,
        entry.operator_totals.execute,
        entry.operator_totals.total,
    ]
}

fn compare_metric(metric: &'static str, value_a: f64, value_b: f64) -> ComparisonRow {
    let diff = value_b - value_a;
    let (percent, percent_delta) = if value_a != 0.0 {
        let percent = value_b / value_a * 100.0;
        (Percent::Finite(percent), Percent::Finite(percent - 100.0))
    } else {
        (Percent::Infinite, Percent::Infinite)
    };

    ComparisonRow {
        metric,
        value_a,
        value_b,
        diff,
        percent,
        percent_delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::aggregate::SharedAggregate;
    use crate::model::ExperimentKey;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    fn engines() -> EnginePair {
        EnginePair {
            engine_a: "opossum".to_string(),
            engine_b: "jit".to_string(),
        }
    }

    fn shared(stages: (f64, f64, f64), prepare_total: f64, execute_total: f64) -> SharedAggregate {
        SharedAggregate {
            compile_time: stages.0,
            execution_time: stages.1,
            optimize_time: stages.2,
            total_time: stages.0 + stages.1 + stages.2,
            prepare_total,
            execute_total,
            grand_total: prepare_total + execute_total,
            operators: IndexMap::new(),
        }
    }

    fn index_with(entries: Vec<(&str, &str, SharedAggregate)>) -> ExperimentIndex {
        let mut index = ExperimentIndex::new();
        for (query_id, engine, agg) in entries {
            index.insert(
                ExperimentKey {
                    query_id: query_id.to_string(),
                    engine: engine.to_string(),
                },
                agg,
            );
        }
        index
    }

    #[test]
    fn seven_rows_in_fixed_order() {
        let index = index_with(vec![
            ("q1", "opossum", shared((1.0, 2.0, 3.0), 4.0, 5.0)),
            ("q1", "jit", shared((1.0, 2.0, 3.0), 4.0, 5.0)),
        ]);
        let out = compare_engines(&index, &engines());
        assert_eq!(out.len(), 1);

        let labels: Vec<&str> = out[0].rows.iter().map(|r| r.metric).collect();
        assert_eq!(labels, METRICS.to_vec());
    }

    #[test]
    fn diff_and_percent_against_the_baseline() {
        let index = index_with(vec![
            ("q1", "opossum", shared((40.0, 50.0, 10.0), 0.5, 0.5)),
            ("q1", "jit", shared((60.0, 80.0, 10.0), 0.5, 0.5)),
        ]);
        let out = compare_engines(&index, &engines());

        // total pipeline: 100 -> 150
        let total = &out[0].rows[3];
        assert_eq!(total.value_a, 100.0);
        assert_eq!(total.value_b, 150.0);
        assert_eq!(total.diff, 50.0);
        assert_eq!(total.percent, Percent::Finite(150.0));
        assert_eq!(total.percent_delta, Percent::Finite(50.0));
    }

    #[test]
    fn zero_base_renders_the_infinite_sentinel() {
        let index = index_with(vec![
            ("q1", "opossum", shared((0.0, 0.0, 0.0), 0.0, 0.0)),
            ("q1", "jit", shared((10.0, 0.0, 0.0), 0.0, 0.0)),
        ]);
        let out = compare_engines(&index, &engines());

        let compile = &out[0].rows[0];
        assert_eq!(compile.diff, 10.0);
        assert_eq!(compile.percent, Percent::Infinite);
        assert_eq!(compile.percent_delta, Percent::Infinite);
        assert_eq!(compile.percent.to_string(), "inf");
    }

    #[test]
    fn one_sided_queries_are_skipped() {
        let index = index_with(vec![
            ("q1", "opossum", shared((1.0, 1.0, 1.0), 1.0, 1.0)),
            ("q2", "opossum", shared((1.0, 1.0, 1.0), 1.0, 1.0)),
            ("q2", "jit", shared((1.0, 1.0, 1.0), 1.0, 1.0)),
        ]);
        let out = compare_engines(&index, &engines());

        let ids: Vec<&str> = out.iter().map(|c| c.query_id.as_str()).collect();
        assert_eq!(ids, vec!["q2"]);
    }

    #[test]
    fn swapping_engines_negates_diff_and_inverts_percent() {
        let index = index_with(vec![
            ("q1", "opossum", shared((40.0, 50.0, 10.0), 2.0, 2.0)),
            ("q1", "jit", shared((100.0, 80.0, 20.0), 1.0, 1.0)),
        ]);
        let forward = compare_engines(&index, &engines());
        let swapped = compare_engines(
            &index,
            &EnginePair {
                engine_a: "jit".to_string(),
                engine_b: "opossum".to_string(),
            },
        );

        for (f, s) in forward[0].rows.iter().zip(swapped[0].rows.iter()) {
            assert_eq!(f.diff, -s.diff);
            let fp = f.percent.as_finite().unwrap();
            let sp = s.percent.as_finite().unwrap();
            assert!((fp * sp - 100.0 * 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn ignores_extra_engines_in_the_index() {
        let index = index_with(vec![
            ("q1", "opossum", shared((1.0, 1.0, 1.0), 1.0, 1.0)),
            ("q1", "jit", shared((2.0, 2.0, 2.0), 1.0, 1.0)),
            ("q1", "hand-rolled", shared((9.0, 9.0, 9.0), 9.0, 9.0)),
        ]);
        let out = compare_engines(&index, &engines());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].rows[0].value_b, 2.0);
    }
}
