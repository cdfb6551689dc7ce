//! Grouping of aggregates by query id and engine for cross-engine comparison.

use crate::model::aggregate::SharedAggregate;
use crate::model::ExperimentKey;
use std::collections::BTreeMap;

/// Aggregate-wide operator totals: the sums of all operator prepare means,
/// execute means, and both combined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatorTotals {
    pub prepare: f64,
    pub execute: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexedAggregate {
    pub aggregate: SharedAggregate,
    pub operator_totals: OperatorTotals,
}

/// Two-level mapping `query_id -> engine -> aggregate`.
///
/// Inserting the same `(query_id, engine)` pair again overwrites the earlier
/// entry: re-aggregation is idempotent, last write wins.
#[derive(Debug, Default)]
pub struct ExperimentIndex {
    entries: BTreeMap<String, BTreeMap<String, IndexedAggregate>>,
}

impl ExperimentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ExperimentKey, aggregate: SharedAggregate) {
        let operator_totals = OperatorTotals {
            prepare: aggregate.prepare_total,
            execute: aggregate.execute_total,
            total: aggregate.grand_total,
        };
        self.entries.entry(key.query_id).or_default().insert(
            key.engine,
            IndexedAggregate {
                aggregate,
                operator_totals,
            },
        );
    }

    pub fn get(&self, query_id: &str, engine: &str) -> Option<&IndexedAggregate> {
        self.entries.get(query_id)?.get(engine)
    }

    /// Iterate queries in sorted order with their per-engine aggregates.
    pub fn queries(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, IndexedAggregate>)> {
        self.entries.iter().map(|(q, m)| (q.as_str(), m))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
