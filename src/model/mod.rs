//! Evaluation model: reduce repeated trials into per-experiment aggregates,
//! derive share-of-total fractions, and compare two engines per query.

pub mod aggregate;
pub mod compare;
pub mod index;

pub use aggregate::{
    combine_trials, compute_shares, ExperimentAggregate, OperatorShares, OperatorTimes,
    SharedAggregate,
};
pub use compare::{compare_engines, ComparisonRow, EnginePair, Percent, QueryComparison};
pub use index::{ExperimentIndex, IndexedAggregate, OperatorTotals};

/// Identity of one experiment within the result document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExperimentKey {
    pub query_id: String,
    pub engine: String,
}
