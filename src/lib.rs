//! Benchmark result evaluator: reduces repeated trial measurements into
//! per-experiment aggregates with share-of-total fractions, and compares two
//! engines' aggregates per query.

pub mod error;
pub mod model;
pub mod render;
pub mod source;

pub type Result<T> = anyhow::Result<T>;
