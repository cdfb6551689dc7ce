//! Error taxonomy for the evaluation core.
//!
//! Hard errors abort the affected experiment's aggregation and carry enough
//! context (query id, engine) to locate the malformed input. Soft conditions
//! (a query missing one engine, a zero comparison base) never surface here;
//! they are resolved locally with skips or sentinels.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EvalError>;

#[derive(Error, Debug)]
pub enum EvalError {
    /// An experiment arrived with zero trials; every mean would divide by zero.
    #[error("experiment for query '{query_id}' on engine '{engine}' has no trials")]
    EmptyInput { query_id: String, engine: String },

    /// A share divisor is zero in a context with no defined fallback: operator
    /// data was recorded but the aggregate-wide total for this metric is zero,
    /// so any share computed against it would be meaningless.
    #[error(
        "query '{query_id}' on engine '{engine}': total {metric} time across operators is zero, shares are undefined"
    )]
    DegenerateTotal {
        query_id: String,
        engine: String,
        metric: &'static str,
    },
}
