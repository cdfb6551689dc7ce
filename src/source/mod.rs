//! Result document parsing: the raw benchmark-run output as written by the
//! benchmark harness.

pub mod load;
pub mod raw;

pub use load::load_document;
pub use raw::{
    ExperimentEntry, ExperimentHeader, OperatorSample, ResultDoc, TrialRecord, RUN_TASK,
};
