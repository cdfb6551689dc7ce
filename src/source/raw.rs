//! Raw serde shapes for the benchmark result document.
//!
//! JSON shape:
//! {
//!   "results": [
//!     {
//!       "experiment": { "task": "run", "query_id": "q1", "engine": "opossum" },
//!       "results": [
//!         {
//!           "pipeline_compile_time": "1200",     // integer, as string or number
//!           "pipeline_execution_time": 5400,
//!           "pipeline_optimize_time": 300,
//!           "operators": [
//!             { "name": "TableScan", "prepare": false, "walltime": "853.886" }
//!           ]
//!         },
//!         ...
//!       ]
//!     },
//!     ...
//!   ]
//! }
//!
//! The harness serializes timings inconsistently (sometimes quoted, sometimes
//! bare numbers), so the numeric fields accept both forms.

use serde::de::Deserializer;
use serde::Deserialize;

/// Task name of the experiments that participate in evaluation. Experiments
/// with any other task (warmup, calibration) are ignored entirely.
pub const RUN_TASK: &str = "run";

#[derive(Debug, Clone, Deserialize)]
pub struct ResultDoc {
    #[serde(default)]
    pub results: Vec<ExperimentEntry>,
}

/// One experiment: its identifying header plus the repeated trials.
#[derive(Debug, Clone, Deserialize)]
pub struct ExperimentEntry {
    pub experiment: ExperimentHeader,

    #[serde(default)]
    pub results: Vec<TrialRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExperimentHeader {
    pub task: String,
    pub query_id: String,
    pub engine: String,
}

/// One repeated execution of an experiment. Stage timings are integer
/// microseconds; operator walltimes are floating-point microseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct TrialRecord {
    #[serde(deserialize_with = "u64_or_string")]
    pub pipeline_compile_time: u64,

    #[serde(deserialize_with = "u64_or_string")]
    pub pipeline_execution_time: u64,

    #[serde(deserialize_with = "u64_or_string")]
    pub pipeline_optimize_time: u64,

    #[serde(default)]
    pub operators: Vec<OperatorSample>,
}

/// One operator invocation within a trial. The same name may appear several
/// times per trial; `prepare` routes the sample into either the prepare or
/// the execute bucket for that name, never both.
#[derive(Debug, Clone, Deserialize)]
pub struct OperatorSample {
    pub name: String,
    pub prepare: bool,

    #[serde(deserialize_with = "f64_or_string")]
    pub walltime: f64,
}

fn u64_or_string<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn f64_or_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stage_times_accept_strings_and_numbers() {
        let json = r#"{
            "pipeline_compile_time": "1200",
            "pipeline_execution_time": 5400,
            "pipeline_optimize_time": " 300 ",
            "operators": []
        }"#;
        let trial: TrialRecord = serde_json::from_str(json).unwrap();
        assert_eq!(trial.pipeline_compile_time, 1200);
        assert_eq!(trial.pipeline_execution_time, 5400);
        assert_eq!(trial.pipeline_optimize_time, 300);
    }

    #[test]
    fn walltime_accepts_strings_and_numbers() {
        let json = r#"{ "name": "TableScan", "prepare": true, "walltime": "853.886" }"#;
        let op: OperatorSample = serde_json::from_str(json).unwrap();
        assert_eq!(op.walltime, 853.886);

        let json = r#"{ "name": "TableScan", "prepare": false, "walltime": 12 }"#;
        let op: OperatorSample = serde_json::from_str(json).unwrap();
        assert_eq!(op.walltime, 12.0);
    }

    #[test]
    fn non_numeric_stage_time_is_rejected() {
        let json = r#"{
            "pipeline_compile_time": "fast",
            "pipeline_execution_time": 0,
            "pipeline_optimize_time": 0
        }"#;
        assert!(serde_json::from_str::<TrialRecord>(json).is_err());
    }

    #[test]
    fn missing_operators_defaults_to_empty() {
        let json = r#"{
            "pipeline_compile_time": 1,
            "pipeline_execution_time": 2,
            "pipeline_optimize_time": 3
        }"#;
        let trial: TrialRecord = serde_json::from_str(json).unwrap();
        assert!(trial.operators.is_empty());
    }
}
