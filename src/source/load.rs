use crate::source::raw::ResultDoc;
use anyhow::Context;
use std::fs;

/// Read and parse a benchmark result document from disk.
pub fn load_document(path: &str) -> anyhow::Result<ResultDoc> {
    let text = fs::read_to_string(path).with_context(|| format!("read results file {}", path))?;
    let doc: ResultDoc =
        serde_json::from_str(&text).with_context(|| format!("parse results file {}", path))?;
    Ok(doc)
}
