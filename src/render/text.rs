//! ASCII tables for the per-experiment summary and the per-query engine
//! comparison. Times render as rounded integers, shares with three decimals,
//! percentages with two; numeric columns are right-justified.

use crate::model::{EnginePair, ExperimentKey, Percent, QueryComparison, SharedAggregate};
use std::fmt::Write;

/// Render the per-experiment summary: the stage-mean header lines plus one
/// table row per operator in first-seen order, closed by a Total row.
pub fn render_summary(key: &ExperimentKey, shared: &SharedAggregate) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Query: {}, Engine: {}", key.query_id, key.engine);
    let _ = writeln!(
        out,
        "compile time: {:.0}, execution time: {:.0}, optimize time: {:.0}, total time: {:.0} (micro s)",
        shared.compile_time, shared.execution_time, shared.optimize_time, shared.total_time
    );

    let mut table = AsciiTable::new(vec![
        "Operator",
        "Prepare",
        "Execution",
        "Total time",
        "share Prepare",
        "share Execution",
        "share Total",
    ]);
    for (name, op) in &shared.operators {
        table.push_row(vec![
            name.clone(),
            format!("{:.0}", op.prepare_mean),
            format!("{:.0}", op.execute_mean),
            format!("{:.0}", op.prepare_mean + op.execute_mean),
            format!("{:.3}", op.prepare_share),
            format!("{:.3}", op.execute_share),
            format!("{:.3}", op.total_share),
        ]);
    }
    table.push_row(vec![
        "Total".to_string(),
        format!("{:.0}", shared.prepare_total),
        format!("{:.0}", shared.execute_total),
        format!("{:.0}", shared.grand_total),
        String::new(),
        String::new(),
        String::new(),
    ]);

    out.push_str(&table.render());
    out.push('\n');
    out
}

/// Render the per-query comparison table: one row per metric, the baseline
/// engine first, with diff and percentage columns.
pub fn render_comparison(comparison: &QueryComparison, engines: &EnginePair) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Query: {}", comparison.query_id);

    let mut table = AsciiTable::new(vec![
        "Time (micro s)",
        engines.engine_a.as_str(),
        engines.engine_b.as_str(),
        "Diff",
        "%",
        "Diff %",
    ]);
    for row in &comparison.rows {
        table.push_row(vec![
            row.metric.to_string(),
            format!("{:.0}", row.value_a),
            format!("{:.0}", row.value_b),
            format!("{:.0}", row.diff),
            format!("{}%", row.percent),
            delta_cell(row.percent_delta),
        ]);
    }

    out.push_str(&table.render());
    out.push('\n');
    out
}

/// A non-negative delta carries an explicit leading sign so the direction of
/// the change is visible at a glance.
fn delta_cell(delta: Percent) -> String {
    match delta {
        Percent::Finite(d) if d >= 0.0 => format!("+{:.2}%", d),
        Percent::Finite(d) => format!("{:.2}%", d),
        Percent::Infinite => "inf%".to_string(),
    }
}

/// Minimal ASCII table: borders above and below the header and at the bottom,
/// first column left-justified, all others right-justified.
struct AsciiTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl AsciiTable {
    fn new(header: Vec<&str>) -> Self {
        Self {
            header: header.into_iter().map(str::to_string).collect(),
            rows: Vec::new(),
        }
    }

    fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.header.len());
        self.rows.push(row);
    }

    fn render(&self) -> String {
        let mut widths: Vec<usize> = self.header.iter().map(String::len).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.len());
            }
        }

        let separator: String = {
            let mut s = String::from("+");
            for w in &widths {
                s.push_str(&"-".repeat(w + 2));
                s.push('+');
            }
            s
        };

        let line = |row: &[String]| -> String {
            let mut s = String::from("|");
            for (i, (cell, w)) in row.iter().zip(&widths).enumerate() {
                if i == 0 {
                    let _ = write!(s, " {:<width$} |", cell, width = w);
                } else {
                    let _ = write!(s, " {:>width$} |", cell, width = w);
                }
            }
            s
        };

        let mut out = String::new();
        out.push_str(&separator);
        out.push('\n');
        out.push_str(&line(&self.header));
        out.push('\n');
        out.push_str(&separator);
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(row));
            out.push('\n');
        }
        out.push_str(&separator);
        out.push('\n');
        out
    }
}
