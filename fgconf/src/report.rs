use colored::Colorize;
use fgconf_core::{format_summary, ParseResult, SectionSpec};
use serde::Serialize;

/// Record and field counts for one catalogued section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionCount {
    pub section: String,
    pub marker: String,
    pub records: usize,
    pub fields: usize,
}

impl SectionCount {
    pub fn from_result(spec: &SectionSpec, result: &ParseResult) -> Self {
        Self {
            section: spec.name.clone(),
            marker: spec.marker.clone(),
            records: result.records.len(),
            fields: result.fields.len(),
        }
    }
}

/// Render per-section counts for terminal output; empty sections are dimmed.
pub fn render_section_counts(rows: &[SectionCount]) -> String {
    let width = rows
        .iter()
        .map(|row| row.section.len())
        .max()
        .unwrap_or(0);

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let line = format!(
            "{:<width$}  records={} fields={}  ({})",
            row.section, row.records, row.fields, row.marker
        );
        let colored = if row.records == 0 {
            line.dimmed().to_string()
        } else {
            line.green().to_string()
        };
        out.push(colored);
    }
    out.join("\n")
}

/// Render the one-line result of an extraction.
pub fn render_extract_summary(result: &ParseResult, output: &str) -> String {
    format!("extracted {} output={output}", format_summary(result))
        .cyan()
        .to_string()
}
