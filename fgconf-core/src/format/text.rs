use crate::record::{ParseResult, NAME_FIELD};

/// Format records as indented blocks, one per record.
pub fn format_text(result: &ParseResult) -> String {
    let mut lines = Vec::new();
    for record in &result.records {
        lines.push(format!("- {}", record.name().unwrap_or("<unnamed>")));
        for (key, value) in record.iter().filter(|(key, _)| *key != NAME_FIELD) {
            lines.push(format!("  {key}: {value}"));
        }
    }
    lines.join("\n")
}

/// Format a one-line count summary.
pub fn format_summary(result: &ParseResult) -> String {
    format!(
        "records={} fields={}",
        result.records.len(),
        result.fields.len()
    )
}
