use crate::record::ParseResult;

/// Format a parse result as pretty JSON (`{"records": [...], "fields": [...]}`).
pub fn format_json(result: &ParseResult) -> String {
    serde_json::to_string_pretty(result)
        .unwrap_or_else(|_| r#"{"records":[],"fields":[]}"#.to_string())
}
