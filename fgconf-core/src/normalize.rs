/// Strip leading and trailing whitespace (including line terminators) from a
/// raw input line. Case, inner whitespace and quoting are left untouched.
pub fn normalize_line(raw: &str) -> &str {
    raw.trim()
}
