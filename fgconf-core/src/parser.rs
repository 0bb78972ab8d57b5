use std::fs::File;
use std::io::{BufRead, BufReader};
use std::mem;
use std::path::Path;

use log::{debug, trace};
use thiserror::Error;

use crate::normalize::normalize_line;
use crate::record::{FieldRegistry, ParseResult, Record, NAME_FIELD};

/// Errors that can occur while obtaining configuration lines.
///
/// Malformed lines are never errors; only failing to read the input is.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input could not be opened or read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Position of the parser relative to the target block.
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    /// Outside the target section.
    Outside,
    /// Inside the section, no `edit` sub-block open.
    InSection,
    /// Inside an `edit ... next` sub-block; holds the record being built.
    InRecord(Record),
}

/// Single-pass, line-oriented state machine for one `config <section>` block.
///
/// Each line is tested against every pattern in a fixed order (enter section,
/// `edit`, `set`, `next`, `end`) and every match takes effect, so compressed
/// input behaves the same as the line-per-statement exports FortiOS produces.
#[derive(Debug, Clone)]
pub struct BlockParser {
    marker: String,
    state: State,
    records: Vec<Record>,
    fields: FieldRegistry,
    line_no: usize,
}

impl BlockParser {
    /// Create a parser for the block opened by `marker`
    /// (e.g. `config system interface`).
    pub fn new(marker: impl Into<String>) -> Self {
        let marker = marker.into();
        Self {
            marker: normalize_line(&marker).to_string(),
            state: State::Outside,
            records: Vec::new(),
            fields: FieldRegistry::new(),
            line_no: 0,
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// True while inside the target section (with or without an open record).
    pub fn in_section(&self) -> bool {
        !matches!(self.state, State::Outside)
    }

    /// True while an `edit` sub-block is open.
    pub fn in_record(&self) -> bool {
        matches!(self.state, State::InRecord(_))
    }

    /// Consume one raw input line.
    pub fn feed_line(&mut self, raw: &str) {
        self.line_no += 1;
        let line = normalize_line(raw);

        if self.state == State::Outside && line.eq_ignore_ascii_case(&self.marker) {
            debug!("line {}: entering '{}'", self.line_no, self.marker);
            self.state = State::InSection;
        }

        if self.in_section() {
            if let Some(name) = match_edit(line) {
                self.open_record(name);
            }

            if let Some((key, value)) = match_set(line) {
                self.set_field(key, value);
            }

            if line.eq_ignore_ascii_case("next") {
                self.seal_record();
            }
        }

        if line.eq_ignore_ascii_case("end") {
            self.leave_section();
        }
    }

    /// Consume every line of `input`.
    pub fn feed_str(&mut self, input: &str) {
        for line in input.lines() {
            self.feed_line(line);
        }
    }

    /// Finish the run. A record still open at this point is dropped.
    pub fn finish(self) -> ParseResult {
        if let State::InRecord(record) = &self.state {
            debug!(
                "input ended inside record {:?}; record dropped",
                record.name().unwrap_or_default()
            );
        }
        ParseResult {
            records: self.records,
            fields: self.fields,
        }
    }

    fn open_record(&mut self, name: &str) {
        if let State::InRecord(previous) = &self.state {
            debug!(
                "line {}: edit while record {:?} still open; previous record dropped",
                self.line_no,
                previous.name().unwrap_or_default()
            );
        }
        let mut record = Record::new();
        record.set(NAME_FIELD, name);
        self.fields.register(NAME_FIELD);
        self.state = State::InRecord(record);
    }

    fn set_field(&mut self, key: &str, value: &str) {
        let State::InRecord(record) = &mut self.state else {
            trace!("line {}: set {key} outside a record ignored", self.line_no);
            return;
        };
        let unquoted: String = value.chars().filter(|c| *c != '"').collect();
        record.set(key, unquoted.trim());
        self.fields.register(key);
    }

    fn seal_record(&mut self) {
        match mem::replace(&mut self.state, State::InSection) {
            State::InRecord(record) => {
                trace!("line {}: sealed record {:?}", self.line_no, record.name());
                self.records.push(record);
            }
            other => self.state = other,
        }
    }

    fn leave_section(&mut self) {
        match mem::replace(&mut self.state, State::Outside) {
            State::InRecord(record) => debug!(
                "line {}: end inside record {:?} without next; record discarded",
                self.line_no,
                record.name().unwrap_or_default()
            ),
            State::InSection => debug!("line {}: leaving '{}'", self.line_no, self.marker),
            State::Outside => {}
        }
    }
}

/// Match `edit "<name>"` and return the text between the first and last quote.
fn match_edit(line: &str) -> Option<&str> {
    let rest = strip_keyword(line, "edit")?;
    let quoted = rest.trim_start();
    if quoted.len() < 2 || !quoted.starts_with('"') || !quoted.ends_with('"') {
        return None;
    }
    Some(&quoted[1..quoted.len() - 1])
}

/// Match `set <key> <value>`; the key is the first whitespace-delimited token,
/// the value everything after it.
fn match_set(line: &str) -> Option<(&str, &str)> {
    let rest = strip_keyword(line, "set")?.trim_start();
    let split = rest.find(char::is_whitespace)?;
    let (key, value) = rest.split_at(split);
    Some((key, value.trim()))
}

/// Strip a case-insensitive leading keyword that must be followed by whitespace.
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let head = line.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &line[keyword.len()..];
    rest.starts_with(char::is_whitespace).then_some(rest)
}

/// Parse every `marker` block found in `input`.
pub fn parse_str(input: &str, marker: &str) -> ParseResult {
    let mut parser = BlockParser::new(marker);
    parser.feed_str(input);
    parser.finish()
}

/// Parse every `marker` block from a buffered reader, line by line.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD and never fail
/// the run.
pub fn parse_reader<R: BufRead>(
    mut reader: R,
    marker: &str,
) -> Result<ParseResult, ParseError> {
    let mut parser = BlockParser::new(marker);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        parser.feed_line(&String::from_utf8_lossy(&buf));
    }
    Ok(parser.finish())
}

/// Parse every `marker` block of the configuration file at `path`.
pub fn parse_file(path: &Path, marker: &str) -> Result<ParseResult, ParseError> {
    let file = File::open(path)?;
    parse_reader(BufReader::new(file), marker)
}
