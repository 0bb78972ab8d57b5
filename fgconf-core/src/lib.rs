//! Block parser for FortiGate plain-text configuration exports.
//!
//! A FortiOS export nests settings as `config <section>` blocks holding
//! `edit "<name>" ... next` sub-blocks of `set <key> <value>` lines, closed by
//! `end`. [`BlockParser`] walks one such section in a single pass and yields a
//! [`ParseResult`]: the records in encounter order and the first-seen ordered
//! union of their field names, ready for tabular output through
//! [`write_csv`].

pub mod format;
pub mod normalize;
pub mod parser;
pub mod record;
pub mod section;
pub mod writer;

pub use format::{format_json, format_summary, format_text};
pub use normalize::normalize_line;
pub use parser::{parse_file, parse_reader, parse_str, BlockParser, ParseError};
pub use record::{FieldRegistry, ParseResult, Record, NAME_FIELD};
pub use section::{SectionKind, SectionSpec, UnknownSection};
pub use writer::{write_csv, write_csv_file, CsvOptions, WriteError};
