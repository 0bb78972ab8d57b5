use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::debug;
use thiserror::Error;

use crate::record::ParseResult;

/// Errors that can occur while writing CSV output.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to serialize a CSV row.
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    /// Failed to create or flush the output.
    #[error("failed to write CSV file: {0}")]
    Io(#[from] std::io::Error),
}

/// Presentation switches applied when emitting CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Single-byte cell separator.
    pub delimiter: u8,
    /// Omit the header row.
    pub skip_header: bool,
    /// Emit an empty line after every data row.
    pub blank_row_between_records: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            skip_header: false,
            blank_row_between_records: false,
        }
    }
}

/// Write `result` as CSV into `sink`.
///
/// Every cell is quoted. Rows have one cell per registered field, in registry
/// order; fields a record lacks are written as empty cells. Returns `false`
/// without writing anything when the result has no records or no fields.
pub fn write_csv<W: Write>(
    result: &ParseResult,
    mut sink: W,
    options: &CsvOptions,
) -> Result<bool, WriteError> {
    if result.is_empty() {
        return Ok(false);
    }

    let builder = {
        let mut builder = WriterBuilder::new();
        builder
            .delimiter(options.delimiter)
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'));
        builder
    };

    if !options.skip_header {
        write_row(&builder, &mut sink, result.fields.iter())?;
    }

    for row in result.rows() {
        write_row(&builder, &mut sink, row)?;
        if options.blank_row_between_records {
            // Bare terminator between records.
            sink.write_all(b"\n")?;
        }
    }

    sink.flush()?;
    Ok(true)
}

/// Write one quoted row through a csv writer that borrows `sink` for that row only.
fn write_row<W, I, T>(builder: &WriterBuilder, sink: &mut W, row: I) -> Result<(), WriteError>
where
    W: Write,
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut writer = builder.from_writer(sink);
    writer.write_record(row)?;
    writer.flush()?;
    Ok(())
}

/// Write `result` as CSV to `path`. No file is created for an empty result.
pub fn write_csv_file(
    result: &ParseResult,
    path: &Path,
    options: &CsvOptions,
) -> Result<bool, WriteError> {
    if result.is_empty() {
        debug!("nothing to write; {} not created", path.display());
        return Ok(false);
    }

    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    let written = write_csv(result, &mut out, options)?;
    out.flush()?;
    Ok(written)
}
