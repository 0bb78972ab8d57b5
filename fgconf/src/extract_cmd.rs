use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use fgconf::catalogue::{find_section, resolve_catalogue};
use fgconf::report::render_extract_summary;
use fgconf_core::{
    format_json, format_text, parse_file, write_csv_file, CsvOptions, SectionSpec,
};
use log::debug;

use crate::cli::{ExtractArgs, ExtractFormat};
use crate::path_guard;

const CUSTOM_MARKER_OUTPUT: &str = "records-out.csv";

pub fn run_extract(args: ExtractArgs) -> Result<()> {
    let section = resolve_section(&args)?;
    debug!("extracting '{}' from {}", section.marker, args.input.display());

    let result = parse_file(&args.input, &section.marker)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    match args.format {
        ExtractFormat::Json => {
            println!("{}", format_json(&result));
            return Ok(());
        }
        ExtractFormat::Text => {
            println!("{}", format_text(&result));
            return Ok(());
        }
        ExtractFormat::Csv => {}
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&section.output));
    path_guard::ensure_output_is_not_input(&output, &args.input)?;

    let options = CsvOptions {
        delimiter: delimiter_byte(args.delimiter)?,
        skip_header: args.skip_header,
        blank_row_between_records: args.newline,
    };

    let written = write_csv_file(&result, &output, &options)
        .with_context(|| format!("failed to write output CSV {}", output.display()))?;
    if !written {
        eprintln!(
            "no {} records found in {}; {} not written",
            section.name,
            args.input.display(),
            output.display()
        );
        return Ok(());
    }

    println!(
        "{}",
        render_extract_summary(&result, &output.display().to_string())
    );
    Ok(())
}

fn resolve_section(args: &ExtractArgs) -> Result<SectionSpec> {
    if let Some(marker) = &args.marker {
        if marker.trim().is_empty() {
            bail!("--marker cannot be empty");
        }
        return Ok(SectionSpec {
            name: "custom".to_string(),
            marker: marker.clone(),
            output: CUSTOM_MARKER_OUTPUT.to_string(),
        });
    }

    let (catalogue, source) = resolve_catalogue(args.sections_file.as_deref());
    match find_section(&catalogue, &args.section) {
        Some(spec) => Ok(spec.clone()),
        None => {
            let known: Vec<&str> = catalogue.iter().map(|spec| spec.name.as_str()).collect();
            bail!(
                "unknown section '{}' (known from {}: {})",
                args.section,
                source,
                known.join(", ")
            )
        }
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
        bail!("--delimiter must be a single ASCII character other than a quote or newline");
    }
    Ok(delimiter as u8)
}
