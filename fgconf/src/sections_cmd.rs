use std::fs;

use anyhow::{Context, Result};
use fgconf::catalogue::resolve_catalogue;
use fgconf::report::{render_section_counts, SectionCount};
use fgconf_core::parse_reader;

use crate::cli::{OutputFormat, SectionsArgs};

pub fn run_sections(args: SectionsArgs) -> Result<()> {
    let raw = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let (catalogue, _source) = resolve_catalogue(args.sections_file.as_deref());

    let mut rows = Vec::with_capacity(catalogue.len());
    for spec in &catalogue {
        let result = parse_reader(raw.as_slice(), &spec.marker)
            .with_context(|| format!("failed to parse {}", args.input.display()))?;
        rows.push(SectionCount::from_result(spec, &result));
    }

    match args.format {
        OutputFormat::Text => println!("{}", render_section_counts(&rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }

    Ok(())
}
