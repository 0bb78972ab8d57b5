use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "fgconf")]
#[command(about = "Extract records from FortiGate configuration exports as CSV")]
pub struct Cli {
    /// Log state-machine decisions (RUST_LOG overrides).
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Extract one section's records into a CSV file.
    Extract(ExtractArgs),
    /// Count records in every catalogued section of a config.
    Sections(SectionsArgs),
}

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// FortiGate configuration file, e.g. fgfw.cfg.
    pub input: PathBuf,
    /// Section to extract (interface, ippool, vip, or a name from --sections-file).
    #[arg(long, default_value = "interface", conflicts_with = "marker")]
    pub section: String,
    /// Extract the block opened by this exact line instead of a named section.
    #[arg(long)]
    pub marker: Option<String>,
    /// Output CSV file (defaults to the section's output name).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Insert a blank line after each record for readability.
    #[arg(short, long)]
    pub newline: bool,
    /// Do not write the CSV header.
    #[arg(short, long)]
    pub skip_header: bool,
    /// Single-character cell delimiter.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,
    /// Output format; json and text print records to stdout instead of writing CSV.
    #[arg(long, value_enum, default_value_t = ExtractFormat::Csv)]
    pub format: ExtractFormat,
    /// Optional section catalogue TOML (replaces the built-in sections).
    #[arg(long)]
    pub sections_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct SectionsArgs {
    /// FortiGate configuration file.
    pub input: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Optional section catalogue TOML (replaces the built-in sections).
    #[arg(long)]
    pub sections_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum ExtractFormat {
    Csv,
    Json,
    Text,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
