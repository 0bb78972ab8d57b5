use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

mod cli;
mod extract_cmd;
mod path_guard;
mod sections_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Command::Extract(args) => extract_cmd::run_extract(args),
        Command::Sections(args) => sections_cmd::run_sections(args),
    }
}
