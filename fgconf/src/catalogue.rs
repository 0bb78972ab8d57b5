use std::fs;
use std::path::Path;

use fgconf_core::{SectionKind, SectionSpec};
use log::warn;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize)]
struct CatalogueFile {
    #[serde(default)]
    section: Vec<SectionSpec>,
}

/// Errors returned when loading a section catalogue.
#[derive(Debug, Error)]
pub enum CatalogueLoadError {
    #[error("failed to read sections file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse sections file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("sections file {path} defines no sections")]
    Empty { path: String },
}

/// Load section definitions from a TOML file.
pub fn load_catalogue(path: &Path) -> Result<Vec<SectionSpec>, CatalogueLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogueLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_catalogue(&raw, path.display().to_string())
}

/// Built-in catalogue: interfaces, IP pools and VIPs.
pub fn default_catalogue() -> Vec<SectionSpec> {
    let embedded = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/sections/sections.toml"
    ));
    catalogue_or_builtin(embedded, "embedded sections")
}

fn catalogue_or_builtin(raw: &str, label: &str) -> Vec<SectionSpec> {
    match parse_catalogue(raw, label.to_string()) {
        Ok(sections) => sections,
        Err(err) => {
            warn!("{err}; using built-in interface, ippool and vip sections");
            SectionKind::ALL.into_iter().map(SectionSpec::from).collect()
        }
    }
}

/// Use `path` when given, falling back to the built-in catalogue (with a
/// warning) if it cannot be loaded. Returns the catalogue and its source label.
pub fn resolve_catalogue(path: Option<&Path>) -> (Vec<SectionSpec>, String) {
    let Some(path) = path else {
        return (default_catalogue(), "embedded".to_string());
    };

    match load_catalogue(path) {
        Ok(sections) => (sections, format!("file:{}", path.display())),
        Err(err) => {
            warn!("{err}; using embedded sections");
            (default_catalogue(), "embedded".to_string())
        }
    }
}

/// Find a section by name, ignoring ASCII case.
pub fn find_section<'a>(catalogue: &'a [SectionSpec], name: &str) -> Option<&'a SectionSpec> {
    catalogue
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name.trim()))
}

fn parse_catalogue(raw: &str, path: String) -> Result<Vec<SectionSpec>, CatalogueLoadError> {
    let parsed: CatalogueFile = toml::from_str(raw).map_err(|source| CatalogueLoadError::Parse {
        path: path.clone(),
        source,
    })?;
    if parsed.section.is_empty() {
        return Err(CatalogueLoadError::Empty { path });
    }
    Ok(parsed.section)
}
