use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Fail when the CSV destination names the configuration export being read.
pub fn ensure_output_is_not_input(output: &Path, input: &Path) -> Result<()> {
    let input_path = resolve(input)
        .with_context(|| format!("failed to resolve input path {}", input.display()))?;
    let output_path = resolve(output)
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;

    if output_path == input_path {
        bail!(
            "refusing to overwrite input file: output {} is the configuration being extracted ({})",
            output.display(),
            input.display()
        );
    }
    Ok(())
}

/// Absolute, `..`-free form of `path`. The deepest ancestor that exists is
/// canonicalized (resolving symlinks) and the missing tail is re-attached.
fn resolve(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().context("current_dir")?.join(path)
    };
    let lexical = lexically_normalize(&absolute);

    let mut existing = lexical.as_path();
    let mut missing: Vec<OsString> = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(lexical.clone()),
        }
    }

    let mut resolved = existing
        .canonicalize()
        .with_context(|| format!("canonicalize {}", existing.display()))?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

/// Drop `.` segments and fold `..` into its parent without touching the disk.
fn lexically_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
