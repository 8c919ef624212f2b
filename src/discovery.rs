//! Thin filesystem collaborator: finds profile definition files and hands
//! their raw text to the store. All real logic lives behind the
//! `(identifier, text)` boundary so the core stays testable in memory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::profiles::{LoadError, LoadWarning, ProfileSource};

/// Reads every `*.yaml` / `*.yml` in `dir` (non-recursive), sorted by file
/// name for deterministic load order. An unreadable file is a per-source
/// warning; a missing or empty directory is fatal.
pub fn read_profile_dir(dir: &Path) -> Result<(Vec<ProfileSource>, Vec<LoadWarning>), LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::SourceDirectoryMissing {
            dir: dir.to_path_buf(),
        });
    }

    let mut paths: Vec<_> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("yaml") | Some("yml")
            )
        })
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(LoadError::NoConfigFiles {
            dir: dir.to_path_buf(),
        });
    }

    let mut sources = Vec::with_capacity(paths.len());
    let mut warnings = Vec::new();
    for path in paths {
        let identifier = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match fs::read_to_string(&path) {
            Ok(text) => sources.push(ProfileSource::new(identifier, text)),
            Err(err) => warnings.push(LoadWarning::ParseFailure {
                source: identifier,
                message: err.to_string(),
            }),
        }
    }

    Ok((sources, warnings))
}

/// Reads a tenant configuration file as raw text; parsing and validation
/// happen in the core.
pub fn read_tenant_config(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read tenant configuration {}", path.display()))
}
