//! Per-install settings for stackselect.
//!
//! Stored in a machine-readable TOML file located at:
//!   %APPDATA%/StackSelect/config.toml on Windows
//!   $XDG_DATA_HOME/StackSelect/config.toml on Linux
//!   ~/Library/Application Support/StackSelect/config.toml on macOS
//!
//! The settings track where deployment profile definitions live so operators
//! do not have to pass `--config-dir` on every invocation. Well-known
//! behavior (the `full_stack` default, export key names) stays in code.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the workspace root (settings + event log).
pub const HOME_ENV_VAR: &str = "STACKSELECT_HOME";

/// Environment variable overriding the profile directory for one invocation.
pub const CONFIG_DIR_ENV_VAR: &str = "STACKSELECT_CONFIG_DIR";

/// Default profile location relative to the working directory, matching the
/// repository layout the deployment tooling ships with.
pub const DEFAULT_PROFILE_DIR: &str = "stacks/deployment-types/configs";

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppSettings {
    /// Directory holding deployment-type YAML definitions.
    pub profile_dir: Option<PathBuf>,
}

/// Returns the root directory where stackselect keeps its own state.
///
/// Order of precedence:
/// 1. `STACKSELECT_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var(HOME_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("StackSelect"))
}

/// Path to the settings file.
pub fn settings_file_path() -> Result<PathBuf> {
    Ok(workspace_root()?.join(SETTINGS_FILE_NAME))
}

/// Loads the settings from disk or returns defaults.
pub fn load_or_default() -> Result<AppSettings> {
    let path = settings_file_path()?;
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        let settings: AppSettings = toml::from_str(&data)
            .with_context(|| format!("Failed to parse settings file {:?}", path))?;
        Ok(settings)
    } else {
        Ok(AppSettings::default())
    }
}

/// Persists the settings to disk.
pub fn save(settings: &AppSettings) -> Result<()> {
    let root = workspace_root()?;
    fs::create_dir_all(&root)?;
    let data = toml::to_string_pretty(settings)?;
    fs::write(root.join(SETTINGS_FILE_NAME), data)?;
    Ok(())
}

/// Resolves the profile directory for this invocation.
///
/// Order of precedence: explicit CLI flag, `STACKSELECT_CONFIG_DIR`, the
/// persisted settings, then the in-repo default layout.
pub fn resolve_profile_dir(cli_dir: Option<&Path>, settings: &AppSettings) -> PathBuf {
    if let Some(dir) = cli_dir {
        return dir.to_path_buf();
    }
    if let Ok(dir) = env::var(CONFIG_DIR_ENV_VAR) {
        return PathBuf::from(dir);
    }
    if let Some(dir) = &settings.profile_dir {
        return dir.clone();
    }
    PathBuf::from(DEFAULT_PROFILE_DIR)
}
