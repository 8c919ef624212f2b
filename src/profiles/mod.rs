//! Deployment-type profiles: the record model and the loaded store.
//!
//! Profiles are authored as one YAML document per deployment type. The store
//! parses and indexes them once at startup; everything downstream works over
//! the immutable index.

mod record;
mod store;

pub use record::{
    ClusterConfig, HybridConfig, NatStrategy, ProfileRecord, SecurityConfig, SubnetConfig,
};
pub use store::{LoadReport, ProfileSource, ProfileStore};

use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions while assembling the profile store. An empty profile set
/// makes every later resolution meaningless, so both variants abort the run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("deployment config directory not found: {}", .dir.display())]
    SourceDirectoryMissing { dir: PathBuf },
    #[error("no deployment configuration files found in {}", .dir.display())]
    NoConfigFiles { dir: PathBuf },
    #[error("no valid deployment configurations loaded")]
    NoUsableProfiles,
}

/// Non-fatal findings collected while loading profile sources. These are
/// plain values; the presentation layer decides how to show them.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadWarning {
    /// One source failed to parse; it was skipped and loading continued.
    ParseFailure { source: String, message: String },
    /// A profile carried `enabled: false` and was left out of the index.
    DisabledSkipped { name: String },
    /// Two sources declared the same name; the later one won.
    DuplicateName { name: String, source: String },
    /// The redundant `deployment_type` field disagrees with `name`.
    DeploymentTypeMismatch { name: String, declared: String },
    /// Node bounds violate `min <= desired <= max`.
    ClusterBoundsSuspect {
        name: String,
        min_nodes: Option<u32>,
        desired_nodes: Option<u32>,
        max_nodes: Option<u32>,
    },
    /// `spot_percentage` falls outside 0..=100.
    SpotPercentageOutOfRange { name: String, value: u32 },
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadWarning::ParseFailure { source, message } => {
                write!(f, "failed to load {source}: {message}")
            }
            LoadWarning::DisabledSkipped { name } => {
                write!(f, "skipping disabled config: {name}")
            }
            LoadWarning::DuplicateName { name, source } => {
                write!(
                    f,
                    "duplicate deployment type '{name}' in {source}; keeping the later definition"
                )
            }
            LoadWarning::DeploymentTypeMismatch { name, declared } => {
                write!(
                    f,
                    "profile '{name}' declares deployment_type '{declared}'; name is canonical"
                )
            }
            LoadWarning::ClusterBoundsSuspect {
                name,
                min_nodes,
                desired_nodes,
                max_nodes,
            } => {
                write!(
                    f,
                    "profile '{name}' has suspect node bounds (min: {}, desired: {}, max: {})",
                    display_opt(min_nodes),
                    display_opt(desired_nodes),
                    display_opt(max_nodes),
                )
            }
            LoadWarning::SpotPercentageOutOfRange { name, value } => {
                write!(
                    f,
                    "profile '{name}' has spot_percentage {value}, expected 0-100"
                )
            }
        }
    }
}

fn display_opt(value: &Option<u32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "unset".to_string(),
    }
}
