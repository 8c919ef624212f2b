//! Read-only projections over a resolved profile.
//!
//! Everything here is a pure function of the record it is handed: no
//! filesystem access (existence probes are injected) and no mutation.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::profiles::{
    ClusterConfig, HybridConfig, ProfileRecord, SecurityConfig, SubnetConfig,
};
use crate::tenant::TenantConfig;

/// Export variable names consumed by downstream automation. These are wire
/// compatibility: scripts grep for them verbatim.
pub const EXPORT_TENANT_CONFIG_PATH: &str = "TENANT_CONFIG_PATH";
pub const EXPORT_SELECTED_STACK: &str = "SELECTED_STACK";
pub const EXPORT_DEPLOYMENT_TYPE: &str = "DEPLOYMENT_TYPE";
pub const EXPORT_NODE_MIN: &str = "NODE_MIN";
pub const EXPORT_NODE_MAX: &str = "NODE_MAX";

/// Node-count defaults applied when a cluster section omits its bounds.
/// Downstream scripts bake these in; keep them in sync.
const DEFAULT_NODE_MIN: u32 = 1;
const DEFAULT_NODE_MAX: u32 = 10;

/// The resolved profile has no deployable artifact. Terminal for selection,
/// informational for inspection.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("no stack file configured for deployment type '{name}' (not yet implemented)")]
pub struct StackFileUnconfigured {
    pub name: String,
}

/// Where the profile's stack artifact stands, as far as this process can tell.
#[derive(Debug, Clone, PartialEq)]
pub enum StackFileStatus {
    /// The profile names no artifact at all.
    Unconfigured,
    Present(PathBuf),
    /// The artifact is named but the probe could not find it. A warning, not
    /// a failure: the path is still handed downstream.
    MissingOnDisk(PathBuf),
}

pub fn stack_file(record: &ProfileRecord) -> Option<&str> {
    record.stack_file.as_deref()
}

/// The stack file, or a typed failure for operations that need one.
pub fn require_stack_file(record: &ProfileRecord) -> Result<&str, StackFileUnconfigured> {
    record
        .stack_file
        .as_deref()
        .ok_or_else(|| StackFileUnconfigured {
            name: record.name.clone(),
        })
}

/// Resolves the artifact path against `base_dir` and asks the injected probe
/// whether it exists.
pub fn stack_file_status(
    record: &ProfileRecord,
    base_dir: &Path,
    probe: &dyn Fn(&Path) -> bool,
) -> StackFileStatus {
    match &record.stack_file {
        None => StackFileStatus::Unconfigured,
        Some(file) => {
            let path = base_dir.join(file);
            if probe(&path) {
                StackFileStatus::Present(path)
            } else {
                StackFileStatus::MissingOnDisk(path)
            }
        }
    }
}

/// Shell-style environment assignments for downstream automation, in a
/// stable order. `SELECTED_STACK` is the empty string when no artifact is
/// configured; the key itself is always present.
pub fn export_variables(
    record: &ProfileRecord,
    config_path: &Path,
    selected_name: &str,
) -> Vec<(String, String)> {
    let mut exports = vec![
        (
            EXPORT_TENANT_CONFIG_PATH.to_string(),
            config_path.display().to_string(),
        ),
        (
            EXPORT_SELECTED_STACK.to_string(),
            record.stack_file.clone().unwrap_or_default(),
        ),
        (EXPORT_DEPLOYMENT_TYPE.to_string(), selected_name.to_string()),
    ];
    if let Some(cluster) = &record.cluster_config {
        exports.push((
            EXPORT_NODE_MIN.to_string(),
            cluster.min_nodes.unwrap_or(DEFAULT_NODE_MIN).to_string(),
        ));
        exports.push((
            EXPORT_NODE_MAX.to_string(),
            cluster.max_nodes.unwrap_or(DEFAULT_NODE_MAX).to_string(),
        ));
    }
    exports
}

/// Everything the rendering layer needs to describe a profile. Absent
/// sections are omitted, never filled with placeholders that look like data.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_file: Option<&'a str>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub components: &'a [String],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub features: &'a [String],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub disabled_features: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<&'a ClusterConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<&'a SubnetConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<&'a SecurityConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hybrid: Option<&'a HybridConfig>,
}

pub fn summary(record: &ProfileRecord) -> ProfileSummary<'_> {
    ProfileSummary {
        name: &record.name,
        description: record.description.as_deref(),
        stack_file: record.stack_file.as_deref(),
        components: &record.components,
        features: &record.features,
        disabled_features: &record.disabled_features,
        cluster: record.cluster_config.as_ref(),
        subnet: record.subnet_config.as_ref(),
        security: record.security.as_ref(),
        hybrid: record.hybrid_config.as_ref(),
    }
}

/// Machine-readable record of one completed selection; the shape is stable
/// for automation consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSummary {
    pub deployment_type: String,
    pub stack_file: Option<String>,
    pub config_path: String,
    pub account_id: String,
    pub region: String,
    pub environment: String,
}

impl SelectionSummary {
    pub fn new(
        record: &ProfileRecord,
        tenant: &TenantConfig,
        config_path: &Path,
        selected_name: &str,
    ) -> Self {
        Self {
            deployment_type: selected_name.to_string(),
            stack_file: record.stack_file.clone(),
            config_path: config_path.display().to_string(),
            account_id: tenant.account_id.clone(),
            region: tenant.region.clone(),
            environment: tenant.env.clone(),
        }
    }
}
