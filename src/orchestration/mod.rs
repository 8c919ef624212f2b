//! Sequences one selection request end to end: tenant validation ->
//! resolution -> artifact checks -> export packaging.
//!
//! Failures here are terminal for the single request and never touch the
//! shared [`ProfileStore`].

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::profiles::{ProfileRecord, ProfileStore};
use crate::resolver::{resolve, ResolveError, ResolveWarning};
use crate::tenant::{TenantConfig, TenantConfigError};
use crate::view::{
    export_variables, require_stack_file, stack_file_status, SelectionSummary, StackFileStatus,
    StackFileUnconfigured,
};

/// Any way a single selection request can fail. The underlying errors carry
/// their own user-facing diagnostics.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error(transparent)]
    Tenant(#[from] TenantConfigError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    StackFile(#[from] StackFileUnconfigured),
}

/// Result of a "select a stack" request: the profile is resolved and a
/// deployable artifact is configured.
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    pub tenant: TenantConfig,
    pub profile: ProfileRecord,
    pub selected_name: String,
    pub warnings: Vec<ResolveWarning>,
    pub stack_file: String,
    pub stack_status: StackFileStatus,
    pub exports: Vec<(String, String)>,
    pub summary: SelectionSummary,
}

/// Result of an "inspect a profile" request. Same resolution path as
/// selection, but an unconfigured stack file is not terminal here.
#[derive(Debug, Clone)]
pub struct InspectionOutcome {
    pub tenant: TenantConfig,
    pub profile: ProfileRecord,
    pub selected_name: String,
    pub warnings: Vec<ResolveWarning>,
    pub stack_status: StackFileStatus,
    pub summary: SelectionSummary,
}

/// Validates the raw tenant document, resolves it against the store, and
/// packages exports for downstream automation.
///
/// `stack_root` anchors relative artifact paths; a missing file on disk is
/// reported through `stack_status`, not as an error.
pub fn select_stack(
    store: &ProfileStore,
    raw_tenant: &str,
    config_path: &Path,
    override_type: Option<&str>,
    stack_root: &Path,
) -> Result<SelectionOutcome, SelectError> {
    let tenant = TenantConfig::from_yaml(raw_tenant)?;
    let resolution = resolve(&tenant, store, override_type)?;
    let profile = resolution.profile;
    let stack_file = require_stack_file(profile)?.to_string();
    let stack_status = stack_file_status(profile, stack_root, &|path| path.exists());
    let exports = export_variables(profile, config_path, &resolution.selected_name);
    let summary = SelectionSummary::new(profile, &tenant, config_path, &resolution.selected_name);

    Ok(SelectionOutcome {
        tenant,
        profile: profile.clone(),
        selected_name: resolution.selected_name,
        warnings: resolution.warnings,
        stack_file,
        stack_status,
        exports,
        summary,
    })
}

/// Same flow as [`select_stack`] minus the artifact requirement.
pub fn describe_stack(
    store: &ProfileStore,
    raw_tenant: &str,
    config_path: &Path,
    override_type: Option<&str>,
    stack_root: &Path,
) -> Result<InspectionOutcome, SelectError> {
    let tenant = TenantConfig::from_yaml(raw_tenant)?;
    let resolution = resolve(&tenant, store, override_type)?;
    let profile = resolution.profile;
    let stack_status = stack_file_status(profile, stack_root, &|path| path.exists());
    let summary = SelectionSummary::new(profile, &tenant, config_path, &resolution.selected_name);

    Ok(InspectionOutcome {
        tenant,
        profile: profile.clone(),
        selected_name: resolution.selected_name,
        warnings: resolution.warnings,
        stack_status,
        summary,
    })
}

/// Type of selection events recorded in the workspace log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionEventType {
    StoreLoaded,
    StackSelected,
    StackDescribed,
}

/// One audit entry, stored as JSONL under the workspace root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionEvent {
    pub event_type: SelectionEventType,
    pub timestamp: DateTime<Utc>,
    pub details: serde_json::Value,
}

impl SelectionEvent {
    pub fn new(event_type: SelectionEventType, details: serde_json::Value) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
            details,
        }
    }
}

/// Appends an event to `events.jsonl` under `root`. Callers treat this as
/// best-effort: an unwritable log never fails the selection itself.
pub fn log_event(root: &Path, event: &SelectionEvent) -> Result<()> {
    fs::create_dir_all(root)?;
    let path = root.join("events.jsonl");
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(serde_json::to_string(event)?.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}
