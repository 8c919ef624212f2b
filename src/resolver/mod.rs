//! Maps a tenant configuration to a deployment profile.
//!
//! Resolution is a pure function of its inputs: no I/O, no ambient state,
//! safe to call repeatedly against the same store.

use thiserror::Error;

use crate::profiles::{ProfileRecord, ProfileStore};
use crate::tenant::TenantConfig;

/// Used when neither the caller nor the tenant config names a type.
pub const DEFAULT_DEPLOYMENT_TYPE: &str = "full_stack";

/// A successful selection: the chosen record plus anything the caller should
/// relay to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    pub profile: &'a ProfileRecord,
    pub selected_name: String,
    pub warnings: Vec<ResolveWarning>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolveWarning {
    /// No deployment type was named anywhere; fell back to the well-known
    /// default.
    DefaultedDeploymentType,
}

impl std::fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveWarning::DefaultedDeploymentType => write!(
                f,
                "deployment_type not specified in configuration, defaulting to '{DEFAULT_DEPLOYMENT_TYPE}'"
            ),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    /// The requested type names no enabled profile. Carries the full sorted
    /// name list so the user can correct the config in one pass.
    #[error("unknown deployment type: {requested} (valid types: {})", .valid.join(", "))]
    UnknownDeploymentType {
        requested: String,
        valid: Vec<String>,
    },
}

/// Selects the profile for a tenant configuration.
///
/// Precedence: an explicit caller override beats `config.deployment_type`,
/// which beats the [`DEFAULT_DEPLOYMENT_TYPE`] fallback. The fallback emits
/// exactly one warning; a named-but-unknown type fails.
pub fn resolve<'a>(
    config: &TenantConfig,
    store: &'a ProfileStore,
    override_type: Option<&str>,
) -> Result<Resolution<'a>, ResolveError> {
    let mut warnings = Vec::new();
    let requested = match override_type.or(config.deployment_type.as_deref()) {
        Some(name) => name,
        None => {
            warnings.push(ResolveWarning::DefaultedDeploymentType);
            DEFAULT_DEPLOYMENT_TYPE
        }
    };

    let profile = store
        .lookup(requested)
        .ok_or_else(|| ResolveError::UnknownDeploymentType {
            requested: requested.to_string(),
            valid: store.names().iter().map(|name| name.to_string()).collect(),
        })?;

    Ok(Resolution {
        profile,
        selected_name: requested.to_string(),
        warnings,
    })
}
