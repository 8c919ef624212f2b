//! Tenant configuration: the per-request input that selects and
//! parameterizes a deployment profile.
//!
//! The raw YAML is validated at the boundary into a typed, read-only struct.
//! Required fields are checked in a fixed order and every miss is collected
//! before failing, so one pass of the diagnostic is enough to fix the file.

use serde::Serialize;
use serde_yaml::Value;
use thiserror::Error;

/// Required keys, in the order they are reported when missing.
pub const REQUIRED_FIELDS: [&str; 5] = ["org", "env", "region", "deployment", "account_id"];

/// A schema-validated tenant configuration. Constructed once per invocation
/// via [`TenantConfig::from_yaml`]; read-only afterward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenantConfig {
    pub org: String,
    pub env: String,
    pub region: String,
    pub deployment: String,
    pub account_id: String,
    pub sregion: Option<String>,
    pub deployment_type: Option<String>,
    pub vpc_cidr: Option<String>,
    pub domain_name: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum TenantConfigError {
    /// The document was empty, or did not parse to a key/value mapping.
    /// Deliberately distinct from missing fields: there is nothing to
    /// enumerate against.
    #[error("tenant configuration is empty or not a valid YAML mapping")]
    EmptyOrInvalidDocument,
    /// All required fields that were absent, null, or empty, in schema order.
    #[error("missing required fields in configuration: {}", .fields.join(", "))]
    MissingRequiredFields { fields: Vec<String> },
}

impl TenantConfig {
    /// Parses and validates a raw tenant configuration document.
    pub fn from_yaml(raw: &str) -> Result<Self, TenantConfigError> {
        let value: Value =
            serde_yaml::from_str(raw).map_err(|_| TenantConfigError::EmptyOrInvalidDocument)?;
        match &value {
            Value::Mapping(mapping) if !mapping.is_empty() => {}
            _ => return Err(TenantConfigError::EmptyOrInvalidDocument),
        }

        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| scalar_field(&value, field).is_none())
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(TenantConfigError::MissingRequiredFields { fields: missing });
        }

        let required = |field: &str| scalar_field(&value, field).unwrap_or_default();
        Ok(Self {
            org: required("org"),
            env: required("env"),
            region: required("region"),
            deployment: required("deployment"),
            account_id: required("account_id"),
            sregion: scalar_field(&value, "sregion"),
            deployment_type: scalar_field(&value, "deployment_type"),
            vpc_cidr: scalar_field(&value, "vpc_cidr"),
            domain_name: scalar_field(&value, "domain_name"),
        })
    }
}

/// Reads a field as a string, treating absent, null, and empty values as
/// missing. Numeric and boolean scalars are stringified so an unquoted
/// `account_id: 123456789012` still validates.
fn scalar_field(value: &Value, field: &str) -> Option<String> {
    match value.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
