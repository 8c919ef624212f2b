//! Plain-text presentation over resolved data.
//!
//! Nothing in here feeds back into resolution or validation: every function
//! takes core data structures and returns a string for the CLI to print.

use std::fmt::Write;

use crate::orchestration::SelectionOutcome;
use crate::profiles::{ProfileRecord, ProfileStore};
use crate::tenant::TenantConfig;
use crate::view::StackFileStatus;

const RULE: &str = "==================================================";

/// Summary of the tenant configuration driving this request.
pub fn tenant_summary(tenant: &TenantConfig, selected_name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Configuration Summary");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Organization:    {}", tenant.org);
    let _ = writeln!(out, "Environment:     {}", tenant.env);
    match &tenant.sregion {
        Some(sregion) => {
            let _ = writeln!(out, "Region:          {} ({sregion})", tenant.region);
        }
        None => {
            let _ = writeln!(out, "Region:          {}", tenant.region);
        }
    }
    let _ = writeln!(out, "Deployment:      {}", tenant.deployment);
    let _ = writeln!(out, "Account ID:      {}", tenant.account_id);
    let _ = writeln!(out, "Deployment Type: {selected_name}");
    if let Some(cidr) = &tenant.vpc_cidr {
        let _ = writeln!(out, "VPC CIDR:        {cidr}");
    }
    if let Some(domain) = &tenant.domain_name {
        let _ = writeln!(out, "Domain:          {domain}");
    }
    out
}

/// Full description of one deployment profile. Sections absent from the
/// record are left out entirely.
pub fn profile_details(record: &ProfileRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Deployment Type: {}", record.name);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "Description: {}",
        record.description.as_deref().unwrap_or("N/A")
    );

    if !record.components.is_empty() {
        let _ = writeln!(out, "\nComponents:");
        for component in &record.components {
            let _ = writeln!(out, "  + {component}");
        }
    }

    if !record.features.is_empty() {
        let _ = writeln!(out, "\nEnabled Features:");
        write_feature_rows(&mut out, &record.features, "*");
    }

    if !record.disabled_features.is_empty() {
        let _ = writeln!(out, "\nDisabled Features:");
        write_feature_rows(&mut out, &record.disabled_features, "x");
    }

    if let Some(cluster) = &record.cluster_config {
        let _ = writeln!(out, "\nCluster Configuration:");
        let _ = writeln!(
            out,
            "  Node Types: {}",
            if cluster.node_instance_types.is_empty() {
                "N/A".to_string()
            } else {
                cluster.node_instance_types.join(", ")
            }
        );
        let _ = writeln!(
            out,
            "  Node Count: {}-{} (desired: {})",
            opt(cluster.min_nodes),
            opt(cluster.max_nodes),
            opt(cluster.desired_nodes)
        );
        if cluster.spot_enabled {
            let _ = writeln!(
                out,
                "  Spot Usage: {}%",
                cluster.spot_percentage.unwrap_or(0)
            );
        }
    }

    if let Some(subnet) = &record.subnet_config {
        let _ = writeln!(out, "\nNetwork Configuration:");
        let _ = writeln!(out, "  Availability Zones: {}", opt(subnet.count));
        let _ = writeln!(
            out,
            "  NAT Strategy: {}",
            subnet
                .nat_strategy
                .as_ref()
                .map(|strategy| strategy.to_string())
                .unwrap_or_else(|| "N/A".to_string())
        );
    }

    if let Some(security) = &record.security {
        let _ = writeln!(out, "\nSecurity:");
        let _ = writeln!(
            out,
            "  Encryption: {}",
            security.encryption.as_deref().unwrap_or("N/A")
        );
        if !security.compliance.is_empty() {
            let _ = writeln!(out, "  Compliance: {}", security.compliance.join(", "));
        }
    }

    if let Some(hybrid) = &record.hybrid_config {
        let _ = writeln!(out, "\nHybrid Configuration:");
        let _ = writeln!(
            out,
            "  Control Plane: {}",
            hybrid.control_plane_endpoint.as_deref().unwrap_or("N/A")
        );
        let _ = writeln!(out, "  Telemetry Forward: {}", hybrid.telemetry_forward);
    }

    out
}

fn write_feature_rows(out: &mut String, features: &[String], mark: &str) {
    for row in features.chunks(3) {
        let line: Vec<String> = row.iter().map(|f| format!("{mark} {f}")).collect();
        let _ = writeln!(out, "  {}", line.join("  "));
    }
}

fn opt(value: Option<u32>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

/// One-screen listing of every active profile, name-sorted, with a status
/// marker for profiles that have a deployable stack.
pub fn profile_list(store: &ProfileStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Available Deployment Types:");
    let _ = writeln!(out, "{RULE}");
    for record in store.iter() {
        let status = if record.stack_file.is_some() { "*" } else { "-" };
        let description = record.description.as_deref().unwrap_or("No description");
        let _ = writeln!(out, "{status} {:<15} - {description}", record.name);
        if !record.features.is_empty() {
            let mut features = record.features.iter().take(3).cloned().collect::<Vec<_>>();
            let extra = record.features.len().saturating_sub(3);
            if extra > 0 {
                features.push(format!("(+{extra} more)"));
            }
            let _ = writeln!(out, "    Features: {}", features.join(", "));
        }
    }
    out
}

/// The deployment command block plus shell export lines for automation.
pub fn export_commands(outcome: &SelectionOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Deployment Commands");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "\n1. Initialize stack:");
    let _ = writeln!(out, "   terragrunt stack init --stack {}", outcome.stack_file);
    let _ = writeln!(out, "\n2. Plan deployment:");
    let _ = writeln!(out, "   terragrunt stack plan --stack {}", outcome.stack_file);
    let _ = writeln!(out, "\n3. Apply deployment:");
    let _ = writeln!(
        out,
        "   terragrunt stack apply --stack {}",
        outcome.stack_file
    );
    let _ = writeln!(out, "\nFor automation, export:");
    for (key, value) in &outcome.exports {
        let _ = writeln!(out, "   export {key}=\"{value}\"");
    }
    out
}

/// Renders the artifact status as a warning line, when there is one.
pub fn stack_status_warning(status: &StackFileStatus) -> Option<String> {
    match status {
        StackFileStatus::MissingOnDisk(path) => Some(format!(
            "warning: stack file not found on disk (expected at: {})",
            path.display()
        )),
        StackFileStatus::Present(_) | StackFileStatus::Unconfigured => None,
    }
}
