use serde::{Deserialize, Serialize};

use super::LoadWarning;

/// A single deployment-type definition, parsed from one YAML document.
///
/// `name` is the canonical key. The optional `deployment_type` field found in
/// some documents duplicates it and is treated purely as a cross-check; a
/// mismatch is reported by [`ProfileRecord::lint`] but never rejected.
/// Records are immutable once the store is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deployment_type: Option<String>,
    /// Disabled profiles are excluded from the active index at load time.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Path to the downstream provisioning stack. Absent means the profile is
    /// defined but not yet deployable.
    #[serde(default)]
    pub stack_file: Option<String>,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub disabled_features: Vec<String>,
    #[serde(default)]
    pub cluster_config: Option<ClusterConfig>,
    #[serde(default)]
    pub subnet_config: Option<SubnetConfig>,
    #[serde(default)]
    pub security: Option<SecurityConfig>,
    #[serde(default)]
    pub hybrid_config: Option<HybridConfig>,
}

const fn default_enabled() -> bool {
    true
}

/// Node-group sizing for the managed cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    #[serde(default)]
    pub node_instance_types: Vec<String>,
    #[serde(default)]
    pub min_nodes: Option<u32>,
    #[serde(default)]
    pub max_nodes: Option<u32>,
    #[serde(default)]
    pub desired_nodes: Option<u32>,
    #[serde(default)]
    pub spot_enabled: bool,
    #[serde(default)]
    pub spot_percentage: Option<u32>,
}

/// Subnet layout handed to the network stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubnetConfig {
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub nat_strategy: Option<NatStrategy>,
    #[serde(default)]
    pub public_newbits: Option<u32>,
    #[serde(default)]
    pub private_newbits: Option<u32>,
}

/// NAT gateway placement. The set is open: strategies this tool does not know
/// about yet are carried through verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NatStrategy {
    Single,
    PerAz,
    None,
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for NatStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NatStrategy::Single => f.write_str("single"),
            NatStrategy::PerAz => f.write_str("per-az"),
            NatStrategy::None => f.write_str("none"),
            NatStrategy::Other(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub encryption: Option<String>,
    #[serde(default)]
    pub compliance: Vec<String>,
}

/// Settings for profiles whose control plane lives outside the provisioned
/// infrastructure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridConfig {
    #[serde(default)]
    pub control_plane_endpoint: Option<String>,
    #[serde(default)]
    pub telemetry_forward: bool,
}

impl ProfileRecord {
    /// Checks the record for suspect values. Violations are surfaced as
    /// warnings at load time, never rejections: existing definitions in the
    /// field rely on lenient loading.
    pub fn lint(&self) -> Vec<LoadWarning> {
        let mut warnings = Vec::new();

        if let Some(declared) = &self.deployment_type {
            if declared != &self.name {
                warnings.push(LoadWarning::DeploymentTypeMismatch {
                    name: self.name.clone(),
                    declared: declared.clone(),
                });
            }
        }

        if let Some(cluster) = &self.cluster_config {
            let min = cluster.min_nodes;
            let max = cluster.max_nodes;
            let desired = cluster.desired_nodes;
            let min_above_desired =
                matches!((min, desired), (Some(lo), Some(want)) if lo > want);
            let desired_above_max =
                matches!((desired, max), (Some(want), Some(hi)) if want > hi);
            let min_above_max = matches!((min, max), (Some(lo), Some(hi)) if lo > hi);
            if min_above_desired || desired_above_max || min_above_max {
                warnings.push(LoadWarning::ClusterBoundsSuspect {
                    name: self.name.clone(),
                    min_nodes: min,
                    desired_nodes: desired,
                    max_nodes: max,
                });
            }
            if let Some(percentage) = cluster.spot_percentage {
                if percentage > 100 {
                    warnings.push(LoadWarning::SpotPercentageOutOfRange {
                        name: self.name.clone(),
                        value: percentage,
                    });
                }
            }
        }

        warnings
    }
}
