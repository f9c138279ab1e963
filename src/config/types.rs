use crate::engine::types::ResolverConfig;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverSection,
    #[serde(default)]
    pub tools: ToolsSection,
}

/// Cluster-resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverSection {
    /// Owner-reference kind identifying a guest-cluster machine object
    #[serde(default = "default_machine_kind")]
    pub machine_kind: String,
    /// Recognized cluster-name label keys, in priority order
    #[serde(default = "default_cluster_name_labels")]
    pub cluster_name_labels: Vec<String>,
}

/// External-tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsSection {
    #[serde(default = "default_kubectl_bin")]
    pub kubectl_bin: String,
    #[serde(default = "default_govc_bin")]
    pub govc_bin: String,
}

impl Default for ResolverSection {
    fn default() -> Self {
        Self {
            machine_kind: default_machine_kind(),
            cluster_name_labels: default_cluster_name_labels(),
        }
    }
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            kubectl_bin: default_kubectl_bin(),
            govc_bin: default_govc_bin(),
        }
    }
}

impl Config {
    /// Build the explicit engine configuration for one audited namespace
    pub fn resolver_config(&self, namespace: &str) -> ResolverConfig {
        ResolverConfig {
            supervisor_namespace: namespace.to_string(),
            machine_kind: self.resolver.machine_kind.clone(),
            cluster_name_labels: self.resolver.cluster_name_labels.clone(),
        }
    }
}

fn default_machine_kind() -> String {
    ResolverConfig::DEFAULT_MACHINE_KIND.to_string()
}

fn default_cluster_name_labels() -> Vec<String> {
    ResolverConfig::default_cluster_name_labels()
}

fn default_kubectl_bin() -> String {
    "kubectl".to_string()
}

fn default_govc_bin() -> String {
    "govc".to_string()
}
