//! Core data model for the correlation engine.
//!
//! Everything here is immutable after normalization: the collectors produce
//! `ClaimRecord`/`BackendVolumeRecord` values, the readers turn them into
//! `Claim`/`BackendVolume` sets, and the correlator emits `ReportRecord`s.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata entity kind tag for a PVC reference, as emitted by CNS
pub const ENTITY_KIND_PVC: &str = "PERSISTENT_VOLUME_CLAIM";
/// Metadata entity kind tag for a pod reference
pub const ENTITY_KIND_POD: &str = "POD";
/// Metadata entity kind tag for a node VM reference
pub const ENTITY_KIND_VM: &str = "VIRTUAL_MACHINE";

/// One entry of a claim's owner-reference chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerReference {
    /// Kubernetes kind of the owning object
    pub kind: String,
    /// Name of the owning object
    pub name: String,
}

/// Raw claim record as supplied by the orchestration collector
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub owner_references: Vec<OwnerReference>,
    /// CSI volume handle of the bound PV; `None` means not bound (or not CSI)
    #[serde(default)]
    pub bound_volume_name: Option<String>,
    /// Name of the node the volume is attached to, when machine-owned
    #[serde(default)]
    pub attached_node: Option<String>,
}

/// A normalized storage claim in the supervisor namespace
#[derive(Debug, Clone)]
pub struct Claim {
    pub name: String,
    pub namespace: String,
    pub labels: HashMap<String, String>,
    pub owner_references: Vec<OwnerReference>,
    /// Volume handle joining this claim to its backend volume
    pub bound_volume_name: String,
    pub attached_node: Option<String>,
}

/// Outcome of cluster attribution for a claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCluster {
    /// Attributed to a named guest cluster
    Cluster(String),
    /// No owner reference or recognized label resolved a cluster
    Unresolved,
}

impl std::fmt::Display for ResolvedCluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cluster(name) => write!(f, "{}", name),
            Self::Unresolved => write!(f, "Unattached/Unknown"),
        }
    }
}

/// Raw backend volume record as supplied by the infrastructure collector
#[derive(Debug, Clone, Default)]
pub struct BackendVolumeRecord {
    /// Globally unique volume identifier (the CSI volume handle)
    pub volume_id: String,
    pub display_name: String,
    /// Datastore name, already stripped of any `ds://` URL prefix
    pub datastore: String,
    /// Human-readable capacity, source units preserved
    pub capacity: String,
    pub health: String,
    /// Undecoded consumer-metadata blob (the CNS entityMetadata array)
    pub metadata: serde_json::Value,
}

/// One raw consumer-metadata entry decoded from a volume's metadata blob.
///
/// Both field-naming generations of the govc JSON output are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMetadataEntry {
    #[serde(rename = "entityType", alias = "EntityType", default)]
    pub entity_type: String,
    #[serde(rename = "entityName", alias = "EntityName", default)]
    pub entity_name: String,
    #[serde(rename = "namespace", alias = "Namespace", default)]
    pub namespace: Option<String>,
    #[serde(rename = "clusterID", alias = "ClusterID", default)]
    pub cluster_id: Option<String>,
}

/// A normalized backend storage volume
#[derive(Debug, Clone)]
pub struct BackendVolume {
    pub volume_id: String,
    pub display_name: String,
    pub datastore: String,
    pub capacity: String,
    pub health: String,
    /// Decoded metadata entries, input order preserved; empty when the
    /// blob was absent or structurally malformed
    pub entries: Vec<RawMetadataEntry>,
}

/// Kind of a decoded volume consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A persistent volume claim inside a guest cluster
    Claim,
    /// A workload instance (pod) inside a guest cluster
    WorkloadInstance,
    /// A guest-cluster node VM
    Node,
}

/// A decoded reference to a workload-level consumer of a volume
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerEntity {
    pub kind: EntityKind,
    pub name: String,
    pub namespace: Option<String>,
    /// Originating-cluster tag carried through from the raw entry
    pub cluster: Option<String>,
}

/// One output row of the audit report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    pub pvc_name: String,
    pub cluster: String,
    /// Attached node; present only for node-volume records
    pub node: Option<String>,
    pub volume_name: String,
    pub volume_handle: String,
    pub datastore: String,
    pub capacity: String,
    /// Deduplicated `PVC:`/`Pod:` references, or `-` when none survive
    pub referred_entity: String,
}

/// Final audit report: two ordered, non-overlapping categories
#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    /// Volumes whose owning claim is attached to a guest-cluster node
    pub node_volumes: Vec<ReportRecord>,
    /// Volumes consumed as persistent-volume claims inside guest clusters
    pub cluster_pvcs: Vec<ReportRecord>,
}

impl AuditReport {
    /// Total number of correlated volumes across both categories
    pub fn len(&self) -> usize {
        self.node_volumes.len() + self.cluster_pvcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_volumes.is_empty() && self.cluster_pvcs.is_empty()
    }
}

/// Explicit engine configuration; the engine never reads ambient state
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// The audited supervisor namespace
    pub supervisor_namespace: String,
    /// Owner-reference kind identifying a guest-cluster machine object
    pub machine_kind: String,
    /// Recognized cluster-name label keys, checked in priority order
    pub cluster_name_labels: Vec<String>,
}

impl ResolverConfig {
    /// Default machine kind for supervisor-managed guest clusters
    pub const DEFAULT_MACHINE_KIND: &'static str = "VSphereMachine";

    /// Default label keys: CAPI topology label first, then the managed
    /// Tanzu service label
    pub fn default_cluster_name_labels() -> Vec<String> {
        vec![
            "cluster.x-k8s.io/cluster-name".to_string(),
            "run.tanzu.vmware.com/cluster-name".to_string(),
        ]
    }

    /// Build a config with default kind and labels for one namespace
    pub fn for_namespace(namespace: impl Into<String>) -> Self {
        Self {
            supervisor_namespace: namespace.into(),
            machine_kind: Self::DEFAULT_MACHINE_KIND.to_string(),
            cluster_name_labels: Self::default_cluster_name_labels(),
        }
    }
}
