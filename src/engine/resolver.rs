//! Guest-cluster attribution for storage claims.
//!
//! Resolution is an ordered chain, first match wins:
//!
//! 1. A machine-kind owner reference. The machine name carries the cluster
//!    name as its prefix (`tfd-1-node1` belongs to cluster `tfd-1`).
//! 2. A recognized cluster-name label, keys checked in configured priority
//!    order, value used verbatim.
//! 3. The unresolved sentinel.
//!
//! Owner references are authoritative (machine attachment is unambiguous);
//! labels cover claims consumed by pods rather than nodes. Resolution never
//! fails: an unresolved cluster is a normal, reportable outcome.

use crate::engine::types::{Claim, ResolvedCluster, ResolverConfig};

/// Resolve the guest cluster owning a claim.
///
/// Deterministic: identical ownership chain and labels always yield the
/// same outcome.
pub fn resolve(claim: &Claim, config: &ResolverConfig) -> ResolvedCluster {
    for owner in &claim.owner_references {
        if owner.kind == config.machine_kind {
            return ResolvedCluster::Cluster(cluster_from_machine_name(&owner.name));
        }
    }

    for key in &config.cluster_name_labels {
        if let Some(value) = claim.labels.get(key) {
            return ResolvedCluster::Cluster(value.clone());
        }
    }

    ResolvedCluster::Unresolved
}

/// Derive the cluster name from a machine object name by stripping the
/// per-machine suffix (the final `-` separated segment). A name with no
/// separator is used whole.
pub fn cluster_from_machine_name(machine_name: &str) -> String {
    match machine_name.rsplit_once('-') {
        Some((prefix, _)) if !prefix.is_empty() => prefix.to_string(),
        _ => machine_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::OwnerReference;
    use std::collections::HashMap;

    fn config() -> ResolverConfig {
        ResolverConfig::for_namespace("dev-ns")
    }

    fn claim(owners: Vec<OwnerReference>, labels: HashMap<String, String>) -> Claim {
        Claim {
            name: "pvc-a".to_string(),
            namespace: "dev-ns".to_string(),
            labels,
            owner_references: owners,
            bound_volume_name: "vol-1".to_string(),
            attached_node: None,
        }
    }

    #[test]
    fn machine_owner_reference_wins() {
        let c = claim(
            vec![
                OwnerReference {
                    kind: "Pod".to_string(),
                    name: "some-pod".to_string(),
                },
                OwnerReference {
                    kind: "VSphereMachine".to_string(),
                    name: "tfd-1-node1".to_string(),
                },
            ],
            HashMap::from([(
                "cluster.x-k8s.io/cluster-name".to_string(),
                "other".to_string(),
            )]),
        );
        assert_eq!(
            resolve(&c, &config()),
            ResolvedCluster::Cluster("tfd-1".to_string())
        );
    }

    #[test]
    fn topology_label_takes_priority_over_managed_service_label() {
        let c = claim(
            vec![],
            HashMap::from([
                (
                    "cluster.x-k8s.io/cluster-name".to_string(),
                    "tfd-2".to_string(),
                ),
                (
                    "run.tanzu.vmware.com/cluster-name".to_string(),
                    "tfd-3".to_string(),
                ),
            ]),
        );
        assert_eq!(
            resolve(&c, &config()),
            ResolvedCluster::Cluster("tfd-2".to_string())
        );
    }

    #[test]
    fn managed_service_label_is_the_fallback() {
        let c = claim(
            vec![],
            HashMap::from([(
                "run.tanzu.vmware.com/cluster-name".to_string(),
                "tfd-3".to_string(),
            )]),
        );
        assert_eq!(
            resolve(&c, &config()),
            ResolvedCluster::Cluster("tfd-3".to_string())
        );
    }

    #[test]
    fn no_owner_and_no_label_is_unresolved() {
        let c = claim(
            vec![OwnerReference {
                kind: "Pod".to_string(),
                name: "web-0".to_string(),
            }],
            HashMap::new(),
        );
        assert_eq!(resolve(&c, &config()), ResolvedCluster::Unresolved);
        assert_eq!(
            ResolvedCluster::Unresolved.to_string(),
            "Unattached/Unknown"
        );
    }

    #[test]
    fn machine_name_suffix_stripping() {
        assert_eq!(cluster_from_machine_name("tfd-1-node1"), "tfd-1");
        assert_eq!(cluster_from_machine_name("prod-cluster-worker-7"), "prod-cluster-worker");
        assert_eq!(cluster_from_machine_name("single"), "single");
        assert_eq!(cluster_from_machine_name("-node1"), "-node1");
    }
}
