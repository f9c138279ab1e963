//! Correlator: the join and decision point of the engine.
//!
//! Walks backend volumes in input order, finds each volume's owning claim
//! by the shared volume identifier, and emits one report record per
//! correlated volume into exactly one category. A volume without a claim
//! (or a claim without a volume) is an expected provisioning state and is
//! skipped silently.

use crate::engine::decoder;
use crate::engine::resolver;
use crate::engine::types::{
    AuditReport, BackendVolume, Claim, ConsumerEntity, EntityKind, ReportRecord, ResolverConfig,
};
use log::debug;
use std::collections::HashMap;

/// Correlate claims with backend volumes and build the report.
///
/// Pure single-pass transformation; the only state is the claim lookup
/// built and discarded here.
pub fn correlate(
    claims: &[Claim],
    volumes: &[BackendVolume],
    config: &ResolverConfig,
) -> AuditReport {
    // Volume-name lookup; on a duplicate bound-volume-name the first
    // claim in input order keeps the slot.
    let mut by_volume: HashMap<&str, &Claim> = HashMap::with_capacity(claims.len());
    for claim in claims {
        if let Some(existing) = by_volume.get(claim.bound_volume_name.as_str()) {
            debug!(
                "claim {}/{} shadowed by {}/{} on volume {}",
                claim.namespace,
                claim.name,
                existing.namespace,
                existing.name,
                claim.bound_volume_name
            );
            continue;
        }
        by_volume.insert(claim.bound_volume_name.as_str(), claim);
    }

    let mut report = AuditReport::default();

    for volume in volumes {
        let Some(claim) = by_volume.get(volume.volume_id.as_str()) else {
            debug!("volume {} has no owning claim, skipping", volume.volume_id);
            continue;
        };

        let entities = decoder::decode(&volume.entries, config);
        let cluster = resolver::resolve(claim, config);

        let record = ReportRecord {
            pvc_name: claim.name.clone(),
            cluster: cluster.to_string(),
            node: claim.attached_node.clone(),
            volume_name: volume.display_name.clone(),
            volume_handle: volume.volume_id.clone(),
            datastore: volume.datastore.clone(),
            capacity: volume.capacity.clone(),
            referred_entity: referred_entity(&entities),
        };

        if claim.attached_node.is_some() {
            report.node_volumes.push(record);
        } else {
            report.cluster_pvcs.push(record);
        }
    }

    report
}

/// Render the referred-entity string for a volume's decoded consumers.
///
/// Claim references come first (`PVC:<namespace>/<name>`, bare name when
/// the namespace is absent), then workload instances (`Pod:<name>`), each
/// group in first-observed order with exact duplicates removed. Node
/// references carry no referred-entity information. Empty result renders
/// the `-` placeholder.
pub fn referred_entity(entities: &[ConsumerEntity]) -> String {
    let mut refs: Vec<String> = Vec::new();

    for entity in entities {
        if entity.kind != EntityKind::Claim {
            continue;
        }
        let rendered = match &entity.namespace {
            Some(ns) if !ns.is_empty() => format!("PVC:{}/{}", ns, entity.name),
            _ => format!("PVC:{}", entity.name),
        };
        if !refs.contains(&rendered) {
            refs.push(rendered);
        }
    }

    for entity in entities {
        if entity.kind != EntityKind::WorkloadInstance {
            continue;
        }
        let rendered = format!("Pod:{}", entity.name);
        if !refs.contains(&rendered) {
            refs.push(rendered);
        }
    }

    if refs.is_empty() {
        "-".to_string()
    } else {
        refs.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(kind: EntityKind, name: &str, namespace: Option<&str>) -> ConsumerEntity {
        ConsumerEntity {
            kind,
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
            cluster: None,
        }
    }

    #[test]
    fn claim_references_come_before_pods() {
        let s = referred_entity(&[
            entity(EntityKind::WorkloadInstance, "cart-service-xyz", Some("music-store")),
            entity(EntityKind::Claim, "cart-pvc", Some("music-store")),
        ]);
        assert_eq!(s, "PVC:music-store/cart-pvc, Pod:cart-service-xyz");
    }

    #[test]
    fn exact_duplicates_are_removed() {
        let s = referred_entity(&[
            entity(EntityKind::Claim, "data", Some("shop")),
            entity(EntityKind::Claim, "data", Some("shop")),
        ]);
        assert_eq!(s, "PVC:shop/data");
    }

    #[test]
    fn node_entities_are_not_rendered() {
        let s = referred_entity(&[entity(EntityKind::Node, "tfd-1-node1", None)]);
        assert_eq!(s, "-");
    }

    #[test]
    fn bare_claim_reference_without_namespace() {
        let s = referred_entity(&[entity(EntityKind::Claim, "data", None)]);
        assert_eq!(s, "PVC:data");
    }

    #[test]
    fn empty_list_renders_placeholder() {
        assert_eq!(referred_entity(&[]), "-");
    }
}
