//! Consumer-metadata decoder.
//!
//! Turns a volume's raw metadata entries into typed consumer entities.
//! Pod entries living in the audited supervisor namespace are the
//! platform's own reconciliation bookkeeping, not guest-cluster
//! consumption, and are filtered out. Unrecognized kinds are dropped.

use crate::engine::types::{
    ConsumerEntity, EntityKind, RawMetadataEntry, ResolverConfig, ENTITY_KIND_POD,
    ENTITY_KIND_PVC, ENTITY_KIND_VM,
};
use log::debug;

/// Decode raw metadata entries into consumer entities, preserving input
/// order. Total: never fails, at worst emits nothing.
pub fn decode(entries: &[RawMetadataEntry], config: &ResolverConfig) -> Vec<ConsumerEntity> {
    let mut decoded = Vec::with_capacity(entries.len());

    for entry in entries {
        let kind = match entry.entity_type.as_str() {
            ENTITY_KIND_PVC => EntityKind::Claim,
            ENTITY_KIND_POD => EntityKind::WorkloadInstance,
            ENTITY_KIND_VM => EntityKind::Node,
            other => {
                debug!("dropping metadata entry of unrecognized kind '{other}'");
                continue;
            }
        };

        // Supervisor-internal pods are bookkeeping, not consumption
        if kind == EntityKind::WorkloadInstance
            && entry.namespace.as_deref() == Some(config.supervisor_namespace.as_str())
        {
            debug!(
                "dropping supervisor pod entry '{}' in {}",
                entry.entity_name, config.supervisor_namespace
            );
            continue;
        }

        decoded.push(ConsumerEntity {
            kind,
            name: entry.entity_name.clone(),
            namespace: entry.namespace.clone(),
            cluster: entry.cluster_id.clone(),
        });
    }

    decoded
}
