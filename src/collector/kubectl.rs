//! Orchestration-layer collector.
//!
//! Shells out to `kubectl` to list the supervisor namespace's PVCs and to
//! resolve each bound PV to its CSI volume handle, which is the join key
//! against the CNS backend. Parsing is lenient where the API allows
//! absence (labels, owner references) and strict only on the listing
//! itself: no claim inventory means nothing to audit.

use crate::common::command_utils::run_tool;
use crate::engine::types::{ClaimRecord, OwnerReference};
use crate::error::{AuditError, Result};
use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct PvcList {
    #[serde(default)]
    items: Vec<PvcItem>,
}

#[derive(Debug, Deserialize)]
struct PvcItem {
    metadata: ObjectMeta,
    #[serde(default)]
    spec: PvcSpec,
}

#[derive(Debug, Deserialize)]
struct ObjectMeta {
    name: String,
    #[serde(default)]
    namespace: String,
    #[serde(default)]
    labels: HashMap<String, String>,
    #[serde(default, rename = "ownerReferences")]
    owner_references: Vec<WireOwnerReference>,
}

#[derive(Debug, Deserialize)]
struct WireOwnerReference {
    #[serde(default)]
    kind: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct PvcSpec {
    #[serde(rename = "volumeName")]
    volume_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PvItem {
    #[serde(default)]
    spec: PvSpec,
}

#[derive(Debug, Default, Deserialize)]
struct PvSpec {
    csi: Option<CsiSource>,
}

#[derive(Debug, Deserialize)]
struct CsiSource {
    #[serde(rename = "volumeHandle")]
    volume_handle: Option<String>,
}

/// Fetch and normalize all claim records for one supervisor namespace.
///
/// `machine_kind` identifies the owner-reference kind whose name doubles
/// as the attached node. A PV lookup failure or a non-CSI volume yields a
/// record without a bound volume name, never an error.
pub fn collect_claims(
    kubectl_bin: &str,
    namespace: &str,
    machine_kind: &str,
) -> Result<Vec<ClaimRecord>> {
    info!("querying PVCs in namespace {namespace}");
    let payload = run_tool(kubectl_bin, &["get", "pvc", "-n", namespace, "-o", "json"])?;
    let mut records = parse_claim_list(&payload)?;
    annotate_attached_nodes(&mut records, machine_kind);

    info!("found {} PVC(s), resolving PV handles", records.len());
    for record in &mut records {
        let Some(pv_name) = record.bound_volume_name.take() else {
            continue;
        };
        record.bound_volume_name = lookup_volume_handle(kubectl_bin, &pv_name);
        if record.bound_volume_name.is_none() {
            debug!(
                "claim {}/{}: PV {} has no CSI volume handle",
                record.namespace, record.name, pv_name
            );
        }
    }

    Ok(records)
}

/// Parse a `kubectl get pvc -o json` listing into claim records.
///
/// The bound volume name is initially the PV *name*; the caller swaps it
/// for the CSI handle. The attached node is the name of the first
/// machine-kind owner reference, when present.
pub fn parse_claim_list(payload: &str) -> Result<Vec<ClaimRecord>> {
    let list: PvcList = serde_json::from_str(payload).map_err(|e| AuditError::PayloadParse {
        tool: "kubectl".to_string(),
        reason: e.to_string(),
    })?;

    Ok(list
        .items
        .into_iter()
        .map(|item| {
            let owner_references: Vec<OwnerReference> = item
                .metadata
                .owner_references
                .into_iter()
                .map(|r| OwnerReference {
                    kind: r.kind,
                    name: r.name,
                })
                .collect();
            ClaimRecord {
                name: item.metadata.name,
                namespace: item.metadata.namespace,
                labels: item.metadata.labels,
                owner_references,
                bound_volume_name: item.spec.volume_name,
                attached_node: None,
            }
        })
        .collect())
}

/// Mark each record's attached node: the name of its first owner
/// reference of the machine kind.
pub fn annotate_attached_nodes(records: &mut [ClaimRecord], machine_kind: &str) {
    for record in records {
        record.attached_node = record
            .owner_references
            .iter()
            .find(|r| r.kind == machine_kind)
            .map(|r| r.name.clone());
    }
}

/// Parse a `kubectl get pv <name> -o json` payload into the CSI volume
/// handle, when the PV is CSI-backed.
pub fn parse_volume_handle(payload: &str) -> Option<String> {
    let item: PvItem = serde_json::from_str(payload).ok()?;
    item.spec.csi.and_then(|csi| csi.volume_handle)
}

fn lookup_volume_handle(kubectl_bin: &str, pv_name: &str) -> Option<String> {
    match run_tool(kubectl_bin, &["get", "pv", pv_name, "-o", "json"]) {
        Ok(payload) => parse_volume_handle(&payload),
        Err(e) => {
            debug!("PV lookup for {pv_name} failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_pvc_listing() {
        let payload = r#"{
            "items": [
                {
                    "metadata": {
                        "name": "pvc-a",
                        "namespace": "dev-ns",
                        "labels": {"cluster.x-k8s.io/cluster-name": "tfd-2"},
                        "ownerReferences": [{"kind": "VSphereMachine", "name": "tfd-2-node1"}]
                    },
                    "spec": {"volumeName": "pv-123"}
                },
                {
                    "metadata": {"name": "pvc-b", "namespace": "dev-ns"},
                    "spec": {}
                }
            ]
        }"#;
        let mut records = parse_claim_list(payload).unwrap();
        annotate_attached_nodes(&mut records, "VSphereMachine");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].bound_volume_name.as_deref(), Some("pv-123"));
        assert_eq!(records[0].attached_node.as_deref(), Some("tfd-2-node1"));
        assert_eq!(records[1].bound_volume_name, None);
        assert_eq!(records[1].attached_node, None);
    }

    #[test]
    fn garbage_listing_is_a_parse_error() {
        assert!(parse_claim_list("not json").is_err());
    }

    #[test]
    fn csi_handle_extraction() {
        let payload = r#"{"spec": {"csi": {"volumeHandle": "vol-100"}}}"#;
        assert_eq!(parse_volume_handle(payload).as_deref(), Some("vol-100"));

        let non_csi = r#"{"spec": {"nfs": {"server": "filer"}}}"#;
        assert_eq!(parse_volume_handle(non_csi), None);
    }
}
