//! Claim inventory reader.
//!
//! Normalizes raw claim records into the claim set the correlator joins
//! against. Claim identity (namespace, name) must be unique; an unbound
//! claim is excluded rather than treated as an error.

use crate::engine::types::{Claim, ClaimRecord};
use crate::error::{AuditError, Result};
use log::debug;
use std::collections::HashSet;

/// Normalize raw claim records into a claim set, preserving input order.
///
/// A duplicate (namespace, name) identity is a fatal integrity error.
/// Records without a bound volume name are skipped: they have no backend
/// volume to audit yet.
pub fn build_claim_set(records: Vec<ClaimRecord>) -> Result<Vec<Claim>> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut claims = Vec::with_capacity(records.len());

    for record in records {
        let key = (record.namespace.clone(), record.name.clone());
        if !seen.insert(key) {
            return Err(AuditError::DuplicateClaim {
                namespace: record.namespace,
                name: record.name,
            });
        }

        let Some(bound) = normalize_field(record.bound_volume_name) else {
            debug!(
                "skipping claim {}/{}: no bound volume",
                record.namespace, record.name
            );
            continue;
        };

        claims.push(Claim {
            name: record.name,
            namespace: record.namespace,
            labels: record.labels,
            owner_references: record.owner_references,
            bound_volume_name: bound,
            attached_node: normalize_field(record.attached_node),
        });
    }

    Ok(claims)
}

/// Empty or whitespace-only optional strings normalize to absent
fn normalize_field(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, bound: Option<&str>) -> ClaimRecord {
        ClaimRecord {
            name: name.to_string(),
            namespace: "dev-ns".to_string(),
            bound_volume_name: bound.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn unbound_claims_are_excluded() {
        let claims = build_claim_set(vec![
            record("bound", Some("vol-1")),
            record("unbound", None),
            record("blank", Some("   ")),
        ])
        .unwrap();

        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].name, "bound");
    }

    #[test]
    fn duplicate_identity_is_fatal() {
        let err = build_claim_set(vec![record("pvc-a", Some("vol-1")), record("pvc-a", None)])
            .unwrap_err();
        assert!(matches!(err, AuditError::DuplicateClaim { .. }));
    }

    #[test]
    fn same_name_in_different_namespaces_is_allowed() {
        let mut other = record("pvc-a", Some("vol-2"));
        other.namespace = "other-ns".to_string();
        let claims = build_claim_set(vec![record("pvc-a", Some("vol-1")), other]).unwrap();
        assert_eq!(claims.len(), 2);
    }

    #[test]
    fn whitespace_attached_node_normalizes_to_absent() {
        let mut rec = record("pvc-a", Some("vol-1"));
        rec.attached_node = Some("  ".to_string());
        let claims = build_claim_set(vec![rec]).unwrap();
        assert_eq!(claims[0].attached_node, None);
    }
}
