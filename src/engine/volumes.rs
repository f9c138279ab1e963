//! Backend volume reader.
//!
//! Normalizes raw backend volume records into the volume set, preserving
//! input order (report ordering follows the backend listing). The volume
//! identifier must be unique; a duplicate breaks the join and is fatal.
//! A metadata blob that fails to decode structurally only degrades that
//! volume to an empty entry list, never the run.

use crate::engine::types::{BackendVolume, BackendVolumeRecord, RawMetadataEntry};
use crate::error::{AuditError, Result};
use log::warn;
use std::collections::HashSet;

/// Normalize raw backend volume records, preserving input order.
pub fn build_volume_set(records: Vec<BackendVolumeRecord>) -> Result<Vec<BackendVolume>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut volumes = Vec::with_capacity(records.len());

    for record in records {
        if !seen.insert(record.volume_id.clone()) {
            return Err(AuditError::DuplicateVolume(record.volume_id));
        }

        let entries = decode_entries(&record.volume_id, record.metadata);
        volumes.push(BackendVolume {
            volume_id: record.volume_id,
            display_name: record.display_name,
            datastore: record.datastore,
            capacity: record.capacity,
            health: record.health,
            entries,
        });
    }

    Ok(volumes)
}

/// Decode a volume's metadata blob into raw entries.
///
/// Absent blobs decode to an empty list; a structurally malformed blob is
/// logged and the volume keeps an empty list, staying reportable.
fn decode_entries(volume_id: &str, blob: serde_json::Value) -> Vec<RawMetadataEntry> {
    if blob.is_null() {
        return Vec::new();
    }
    match serde_json::from_value::<Vec<RawMetadataEntry>>(blob) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("volume {volume_id}: malformed metadata, ignoring entries: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, metadata: serde_json::Value) -> BackendVolumeRecord {
        BackendVolumeRecord {
            volume_id: id.to_string(),
            display_name: format!("pvc-{id}"),
            datastore: "vsanDatastore".to_string(),
            capacity: "10.00 GB".to_string(),
            health: "green".to_string(),
            metadata,
        }
    }

    #[test]
    fn input_order_is_preserved() {
        let volumes = build_volume_set(vec![
            record("vol-3", serde_json::Value::Null),
            record("vol-1", serde_json::Value::Null),
            record("vol-2", serde_json::Value::Null),
        ])
        .unwrap();
        let ids: Vec<_> = volumes.iter().map(|v| v.volume_id.as_str()).collect();
        assert_eq!(ids, ["vol-3", "vol-1", "vol-2"]);
    }

    #[test]
    fn duplicate_volume_id_is_fatal() {
        let err = build_volume_set(vec![
            record("vol-1", serde_json::Value::Null),
            record("vol-1", serde_json::Value::Null),
        ])
        .unwrap_err();
        assert!(matches!(err, AuditError::DuplicateVolume(id) if id == "vol-1"));
    }

    #[test]
    fn malformed_metadata_keeps_the_volume() {
        let volumes = build_volume_set(vec![record("vol-1", json!({"not": "a list"}))]).unwrap();
        assert_eq!(volumes.len(), 1);
        assert!(volumes[0].entries.is_empty());
    }

    #[test]
    fn both_field_naming_generations_decode() {
        let volumes = build_volume_set(vec![record(
            "vol-1",
            json!([
                {"entityType": "POD", "entityName": "web-0", "namespace": "shop"},
                {"EntityType": "PERSISTENT_VOLUME_CLAIM", "EntityName": "data", "Namespace": "shop", "ClusterID": "tfd-1"}
            ]),
        )])
        .unwrap();
        let entries = &volumes[0].entries;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entity_type, "POD");
        assert_eq!(entries[1].entity_name, "data");
        assert_eq!(entries[1].cluster_id.as_deref(), Some("tfd-1"));
    }
}
