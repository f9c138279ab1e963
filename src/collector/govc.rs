//! Infrastructure-layer collector.
//!
//! Shells out to `govc volume.ls -json` in one batched query over every
//! volume handle discovered by the orchestration collector. The CLI has
//! shipped two field-naming generations of its JSON output; both are
//! tolerated here via serde aliases and key fallbacks. A failed or
//! unparseable query degrades the audit to an empty volume set instead
//! of aborting it.

use crate::common::command_utils::run_tool;
use crate::engine::types::BackendVolumeRecord;
use log::{info, warn};
use serde::Deserialize;

const DATASTORE_URL_PREFIX: &str = "ds:///vmfs/volumes/";

#[derive(Debug, Deserialize)]
struct VolumeList {
    #[serde(rename = "volume", alias = "Volumes", default)]
    volumes: Vec<WireVolume>,
}

#[derive(Debug, Deserialize)]
struct WireVolume {
    #[serde(rename = "volumeId", alias = "VolumeId")]
    volume_id: Option<WireVolumeId>,
    #[serde(rename = "name", alias = "Name")]
    name: Option<String>,
    #[serde(rename = "datastoreUrl")]
    datastore_url: Option<String>,
    #[serde(rename = "Datastore")]
    datastore: Option<WireDatastore>,
    #[serde(rename = "backingObjectDetails", alias = "BackingObjectDetails")]
    backing: Option<WireBacking>,
    #[serde(rename = "healthStatus", alias = "HealthStatus")]
    health_status: Option<String>,
    #[serde(rename = "metadata", alias = "Metadata")]
    metadata: Option<WireMetadata>,
}

#[derive(Debug, Deserialize)]
struct WireVolumeId {
    #[serde(rename = "id", alias = "Id")]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireDatastore {
    #[serde(rename = "Name", alias = "name")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireBacking {
    #[serde(rename = "capacityInMb", alias = "CapacityInMB")]
    capacity_in_mb: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct WireMetadata {
    #[serde(rename = "entityMetadata", alias = "EntityMetadata", default)]
    entity_metadata: serde_json::Value,
}

/// Query CNS for the given volume handles, one batched call.
///
/// Returns an empty set (with a warning) on command or parse failure; the
/// audit then degrades to an empty report rather than aborting.
pub fn collect_volumes(govc_bin: &str, volume_ids: &[String]) -> Vec<BackendVolumeRecord> {
    if volume_ids.is_empty() {
        return Vec::new();
    }

    info!("querying vSphere CNS for {} volume(s)", volume_ids.len());
    let mut args: Vec<&str> = vec!["volume.ls", "-json"];
    args.extend(volume_ids.iter().map(String::as_str));

    let payload = match run_tool(govc_bin, &args) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("govc volume query failed, continuing with no backend data: {e}");
            return Vec::new();
        }
    };

    match parse_volume_list(&payload) {
        Some(records) => records,
        None => {
            warn!("could not parse govc output, continuing with no backend data");
            Vec::new()
        }
    }
}

/// Parse a `govc volume.ls -json` payload into backend volume records.
///
/// Entries without a volume identifier are skipped (nothing to join on).
/// Display normalization happens here, once: datastore URL stripped to
/// the datastore name, capacity rendered in GB, missing health `Unknown`.
pub fn parse_volume_list(payload: &str) -> Option<Vec<BackendVolumeRecord>> {
    let list: VolumeList = serde_json::from_str(payload).ok()?;

    let records = list
        .volumes
        .into_iter()
        .filter_map(|vol| {
            let volume_id = vol.volume_id.and_then(|v| v.id)?;
            Some(BackendVolumeRecord {
                volume_id,
                display_name: vol.name.unwrap_or_else(|| "-".to_string()),
                datastore: datastore_name(vol.datastore_url, vol.datastore),
                capacity: render_capacity(vol.backing.and_then(|b| b.capacity_in_mb)),
                health: vol.health_status.unwrap_or_else(|| "Unknown".to_string()),
                metadata: vol
                    .metadata
                    .map(|m| m.entity_metadata)
                    .unwrap_or(serde_json::Value::Null),
            })
        })
        .collect();

    Some(records)
}

fn datastore_name(url: Option<String>, datastore: Option<WireDatastore>) -> String {
    if let Some(url) = url {
        return url
            .strip_prefix(DATASTORE_URL_PREFIX)
            .map(str::to_string)
            .unwrap_or(url);
    }
    datastore
        .and_then(|d| d.name)
        .unwrap_or_else(|| "Unknown".to_string())
}

fn render_capacity(capacity_in_mb: Option<u64>) -> String {
    match capacity_in_mb {
        Some(mb) if mb > 0 => format!("{:.2} GB", mb as f64 / 1024.0),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_lowercase_generation() {
        let payload = r#"{
            "volume": [{
                "volumeId": {"id": "vol-100"},
                "name": "pvc-disk-1",
                "datastoreUrl": "ds:///vmfs/volumes/vsanDatastore",
                "backingObjectDetails": {"capacityInMb": 10240},
                "healthStatus": "green",
                "metadata": {"entityMetadata": [{"entityType": "POD", "entityName": "web-0"}]}
            }]
        }"#;
        let records = parse_volume_list(payload).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].volume_id, "vol-100");
        assert_eq!(records[0].datastore, "vsanDatastore");
        assert_eq!(records[0].capacity, "10.00 GB");
        assert!(records[0].metadata.is_array());
    }

    #[test]
    fn parses_the_capitalized_generation() {
        let payload = r#"{
            "Volumes": [{
                "VolumeId": {"Id": "vol-200"},
                "Name": "pvc-disk-2",
                "Datastore": {"Name": "nfs-shared"},
                "BackingObjectDetails": {"CapacityInMB": 512},
                "HealthStatus": "yellow"
            }]
        }"#;
        let records = parse_volume_list(payload).unwrap();
        assert_eq!(records[0].volume_id, "vol-200");
        assert_eq!(records[0].datastore, "nfs-shared");
        assert_eq!(records[0].capacity, "0.50 GB");
        assert!(records[0].metadata.is_null());
    }

    #[test]
    fn missing_fields_get_placeholders() {
        let payload = r#"{"volume": [{"volumeId": {"id": "vol-300"}}]}"#;
        let records = parse_volume_list(payload).unwrap();
        assert_eq!(records[0].display_name, "-");
        assert_eq!(records[0].datastore, "Unknown");
        assert_eq!(records[0].capacity, "-");
        assert_eq!(records[0].health, "Unknown");
    }

    #[test]
    fn entries_without_an_id_are_skipped() {
        let payload = r#"{"volume": [{"name": "orphan"}]}"#;
        assert!(parse_volume_list(payload).unwrap().is_empty());
    }

    #[test]
    fn garbage_payload_is_none() {
        assert!(parse_volume_list("not json").is_none());
    }
}
