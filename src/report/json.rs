//! JSON rendering of the audit report.

use crate::engine::types::{AuditReport, ReportRecord};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Render the report as pretty-printed JSON with a metadata envelope.
pub fn render(report: &AuditReport, namespace: &str) -> String {
    let output = JsonOutput::new(report, namespace);
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

#[derive(Serialize)]
struct JsonOutput {
    namespace: String,
    generated_at: String,
    node_volumes: Vec<JsonRecord>,
    cluster_pvcs: Vec<JsonRecord>,
}

#[derive(Serialize)]
struct JsonRecord {
    pvc_name: String,
    cluster: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    node: Option<String>,
    volume_name: String,
    volume_handle: String,
    datastore: String,
    capacity: String,
    referred_entity: String,
}

impl JsonOutput {
    fn new(report: &AuditReport, namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            node_volumes: report.node_volumes.iter().map(JsonRecord::from).collect(),
            cluster_pvcs: report.cluster_pvcs.iter().map(JsonRecord::from).collect(),
        }
    }
}

impl From<&ReportRecord> for JsonRecord {
    fn from(r: &ReportRecord) -> Self {
        Self {
            pvc_name: r.pvc_name.clone(),
            cluster: r.cluster.clone(),
            node: r.node.clone(),
            volume_name: r.volume_name.clone(),
            volume_handle: r.volume_handle.clone(),
            datastore: r.datastore.clone(),
            capacity: r.capacity.clone(),
            referred_entity: r.referred_entity.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_key_is_omitted_for_cluster_pvcs() {
        let report = AuditReport {
            node_volumes: vec![],
            cluster_pvcs: vec![ReportRecord {
                pvc_name: "pvc-b".to_string(),
                cluster: "tfd-2".to_string(),
                node: None,
                volume_name: "disk-2".to_string(),
                volume_handle: "vol-200".to_string(),
                datastore: "vsanDatastore".to_string(),
                capacity: "5.00 GB".to_string(),
                referred_entity: "PVC:shop/data".to_string(),
            }],
        };
        let rendered = render(&report, "dev-ns");
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["namespace"], "dev-ns");
        assert!(value["generated_at"].is_string());
        let record = &value["cluster_pvcs"][0];
        assert!(record.get("node").is_none());
        assert_eq!(record["referred_entity"], "PVC:shop/data");
    }
}
