//! Fixed-width table rendering of the audit report.
//!
//! Two banner-delimited sections: node-attached volumes first, then
//! in-cluster PVCs. Columns are fixed-width and never truncated; the row
//! order is the backend listing order, not alphabetical.

use crate::engine::types::{AuditReport, ReportRecord};
use colored::Colorize;
use std::fmt::Write;

const BANNER: &str =
    "=======================================================================================";

/// Render the report as the two-section table.
pub fn render(report: &AuditReport) -> String {
    let mut out = String::new();

    writeln!(out).ok();
    writeln!(out, "{}", BANNER).ok();
    writeln!(out, "{}", "                             NODE VOLUMES (Attached)".bold()).ok();
    writeln!(out, "{}", BANNER).ok();
    if report.node_volumes.is_empty() {
        writeln!(out, "(No volumes currently attached to nodes found)").ok();
    } else {
        render_section(&mut out, &report.node_volumes, true);
    }

    writeln!(out).ok();
    writeln!(out, "{}", BANNER).ok();
    writeln!(out, "{}", "                             IN-CLUSTER PVCs".bold()).ok();
    writeln!(out, "{}", BANNER).ok();
    if report.cluster_pvcs.is_empty() {
        writeln!(out, "(No in-cluster PVCs found)").ok();
    } else {
        render_section(&mut out, &report.cluster_pvcs, false);
    }

    out
}

fn render_section(out: &mut String, records: &[ReportRecord], include_node: bool) {
    if include_node {
        writeln!(
            out,
            "{:<30} {:<30} {:<20} {:<35} {:<40} {:<20} {:<10} {}",
            "PVC Name",
            "Node",
            "Cluster",
            "Volume Name",
            "Volume ID",
            "Datastore",
            "Capacity",
            "Referred Entity"
        )
        .ok();
        writeln!(out, "{}", "-".repeat(210)).ok();
        for r in records {
            writeln!(
                out,
                "{:<30} {:<30} {:<20} {:<35} {:<40} {:<20} {:<10} {}",
                r.pvc_name,
                r.node.as_deref().unwrap_or("-"),
                r.cluster,
                r.volume_name,
                r.volume_handle,
                r.datastore,
                r.capacity,
                r.referred_entity
            )
            .ok();
        }
    } else {
        writeln!(
            out,
            "{:<30} {:<20} {:<35} {:<40} {:<20} {:<10} {}",
            "PVC Name",
            "Cluster",
            "Volume Name",
            "Volume ID",
            "Datastore",
            "Capacity",
            "Referred Entity"
        )
        .ok();
        writeln!(out, "{}", "-".repeat(180)).ok();
        for r in records {
            writeln!(
                out,
                "{:<30} {:<20} {:<35} {:<40} {:<20} {:<10} {}",
                r.pvc_name,
                r.cluster,
                r.volume_name,
                r.volume_handle,
                r.datastore,
                r.capacity,
                r.referred_entity
            )
            .ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pvc: &str, node: Option<&str>) -> ReportRecord {
        ReportRecord {
            pvc_name: pvc.to_string(),
            cluster: "tfd-1".to_string(),
            node: node.map(str::to_string),
            volume_name: "disk-1".to_string(),
            volume_handle: "vol-100".to_string(),
            datastore: "vsanDatastore".to_string(),
            capacity: "10.00 GB".to_string(),
            referred_entity: "-".to_string(),
        }
    }

    #[test]
    fn empty_sections_render_placeholders() {
        let rendered = render(&AuditReport::default());
        assert!(rendered.contains("(No volumes currently attached to nodes found)"));
        assert!(rendered.contains("(No in-cluster PVCs found)"));
    }

    #[test]
    fn node_section_includes_the_node_column() {
        let report = AuditReport {
            node_volumes: vec![record("pvc-a", Some("tfd-1-node1"))],
            cluster_pvcs: vec![record("pvc-b", None)],
        };
        let rendered = render(&report);
        assert!(rendered.contains("tfd-1-node1"));
        assert!(rendered.contains("pvc-a"));
        assert!(rendered.contains("pvc-b"));
    }
}
