//! Entity correlation and resolution engine.
//!
//! Joins the supervisor namespace's storage claims against the CNS volumes
//! backing them and answers, per volume: which guest cluster owns it and
//! which claim/pod inside that cluster consumes it. The engine is a pure,
//! single-pass transformation over two already-fetched input sets; it does
//! no I/O and keeps no state between runs.
//!
//! # Example
//!
//! ```rust,ignore
//! use vks_disk_audit::engine::{run_audit, ResolverConfig};
//!
//! let config = ResolverConfig::for_namespace("development-ns");
//! let report = run_audit(claim_records, volume_records, &config)?;
//!
//! for record in &report.cluster_pvcs {
//!     println!("{} -> {} ({})", record.pvc_name, record.volume_handle, record.cluster);
//! }
//! ```

pub mod claims;
pub mod correlate;
pub mod decoder;
pub mod resolver;
pub mod types;
pub mod volumes;

pub use types::{
    AuditReport, BackendVolume, BackendVolumeRecord, Claim, ClaimRecord, ConsumerEntity,
    EntityKind, OwnerReference, RawMetadataEntry, ReportRecord, ResolvedCluster, ResolverConfig,
};

use crate::error::Result;
use log::info;

/// Run the full audit pipeline over already-fetched input sets.
///
/// Normalizes both sets, then correlates. The only fatal outcomes are the
/// two integrity violations (duplicate claim identity, duplicate volume
/// identifier); everything else degrades locally.
pub fn run_audit(
    claim_records: Vec<ClaimRecord>,
    volume_records: Vec<BackendVolumeRecord>,
    config: &ResolverConfig,
) -> Result<AuditReport> {
    let claims = claims::build_claim_set(claim_records)?;
    let volumes = volumes::build_volume_set(volume_records)?;
    info!(
        "correlating {} bound claim(s) with {} backend volume(s)",
        claims.len(),
        volumes.len()
    );
    Ok(correlate::correlate(&claims, &volumes, config))
}
