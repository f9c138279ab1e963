//! # VKS Disk Audit
//!
//! A Rust-based command-line tool that audits storage consumption for a
//! supervisor namespace in vSphere with Tanzu: it correlates the
//! namespace's persistent volume claims with the vSphere CNS volumes
//! backing them and reports, per volume, the owning guest cluster, the
//! consuming claim or pod, and the datastore placement and capacity.
//!
//! ## Features
//!
//! - **Cluster Attribution**: Resolves each claim to its guest cluster via
//!   machine owner references, falling back to cluster-name labels
//! - **Consumer Decoding**: Decodes CNS entity metadata into typed claim,
//!   pod, and node references, filtering out supervisor bookkeeping
//! - **Two-Way Categorization**: Splits the report into node-attached
//!   volumes and in-cluster PVCs, with no overlap
//! - **Tolerant Collectors**: Accepts both field-naming generations of the
//!   govc JSON output and degrades gracefully on backend failures
//!
//! ## Example
//!
//! ```rust,no_run
//! use vks_disk_audit::engine::{run_audit, ResolverConfig};
//!
//! # fn main() -> vks_disk_audit::Result<()> {
//! let config = ResolverConfig::for_namespace("development-ns");
//! let report = run_audit(Vec::new(), Vec::new(), &config)?;
//! assert!(report.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod collector;
pub mod common;
pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod report;

// Re-export commonly used types and functions
pub use engine::{run_audit, AuditReport, ReportRecord, ResolverConfig};
pub use error::{AuditError, Result};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
