//! Handler for the `audit` command.
//!
//! Preflights the external tools, fetches the two input sets (the govc
//! query is batched over the handles the kubectl pass discovered, so the
//! fetches are sequential), runs the engine, and renders the report.
//! Diagnostic chatter goes to the log facade on stderr; stdout carries
//! exactly the report.

use crate::cli::OutputFormat;
use crate::collector::{govc, kubectl};
use crate::common::command_utils::is_tool_available;
use crate::config::types::Config;
use crate::engine;
use crate::error::{AuditError, Result};
use log::{info, warn};
use std::path::PathBuf;

/// Options for the audit command, already merged from CLI flags
pub struct AuditOptions {
    /// Supervisor namespace to audit
    pub namespace: String,
    /// Output format
    pub format: OutputFormat,
    /// Write the report to this file instead of stdout
    pub output: Option<PathBuf>,
    /// kubectl binary override
    pub kubectl_bin: Option<String>,
    /// govc binary override
    pub govc_bin: Option<String>,
}

/// Handle the `audit` command.
pub fn handle_audit(options: AuditOptions, config: &Config) -> Result<()> {
    let kubectl_bin = options
        .kubectl_bin
        .unwrap_or_else(|| config.tools.kubectl_bin.clone());
    let govc_bin = options
        .govc_bin
        .unwrap_or_else(|| config.tools.govc_bin.clone());

    preflight(&kubectl_bin, &govc_bin)?;

    if std::env::var("GOVC_URL").is_err() {
        warn!("GOVC_URL is not set; ensure govc is configured");
    }

    info!("starting audit for namespace {}", options.namespace);

    let resolver_config = config.resolver_config(&options.namespace);
    let claim_records = kubectl::collect_claims(
        &kubectl_bin,
        &options.namespace,
        &resolver_config.machine_kind,
    )?;

    let handles: Vec<String> = claim_records
        .iter()
        .filter_map(|c| c.bound_volume_name.clone())
        .collect();
    let volume_records = govc::collect_volumes(&govc_bin, &handles);

    let report = engine::run_audit(claim_records, volume_records, &resolver_config)?;
    info!("audit complete: {} correlated volume(s)", report.len());

    let rendered = match options.format {
        OutputFormat::Table => crate::report::table::render(&report),
        OutputFormat::Json => crate::report::json::render(&report, &options.namespace),
    };

    if let Some(path) = options.output {
        std::fs::write(&path, rendered)?;
        println!("Report written to: {}", path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn preflight(kubectl_bin: &str, govc_bin: &str) -> Result<()> {
    if !is_tool_available(kubectl_bin, &["version", "--client"]) {
        return Err(AuditError::ToolMissing {
            tool: kubectl_bin.to_string(),
            hint: " (install kubectl and ensure supervisor access)".to_string(),
        });
    }
    if !is_tool_available(govc_bin, &["version"]) {
        return Err(AuditError::ToolMissing {
            tool: govc_bin.to_string(),
            hint: " (install govc and set GOVC_URL)".to_string(),
        });
    }
    Ok(())
}
