//! Handler for the `check` command: environment preflight.

use crate::common::command_utils::tool_version;
use crate::config::types::Config;
use crate::error::{AuditError, Result};
use colored::Colorize;

/// Probe both external tools and the vSphere session environment,
/// printing per-item status. Returns an error when a required tool is
/// missing so the process exits nonzero.
pub fn handle_check(config: &Config) -> Result<()> {
    println!("Checking audit prerequisites...\n");

    let mut missing: Option<String> = None;

    for (bin, version_args) in [
        (config.tools.kubectl_bin.as_str(), ["version", "--client"].as_slice()),
        (config.tools.govc_bin.as_str(), ["version"].as_slice()),
    ] {
        match tool_version(bin, version_args) {
            Some(version) => println!("  {} {}: {}", "✅".green(), bin, version),
            None => {
                println!("  {} {}: not found in PATH", "❌".red(), bin);
                missing.get_or_insert_with(|| bin.to_string());
            }
        }
    }

    if std::env::var("GOVC_URL").is_ok() {
        println!("  {} GOVC_URL is set", "✅".green());
    } else {
        println!(
            "  {} GOVC_URL is not set - govc queries will fail without a session",
            "⚠️".yellow()
        );
    }

    match missing {
        Some(tool) => {
            println!("\n{}", "Some required tools are missing.".red());
            Err(AuditError::ToolMissing {
                tool,
                hint: String::new(),
            })
        }
        None => {
            println!("\n{}", "All required tools are available.".green());
            Ok(())
        }
    }
}
