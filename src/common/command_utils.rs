use crate::error::{AuditError, Result};
use std::io::ErrorKind;
use std::process::Command;

/// Execute an external tool and return its stdout on success.
///
/// A spawn failure of kind `NotFound` maps to `ToolMissing`; a nonzero
/// exit maps to `CommandFailed` carrying the trimmed stderr.
pub fn run_tool(bin: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(bin).args(args).output().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            AuditError::ToolMissing {
                tool: bin.to_string(),
                hint: String::new(),
            }
        } else {
            AuditError::Io(e)
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(AuditError::CommandFailed {
            tool: bin.to_string(),
            reason: if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            },
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Check whether a tool responds to a version probe.
pub fn is_tool_available(bin: &str, version_args: &[&str]) -> bool {
    Command::new(bin)
        .args(version_args)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Get a tool's version line if available.
pub fn tool_version(bin: &str, version_args: &[&str]) -> Option<String> {
    Command::new(bin)
        .args(version_args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| {
            String::from_utf8_lossy(&o.stdout)
                .lines()
                .next()
                .unwrap_or("")
                .trim()
                .to_string()
        })
}
