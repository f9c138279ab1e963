pub mod types;

use crate::error::{AuditError, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".vks-audit.toml";

/// Get the global config file path (~/.vks-audit.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Load configuration from file or use defaults.
///
/// An explicitly requested file must exist and parse; discovered files
/// (./.vks-audit.toml, then ~/.vks-audit.toml) fall through to defaults
/// on failure with a warning.
pub fn load_config(explicit: Option<&Path>) -> Result<types::Config> {
    if let Some(path) = explicit {
        let content = fs::read_to_string(path)?;
        return toml::from_str(&content).map_err(|e| AuditError::ConfigParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        });
    }

    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(global) = global_config_path() {
        candidates.push(global);
    }

    for candidate in candidates {
        if !candidate.exists() {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&candidate) {
            match toml::from_str(&content) {
                Ok(config) => return Ok(config),
                Err(e) => warn!(
                    "ignoring unparseable config file {}: {}",
                    candidate.display(),
                    e
                ),
            }
        }
    }

    Ok(types::Config::default())
}
