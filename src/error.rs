//! Error types for the audit CLI.
//!
//! Only integrity violations and external-tool failures are fatal; every
//! degraded condition (unresolved cluster, join miss, malformed volume
//! metadata) is absorbed where it occurs and logged instead.

use thiserror::Error;

/// Errors that abort an audit run
#[derive(Debug, Error)]
pub enum AuditError {
    /// Two claim records share the same (namespace, name) identity
    #[error("duplicate claim '{namespace}/{name}' in inventory")]
    DuplicateClaim {
        /// Namespace of the colliding claim
        namespace: String,
        /// Name of the colliding claim
        name: String,
    },

    /// Two backend volume records share the same volume identifier
    #[error("duplicate backend volume id '{0}'")]
    DuplicateVolume(String),

    /// A required external tool is not invocable
    #[error("'{tool}' is not installed or not in PATH{hint}")]
    ToolMissing {
        /// Binary name as configured
        tool: String,
        /// Remediation hint appended to the message
        hint: String,
    },

    /// An external command ran but exited nonzero
    #[error("'{tool}' failed: {reason}")]
    CommandFailed {
        /// Binary name as configured
        tool: String,
        /// Trimmed stderr (or a short description) from the failed run
        reason: String,
    },

    /// Output from an external tool could not be parsed
    #[error("failed to parse {tool} output: {reason}")]
    PayloadParse {
        /// Tool that produced the payload
        tool: String,
        /// Underlying parse error
        reason: String,
    },

    /// An explicitly requested config file could not be parsed
    #[error("failed to parse config file '{path}': {reason}")]
    ConfigParse {
        /// Path as supplied on the command line
        path: String,
        /// Underlying parse error
        reason: String,
    },

    /// Filesystem error (config read, report write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;
