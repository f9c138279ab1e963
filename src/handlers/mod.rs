// Handler modules
pub mod audit;
pub mod check;

// Re-export all handler functions
pub use audit::{AuditOptions, handle_audit};
pub use check::handle_check;
