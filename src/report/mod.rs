//! Report rendering: fixed-width tables and JSON.
//!
//! Rendering is presentation only; rows arrive categorized and ordered
//! from the engine and are emitted as-is.

pub mod json;
pub mod table;
