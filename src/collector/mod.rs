//! External-tool collectors.
//!
//! The engine only consumes already-parsed records; these modules own the
//! subprocess round-trips that produce them. `kubectl` supplies the claim
//! inventory, `govc` the backend volume listing.

pub mod govc;
pub mod kubectl;
