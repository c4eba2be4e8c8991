//! Types shared by every zonefix crate: the document tree, the probe model,
//! the run configuration and the error type.

pub mod config;
pub mod document;
pub mod error;
pub mod probe;
pub mod zone;
