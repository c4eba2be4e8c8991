//! Repair pipeline for zone descriptions: target collection, concurrent
//! liveness probing, annotation of unreachable entries and PTR synthesis.

pub mod annotate;
pub mod cancel;
pub mod collector;
pub mod network;
pub mod ptr;
pub mod repair;
pub mod scheduler;

pub use cancel::Cancellation;
pub use repair::{RepairReport, RepairService};
