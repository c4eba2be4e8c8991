//! End-to-end runs of the repair pipeline against in-memory zones.

pub mod util;

mod repair;
