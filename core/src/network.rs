//! Concrete liveness probers.

use std::sync::Arc;

use zonefix_common::{
    config::{Config, ProbeMethod},
    probe::LivenessProber,
};

pub mod icmp;
pub mod tcp;

pub use icmp::IcmpProber;
pub use tcp::TcpProber;

/// The prober selected by the configuration.
pub fn prober_for(cfg: &Config) -> Arc<dyn LivenessProber> {
    match cfg.method {
        ProbeMethod::Icmp => Arc::new(IcmpProber),
        ProbeMethod::Tcp => Arc::new(TcpProber::new(cfg.tcp_port)),
    }
}
