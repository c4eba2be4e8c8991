use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

use zonefix_common::probe::LivenessProber;

/// Liveness through a TCP handshake.
///
/// A host that actively refuses the connection is alive: something
/// answered. Only silence until the deadline or an unroutable address
/// count as unreachable.
pub struct TcpProber {
    port: u16,
}

impl TcpProber {
    pub fn new(port: u16) -> Self {
        Self { port }
    }
}

#[async_trait]
impl LivenessProber for TcpProber {
    async fn probe(&self, address: &str, probe_timeout: Duration) -> bool {
        let Ok(addr) = address.trim().parse::<IpAddr>() else {
            trace!("'{address}' is not an IP address");
            return false;
        };
        handshake_probe(SocketAddr::new(addr, self.port), probe_timeout).await
    }
}

pub async fn handshake_probe(socket_addr: SocketAddr, probe_timeout: Duration) -> bool {
    match timeout(probe_timeout, TcpStream::connect(socket_addr)).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) if e.kind() == ErrorKind::ConnectionRefused => true,
        Ok(Err(e)) => {
            trace!("{socket_addr}: {e}");
            false
        }
        Err(_elapsed) => false,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
