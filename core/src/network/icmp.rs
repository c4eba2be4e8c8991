use std::net::IpAddr;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::trace;

use zonefix_common::probe::LivenessProber;

/// Liveness through a single ICMP echo request.
///
/// Uses the system `ping` binary so no raw-socket privileges are needed.
/// The child is killed when the deadline passes.
pub struct IcmpProber;

#[async_trait]
impl LivenessProber for IcmpProber {
    async fn probe(&self, address: &str, probe_timeout: Duration) -> bool {
        let Ok(addr) = address.trim().parse::<IpAddr>() else {
            trace!("'{address}' is not an IP address");
            return false;
        };

        let mut cmd = ping_command(addr, probe_timeout);
        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                trace!("Failed to run ping for {addr}: {e}");
                return false;
            }
        };

        match timeout(probe_timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output.status.success(),
            Ok(Err(e)) => {
                trace!("ping for {addr} failed: {e}");
                false
            }
            Err(_elapsed) => false,
        }
    }
}

fn ping_command(addr: IpAddr, probe_timeout: Duration) -> Command {
    let mut cmd = Command::new("ping");
    cmd.arg("-c").arg("1");

    // `-W` takes whole seconds on most platforms.
    let wait_secs = probe_timeout.as_secs().max(1);
    cmd.arg("-W").arg(wait_secs.to_string());

    if addr.is_ipv6() {
        cmd.arg("-6");
    }

    cmd.arg(addr.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    cmd
}
