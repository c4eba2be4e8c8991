use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use zonefix_common::probe::LivenessProber;

/// Answers from a fixed list of dead addresses, after an optional delay.
pub struct StubProber {
    down: HashSet<String>,
    delay: Duration,
}

impl StubProber {
    pub fn with_down(down: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            down: down.iter().map(|s| s.to_string()).collect(),
            delay: Duration::ZERO,
        })
    }

    pub fn slow(down: &[&str], delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            down: down.iter().map(|s| s.to_string()).collect(),
            delay,
        })
    }
}

#[async_trait]
impl LivenessProber for StubProber {
    async fn probe(&self, address: &str, _timeout: Duration) -> bool {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        !self.down.contains(address)
    }
}

pub const ZONE: &str = r#"
origin: example.internal.
nameservers:
  - host: ns1
    ip_address: 192.0.2.53
  - host: ns2
    ip_address: 192.0.2.54
nameservers_backup:
  - host: ns3
    ip_address: ""
dns_records:
  - host: www
    type: A
    record_value: 10.0.0.7
  - host: mail
    type: A
    record_value: 10.0.1.20
  - host: legacy
    type: A
    record_value: 172.16.4.4
  - host: docs
    type: CNAME
    record_value: www
  - host: "7"
    type: PTR
    zone: 0.0.10.in-addr.arpa.
    record_value: "7"
sub_zone_records:
  - host: lab
    type: AAAA
    record_value: "2001:db8::1"
"#;
