#![cfg(test)]
use std::time::Duration;

use tokio::net::TcpListener;
use zonefix_common::config::{Config, ProbeMethod};
use zonefix_common::document::Document;
use zonefix_core::{Cancellation, RepairService, network};

const LOOPBACK_ZONE: &str = r#"
nameservers:
  - host: ns1
    ip_address: 127.0.0.1
  - host: broken
    ip_address: not-an-address
dns_records:
  - host: local
    type: A
    record_value: 127.0.0.1
"#;

/// Full run with the real TCP prober against a loopback listener.
#[tokio::test]
async fn tcp_run_against_loopback() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let cfg = Config {
        method: ProbeMethod::Tcp,
        tcp_port: port,
        timeout: Duration::from_millis(500),
        workers: 2,
        ..Config::default()
    };

    let mut doc = Document::from_yaml_str(LOOPBACK_ZONE).unwrap();
    let report = RepairService::from_config(&cfg, network::prober_for(&cfg))
        .unwrap()
        .repair(&mut doc, &Cancellation::new())
        .await
        .unwrap();

    assert_eq!(report.targets, 3);
    assert_eq!(report.disabled, 1);
    assert_eq!(report.ptrs_added, 0);

    let yaml = doc.to_yaml_string();
    assert!(yaml.contains("# DISABLED: nameserver unreachable\n  - host: broken"));
    drop(listener);
}
