#![cfg(test)]
use std::time::Duration;

use zonefix_common::config::Config;
use zonefix_common::document::Document;
use zonefix_common::zone;
use zonefix_core::{Cancellation, RepairReport, RepairService};

use crate::util::{StubProber, ZONE};

async fn run(doc: &mut Document, down: &[&str]) -> RepairReport {
    let service = RepairService::from_config(&Config::default(), StubProber::with_down(down))
        .expect("default config is valid");
    service
        .repair(doc, &Cancellation::new())
        .await
        .expect("repair run failed")
}

/// An unreachable nameserver is disabled and the A records gain their PTRs.
#[tokio::test]
async fn repair_disables_dead_nameserver_and_adds_ptr() {
    let mut doc = Document::from_yaml_str(ZONE).unwrap();
    let report = run(&mut doc, &["192.0.2.53"]).await;

    // ns1, ns2, www, mail, legacy, lab. ns3 has no address.
    assert_eq!(report.targets, 6);
    assert_eq!(report.probed, 6);
    assert_eq!(report.disabled, 1);
    // 10.0.0.7 already has a PTR, 172.16.4.4 has no reverse zone.
    assert_eq!(report.ptrs_added, 1);
    assert!(!report.cancelled);

    let yaml = doc.to_yaml_string();
    assert!(
        yaml.contains("# DISABLED: nameserver unreachable\n  - host: ns1"),
        "unexpected output:\n{yaml}"
    );
    assert_eq!(yaml.matches("DISABLED").count(), 1);

    let records = doc.get(doc.root(), zone::PTR_SECTION).unwrap();
    let last = *doc.items(records).unwrap().last().unwrap();
    assert_eq!(doc.str_value(last, zone::HOST), "mail");
    assert_eq!(doc.str_value(last, zone::TYPE), zone::TYPE_PTR);
    assert_eq!(doc.str_value(last, zone::ZONE), "1.0.10.in-addr.arpa.");
    assert_eq!(doc.str_value(last, zone::RECORD_VALUE), "20");
}

#[tokio::test]
async fn unreachable_records_are_disabled_in_every_section() {
    let mut doc = Document::from_yaml_str(ZONE).unwrap();
    let report = run(&mut doc, &["10.0.0.7", "2001:db8::1"]).await;

    assert_eq!(report.disabled, 2);
    let yaml = doc.to_yaml_string();
    assert_eq!(yaml.matches("# DISABLED: record unreachable").count(), 2);

    // A disabled A record still keeps its PTR.
    assert!(yaml.contains("zone: 0.0.10.in-addr.arpa."));
}

#[tokio::test]
async fn second_run_changes_nothing() {
    let mut doc = Document::from_yaml_str(ZONE).unwrap();
    run(&mut doc, &["192.0.2.53"]).await;
    let first = doc.to_yaml_string();

    let mut reloaded = Document::from_yaml_str(&first).unwrap();
    let report = run(&mut reloaded, &["192.0.2.53"]).await;

    assert_eq!(report.ptrs_added, 0);
    assert_eq!(report.disabled, 1);
    assert_eq!(reloaded.to_yaml_string(), first);
}

#[tokio::test]
async fn output_keeps_unknown_keys_and_order() {
    let mut doc = Document::from_yaml_str(ZONE).unwrap();
    run(&mut doc, &[]).await;
    let yaml = doc.to_yaml_string();

    let origin = yaml.find("origin: example.internal.").unwrap();
    let nameservers = yaml.find("nameservers:").unwrap();
    let records = yaml.find("dns_records:").unwrap();
    let sub_zone = yaml.find("sub_zone_records:").unwrap();
    assert!(origin < nameservers && nameservers < records && records < sub_zone);
    assert!(yaml.contains("record_value: www"));
}

#[tokio::test]
async fn zone_file_round_trips_through_disk() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("zonefix-it-{}.yaml", std::process::id()));
    std::fs::write(&path, ZONE)?;

    let mut doc = Document::load(&path)?;
    std::fs::remove_file(&path)?;

    let report = run(&mut doc, &["192.0.2.54"]).await;
    assert_eq!(report.disabled, 1);
    assert!(report.elapsed < Duration::from_secs(5));
    Ok(())
}

#[test]
fn missing_zone_file_is_a_read_error() {
    let result = Document::load(std::path::Path::new("/nonexistent/zonefix/zone.yaml"));
    assert!(matches!(result, Err(zonefix_common::error::ZoneError::Read { .. })));
}

/// Hand-written notes and markers from an earlier run survive a repair.
#[tokio::test]
async fn operator_comments_survive_a_repair() {
    let source = "\
# operator note
nameservers:
  # keep ns1 until 2027
  - host: ns1
    ip_address: 192.0.2.53
dns_records:
  # DISABLED: record unreachable
  - host: old
    type: A
    record_value: 172.16.9.9
";
    let mut doc = Document::from_yaml_str(source).unwrap();
    let report = run(&mut doc, &["172.16.9.9"]).await;
    assert_eq!(report.disabled, 1);

    let yaml = doc.to_yaml_string();
    assert_eq!(yaml, source);
}
