#![cfg(test)]
use std::time::Duration;

use zonefix_common::config::Config;
use zonefix_common::document::Document;
use zonefix_core::{Cancellation, RepairService};

use crate::util::{StubProber, ZONE};

/// Interrupting a slow run keeps the partial outcomes and still emits a full document.
#[tokio::test]
async fn interrupted_run_applies_partial_outcomes() {
    let mut doc = Document::from_yaml_str(ZONE).unwrap();
    let cfg = Config {
        workers: 1,
        timeout: Duration::from_secs(10),
        ..Config::default()
    };
    let cancel = Cancellation::new();

    let trigger = cancel.clone();
    let service = RepairService::from_config(
        &cfg,
        StubProber::slow(&["192.0.2.53", "192.0.2.54"], Duration::from_millis(50)),
    )
    .unwrap()
    .with_progress(move |completed, _total| {
        if completed == 1 {
            trigger.cancel();
        }
    });

    let report = service.repair(&mut doc, &cancel).await.unwrap();

    assert!(report.cancelled);
    assert!(report.probed >= 1);
    assert!(report.probed < report.targets);
    // One worker walks the nameservers first, both of them are down.
    assert!(report.probed <= 2);
    assert_eq!(report.disabled, report.probed);
    assert_eq!(report.ptrs_added, 1);
    assert!(doc.to_yaml_string().contains("zone: 1.0.10.in-addr.arpa."));
}

#[tokio::test]
async fn cancelling_twice_is_harmless() {
    let mut doc = Document::from_yaml_str(ZONE).unwrap();
    let cancel = Cancellation::new();
    cancel.cancel();
    cancel.cancel();

    let service = RepairService::from_config(&Config::default(), StubProber::with_down(&[])).unwrap();
    let report = service.repair(&mut doc, &cancel).await.unwrap();

    assert!(report.cancelled);
    assert_eq!(report.probed, 0);
}
