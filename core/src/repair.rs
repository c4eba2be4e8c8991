//! # Zone Repair Service
//!
//! Implements the full repair run over one document:
//!
//! 1. **Collect**: read probe targets out of the tree.
//! 2. **Probe**: check every target concurrently through the [`ProbeScheduler`].
//! 3. **Annotate**: disable unreachable entries, single-threaded.
//! 4. **Synthesize**: append missing PTR records.
//!
//! The tree is only borrowed immutably until step 3 starts, so nothing can
//! write to it while probes are in flight.
//!
//! A cancelled run is still completed: the outcomes that arrived are
//! applied and PTR synthesis runs as usual. [`RepairReport::cancelled`]
//! tells the caller that some targets were never probed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use zonefix_common::{
    config::Config,
    document::Document,
    error::ZoneError,
    probe::LivenessProber,
};

use crate::{
    annotate,
    cancel::Cancellation,
    collector,
    ptr,
    scheduler::ProbeScheduler,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Targets found in the document.
    pub targets: usize,
    /// Targets that produced an outcome.
    pub probed: usize,
    /// Entries annotated as disabled.
    pub disabled: usize,
    /// PTR records appended.
    pub ptrs_added: usize,
    pub cancelled: bool,
    pub elapsed: Duration,
}

pub struct RepairService {
    scheduler: ProbeScheduler,
}

impl RepairService {
    pub fn new(scheduler: ProbeScheduler) -> Self {
        Self { scheduler }
    }

    /// Validates `cfg` and builds a service around `prober`.
    pub fn from_config(cfg: &Config, prober: Arc<dyn LivenessProber>) -> Result<Self, ZoneError> {
        cfg.validate()?;
        let scheduler = ProbeScheduler::new(prober, cfg.workers, cfg.timeout)?;
        Ok(Self::new(scheduler))
    }

    pub fn with_progress(self, on_progress: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        Self::new(self.scheduler.with_progress(on_progress))
    }

    pub async fn repair(&self, doc: &mut Document, cancel: &Cancellation) -> Result<RepairReport, ZoneError> {
        let start = Instant::now();

        let targets = collector::collect_targets(doc)?;
        let total = targets.len();
        info!("Probing {total} hosts");

        let probes = self.scheduler.run(targets, cancel).await;
        if probes.cancelled {
            warn!(
                "Interrupted: {}/{} hosts were probed, the rest stay untouched",
                probes.outcomes.len(),
                total
            );
        }

        let disabled = annotate::apply_outcomes(doc, &probes.outcomes);
        let ptrs_added = ptr::synthesize_ptrs(doc)?;

        Ok(RepairReport {
            targets: total,
            probed: probes.outcomes.len(),
            disabled,
            ptrs_added,
            cancelled: probes.cancelled,
            elapsed: start.elapsed(),
        })
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
