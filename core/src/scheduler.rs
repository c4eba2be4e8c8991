//! # Probe Scheduler
//!
//! Runs liveness probes over a fixed pool of worker tasks.
//!
//! A feeder task pushes targets into a bounded job queue. Every worker
//! takes one job at a time from the shared queue, probes it with the
//! per-probe timeout and publishes one outcome on the result channel.
//! The calling task collects outcomes in arrival order until every target
//! is accounted for or the [`Cancellation`] fires.
//!
//! On cancellation the feeder stops, workers finish the probe they are
//! running and take no new job, and [`ProbeScheduler::run`] returns the
//! outcomes that already arrived. Workers never see the document, only
//! owned [`ProbeTarget`] values.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, trace};

use zonefix_common::{
    error::ZoneError,
    probe::{LivenessProber, ProbeOutcome, ProbeTarget},
};

use crate::cancel::Cancellation;

/// Called with `(completed, total)` after every collected outcome.
pub type ProgressFn = Box<dyn Fn(usize, usize) + Send + Sync>;

type JobQueue = Arc<Mutex<mpsc::Receiver<ProbeTarget>>>;

/// Everything the probing phase produced.
#[derive(Debug, Default)]
pub struct ProbeReport {
    /// Outcomes in the order they arrived, not in target order.
    pub outcomes: Vec<ProbeOutcome>,
    /// Number of targets handed to the scheduler.
    pub total: usize,
    /// Whether the run stopped early.
    pub cancelled: bool,
}

impl ProbeReport {
    pub fn unreachable(&self) -> impl Iterator<Item = &ProbeOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.reachable)
    }
}

pub struct ProbeScheduler {
    prober: Arc<dyn LivenessProber>,
    workers: usize,
    timeout: Duration,
    on_progress: Option<ProgressFn>,
}

impl ProbeScheduler {
    pub fn new(
        prober: Arc<dyn LivenessProber>,
        workers: usize,
        timeout: Duration,
    ) -> Result<Self, ZoneError> {
        if workers == 0 {
            return Err(ZoneError::Config("worker count must be at least 1".into()));
        }

        Ok(Self {
            prober,
            workers,
            timeout,
            on_progress: None,
        })
    }

    pub fn with_progress(mut self, on_progress: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(on_progress));
        self
    }

    /// Probes every target, at most `workers` at a time.
    pub async fn run(&self, targets: Vec<ProbeTarget>, cancel: &Cancellation) -> ProbeReport {
        let total = targets.len();
        let mut report = ProbeReport {
            outcomes: Vec::with_capacity(total),
            total,
            cancelled: false,
        };
        if total == 0 {
            return report;
        }

        let (job_tx, job_rx) = mpsc::channel::<ProbeTarget>(self.workers);
        let (result_tx, mut result_rx) = mpsc::unbounded_channel::<ProbeOutcome>();
        let jobs: JobQueue = Arc::new(Mutex::new(job_rx));

        tokio::spawn(feed_jobs(targets, job_tx, cancel.clone()));

        let pool_size = self.workers.min(total);
        debug!("Starting {pool_size} probe workers for {total} targets");
        for id in 0..pool_size {
            tokio::spawn(run_worker(
                id,
                jobs.clone(),
                result_tx.clone(),
                self.prober.clone(),
                self.timeout,
                cancel.clone(),
            ));
        }
        drop(result_tx);

        while report.outcomes.len() < total {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    report.cancelled = true;
                    break;
                }

                outcome = result_rx.recv() => match outcome {
                    Some(outcome) => self.collect(&mut report, outcome),
                    None => break,
                },
            }
        }

        if report.cancelled {
            // Outcomes already sitting in the channel have arrived; keep them.
            while let Ok(outcome) = result_rx.try_recv() {
                self.collect(&mut report, outcome);
            }
            debug!("Probing cancelled after {}/{total} outcomes", report.outcomes.len());
        }

        report
    }

    fn collect(&self, report: &mut ProbeReport, outcome: ProbeOutcome) {
        report.outcomes.push(outcome);
        if let Some(on_progress) = &self.on_progress {
            on_progress(report.outcomes.len(), report.total);
        }
    }
}

async fn feed_jobs(targets: Vec<ProbeTarget>, jobs: mpsc::Sender<ProbeTarget>, cancel: Cancellation) {
    for target in targets {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => break,

            sent = jobs.send(target) => {
                if sent.is_err() {
                    break;
                }
            }
        }
    }
}

async fn run_worker(
    id: usize,
    jobs: JobQueue,
    results: mpsc::UnboundedSender<ProbeOutcome>,
    prober: Arc<dyn LivenessProber>,
    timeout: Duration,
    cancel: Cancellation,
) {
    loop {
        let job = {
            let mut queue = jobs.lock().await;
            tokio::select! {
                biased;

                _ = cancel.cancelled() => None,
                job = queue.recv() => job,
            }
        };

        let Some(target) = job else {
            break;
        };

        let reachable = tokio::time::timeout(timeout, prober.probe(&target.address, timeout))
            .await
            .unwrap_or(false);
        trace!(worker = id, address = %target.address, reachable, "probe finished");

        if results.send(ProbeOutcome { target, reachable }).is_err() {
            break;
        }
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
