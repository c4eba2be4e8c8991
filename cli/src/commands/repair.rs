use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::*;
use tracing::{Instrument, Span, debug, error, info, info_span, warn};

use crate::terminal::{colors, print, progress};
use zonefix_common::{config::Config, document::Document, error::ZoneError};
use zonefix_core::{Cancellation, RepairReport, RepairService, network};

pub async fn repair(file: PathBuf, output: Option<PathBuf>, cfg: &Config) -> anyhow::Result<()> {
    let mut doc: Document = Document::load(&file)?;
    debug!("Loaded zone from {}", file.display());

    let cancel: Cancellation = Cancellation::new();
    spawn_interrupt_listener(cancel.clone());

    let span: Span = probe_span(cfg);
    let service = RepairService::from_config(cfg, network::prober_for(cfg))?
        .with_progress(progress::report_probe_progress(span.clone()));

    let report: RepairReport = service.repair(&mut doc, &cancel).instrument(span).await?;

    if !cfg.quiet {
        print_summary(&file, &report);
    }
    emit(&doc, output.as_deref(), cfg)
}

/// Span carrying the probe progress bar. Quiet runs get none.
fn probe_span(cfg: &Config) -> Span {
    if cfg.quiet {
        return Span::none();
    }
    let span = info_span!("probing", indicatif.pb_show = true);
    progress::style_probe_bar(&span);
    span
}

/// Exit status after a forced interrupt (128 + SIGINT).
const FORCED_EXIT_CODE: i32 = 130;

#[derive(Debug, PartialEq, Eq)]
enum Interrupt {
    /// Stop taking new probes and finish the run.
    Cancel,
    /// Leave immediately.
    ForceExit,
}

fn interrupt_action(received: usize) -> Interrupt {
    match received {
        0 | 1 => Interrupt::Cancel,
        _ => Interrupt::ForceExit,
    }
}

fn spawn_interrupt_listener(cancel: Cancellation) {
    tokio::spawn(async move {
        let mut received = 0;
        while tokio::signal::ctrl_c().await.is_ok() {
            received += 1;
            match interrupt_action(received) {
                Interrupt::Cancel => {
                    warn!("Interrupt received, finishing running probes (Ctrl-C again to quit)");
                    cancel.cancel();
                }
                Interrupt::ForceExit => {
                    error!("Interrupted twice, exiting without writing the zone");
                    std::process::exit(FORCED_EXIT_CODE);
                }
            }
        }
    });
}

fn emit(doc: &Document, output: Option<&Path>, cfg: &Config) -> anyhow::Result<()> {
    if cfg.dry_run {
        info!("Dry run, the repaired zone was not written");
        return Ok(());
    }

    let yaml: String = doc.to_yaml_string();
    match output {
        Some(path) => {
            std::fs::write(path, yaml).map_err(|source| ZoneError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Repaired zone written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(yaml.as_bytes())
                .and_then(|_| stdout.flush())
                .context("failed to write the repaired zone to stdout")?;
        }
    }
    Ok(())
}

fn print_summary(file: &Path, report: &RepairReport) {
    const KEY_WIDTH: usize = 12;

    print::header("zone repair");
    print::aligned_line("Zone", KEY_WIDTH, file.display().to_string());
    print::aligned_line("Targets", KEY_WIDTH, report.targets.to_string());
    print::aligned_line("Probed", KEY_WIDTH, report.probed.to_string());

    let disabled: ColoredString = match report.disabled {
        0 => "0".color(colors::TEXT_DEFAULT),
        n => n.to_string().color(colors::WARNING).bold(),
    };
    print::aligned_line("Disabled", KEY_WIDTH, disabled);
    print::aligned_line("PTRs added", KEY_WIDTH, report.ptrs_added.to_string());

    let state: ColoredString = if report.cancelled {
        "interrupted".color(colors::FAILURE).bold()
    } else {
        "complete".color(colors::ACCENT).bold()
    };
    let elapsed: ColoredString = format!("{:.2}s", report.elapsed.as_secs_f64()).bold().yellow();

    print::fat_separator();
    print::centerln(&format!(
        "{} {} in {}",
        "Repair".color(colors::TEXT_DEFAULT),
        state,
        elapsed
    ));
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
