pub mod repair;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use zonefix_common::config::{self, Config, ProbeMethod};

#[derive(Parser)]
#[command(name = "zonefix")]
#[command(about = "Probes the hosts of a YAML DNS zone, disables dead entries and adds missing PTR records.")]
pub struct CommandLine {
    /// Zone file to repair
    pub file: PathBuf,

    /// Upper bound for a single probe (e.g. 2s, 500ms)
    #[arg(short, long, default_value = "2s", value_parser = config::parse_duration)]
    pub timeout: Duration,

    /// Number of probes running at the same time
    #[arg(short, long, default_value_t = config::DEFAULT_WORKERS)]
    pub workers: usize,

    /// Probe and report, but do not write the repaired zone
    #[arg(long)]
    pub dry_run: bool,

    /// Liveness check: icmp or tcp
    #[arg(short, long, default_value = "icmp")]
    pub method: ProbeMethod,

    /// Port used by the tcp method
    #[arg(long, default_value_t = config::DEFAULT_TCP_PORT)]
    pub port: u16,

    /// Write the repaired zone here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            timeout: self.timeout,
            workers: self.workers,
            dry_run: self.dry_run,
            method: self.method,
            tcp_port: self.port,
            quiet: self.quiet,
        }
    }
}
