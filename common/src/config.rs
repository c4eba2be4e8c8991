use std::str::FromStr;
use std::time::Duration;

use crate::error::ZoneError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_WORKERS: usize = 8;
pub const DEFAULT_TCP_PORT: u16 = 53;

/// How a single host is checked for liveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeMethod {
    /// One ICMP echo request through the system `ping` binary.
    #[default]
    Icmp,
    /// A TCP handshake against [`Config::tcp_port`].
    Tcp,
}

impl FromStr for ProbeMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "icmp" | "ping" => Ok(Self::Icmp),
            "tcp" => Ok(Self::Tcp),
            _ => Err(format!("unknown probe method '{s}' (expected 'icmp' or 'tcp')")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound for a single probe. A probe that runs longer counts as unreachable.
    pub timeout: Duration,

    /// Number of probes running at the same time. Must be at least 1.
    pub workers: usize,

    /// Run everything but do not emit the repaired document.
    pub dry_run: bool,

    pub method: ProbeMethod,

    /// Port used by [`ProbeMethod::Tcp`].
    pub tcp_port: u16,

    /// Suppresses the progress bar and the run summary.
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            workers: DEFAULT_WORKERS,
            dry_run: false,
            method: ProbeMethod::default(),
            tcp_port: DEFAULT_TCP_PORT,
            quiet: false,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ZoneError> {
        if self.workers == 0 {
            return Err(ZoneError::Config("worker count must be at least 1".into()));
        }
        if self.timeout.is_zero() {
            return Err(ZoneError::Config("probe timeout must be greater than zero".into()));
        }
        Ok(())
    }
}

/// Parses durations like `2s`, `500ms`, `1.5s` or `1m`. A bare number is read as seconds.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let split_at = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split_at);

    let value: f64 = number
        .parse()
        .map_err(|_| format!("invalid duration '{s}'"))?;

    let secs = match unit.trim() {
        "" | "s" | "sec" | "secs" => value,
        "ms" => value / 1_000.0,
        "m" | "min" => value * 60.0,
        other => return Err(format!("unknown duration unit '{other}' in '{s}'")),
    };

    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid duration '{s}': {e}"))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
