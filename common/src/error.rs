//! Error types shared by the zonefix crates.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a repair run.
///
/// Anything that only affects a single entry (an empty address, an
/// address outside the reverse-zone table, an unreachable host) is not an
/// error and never shows up here.
#[derive(Debug, Error)]
pub enum ZoneError {
    /// The zone file could not be read.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output could not be written.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid YAML.
    #[error("YAML syntax error: {0}")]
    Syntax(#[from] serde_yaml::Error),

    /// The YAML is valid but does not have the shape of a zone description.
    #[error("malformed zone description: {0}")]
    Malformed(String),

    /// Invalid run configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ZoneError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}
