use std::path::PathBuf;

use thiserror::Error;

/// Input-validation failures, all detected before any scan starts.
///
/// Every variant is fatal to the whole run: the binary prints the message and
/// exits without attempting a partial scan. Per-task connect failures are NOT
/// errors in this taxonomy; they are classified into
/// [`crate::types::PortState`] and reported as scan data.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid host or domain name: {0}")]
    InvalidHost(String),

    #[error("invalid port input: {0}")]
    InvalidPortRange(String),

    #[error("input file {path}, line {line}: invalid host entry: {entry}")]
    InvalidInputFile {
        path: PathBuf,
        line: usize,
        entry: String,
    },

    #[error("failed to read input file {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
