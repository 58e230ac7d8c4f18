//! Error taxonomy for a report run.

use std::path::PathBuf;

/// Errors raised while resolving options, scanning, or writing the report.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("cannot access directory {path}: {source}")]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Recovered per file; the message doubles as the inline placeholder.
    #[error("Error reading file: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write report {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    pub fn config(msg: impl Into<String>) -> Self {
        ExtractError::Configuration(msg.into())
    }
}

/// Map an error to its process exit code.
pub fn exit_code(error: &ExtractError) -> i32 {
    match error {
        ExtractError::Configuration(_) => 2,
        ExtractError::DirectoryAccess { .. } => 3,
        ExtractError::OutputWrite { .. } => 4,
        ExtractError::FileRead { .. } => 1,
    }
}
