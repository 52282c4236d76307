//! Error types shared by the discovery and tasks.json modules.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning for boards or updating tasks.json.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The external tool is not installed or not on `PATH`.
    #[error("{tool} not found")]
    ToolNotFound { tool: String },

    /// The external tool exists but could not be started.
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// Native probe enumeration failed.
    #[error("probe enumeration failed: {0}")]
    ProbeEnumeration(String),

    /// Native serial port enumeration failed.
    #[error("serial port enumeration failed: {0}")]
    PortEnumeration(String),

    /// The requested source was compiled out.
    #[error("{0} support is not compiled in (enable the `hardware` feature)")]
    Unsupported(&'static str),

    #[error("failed to read {}: {source}", path.display())]
    ReadTasks {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    ParseTasks {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed but has no top-level `inputs` array.
    #[error("{} has no \"inputs\" array", path.display())]
    MissingInputs { path: PathBuf },

    #[error("failed to write {}: {source}", path.display())]
    WriteTasks {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SetupError {
    /// Whether the error means the tool itself is missing.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ToolNotFound { .. })
    }
}

/// Result type for setup operations.
pub type SetupResult<T> = Result<T, SetupError>;
