//! Error types for Stackloop
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::Stage;

/// Result type alias for Stackloop operations
pub type StackloopResult<T> = Result<T, StackloopError>;

/// A build, synth or deploy operation that did not succeed.
///
/// Carried inside completion events, so it only holds owned, cloneable data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{stage} failed: {message}")]
pub struct StageFailure {
    pub stage: Stage,
    pub message: String,
}

impl StageFailure {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

/// Main error type for Stackloop operations
#[derive(Error, Debug)]
pub enum StackloopError {
    /// A stage operation failed
    #[error(transparent)]
    Stage(#[from] StageFailure),

    /// Synth output has no manifest
    #[error("cloud assembly manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Manifest exists but cannot be interpreted
    #[error("invalid cloud assembly manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    /// Manifest references a stack template that is not on disk
    #[error("stack template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    /// The machine halted after a failed deploy
    #[error("deploy failed, stopping until restarted: {message}")]
    DeployFailed { message: String },

    /// Invalid configuration file
    #[error("invalid config {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// File watcher could not be set up
    #[error("file watcher error: {0}")]
    Watch(String),

    /// The event queue was closed before the machine stopped
    #[error("event queue closed")]
    QueueClosed,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StackloopError {
    /// True for errors raised while fingerprinting synth output
    pub fn is_fingerprint_failure(&self) -> bool {
        matches!(
            self,
            Self::ManifestNotFound { .. } | Self::InvalidManifest { .. } | Self::TemplateNotFound { .. }
        )
    }
}
