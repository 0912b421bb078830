//! Pipeline error taxonomy.
//!
//! Per-clip IO failures are logged and the clip is skipped; its old record
//! entry stays behind so the clip is retried on the next run. A swap
//! conflict is the one invariant violation: the original must never be
//! replaced while it still exists on disk.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("io failure on {path}: {message}")]
    Io { path: String, message: String },
    #[error("asset copy failed: {src} -> {dst}")]
    CopyFailed { src: String, dst: String },
    #[error("no clip at {path}")]
    Missing { path: String },
    #[error("clip at {path} failed to parse: {reason}")]
    Parse { path: String, reason: String },
    #[error("{path} still present after delete; original kept")]
    SwapConflict { path: String },
}

impl PipelineError {
    pub fn io(path: &str, err: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    /// True for failures that break the swap invariant rather than plain IO.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, PipelineError::SwapConflict { .. })
    }
}
