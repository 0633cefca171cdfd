//! Linter adapter error types.

use thiserror::Error;

/// Errors a linter adapter can report.
///
/// The orchestrator never surfaces these: a failed invocation counts as a
/// pass with no issues.
#[derive(Debug, Error)]
pub enum LintError {
    /// The linter could not be started.
    #[error("Failed to run linter: {0}")]
    Spawn(#[source] std::io::Error),

    /// The linter ran but failed.
    #[error("Linter failed: {0}")]
    Failed(String),

    /// The linter's output could not be understood.
    #[error("Unreadable linter output: {0}")]
    Output(String),

    /// I/O error while preparing the invocation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LintError {
    /// Creates a failure error.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Creates an output error.
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output(message.into())
    }
}
