//! Pipeline error types

use thiserror::Error;

/// Errors that can occur while orchestrating a quality pass
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Store error during fetch or remediation
    #[error("Store error: {0}")]
    Store(String),
}
