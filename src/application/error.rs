use thiserror::Error;

use crate::infra::error::InfraError;

/// Failures that end the process. Errors inside a running session (a failed
/// write, a bad shell command) are logged where they happen instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("failed to render page: {0}")]
    Render(String),
    #[error("terminal io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }
}
