use std::path::PathBuf;

use thiserror::Error;

/// Every way a resolve → fetch → shape invocation can fail.
///
/// Any of these aborts the invocation; nothing is retried and nothing is
/// partially rendered.
#[derive(Debug, Error)]
pub enum AirlyError {
    #[error("No API key configured.\nHint: run `airly --reset` and then `airly` to set one up.")]
    CredentialMissing,

    #[error("Installation id must not be empty")]
    EmptyInstallationId,

    #[error("Could not find a location named '{0}'")]
    LocationNotFound(String),

    #[error("No installations found near '{0}'")]
    NoInstallationsNearby(String),

    #[error("Installation selection aborted")]
    SelectionAborted,

    #[error("The API key was rejected by the measurement service")]
    Unauthorized,

    #[error("Installation '{0}' does not exist")]
    NotFound(String),

    /// The detail is only for logs; it may quote upstream bodies.
    #[error("Measurement service unavailable")]
    UpstreamUnavailable(String),

    #[error("Unexpected response from {what}")]
    MalformedResponse { what: &'static str, reason: String },

    #[error("Failed to write {}", path.display())]
    StorageWriteFailed { path: PathBuf, reason: String },
}

impl AirlyError {
    pub fn malformed(what: &'static str, reason: impl ToString) -> Self {
        AirlyError::MalformedResponse { what, reason: reason.to_string() }
    }
}
