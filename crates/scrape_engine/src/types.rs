use scrape_core::{BackendOutcome, ScrapeResult};
use thiserror::Error;

/// A 2xx reply whose body decoded into results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendReply {
    pub status: u16,
    pub results: Vec<ScrapeResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("invalid backend endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("could not encode request: {0}")]
    Encode(String),
    /// No response was received.
    #[error("{0}")]
    Transport(String),
    #[error("server error {status}: {body}")]
    Server { status: u16, body: String },
    #[error("malformed response (HTTP {status}): {message}")]
    Decode { status: u16, message: String },
}

/// Maps a backend call result onto the core's outcome classification.
pub(crate) fn map_outcome(result: Result<BackendReply, BackendError>) -> BackendOutcome {
    match result {
        Ok(BackendReply { status, results }) => BackendOutcome::Received { status, results },
        Err(BackendError::Server { status, body }) => BackendOutcome::Server { status, body },
        Err(BackendError::Decode { status, message }) => BackendOutcome::Decode {
            status,
            reason: message,
        },
        Err(BackendError::Transport(reason)) => BackendOutcome::Transport { reason },
        Err(err @ (BackendError::InvalidEndpoint(_) | BackendError::Encode(_))) => {
            BackendOutcome::Transport {
                reason: err.to_string(),
            }
        }
    }
}
