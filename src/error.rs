use crate::transcode::MalformedArguments;

/// Failure classes surfaced to the operator. Nothing here is fatal: every
/// variant leaves the console in a recoverable state (stale-but-valid list,
/// or a form with the user's edits intact).
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// A sub-document's args text did not parse as a JSON object. Raised
    /// before any request is issued; the submission is aborted whole.
    #[error(transparent)]
    Malformed(#[from] MalformedArguments),

    /// The request failed or returned non-2xx. In-memory state is left
    /// untouched.
    #[error("backend request failed: {0:#}")]
    Network(anyhow::Error),

    /// Rejected client-side before any request (e.g. empty description,
    /// non-numeric order).
    #[error("{0}")]
    Validation(String),
}

impl ConsoleError {
    pub fn network(err: anyhow::Error) -> Self {
        ConsoleError::Network(err)
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ConsoleError::Validation(msg.into())
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ConsoleError::Network(_))
    }
}
