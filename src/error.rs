//! Failure taxonomy for the client.
use thiserror::Error;

/// Everything that can go wrong when talking to the service.
///
/// `Config` is raised at construction time and nothing gets built.
/// Every other variant is recovered locally by the dispatcher: the error
/// is raised on the notification channel and then returned to the caller.
/// No variant is retried; a single failed attempt is final for that call.
#[derive(Debug, Error)]
pub enum ChatError {
    /// A required configuration value was missing or empty at
    /// construction.
    #[error("missing required configuration: {0}")]
    Config(&'static str),

    /// The outbound call failed: connection error, timeout, or a
    /// non-success status from the service.
    #[error("request to the chat API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body arrived but did not match the expected shape.
    #[error("could not decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A successful completion that carried no reply text in its first
    /// choice.
    #[error("completion response contained no reply content")]
    EmptyCompletion,
}
