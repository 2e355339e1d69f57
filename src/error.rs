//! Error types for microagent retrieval
//!
//! Every failure below the modal is typed here. The query collapses all of
//! them into a single `is_error` flag before the UI sees them.

use thiserror::Error;

/// Errors that can occur while fetching microagents
#[derive(Error, Debug)]
pub enum FetchError {
    /// The query ran without a conversation to ask about
    #[error("No conversation ID provided")]
    MissingConversationId,

    /// The configured API base URL could not be parsed
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// The HTTP request could not be sent or the body could not be read
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The response body was not the expected JSON
    #[error("Failed to parse microagents response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The fetch task ended without delivering a result
    #[error("Fetch task ended without a result")]
    Interrupted,
}
