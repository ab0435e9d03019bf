//! Error types for Infrakit API operations.

use thiserror::Error;

/// Errors that can occur during Infrakit API operations.
#[derive(Debug, Error)]
pub enum InfrakitError {
    /// Configuration is missing or incomplete.
    #[error("Infrakit configuration required: {0}")]
    Configuration(String),

    /// Unrecognized deployment mode selector.
    #[error("invalid mode '{0}': expected 'production', 'beta' or 'test'")]
    InvalidMode(String),

    /// Token exchange failed (non-200 from either auth step).
    #[error("failed to authenticate, status code {status}, text {body}")]
    Authentication { status: u16, body: String },

    /// API request failed (non-2xx status or explicit `status: false`).
    ///
    /// The message always carries the request method, URL, payload (when
    /// one was sent) and the raw response body.
    #[error("Infrakit API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    /// Response body was expected to be JSON but could not be parsed.
    #[error("response is not in JSON format: {source}")]
    MalformedResponse {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record's follow-up call was issued through a client holding
    /// different credentials than the ones that fetched the record.
    #[error("record was fetched with different credentials than this client holds")]
    CredentialMismatch,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON serialization error (request payload assembly).
    #[error("failed to serialize payload: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// I/O error while reading a streaming response body.
    #[error("stream read error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Infrakit operations.
pub type Result<T> = core::result::Result<T, InfrakitError>;
