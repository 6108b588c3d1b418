//! Forge error types.

use thiserror::Error;

/// Errors raised while querying a forge.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or its body could not be decoded.
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The token is missing, invalid, or lacks permissions.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The forge rate limit was hit.
    #[error("rate limited")]
    RateLimited,

    /// Any other unsuccessful response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// A repository identifier that is not `owner/name`.
    #[error("invalid repository \"{0}\": expected owner/name")]
    InvalidSlug(String),
}

/// Result type for forge operations.
pub type ForgeResult<T> = Result<T, ForgeError>;
