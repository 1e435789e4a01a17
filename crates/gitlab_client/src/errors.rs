//! Error types for GitLab client operations.
//!
//! This module defines the error types that can occur when talking to the GitLab REST API
//! through the gitlab_client crate. HTTP status codes are classified into distinct variants
//! so callers can tell an authentication problem from a missing resource.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitLab client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use gitlab_client::Error;
///
/// match client.delete_pipeline(&pipeline).await {
///     Ok(()) => println!("Pipeline {} deleted", pipeline.id),
///     Err(Error::NotFound) => eprintln!("Pipeline was already gone"),
///     Err(Error::AuthError(msg)) => eprintln!("Token rejected: {}", msg),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// GitLab answered with a non-success status that has no dedicated variant.
    #[error("API request failed with status {status}: {message}")]
    ApiError {
        /// The HTTP status code returned by GitLab
        status: u16,
        /// The message extracted from the response body
        message: String,
    },

    /// Authentication or client initialization failure.
    ///
    /// This error occurs when:
    /// - The token is invalid, expired or revoked (401)
    /// - The token lacks the scope needed for the call (403)
    /// - The token cannot be placed into an HTTP header
    #[error("Failed to authenticate with GitLab: {0}")]
    AuthError(String),

    /// The request conflicts with the current state of the resource.
    ///
    /// GitLab returns 409 when, for example, a pipeline is still running and
    /// cannot be removed yet.
    #[error("Request conflicts with the current state of the resource: {0}")]
    Conflict(String),

    /// Error deserializing the response from GitLab.
    #[error("Failed to deserialize GitLab response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The configured endpoint cannot be used to build API URLs.
    #[error("Invalid GitLab URL: {0}")]
    InvalidUrl(String),

    /// The requested resource was not found.
    ///
    /// Returned for a 404, which GitLab also uses for resources that the token
    /// is not allowed to see.
    #[error("Resource not found")]
    NotFound,

    /// GitLab API rate limit has been exceeded.
    ///
    /// The client reports this but does not wait or retry.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The request never produced an HTTP response (DNS, TLS, connection or timeout failure).
    #[error("Failed to reach GitLab: {0}")]
    Transport(#[from] reqwest::Error),
}
