//! Error types for configuration and client operations.

use thiserror::Error;

/// Errors raised while constructing a [`crate::config::Config`].
///
/// All of these are fatal: the run aborts before any validation happens and
/// no partially-built configuration is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `ACCESS_TOKEN` is absent or empty.
    #[error("access token is missing")]
    MissingToken,

    /// `MAXIMUM_CHANGES` is not a non-negative integer.
    #[error("maximum file changes must be a non-negative integer")]
    NegativeFileChange,

    /// `TITLE_PATTERN` does not compile as a regular expression.
    #[error("title pattern is not a valid regular expression")]
    InvalidTitlePattern,

    /// `COMMIT_PATTERN` does not compile as a regular expression.
    #[error("commit pattern is not a valid regular expression")]
    InvalidCommitPattern,

    /// `BRANCH_PATTERN` does not compile as a regular expression.
    #[error("branch pattern is not a valid regular expression")]
    InvalidBranchPattern,

    /// `API_URL` does not parse as an absolute base URL.
    #[error("base API URL is not a valid absolute URL")]
    InvalidBaseUrl,
}

/// Errors returned by a [`crate::client::GithubClient`] implementation.
///
/// The validation engine treats every variant as "insufficient evidence":
/// a failing lookup is absorbed into a passing rule result, never surfaced
/// as a validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("HTTP transport error: {0}")]
    Http(String),

    /// The API answered with a non-success status.
    #[error("API request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("failed to decode API response: {0}")]
    Decode(String),
}
