use thiserror::Error;

/// Outcome of a failed login or token check.
///
/// Display strings are what clients see, so credential and token failures
/// stay generic regardless of the underlying cause.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("Invalid or expired token.")]
    TokenInvalid,

    #[error("Authentication failed: {0}")]
    Internal(String),
}
