use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Error type for JWT operations.
///
/// Variants name the exact check that failed. They are meant for logs;
/// callers facing clients should collapse them into a single rejection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token issuer is not accepted")]
    InvalidIssuer,

    #[error("Token audience is not accepted")]
    InvalidAudience,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is not valid yet")]
    NotYetValid,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
            ErrorKind::InvalidAudience => JwtError::InvalidAudience,
            ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            ErrorKind::ImmatureSignature => JwtError::NotYetValid,
            ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
            _ => JwtError::Malformed(err.to_string()),
        }
    }
}

/// Invalid signing configuration. Fatal at startup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Signing key is missing or empty")]
    MissingKey,

    #[error("Token issuer is missing or empty")]
    MissingIssuer,

    #[error("Token audience is missing or empty")]
    MissingAudience,

    #[error("Token expiry must be positive and at most 365 days, got {0} seconds")]
    InvalidExpiry(i64),

    #[error("Clock-skew leeway must be a non-negative number of seconds, got {0}")]
    InvalidLeeway(i64),
}
