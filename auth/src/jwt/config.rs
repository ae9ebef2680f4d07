use std::fmt;

use chrono::Duration;

use super::errors::ConfigurationError;

/// Process-wide token signing parameters.
///
/// Built once at startup and shared read-only (behind an `Arc`) by the
/// signer and the validator. All fields are checked on construction so an
/// invalid configuration never reaches request handling.
#[derive(Clone)]
pub struct SigningConfig {
    key: Vec<u8>,
    issuer: String,
    audience: String,
    expiry: Duration,
    leeway: Duration,
}

impl SigningConfig {
    /// Default token lifetime when none is configured.
    pub const DEFAULT_EXPIRY_MINUTES: i64 = 60;

    /// Longest token lifetime accepted.
    pub const MAX_EXPIRY_DAYS: i64 = 365;

    /// Create a signing configuration with the default expiry and zero leeway.
    ///
    /// # Arguments
    /// * `key` - Symmetric HMAC secret
    /// * `issuer` - Value written to and expected in the `iss` claim
    /// * `audience` - Value written to and expected in the `aud` claim
    ///
    /// # Errors
    /// * `MissingKey` - Key is empty
    /// * `MissingIssuer` - Issuer is empty or whitespace
    /// * `MissingAudience` - Audience is empty or whitespace
    pub fn new(
        key: impl Into<Vec<u8>>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigurationError::MissingKey);
        }

        let issuer = issuer.into();
        if issuer.trim().is_empty() {
            return Err(ConfigurationError::MissingIssuer);
        }

        let audience = audience.into();
        if audience.trim().is_empty() {
            return Err(ConfigurationError::MissingAudience);
        }

        Ok(Self {
            key,
            issuer,
            audience,
            expiry: Duration::minutes(Self::DEFAULT_EXPIRY_MINUTES),
            leeway: Duration::zero(),
        })
    }

    /// Override the token lifetime.
    ///
    /// # Errors
    /// * `InvalidExpiry` - Duration is zero, negative or longer than
    ///   [`MAX_EXPIRY_DAYS`](Self::MAX_EXPIRY_DAYS)
    pub fn with_expiry(mut self, expiry: Duration) -> Result<Self, ConfigurationError> {
        if expiry <= Duration::zero() || expiry > Duration::days(Self::MAX_EXPIRY_DAYS) {
            return Err(ConfigurationError::InvalidExpiry(expiry.num_seconds()));
        }
        self.expiry = expiry;
        Ok(self)
    }

    /// Override the clock-skew tolerance applied on validation.
    ///
    /// # Errors
    /// * `InvalidLeeway` - Duration is negative
    pub fn with_leeway(mut self, leeway: Duration) -> Result<Self, ConfigurationError> {
        if leeway < Duration::zero() {
            return Err(ConfigurationError::InvalidLeeway(leeway.num_seconds()));
        }
        self.leeway = leeway;
        Ok(self)
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    pub fn leeway(&self) -> Duration {
        self.leeway
    }
}

impl fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConfig")
            .field("key", &"[redacted]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiry", &self.expiry)
            .field("leeway", &self.leeway)
            .finish()
    }
}
