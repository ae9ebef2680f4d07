use std::sync::Arc;

use chrono::DateTime;
use chrono::SubsecRound;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::IdentityClaims;
use super::claims::TokenClaims;
use super::config::SigningConfig;
use super::errors::JwtError;
use crate::clock::Clock;

/// Token type advertised to clients alongside the access token.
pub const BEARER_TOKEN_TYPE: &str = "Bearer";

/// A freshly signed token and its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWT string
    pub access_token: String,
    pub token_type: &'static str,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Issues HS256-signed tokens for verified identities.
pub struct TokenSigner {
    config: Arc<SigningConfig>,
    encoding_key: EncodingKey,
    clock: Arc<dyn Clock>,
}

impl TokenSigner {
    /// Create a signer bound to a signing configuration and clock.
    pub fn new(config: Arc<SigningConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.key()),
            config,
            clock,
        }
    }

    /// Sign a new token for `identity`.
    ///
    /// Sets `iat` to the clock's current time and `exp` to `iat` plus the
    /// configured expiry, both in whole seconds as carried by the token.
    /// Every call produces a new artifact.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry out of range, or serialization or signing failed
    pub fn issue(&self, identity: &IdentityClaims) -> Result<IssuedToken, JwtError> {
        let issued_at = self.clock.now().trunc_subsecs(0);
        let expires_at = issued_at
            .checked_add_signed(self.config.expiry())
            .ok_or_else(|| JwtError::EncodingFailed("Token expiry is out of range".to_string()))?;

        let claims = TokenClaims::new(
            identity,
            issued_at,
            expires_at,
            self.config.issuer(),
            self.config.audience(),
        );

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            token_type: BEARER_TOKEN_TYPE,
            issued_at,
            expires_at,
        })
    }
}
