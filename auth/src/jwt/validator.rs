use std::sync::Arc;

use jsonwebtoken::decode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::IdentityClaims;
use super::claims::TokenClaims;
use super::config::SigningConfig;
use super::errors::JwtError;
use crate::clock::Clock;

/// Verifies tokens issued by [`TokenSigner`](super::TokenSigner).
///
/// Stateless: each call re-verifies the token from scratch, so validating
/// the same token repeatedly yields the same claims until it expires.
pub struct TokenValidator {
    config: Arc<SigningConfig>,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenValidator {
    /// Create a validator bound to a signing configuration and clock.
    pub fn new(config: Arc<SigningConfig>, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer()]);
        validation.set_audience(&[config.audience()]);
        validation.set_required_spec_claims(&["sub", "iat", "exp", "iss", "aud"]);
        // Lifetime is checked against the injected clock instead
        validation.validate_exp = false;
        validation.validate_nbf = false;

        Self {
            decoding_key: DecodingKey::from_secret(config.key()),
            config,
            validation,
            clock,
        }
    }

    /// Validate a token and extract its identity claims.
    ///
    /// Checks signature, issuer, audience, required claims and finally that
    /// the current time lies within `[iat, exp]` widened by the configured
    /// leeway.
    ///
    /// # Errors
    /// * `InvalidSignature` - Token was not signed with the configured key
    /// * `InvalidIssuer` / `InvalidAudience` - Foreign token
    /// * `MissingClaim` - A required claim is absent
    /// * `TokenExpired` / `NotYetValid` - Outside the token lifetime
    /// * `Malformed` - Token cannot be parsed
    pub fn validate(&self, token: &str) -> Result<IdentityClaims, JwtError> {
        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?.claims;

        let now = self.clock.now().timestamp();
        let leeway = self.config.leeway().num_seconds();

        if !claims.is_live_at(now, leeway) {
            return Err(if claims.is_expired(now, leeway) {
                JwtError::TokenExpired
            } else {
                JwtError::NotYetValid
            });
        }

        Ok(claims.into())
    }
}
