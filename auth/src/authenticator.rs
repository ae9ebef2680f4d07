use std::sync::Arc;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::IdentityClaims;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::SigningConfig;
use crate::jwt::TokenSigner;
use crate::jwt::TokenValidator;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Verified against when the account does not exist so that unknown users
/// cost the same Argon2 work as known ones.
const TIMING_DECOY_PASSWORD: &str = "timing-decoy-password";

/// Authentication coordinator combining password verification and JWT handling.
///
/// Signer and validator share one immutable [`SigningConfig`].
pub struct Authenticator {
    password_hasher: PasswordHasher,
    signer: TokenSigner,
    validator: TokenValidator,
    decoy_hash: Option<String>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator using the system clock.
    pub fn new(config: SigningConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an authenticator with an explicit time source.
    pub fn with_clock(config: SigningConfig, clock: Arc<dyn Clock>) -> Self {
        let config = Arc::new(config);
        let password_hasher = PasswordHasher::new();
        let decoy_hash = password_hasher.hash(TIMING_DECOY_PASSWORD).ok();

        Self {
            signer: TokenSigner::new(Arc::clone(&config), Arc::clone(&clock)),
            validator: TokenValidator::new(config, clock),
            password_hasher,
            decoy_hash,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password and issue a token for `identity`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored PHC hash
    /// * `identity` - Claims to embed on success
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity: &IdentityClaims,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.signer.issue(identity)?)
    }

    /// Reject a login for an account that does not exist or may not sign in.
    ///
    /// Spends the same hashing work as a real verification before returning
    /// `InvalidCredentials`.
    pub fn reject(&self, password: &str) -> AuthenticationError {
        if let Some(decoy_hash) = &self.decoy_hash {
            let _ = self.password_hasher.verify(password, decoy_hash);
        }
        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(&self, identity: &IdentityClaims) -> Result<IssuedToken, JwtError> {
        self.signer.issue(identity)
    }

    /// Validate a token and return the identity it asserts.
    ///
    /// # Errors
    /// * `JwtError` - Any signature, issuer, audience or lifetime check failed
    pub fn validate_token(&self, token: &str) -> Result<IdentityClaims, JwtError> {
        self.validator.validate(token)
    }
}
