use async_trait::async_trait;
use auth::IssuedToken;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AuthenticatedUser;
use crate::domain::authentication::models::Credentials;

/// Port for login and bearer token checks.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Exchange credentials for a signed token.
    ///
    /// Performs a single read of the credential store and no writes.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user, disabled user or wrong password
    /// * `Internal` - Credential store or stored hash unusable
    async fn authenticate(&self, credentials: Credentials) -> Result<IssuedToken, AuthError>;

    /// Validate a bearer token and resolve the caller.
    ///
    /// # Errors
    /// * `TokenInvalid` - Any signature, issuer, audience, lifetime or claim check failed
    fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
