use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::IssuedToken;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::identity_claims;
use crate::domain::authentication::models::AuthenticatedUser;
use crate::domain::authentication::models::Credentials;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

/// Login orchestration over the user repository and the token authenticator.
///
/// Unknown users, disabled users and wrong passwords all produce the same
/// `InvalidCredentials` after the same amount of hashing work.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn reject(&self, credentials: &Credentials, reason: &'static str) -> AuthError {
        tracing::info!(username = %credentials.username, reason, "Login rejected");
        self.authenticator.reject(&credentials.password);
        AuthError::InvalidCredentials
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn authenticate(&self, credentials: Credentials) -> Result<IssuedToken, AuthError> {
        if !credentials.is_complete() {
            return Err(self.reject(&credentials, "incomplete_credentials"));
        }

        let Ok(username) = Username::new(credentials.username.clone()) else {
            return Err(self.reject(&credentials, "malformed_username"));
        };

        let user = self
            .repository
            .find_by_username(&username)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Credential store lookup failed");
                AuthError::Internal(e.to_string())
            })?;

        let user = match user {
            Some(user) if user.enabled => user,
            Some(_) => return Err(self.reject(&credentials, "user_disabled")),
            None => return Err(self.reject(&credentials, "user_not_found")),
        };

        let issued = self
            .authenticator
            .authenticate(
                &credentials.password,
                &user.password_hash,
                &identity_claims(&user),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::info!(username = %user.username, reason = "password_mismatch", "Login rejected");
                    AuthError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => {
                    tracing::error!(user_id = %user.id, error = %err, "Stored password hash unusable");
                    AuthError::Internal(format!("Password verification failed: {}", err))
                }
                AuthenticationError::JwtError(err) => {
                    tracing::error!(user_id = %user.id, error = %err, "Token generation failed");
                    AuthError::Internal(format!("Token generation failed: {}", err))
                }
            })?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            expires_at = %issued.expires_at,
            "Token issued"
        );

        Ok(issued)
    }

    fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let identity = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "JWT validation failed");
            AuthError::TokenInvalid
        })?;

        let user_id = UserId::from_string(&identity.user_id).map_err(|e| {
            tracing::warn!(error = %e, "Token subject is not a user id");
            AuthError::TokenInvalid
        })?;

        let role = match identity.role.as_deref() {
            Some(role) => role.parse::<Role>().map_err(|e| {
                tracing::warn!(error = %e, "Token carries an unknown role");
                AuthError::TokenInvalid
            })?,
            None => Role::Viewer,
        };

        Ok(AuthenticatedUser {
            user_id,
            username: identity.username,
            role,
        })
    }
}
