use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AuthenticatedUser;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::Role;
use crate::inbound::http::router::AppState;

/// Validates the bearer token of every protected request.
///
/// On success the caller's [`AuthenticatedUser`] is stored in the request
/// extensions. Any failure ends the request with the same 401 body; the
/// specific cause is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req).ok_or_else(|| {
        tracing::debug!("Missing or malformed Authorization header");
        ApiError::from(AuthError::TokenInvalid)
    })?;

    let user = state.auth_service.validate_token(token)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

impl AuthenticatedUser {
    /// # Errors
    /// * `Forbidden` - Caller does not hold `role`
    pub fn require_role(&self, role: Role) -> Result<(), ApiError> {
        if self.has_role(role) {
            Ok(())
        } else {
            tracing::info!(
                user_id = %self.user_id,
                role = %self.role,
                required = %role,
                "Access denied"
            );
            Err(ApiError::Forbidden(format!("Requires the {} role.", role)))
        }
    }
}
