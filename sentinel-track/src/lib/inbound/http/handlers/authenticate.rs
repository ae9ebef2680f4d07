use auth::IssuedToken;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::Credentials;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn authenticate(
    State(state): State<AppState>,
    body: Result<Json<AuthenticateRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Unreadable login body");
        ApiError::from(AuthError::InvalidCredentials)
    })?;

    state
        .auth_service
        .authenticate(body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref issued| ApiSuccess::new(StatusCode::OK, issued.into()))
}

/// Login request. Missing fields deserialize as empty, and an unreadable
/// body is rejected, both as bad credentials rather than as a malformed body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

impl From<AuthenticateRequestBody> for Credentials {
    fn from(body: AuthenticateRequestBody) -> Self {
        Credentials::new(body.username, body.password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl From<&IssuedToken> for AuthenticateResponseData {
    fn from(issued: &IssuedToken) -> Self {
        Self {
            token: issued.access_token.clone(),
            token_type: issued.token_type.to_string(),
            expires_at: issued.expires_at,
        }
    }
}
