use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::models::AuthenticatedUser;

/// Echo the identity asserted by the presented token.
pub async fn current_user(
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<CurrentUserResponseData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&caller).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserResponseData {
    pub user_id: String,
    pub username: String,
    pub role: String,
}

impl From<&AuthenticatedUser> for CurrentUserResponseData {
    fn from(caller: &AuthenticatedUser) -> Self {
        Self {
            user_id: caller.user_id.to_string(),
            username: caller.username.clone(),
            role: caller.role.to_string(),
        }
    }
}
