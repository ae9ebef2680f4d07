use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::get_user::UserResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::models::AuthenticatedUser;
use crate::domain::user::models::Role;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<UserResponseData>>, ApiError> {
    caller.require_role(Role::Admin)?;

    state
        .user_service
        .list_users()
        .await
        .map_err(ApiError::from)
        .map(|users| ApiSuccess::new(StatusCode::OK, users.iter().map(UserResponseData::from).collect()))
}
