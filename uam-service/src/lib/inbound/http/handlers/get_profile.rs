use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Profile of the user the request was authenticated as.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    // Subjects are only ever issued from user ids
    let user_id = UserId::from_string(&caller.subject).map_err(|e| {
        tracing::warn!(subject = %caller.subject, error = %e, "Token subject is not a user id");
        ApiError::Unauthorized("Invalid or expired credential".to_string())
    })?;

    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
