// handlers/protected/auth/refresh.rs - POST /api/auth/refresh

use axum::{extract::State, response::Response};

use crate::auth::{issue_token, session_cookie};
use crate::error::ApiError;
use crate::handlers::public::auth::{with_cookie, SessionIssued};
use crate::middleware::{ApiResponse, AuthUser};
use crate::services::{ServiceError, UserService};
use crate::state::AppState;

/// Reissue the credential from the stored account so role and approval
/// changes take effect without signing in again.
pub async fn refresh_post(State(state): State<AppState>, user: AuthUser) -> Result<Response, ApiError> {
    let account = UserService::new(state.pool.clone())
        .find_by_id(user.id())
        .await
        .map_err(|e| match e {
            ServiceError::NotFound(_) => ApiError::unauthorized("Account no longer exists"),
            other => other.into(),
        })?;

    let (token, credential) = issue_token(&account, &state.config.security)?;
    let cookie = session_cookie(&token, &state.config.security);

    if credential.is_approved != user.credential().is_approved {
        tracing::info!(user = %account.id, approved = credential.is_approved, "Approval changed since last credential");
    }

    Ok(with_cookie(
        ApiResponse::success(SessionIssued::new(account, token, &credential)),
        cookie,
    ))
}
