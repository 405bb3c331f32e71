// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::{extract::State, response::Response};
use serde::Deserialize;

use crate::auth::{issue_token, session_cookie, verify_password_blocking};
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse};
use crate::services::user_service::normalize_email;
use crate::services::UserService;
use crate::state::AppState;

use super::{with_cookie, SessionIssued};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Exchange email and password for a credential, returned both in the body
/// and as the session cookie. Unknown email and wrong password look the same.
pub async fn login_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Response, ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let email = normalize_email(&payload.email);
    let user = UserService::new(state.pool.clone()).find_by_email(&email).await?;

    let Some(user) = user else {
        tracing::info!("Login failed for unknown account");
        return Err(ApiError::unauthorized("Invalid email or password"));
    };

    if !verify_password_blocking(user.password_hash.clone(), payload.password).await? {
        tracing::info!(user = %user.id, "Login failed: wrong password");
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let (token, credential) = issue_token(&user, &state.config.security)?;
    let cookie = session_cookie(&token, &state.config.security);
    tracing::info!(user = %user.id, role = %user.role, "Signed in");

    Ok(with_cookie(
        ApiResponse::success(SessionIssued::new(user, token, &credential)),
        cookie,
    ))
}
