// handlers/public/auth/logout.rs - POST /api/auth/logout handler

use axum::{extract::State, response::Response};
use serde_json::json;

use crate::auth::clear_session_cookie;
use crate::gate::LOGIN_PATH;
use crate::middleware::ApiResponse;
use crate::state::AppState;

use super::with_cookie;

/// Expire the session cookie. Tokens are stateless, so a bearer token stays
/// valid until it expires.
pub async fn logout_post(State(state): State<AppState>) -> Response {
    with_cookie(
        ApiResponse::success(json!({ "redirect_to": LOGIN_PATH })),
        clear_session_cookie(&state.config.security),
    )
}
