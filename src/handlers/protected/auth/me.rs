// handlers/protected/auth/me.rs - GET /api/auth/me

use axum::extract::State;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::UserService;
use crate::state::AppState;

/// Stored account plus what the presented credential says about it; the two
/// differ for a mentor approved after signing in.
pub async fn me_get(State(state): State<AppState>, user: AuthUser) -> ApiResult<Value> {
    let account = UserService::new(state.pool.clone()).find_by_id(user.id()).await?;
    let credential = user.credential();

    Ok(ApiResponse::success(json!({
        "user": account,
        "credential": {
            "role": credential.role,
            "is_approved": credential.is_approved,
            "issued_at": credential.issued_at,
            "expires_at": credential.expires_at,
        }
    })))
}
