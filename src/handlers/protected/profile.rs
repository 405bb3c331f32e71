// handlers/protected/profile.rs - GET/PUT /api/profile

use axum::extract::State;
use serde_json::{json, Value};

use crate::database::models::Profile;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::services::{ProfileService, ProfileUpdate, UserService};
use crate::state::AppState;

pub async fn profile_get(State(state): State<AppState>, user: AuthUser) -> ApiResult<Value> {
    let account = UserService::new(state.pool.clone()).find_by_id(user.id()).await?;
    let profile = ProfileService::new(state.pool.clone()).get(user.id()).await?;
    Ok(ApiResponse::success(json!({ "user": account, "profile": profile })))
}

pub async fn profile_put(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> ApiResult<Profile> {
    let profile = ProfileService::new(state.pool.clone()).update(user.id(), update).await?;
    Ok(ApiResponse::success(profile))
}
