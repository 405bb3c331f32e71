use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::User;
use crate::error::ApiError;
use crate::gate::Area;
use crate::handlers::protected::parse_optional;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::UserService;
use crate::state::AppState;
use crate::types::Role;

#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub role: Option<String>,
}

/// GET /api/admin/users[?role=]
pub async fn users_get(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<UserQuery>,
) -> ApiResult<Vec<User>> {
    user.require(Area::Admin)?;
    let role = parse_optional::<Role>(query.role.as_deref(), "role")?;
    let users = UserService::new(state.pool.clone()).list(role).await?;
    Ok(ApiResponse::success(users))
}

/// DELETE /api/admin/users/:id - removes the account and everything it owns
pub async fn user_delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    user.require(Area::Admin)?;
    if id == user.id() {
        return Err(ApiError::bad_request("Administrators cannot delete their own account"));
    }
    UserService::new(state.pool.clone()).delete(id).await?;
    tracing::info!(admin = %user.id(), deleted = %id, "User deleted by admin");
    Ok(ApiResponse::success(json!({ "id": id, "deleted": true })))
}
