// handlers/protected/notifications.rs - Stored notifications for the caller

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::Notification;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::NotificationService;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread: bool,
}

pub async fn notifications_get(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<NotificationQuery>,
) -> ApiResult<Vec<Notification>> {
    let notifications = NotificationService::new(state.pool.clone())
        .list(user.id(), query.unread)
        .await?;
    Ok(ApiResponse::success(notifications))
}

pub async fn notification_read_put(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Notification> {
    let notification = NotificationService::new(state.pool.clone()).mark_read(user.id(), id).await?;
    Ok(ApiResponse::success(notification))
}

pub async fn notifications_read_all_put(State(state): State<AppState>, user: AuthUser) -> ApiResult<Value> {
    let updated = NotificationService::new(state.pool.clone()).mark_all_read(user.id()).await?;
    Ok(ApiResponse::success(json!({ "updated": updated })))
}
