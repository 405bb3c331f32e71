// handlers/protected/messages.rs - Direct messages between connected users

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::Message;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::services::{MessageService, NotificationService};
use crate::state::AppState;
use crate::types::{NotificationKind, Role};

#[derive(Debug, Deserialize)]
pub struct InboxQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessage {
    pub receiver_id: Uuid,
    pub content: String,
}

/// GET /api/messages - latest messages in either direction
pub async fn inbox_get(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<InboxQuery>,
) -> ApiResult<Vec<Message>> {
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let messages = MessageService::new(state.pool.clone()).inbox(user.id(), limit).await?;
    Ok(ApiResponse::success(messages))
}

/// POST /api/messages
pub async fn message_post(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<SendMessage>,
) -> ApiResult<Message> {
    let message = MessageService::new(state.pool.clone())
        .send(user.id(), user.role() == Role::Admin, payload.receiver_id, &payload.content)
        .await?;

    NotificationService::new(state.pool.clone())
        .notify(message.receiver_id, NotificationKind::MessageReceived, "You have a new message")
        .await;

    Ok(ApiResponse::created(message))
}

/// GET /api/messages/:peer_id - full conversation, marks incoming as read
pub async fn conversation_get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(peer_id): Path<Uuid>,
) -> ApiResult<Vec<Message>> {
    let messages = MessageService::new(state.pool.clone()).conversation(user.id(), peer_id).await?;
    Ok(ApiResponse::success(messages))
}
