use axum::extract::{Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{Connection, ConnectionView};
use crate::error::ApiError;
use crate::gate::Area;
use crate::handlers::protected::StatusQuery;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::services::{ConnectionService, NotificationService};
use crate::state::AppState;
use crate::types::{ConnectionStatus, NotificationKind};

pub const MAX_REQUEST_MESSAGE_LEN: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct ConnectionRequest {
    pub mentor_id: Uuid,
    pub message: Option<String>,
}

/// GET /api/mentee/connections[?status=]
pub async fn connections_get(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Vec<ConnectionView>> {
    user.require(Area::Mentee)?;
    let status = query.parse::<ConnectionStatus>()?;
    let connections = ConnectionService::new(state.pool.clone())
        .list_for_mentee(user.id(), status)
        .await?;
    Ok(ApiResponse::success(connections))
}

/// POST /api/mentee/connections - ask a mentor to connect
pub async fn connections_post(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<ConnectionRequest>,
) -> ApiResult<Connection> {
    user.require(Area::Mentee)?;

    let message = payload.message.map(|m| m.trim().to_string()).filter(|m| !m.is_empty());
    if message.as_ref().is_some_and(|m| m.chars().count() > MAX_REQUEST_MESSAGE_LEN) {
        return Err(ApiError::invalid_field("message", "must be at most 1000 characters"));
    }

    let connection = ConnectionService::new(state.pool.clone())
        .request(user.id(), payload.mentor_id, message)
        .await?;

    NotificationService::new(state.pool.clone())
        .notify(
            connection.mentor_id,
            NotificationKind::ConnectionRequested,
            "You have a new mentorship request",
        )
        .await;

    Ok(ApiResponse::created(connection))
}
