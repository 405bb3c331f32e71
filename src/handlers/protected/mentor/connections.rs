use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{Connection, ConnectionView};
use crate::error::ApiError;
use crate::gate::Area;
use crate::handlers::protected::{parse_optional, StatusQuery};
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::services::{ConnectionService, NotificationService};
use crate::state::AppState;
use crate::types::{ConnectionStatus, NotificationKind};

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub status: String,
}

/// GET /api/mentor/connections[?status=]
pub async fn connections_get(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Vec<ConnectionView>> {
    user.require(Area::Mentor)?;
    let status = query.parse::<ConnectionStatus>()?;
    let connections = ConnectionService::new(state.pool.clone())
        .list_for_mentor(user.id(), status)
        .await?;
    Ok(ApiResponse::success(connections))
}

/// PUT /api/mentor/connections/:id - accept or reject a pending request
pub async fn connection_put(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<RespondRequest>,
) -> ApiResult<Connection> {
    user.require(Area::Mentor)?;
    let status = parse_optional::<ConnectionStatus>(Some(&payload.status), "status")?
        .ok_or_else(|| ApiError::invalid_field("status", "is required"))?;

    let connection = ConnectionService::new(state.pool.clone())
        .respond(user.id(), id, status)
        .await?;

    let (kind, text) = match connection.status {
        ConnectionStatus::Accepted => (NotificationKind::ConnectionAccepted, "Your mentorship request was accepted"),
        _ => (NotificationKind::ConnectionRejected, "Your mentorship request was declined"),
    };
    NotificationService::new(state.pool.clone())
        .notify(connection.mentee_id, kind, text)
        .await;

    tracing::info!(connection = %connection.id, status = %connection.status, "Connection answered");
    Ok(ApiResponse::success(connection))
}
