use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::MentoringSession;
use crate::gate::Area;
use crate::handlers::protected::StatusQuery;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::services::SessionService;
use crate::state::AppState;
use crate::types::SessionStatus;

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub rating: i16,
    pub feedback: Option<String>,
}

/// GET /api/mentee/sessions[?status=]
pub async fn sessions_get(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Vec<MentoringSession>> {
    user.require(Area::Mentee)?;
    let status = query.parse::<SessionStatus>()?;
    let sessions = SessionService::new(state.pool.clone())
        .list_for_mentee(user.id(), status)
        .await?;
    Ok(ApiResponse::success(sessions))
}

/// PUT /api/mentee/sessions/:id/feedback
pub async fn feedback_put(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<FeedbackRequest>,
) -> ApiResult<MentoringSession> {
    user.require(Area::Mentee)?;
    let feedback = payload.feedback.map(|f| f.trim().to_string()).filter(|f| !f.is_empty());
    let session = SessionService::new(state.pool.clone())
        .leave_feedback(user.id(), id, payload.rating, feedback)
        .await?;
    Ok(ApiResponse::success(session))
}
