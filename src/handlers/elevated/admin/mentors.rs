use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::User;
use crate::gate::Area;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::services::{NotificationService, UserService};
use crate::state::AppState;
use crate::types::NotificationKind;

#[derive(Debug, Deserialize)]
pub struct ApprovalRequest {
    pub approved: bool,
}

/// GET /api/admin/mentors/pending
pub async fn pending_get(State(state): State<AppState>, user: AuthUser) -> ApiResult<Vec<User>> {
    user.require(Area::Admin)?;
    let mentors = UserService::new(state.pool.clone()).pending_mentors().await?;
    Ok(ApiResponse::success(mentors))
}

/// PUT /api/admin/mentors/:id/approval
///
/// The mentor's current credential keeps its old approval flag until they
/// refresh or sign in again.
pub async fn approval_put(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<ApprovalRequest>,
) -> ApiResult<User> {
    user.require(Area::Admin)?;
    let mentor = UserService::new(state.pool.clone())
        .set_approval(id, payload.approved)
        .await?;

    let (kind, text) = if payload.approved {
        (NotificationKind::MentorApproved, "Your mentor account has been approved")
    } else {
        (NotificationKind::MentorRejected, "Your mentor account was not approved")
    };
    NotificationService::new(state.pool.clone()).notify(mentor.id, kind, text).await;

    tracing::info!(admin = %user.id(), mentor = %mentor.id, approved = payload.approved, "Mentor approval set");
    Ok(ApiResponse::success(mentor))
}
