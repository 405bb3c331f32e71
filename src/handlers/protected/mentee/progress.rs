use axum::extract::State;

use crate::gate::Area;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::progress::{mentee_progress, ProgressSummary};
use crate::services::SessionService;
use crate::state::AppState;

/// GET /api/mentee/progress
pub async fn progress_get(State(state): State<AppState>, user: AuthUser) -> ApiResult<ProgressSummary> {
    user.require(Area::Mentee)?;
    let sessions = SessionService::new(state.pool.clone())
        .list_for_mentee(user.id(), None)
        .await?;
    Ok(ApiResponse::success(mentee_progress(&sessions)))
}
