use axum::extract::State;

use crate::gate::Area;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::progress::{mentor_stats, MentorStats};
use crate::services::{SessionService, StatsService};
use crate::state::AppState;

/// GET /api/mentor/stats
pub async fn stats_get(State(state): State<AppState>, user: AuthUser) -> ApiResult<MentorStats> {
    user.require(Area::Mentor)?;
    let sessions = SessionService::new(state.pool.clone())
        .list_for_mentor(user.id(), None)
        .await?;
    let pending = StatsService::new(state.pool.clone())
        .pending_requests_for(user.id())
        .await?;
    Ok(ApiResponse::success(mentor_stats(&sessions, pending)))
}
