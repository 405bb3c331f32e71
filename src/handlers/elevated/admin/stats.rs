use axum::extract::State;

use crate::database::models::PlatformStats;
use crate::gate::Area;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::StatsService;
use crate::state::AppState;

/// GET /api/admin/stats
pub async fn stats_get(State(state): State<AppState>, user: AuthUser) -> ApiResult<PlatformStats> {
    user.require(Area::Admin)?;
    let stats = StatsService::new(state.pool.clone()).platform().await?;
    Ok(ApiResponse::success(stats))
}
