use axum::extract::{Path, Query, State};
use uuid::Uuid;

use crate::database::models::MentoringSession;
use crate::gate::Area;
use crate::handlers::protected::StatusQuery;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::services::{NewSession, NotificationService, SessionService, SessionUpdate};
use crate::state::AppState;
use crate::types::{NotificationKind, SessionStatus};

/// GET /api/mentor/sessions[?status=]
pub async fn sessions_get(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Vec<MentoringSession>> {
    user.require(Area::Mentor)?;
    let status = query.parse::<SessionStatus>()?;
    let sessions = SessionService::new(state.pool.clone())
        .list_for_mentor(user.id(), status)
        .await?;
    Ok(ApiResponse::success(sessions))
}

/// POST /api/mentor/sessions
pub async fn sessions_post(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<NewSession>,
) -> ApiResult<MentoringSession> {
    user.require(Area::Mentor)?;
    let session = SessionService::new(state.pool.clone()).schedule(user.id(), payload).await?;

    NotificationService::new(state.pool.clone())
        .notify(
            session.mentee_id,
            NotificationKind::SessionScheduled,
            &format!("New session \"{}\" on {}", session.title, session.scheduled_at.format("%Y-%m-%d %H:%M UTC")),
        )
        .await;

    Ok(ApiResponse::created(session))
}

/// PUT /api/mentor/sessions/:id - complete, cancel, or edit notes
pub async fn session_put(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(update): ApiJson<SessionUpdate>,
) -> ApiResult<MentoringSession> {
    user.require(Area::Mentor)?;
    let status_changed = update.status.is_some();
    let session = SessionService::new(state.pool.clone()).update(user.id(), id, update).await?;

    if status_changed {
        NotificationService::new(state.pool.clone())
            .notify(
                session.mentee_id,
                NotificationKind::SessionUpdated,
                &format!("Session \"{}\" is now {}", session.title, session.status),
            )
            .await;
    }

    Ok(ApiResponse::success(session))
}
