use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::{ConnectionService, ServiceError, ServiceResult};
use crate::database::models::MentoringSession;
use crate::types::SessionStatus;

pub const MIN_DURATION_MINUTES: i32 = 15;
pub const MAX_DURATION_MINUTES: i32 = 480;

#[derive(Debug, Clone, Deserialize)]
pub struct NewSession {
    pub mentee_id: Uuid,
    pub title: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub notes: Option<String>,
}

impl NewSession {
    pub fn validate(&self, now: DateTime<Utc>) -> ServiceResult<()> {
        if self.title.trim().is_empty() {
            return Err(ServiceError::invalid("title", "is required"));
        }
        if self.title.chars().count() > 200 {
            return Err(ServiceError::invalid("title", "must be at most 200 characters"));
        }
        if self.scheduled_at <= now {
            return Err(ServiceError::invalid("scheduled_at", "must be in the future"));
        }
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&self.duration_minutes) {
            return Err(ServiceError::invalid(
                "duration_minutes",
                format!("must be between {} and {}", MIN_DURATION_MINUTES, MAX_DURATION_MINUTES),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionUpdate {
    pub status: Option<SessionStatus>,
    pub notes: Option<String>,
}

pub fn validate_rating(rating: i16) -> ServiceResult<()> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(ServiceError::invalid("rating", "must be between 1 and 5"))
    }
}

pub struct SessionService {
    pool: PgPool,
}

impl SessionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Mentor books a session with a mentee they are connected to
    pub async fn schedule(&self, mentor_id: Uuid, new_session: NewSession) -> ServiceResult<MentoringSession> {
        new_session.validate(Utc::now())?;

        let connections = ConnectionService::new(self.pool.clone());
        if !connections.are_connected(mentor_id, new_session.mentee_id).await? {
            return Err(ServiceError::Forbidden(
                "Sessions can only be scheduled with connected mentees".to_string(),
            ));
        }

        let session = sqlx::query_as::<_, MentoringSession>(
            "INSERT INTO mentoring_sessions (id, mentor_id, mentee_id, title, scheduled_at, duration_minutes, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, mentor_id, mentee_id, title, scheduled_at, duration_minutes, status,
                       notes, rating, feedback, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(mentor_id)
        .bind(new_session.mentee_id)
        .bind(new_session.title.trim())
        .bind(new_session.scheduled_at)
        .bind(new_session.duration_minutes)
        .bind(new_session.notes)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(session = %session.id, mentor = %mentor_id, "Session scheduled");
        Ok(session)
    }

    /// Mentor completes or cancels a session, or edits its notes
    pub async fn update(&self, mentor_id: Uuid, session_id: Uuid, update: SessionUpdate) -> ServiceResult<MentoringSession> {
        let current = self.find(session_id).await?;
        if current.mentor_id != mentor_id {
            return Err(ServiceError::NotFound(format!("Session '{}' not found", session_id)));
        }

        if let Some(next) = update.status {
            if !current.status.can_transition_to(next) {
                return Err(ServiceError::Conflict(format!(
                    "Session is {} and cannot become {}",
                    current.status, next
                )));
            }
        }

        sqlx::query_as::<_, MentoringSession>(
            "UPDATE mentoring_sessions
             SET status = COALESCE($3, status), notes = COALESCE($4, notes), updated_at = now()
             WHERE id = $1 AND mentor_id = $2 AND status = $5
             RETURNING id, mentor_id, mentee_id, title, scheduled_at, duration_minutes, status,
                       notes, rating, feedback, created_at, updated_at",
        )
        .bind(session_id)
        .bind(mentor_id)
        .bind(update.status)
        .bind(update.notes)
        .bind(current.status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::Conflict("Session was updated concurrently".to_string()))
    }

    /// Mentee rates a completed session
    pub async fn leave_feedback(
        &self,
        mentee_id: Uuid,
        session_id: Uuid,
        rating: i16,
        feedback: Option<String>,
    ) -> ServiceResult<MentoringSession> {
        validate_rating(rating)?;

        let current = self.find(session_id).await?;
        if current.mentee_id != mentee_id {
            return Err(ServiceError::NotFound(format!("Session '{}' not found", session_id)));
        }
        if current.status != SessionStatus::Completed {
            return Err(ServiceError::Conflict("Only completed sessions can be rated".to_string()));
        }

        let session = sqlx::query_as::<_, MentoringSession>(
            "UPDATE mentoring_sessions
             SET rating = $3, feedback = $4, updated_at = now()
             WHERE id = $1 AND mentee_id = $2
             RETURNING id, mentor_id, mentee_id, title, scheduled_at, duration_minutes, status,
                       notes, rating, feedback, created_at, updated_at",
        )
        .bind(session_id)
        .bind(mentee_id)
        .bind(rating)
        .bind(feedback)
        .fetch_one(&self.pool)
        .await?;
        Ok(session)
    }

    async fn find(&self, session_id: Uuid) -> ServiceResult<MentoringSession> {
        sqlx::query_as::<_, MentoringSession>(
            "SELECT id, mentor_id, mentee_id, title, scheduled_at, duration_minutes, status,
                    notes, rating, feedback, created_at, updated_at
             FROM mentoring_sessions
             WHERE id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Session '{}' not found", session_id)))
    }

    pub async fn list_for_mentor(&self, mentor_id: Uuid, status: Option<SessionStatus>) -> ServiceResult<Vec<MentoringSession>> {
        let sessions = sqlx::query_as::<_, MentoringSession>(
            "SELECT id, mentor_id, mentee_id, title, scheduled_at, duration_minutes, status,
                    notes, rating, feedback, created_at, updated_at
             FROM mentoring_sessions
             WHERE mentor_id = $1 AND ($2::session_status IS NULL OR status = $2)
             ORDER BY scheduled_at ASC",
        )
        .bind(mentor_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(sessions)
    }

    pub async fn list_for_mentee(&self, mentee_id: Uuid, status: Option<SessionStatus>) -> ServiceResult<Vec<MentoringSession>> {
        let sessions = sqlx::query_as::<_, MentoringSession>(
            "SELECT id, mentor_id, mentee_id, title, scheduled_at, duration_minutes, status,
                    notes, rating, feedback, created_at, updated_at
             FROM mentoring_sessions
             WHERE mentee_id = $1 AND ($2::session_status IS NULL OR status = $2)
             ORDER BY scheduled_at ASC",
        )
        .bind(mentee_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(sessions)
    }
}
