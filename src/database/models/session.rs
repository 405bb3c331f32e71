use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::types::SessionStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MentoringSession {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub title: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: SessionStatus,
    pub notes: Option<String>,
    pub rating: Option<i16>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
