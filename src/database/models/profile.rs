use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Expertise applies to mentors, interests to mentees
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub headline: String,
    pub bio: String,
    pub expertise: Vec<String>,
    pub interests: Vec<String>,
    pub experience_years: Option<i32>,
    pub availability: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Approved mentor as listed to mentees
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MentorSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub headline: String,
    pub bio: String,
    pub expertise: Vec<String>,
    pub experience_years: Option<i32>,
    pub availability: Option<String>,
}
