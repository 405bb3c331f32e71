use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Platform-wide counters shown on the admin dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct PlatformStats {
    pub admins: i64,
    pub mentors: i64,
    pub mentees: i64,
    pub pending_mentors: i64,
    pub pending_connections: i64,
    pub accepted_connections: i64,
    pub rejected_connections: i64,
    pub sessions: i64,
    pub completed_sessions: i64,
}
