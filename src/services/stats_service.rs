use sqlx::PgPool;

use super::ServiceResult;
use crate::database::models::PlatformStats;

pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn platform(&self) -> ServiceResult<PlatformStats> {
        let stats = sqlx::query_as::<_, PlatformStats>(
            "SELECT
                (SELECT COUNT(*) FROM users WHERE role = 'ADMIN') AS admins,
                (SELECT COUNT(*) FROM users WHERE role = 'MENTOR') AS mentors,
                (SELECT COUNT(*) FROM users WHERE role = 'MENTEE') AS mentees,
                (SELECT COUNT(*) FROM users WHERE role = 'MENTOR' AND is_approved = FALSE) AS pending_mentors,
                c.pending AS pending_connections,
                c.accepted AS accepted_connections,
                c.rejected AS rejected_connections,
                s.total AS sessions,
                s.completed AS completed_sessions
             FROM
                (SELECT COUNT(*) FILTER (WHERE status = 'PENDING') AS pending,
                        COUNT(*) FILTER (WHERE status = 'ACCEPTED') AS accepted,
                        COUNT(*) FILTER (WHERE status = 'REJECTED') AS rejected
                 FROM connections) c,
                (SELECT COUNT(*) AS total,
                        COUNT(*) FILTER (WHERE status = 'COMPLETED') AS completed
                 FROM mentoring_sessions) s",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    /// Requests still waiting on the mentor's answer
    pub async fn pending_requests_for(&self, mentor_id: uuid::Uuid) -> ServiceResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM connections WHERE mentor_id = $1 AND status = 'PENDING'",
        )
        .bind(mentor_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
