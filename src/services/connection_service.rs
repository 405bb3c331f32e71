use sqlx::PgPool;
use uuid::Uuid;

use super::{ServiceError, ServiceResult};
use crate::database::models::{Connection, ConnectionView};
use crate::types::ConnectionStatus;

pub struct ConnectionService {
    pool: PgPool,
}

impl ConnectionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Mentee asks an approved mentor to connect. A rejected pair may ask
    /// again; any other existing pairing is a conflict.
    pub async fn request(&self, mentee_id: Uuid, mentor_id: Uuid, message: Option<String>) -> ServiceResult<Connection> {
        let mentor_ok: Option<bool> = sqlx::query_scalar(
            "SELECT is_approved FROM users WHERE id = $1 AND role = 'MENTOR'",
        )
        .bind(mentor_id)
        .fetch_optional(&self.pool)
        .await?;

        if mentor_ok != Some(true) {
            return Err(ServiceError::NotFound(format!("Mentor '{}' not found", mentor_id)));
        }

        sqlx::query_as::<_, Connection>(
            "INSERT INTO connections (id, mentor_id, mentee_id, status, message)
             VALUES ($1, $2, $3, 'PENDING', $4)
             ON CONFLICT (mentor_id, mentee_id) DO UPDATE
                SET status = 'PENDING', message = EXCLUDED.message, updated_at = now()
                WHERE connections.status = 'REJECTED'
             RETURNING id, mentor_id, mentee_id, status, message, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(mentor_id)
        .bind(mentee_id)
        .bind(message)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::Conflict("A connection with this mentor already exists".to_string()))
    }

    /// Mentor answers a pending request
    pub async fn respond(&self, mentor_id: Uuid, connection_id: Uuid, status: ConnectionStatus) -> ServiceResult<Connection> {
        let current = self.find_for_mentor(mentor_id, connection_id).await?;

        if !current.status.can_transition_to(status) {
            return Err(ServiceError::Conflict(format!(
                "Connection is {} and cannot become {}",
                current.status, status
            )));
        }

        // Guard on the old status so a concurrent answer cannot be overwritten
        sqlx::query_as::<_, Connection>(
            "UPDATE connections
             SET status = $3, updated_at = now()
             WHERE id = $1 AND mentor_id = $2 AND status = $4
             RETURNING id, mentor_id, mentee_id, status, message, created_at, updated_at",
        )
        .bind(connection_id)
        .bind(mentor_id)
        .bind(status)
        .bind(current.status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::Conflict("Connection was updated concurrently".to_string()))
    }

    async fn find_for_mentor(&self, mentor_id: Uuid, connection_id: Uuid) -> ServiceResult<Connection> {
        sqlx::query_as::<_, Connection>(
            "SELECT id, mentor_id, mentee_id, status, message, created_at, updated_at
             FROM connections
             WHERE id = $1 AND mentor_id = $2",
        )
        .bind(connection_id)
        .bind(mentor_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Connection '{}' not found", connection_id)))
    }

    pub async fn list_for_mentor(&self, mentor_id: Uuid, status: Option<ConnectionStatus>) -> ServiceResult<Vec<ConnectionView>> {
        let rows = sqlx::query_as::<_, ConnectionView>(
            "SELECT c.id, c.mentor_id, c.mentee_id, c.status, c.message, c.created_at, c.updated_at,
                    u.name AS peer_name, u.email AS peer_email
             FROM connections c
             JOIN users u ON u.id = c.mentee_id
             WHERE c.mentor_id = $1 AND ($2::connection_status IS NULL OR c.status = $2)
             ORDER BY c.created_at DESC",
        )
        .bind(mentor_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_for_mentee(&self, mentee_id: Uuid, status: Option<ConnectionStatus>) -> ServiceResult<Vec<ConnectionView>> {
        let rows = sqlx::query_as::<_, ConnectionView>(
            "SELECT c.id, c.mentor_id, c.mentee_id, c.status, c.message, c.created_at, c.updated_at,
                    u.name AS peer_name, u.email AS peer_email
             FROM connections c
             JOIN users u ON u.id = c.mentor_id
             WHERE c.mentee_id = $1 AND ($2::connection_status IS NULL OR c.status = $2)
             ORDER BY c.created_at DESC",
        )
        .bind(mentee_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// True when the two users share an accepted connection, in either direction
    pub async fn are_connected(&self, a: Uuid, b: Uuid) -> ServiceResult<bool> {
        let connected = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM connections
                WHERE status = 'ACCEPTED'
                  AND ((mentor_id = $1 AND mentee_id = $2) OR (mentor_id = $2 AND mentee_id = $1))
             )",
        )
        .bind(a)
        .bind(b)
        .fetch_one(&self.pool)
        .await?;
        Ok(connected)
    }
}
