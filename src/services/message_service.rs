use sqlx::PgPool;
use uuid::Uuid;

use super::{ConnectionService, ServiceError, ServiceResult};
use crate::database::models::Message;

pub const MAX_MESSAGE_LEN: usize = 5000;

pub fn validate_content(content: &str) -> ServiceResult<&str> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ServiceError::invalid("content", "must not be empty"));
    }
    if content.chars().count() > MAX_MESSAGE_LEN {
        return Err(ServiceError::invalid(
            "content",
            format!("must be at most {} characters", MAX_MESSAGE_LEN),
        ));
    }
    Ok(content)
}

pub struct MessageService {
    pool: PgPool,
}

impl MessageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Non-admin senders may only write to someone they are connected with
    pub async fn send(&self, sender_id: Uuid, sender_is_admin: bool, receiver_id: Uuid, content: &str) -> ServiceResult<Message> {
        let content = validate_content(content)?;
        if sender_id == receiver_id {
            return Err(ServiceError::invalid("receiver_id", "cannot message yourself"));
        }

        if !sender_is_admin {
            let connections = ConnectionService::new(self.pool.clone());
            if !connections.are_connected(sender_id, receiver_id).await? {
                return Err(ServiceError::Forbidden(
                    "Messages can only be sent to connected users".to_string(),
                ));
            }
        }

        // Reached without a connection only by admins
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(receiver_id)
            .fetch_one(&self.pool)
            .await?;
        if !exists {
            return Err(ServiceError::NotFound(format!("User '{}' not found", receiver_id)));
        }

        let message = sqlx::query_as::<_, Message>(
            "INSERT INTO messages (id, sender_id, receiver_id, content)
             VALUES ($1, $2, $3, $4)
             RETURNING id, sender_id, receiver_id, content, read_at, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(sender_id)
        .bind(receiver_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        Ok(message)
    }

    /// Both directions oldest first; messages addressed to `user_id` become read
    pub async fn conversation(&self, user_id: Uuid, peer_id: Uuid) -> ServiceResult<Vec<Message>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE messages SET read_at = now()
             WHERE receiver_id = $1 AND sender_id = $2 AND read_at IS NULL",
        )
        .bind(user_id)
        .bind(peer_id)
        .execute(&mut *tx)
        .await?;

        let messages = sqlx::query_as::<_, Message>(
            "SELECT id, sender_id, receiver_id, content, read_at, created_at
             FROM messages
             WHERE (sender_id = $1 AND receiver_id = $2) OR (sender_id = $2 AND receiver_id = $1)
             ORDER BY created_at ASC",
        )
        .bind(user_id)
        .bind(peer_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(messages)
    }

    /// Latest messages involving the user, newest first
    pub async fn inbox(&self, user_id: Uuid, limit: i64) -> ServiceResult<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT id, sender_id, receiver_id, content, read_at, created_at
             FROM messages
             WHERE sender_id = $1 OR receiver_id = $1
             ORDER BY created_at DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }
}
