use sqlx::PgPool;
use uuid::Uuid;

use super::{ServiceError, ServiceResult};
use crate::database::models::Notification;
use crate::types::NotificationKind;

pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: Uuid, kind: NotificationKind, message: &str) -> ServiceResult<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (id, user_id, kind, message)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, kind, message, is_read, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(kind)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;
        Ok(notification)
    }

    /// Best-effort variant of `create`; a failure is logged and swallowed
    pub async fn notify(&self, user_id: Uuid, kind: NotificationKind, message: &str) {
        if let Err(e) = self.create(user_id, kind, message).await {
            tracing::warn!(user = %user_id, ?kind, error = %e, "Failed to store notification");
        }
    }

    pub async fn notify_all(&self, user_ids: &[Uuid], kind: NotificationKind, message: &str) {
        for user_id in user_ids {
            self.notify(*user_id, kind, message).await;
        }
    }

    pub async fn list(&self, user_id: Uuid, unread_only: bool) -> ServiceResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT id, user_id, kind, message, is_read, created_at
             FROM notifications
             WHERE user_id = $1 AND (NOT $2 OR is_read = FALSE)
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(unread_only)
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }

    pub async fn mark_read(&self, user_id: Uuid, notification_id: Uuid) -> ServiceResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = TRUE
             WHERE id = $1 AND user_id = $2
             RETURNING id, user_id, kind, message, is_read, created_at",
        )
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Notification '{}' not found", notification_id)))
    }

    /// Returns how many notifications changed
    pub async fn mark_all_read(&self, user_id: Uuid) -> ServiceResult<u64> {
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
