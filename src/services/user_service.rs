use sqlx::PgPool;
use uuid::Uuid;

use super::{ServiceError, ServiceResult};
use crate::database::models::User;
use crate::types::Role;

/// Fields required to create an account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub is_approved: bool,
}

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the user and an empty profile atomically
    pub async fn create(&self, new_user: NewUser) -> ServiceResult<User> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, password_hash, name, role, is_approved)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, email, password_hash, name, role, is_approved, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.name)
        .bind(new_user.role)
        .bind(new_user.is_approved)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match ServiceError::from(e) {
            ServiceError::Database(crate::database::DatabaseError::Conflict(_)) => {
                ServiceError::Conflict(format!("An account with email '{}' already exists", new_user.email))
            }
            other => other,
        })?;

        sqlx::query("INSERT INTO profiles (user_id) VALUES ($1)")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(user = %user.id, role = %user.role, "Account created");
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> ServiceResult<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, name, role, is_approved, created_at, updated_at
             FROM users
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("User '{}' not found", id)))
    }

    pub async fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, name, role, is_approved, created_at, updated_at
             FROM users
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn list(&self, role: Option<Role>) -> ServiceResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, name, role, is_approved, created_at, updated_at
             FROM users
             WHERE ($1::user_role IS NULL OR role = $1)
             ORDER BY created_at DESC",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn pending_mentors(&self) -> ServiceResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, name, role, is_approved, created_at, updated_at
             FROM users
             WHERE role = 'MENTOR' AND is_approved = FALSE
             ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// Only mentor accounts carry a meaningful approval flag
    pub async fn set_approval(&self, mentor_id: Uuid, approved: bool) -> ServiceResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users
             SET is_approved = $2, updated_at = now()
             WHERE id = $1 AND role = 'MENTOR'
             RETURNING id, email, password_hash, name, role, is_approved, created_at, updated_at",
        )
        .bind(mentor_id)
        .bind(approved)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Mentor '{}' not found", mentor_id)))
    }

    pub async fn approve_by_email(&self, email: &str) -> ServiceResult<User> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No account with email '{}'", email)))?;
        self.set_approval(user.id, true).await
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound(format!("User '{}' not found", id)));
        }
        tracing::info!(user = %id, "Account deleted");
        Ok(())
    }

    pub async fn admin_ids(&self) -> ServiceResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE role = 'ADMIN'")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }
}

/// Lower-cased, trimmed form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Deliberately loose: one '@' with a dotted domain and no whitespace
pub fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_normalized() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn plausible_emails() {
        assert!(is_plausible_email("ada@example.com"));
        assert!(is_plausible_email("a.b+c@mail.example.org"));
        assert!(!is_plausible_email("ada"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("ada@example"));
        assert!(!is_plausible_email("ada@@example.com"));
        assert!(!is_plausible_email("ada@.com"));
        assert!(!is_plausible_email("ada lovelace@example.com"));
    }
}
