// handlers/public/auth/register.rs - POST /api/auth/register handler

use axum::{extract::State, response::Response};
use serde::Deserialize;

use crate::auth::{hash_password_blocking, issue_token, session_cookie};
use crate::error::{ApiError, FieldErrors};
use crate::middleware::{ApiJson, ApiResponse};
use crate::services::user_service::{is_plausible_email, normalize_email};
use crate::services::{NewUser, NotificationService, UserService};
use crate::state::AppState;
use crate::types::{NotificationKind, Role};

use super::{with_cookie, SessionIssued};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl RegisterRequest {
    /// All field problems are reported together; the role must be one a
    /// visitor may choose for themselves.
    pub fn validate(&self) -> Result<Role, ApiError> {
        let role = self.role.parse::<Role>().ok().filter(|r| *r != Role::Admin);
        let name = self.name.trim();

        let mut errors = FieldErrors::new();
        errors
            .check(!name.is_empty(), "name", "is required")
            .check(name.chars().count() <= MAX_NAME_LEN, "name", "is too long")
            .check(is_plausible_email(self.email.trim()), "email", "is not a valid email address")
            .check(
                self.password.chars().count() >= MIN_PASSWORD_LEN,
                "password",
                "must be at least 8 characters",
            )
            .check(role.is_some(), "role", "must be MENTOR or MENTEE");
        errors.into_result()?;

        role.ok_or_else(|| ApiError::invalid_field("role", "must be MENTOR or MENTEE"))
    }
}

/// Create a mentor or mentee account and sign it in.
///
/// Mentors start unapproved and every admin receives a notification.
pub async fn register_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<Response, ApiError> {
    if !state.config.auth.allow_registration {
        return Err(ApiError::forbidden("Registration is disabled"));
    }
    let role = payload.validate()?;

    let password_hash = hash_password_blocking(payload.password).await?;
    let users = UserService::new(state.pool.clone());
    let user = users
        .create(NewUser {
            email: normalize_email(&payload.email),
            password_hash,
            name: payload.name.trim().to_string(),
            role,
            is_approved: role != Role::Mentor,
        })
        .await?;

    if role == Role::Mentor {
        let admins = users.admin_ids().await.unwrap_or_else(|e| {
            tracing::warn!("Could not list admins to notify: {}", e);
            Vec::new()
        });
        NotificationService::new(state.pool.clone())
            .notify_all(
                &admins,
                NotificationKind::MentorPending,
                &format!("{} registered as a mentor and awaits approval", user.name),
            )
            .await;
    }

    let (token, credential) = issue_token(&user, &state.config.security)?;
    let cookie = session_cookie(&token, &state.config.security);
    tracing::info!(user = %user.id, role = %user.role, "Registered");

    Ok(with_cookie(
        ApiResponse::created(SessionIssued::new(user, token, &credential)),
        cookie,
    ))
}
