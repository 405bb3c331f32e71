// handlers/public/auth/mod.rs - Credential acquisition (no authentication required)

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use chrono::{DateTime, Utc};

use crate::database::models::User;
use crate::gate::{landing_path, Credential, PENDING_APPROVAL_PATH};
use crate::middleware::ApiResponse;

pub mod login;
pub mod logout;
pub mod register;

pub use login::login_post;
pub use logout::logout_post;
pub use register::register_post;

/// Body returned whenever a fresh credential is issued
#[derive(Debug, Serialize)]
pub struct SessionIssued {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub redirect_to: &'static str,
}

impl SessionIssued {
    pub fn new(user: User, token: String, credential: &Credential) -> Self {
        Self {
            user,
            token,
            expires_at: credential.expires_at,
            redirect_to: redirect_target(credential),
        }
    }
}

/// Where the browser should go after signing in
pub fn redirect_target(credential: &Credential) -> &'static str {
    if credential.is_unapproved_mentor() {
        PENDING_APPROVAL_PATH
    } else {
        landing_path(credential.role)
    }
}

/// Attach a `Set-Cookie` header to an envelope response
pub fn with_cookie<T: Serialize>(body: ApiResponse<T>, cookie: Option<HeaderValue>) -> Response {
    let mut response = body.into_response();
    match cookie {
        Some(cookie) => {
            response.headers_mut().insert(header::SET_COOKIE, cookie);
        }
        None => tracing::warn!("Session cookie could not be encoded; token returned in body only"),
    }
    response
}
