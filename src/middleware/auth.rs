use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::{extract_token, verify_token};
use crate::error::ApiError;
use crate::gate::{self, Area, Credential, GateDecision, RequestKind};
use crate::state::AppState;
use crate::types::Role;

/// Authenticated caller, as admitted by the access gate
#[derive(Clone, Debug)]
pub struct AuthUser(pub Credential);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.subject_id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn credential(&self) -> &Credential {
        &self.0
    }

    /// Same policy the gate applies to the area's path prefixes
    pub fn require(&self, area: Area) -> Result<(), ApiError> {
        gate::authorize(&self.0, area).map_err(|denial| {
            tracing::warn!(user = %self.id(), role = %self.role(), ?area, ?denial, "Handler refused request");
            ApiError::from(denial)
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Credential>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// Runs before every handler. An unverifiable token is ignored, so the gate
/// sees the request as anonymous.
pub async fn access_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let security = &state.config.security;
    let now = Utc::now();

    let credential = extract_token(request.headers(), &security.cookie_name).and_then(|token| {
        verify_token(&token, security)
            .map_err(|e| tracing::debug!("Ignoring credential: {}", e))
            .ok()
    });

    let path = request.uri().path().to_string();
    let kind = RequestKind::from_path(&path);

    match gate::evaluate(&path, kind, credential.as_ref(), now) {
        GateDecision::Allow => {
            if let Some(credential) = credential.filter(|c| c.is_valid_at(now)) {
                request.extensions_mut().insert(credential);
            }
            next.run(request).await
        }
        GateDecision::RedirectTo(target) => {
            tracing::debug!("Gate redirect {} -> {}", path, target);
            Redirect::temporary(target).into_response()
        }
        GateDecision::Reject(status) => {
            tracing::debug!("Gate reject {} with {}", path, status);
            rejection(status).into_response()
        }
    }
}

fn rejection(status: StatusCode) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::unauthorized("Authentication required"),
        StatusCode::FORBIDDEN => ApiError::forbidden("Access to this resource is not permitted"),
        other => {
            tracing::error!("Unexpected gate status {}", other);
            ApiError::internal_server_error("Request could not be authorized")
        }
    }
}
