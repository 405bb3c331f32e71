// handlers/public/pages.rs - HTML page routes
//
// The access gate has already run by the time these execute: any dashboard
// handler is guaranteed a credential of the matching role.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::gate::{landing_path, LOGIN_PATH, PENDING_APPROVAL_PATH};
use crate::middleware::AuthUser;
use crate::pages;
use crate::state::AppState;

pub async fn home() -> Html<String> {
    pages::home()
}

pub async fn login() -> Html<String> {
    pages::login()
}

pub async fn register(State(state): State<AppState>) -> Html<String> {
    pages::register(state.config.auth.allow_registration)
}

pub async fn pending_approval() -> Html<String> {
    pages::pending_approval()
}

/// `/dashboard` itself sends each role to its own area
pub async fn dashboard_root(user: Option<AuthUser>) -> Response {
    match user {
        Some(user) if user.credential().is_unapproved_mentor() => Redirect::temporary(PENDING_APPROVAL_PATH).into_response(),
        Some(user) => Redirect::temporary(landing_path(user.role())).into_response(),
        None => Redirect::temporary(LOGIN_PATH).into_response(),
    }
}

pub async fn dashboard(user: AuthUser) -> Html<String> {
    pages::dashboard(user.credential(), "")
}

pub async fn dashboard_section(user: AuthUser, Path(section): Path<String>) -> Html<String> {
    pages::dashboard(user.credential(), &section)
}
