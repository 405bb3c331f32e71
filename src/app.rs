//! Router assembly. Every route sits behind the access gate; the gate alone
//! decides redirects, 401s and 403s from the request path.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::config::SecurityConfig;
use crate::handlers::{elevated, protected, public};
use crate::middleware::access_gate;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let body_limit = state.config.api.max_request_size_bytes;
    let cors = cors_layer(&state.config.security);

    let router = Router::new()
        .merge(page_routes())
        .merge(auth_public_routes())
        .merge(auth_routes())
        .merge(account_routes())
        .merge(mentor_routes())
        .merge(mentee_routes())
        .merge(admin_routes())
        .route("/health", get(public::health_get))
        // Layers run bottom-up: trace, cors, body limit, then the gate
        .layer(from_fn_with_state(state.clone(), access_gate))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit));

    let router = match cors {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

fn page_routes() -> Router<AppState> {
    use public::pages;

    Router::new()
        .route("/", get(pages::home))
        .route("/login", get(pages::login))
        .route("/register", get(pages::register))
        .route("/pending-approval", get(pages::pending_approval))
        .route("/dashboard", get(pages::dashboard_root))
        .route("/dashboard/admin", get(pages::dashboard))
        .route("/dashboard/admin/*section", get(pages::dashboard_section))
        .route("/dashboard/mentor", get(pages::dashboard))
        .route("/dashboard/mentor/*section", get(pages::dashboard_section))
        .route("/dashboard/mentee", get(pages::dashboard))
        .route("/dashboard/mentee/*section", get(pages::dashboard_section))
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/api/auth/register", post(auth::register_post))
        .route("/api/auth/login", post(auth::login_post))
        .route("/api/auth/logout", post(auth::logout_post))
}

fn auth_routes() -> Router<AppState> {
    use protected::auth;

    Router::new()
        .route("/api/auth/me", get(auth::me_get))
        .route("/api/auth/refresh", post(auth::refresh_post))
}

fn account_routes() -> Router<AppState> {
    use protected::{messages, notifications, profile};

    Router::new()
        .route("/api/profile", get(profile::profile_get).put(profile::profile_put))
        .route("/api/messages", get(messages::inbox_get).post(messages::message_post))
        .route("/api/messages/:peer_id", get(messages::conversation_get))
        .route("/api/notifications", get(notifications::notifications_get))
        .route("/api/notifications/read-all", put(notifications::notifications_read_all_put))
        .route("/api/notifications/:id/read", put(notifications::notification_read_put))
}

fn mentor_routes() -> Router<AppState> {
    use protected::mentor;

    Router::new()
        .route("/api/mentor/connections", get(mentor::connections_get))
        .route("/api/mentor/connections/:id", put(mentor::connection_put))
        .route("/api/mentor/sessions", get(mentor::sessions_get).post(mentor::sessions_post))
        .route("/api/mentor/sessions/:id", put(mentor::session_put))
        .route("/api/mentor/stats", get(mentor::stats_get))
}

fn mentee_routes() -> Router<AppState> {
    use protected::mentee;

    Router::new()
        .route("/api/mentee/mentors", get(mentee::mentors_get))
        .route("/api/mentee/mentors/:id", get(mentee::mentor_get))
        .route("/api/mentee/connections", get(mentee::connections_get).post(mentee::connections_post))
        .route("/api/mentee/sessions", get(mentee::sessions_get))
        .route("/api/mentee/sessions/:id/feedback", put(mentee::feedback_put))
        .route("/api/mentee/progress", get(mentee::progress_get))
}

fn admin_routes() -> Router<AppState> {
    use elevated::admin;

    Router::new()
        .route("/api/admin/users", get(admin::users_get))
        .route("/api/admin/users/:id", delete(admin::user_delete))
        .route("/api/admin/mentors/pending", get(admin::pending_get))
        .route("/api/admin/mentors/:id/approval", put(admin::approval_put))
        .route("/api/admin/stats", get(admin::stats_get))
}

/// Credentialed CORS for the configured origins; `None` when disabled.
/// Unparseable origins are skipped with a warning.
fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn cors_follows_configuration() {
        let mut config = AppConfig::development();
        config.security.enable_cors = false;
        assert!(cors_layer(&config.security).is_none());

        config.security.enable_cors = true;
        config.security.cors_origins = vec!["http://localhost:5173".into(), "bad\norigin".into()];
        assert!(cors_layer(&config.security).is_some());
    }
}
