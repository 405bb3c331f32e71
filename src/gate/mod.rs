//! Access gate: decides, before any handler runs, whether a request may
//! proceed, must be redirected, or must be rejected.
//!
//! Evaluation is a pure function of the path, the request kind, the optional
//! credential and the current time. Rules are consulted in table order and the
//! first refusal wins; paths that match no rule are allowed for everyone.

pub mod credential;
pub mod rules;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};

pub use credential::Credential;
pub use rules::{
    authorize, landing_path, Area, Denial, DenyAction, LOGIN_PATH, PENDING_APPROVAL_PATH,
};

/// Pages answer refusals with redirects, the API with status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Page,
    Api,
}

impl RequestKind {
    pub fn from_path(path: &str) -> Self {
        if rules::path_has_prefix(path, "/api") {
            RequestKind::Api
        } else {
            RequestKind::Page
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectTo(&'static str),
    Reject(StatusCode),
}

impl GateDecision {
    pub fn is_allow(&self) -> bool {
        matches!(self, GateDecision::Allow)
    }
}

/// Evaluate one request against the rule table.
///
/// An expired credential is dropped before any rule runs, so it behaves exactly
/// like a missing one.
pub fn evaluate(
    path: &str,
    kind: RequestKind,
    credential: Option<&Credential>,
    now: DateTime<Utc>,
) -> GateDecision {
    let credential = credential.filter(|c| c.is_valid_at(now));

    if path == LOGIN_PATH {
        return match credential {
            Some(c) => GateDecision::RedirectTo(landing_path(c.role)),
            None => GateDecision::Allow,
        };
    }

    let mut matching = rules::RULES.iter().filter(|rule| rule.matches(path)).peekable();
    if matching.peek().is_none() {
        return GateDecision::Allow;
    }

    let Some(credential) = credential else {
        return match kind {
            RequestKind::Page => GateDecision::RedirectTo(LOGIN_PATH),
            RequestKind::Api => GateDecision::Reject(StatusCode::UNAUTHORIZED),
        };
    };

    for rule in matching {
        if let Err(denial) = rule.check(credential) {
            return deny(denial, kind);
        }
    }

    GateDecision::Allow
}

fn deny(denial: Denial, kind: RequestKind) -> GateDecision {
    match kind {
        RequestKind::Page => GateDecision::RedirectTo(denial.action().target()),
        RequestKind::Api => GateDecision::Reject(StatusCode::FORBIDDEN),
    }
}
