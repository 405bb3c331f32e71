use serde::Serialize;

use super::Credential;
use crate::types::Role;

pub const LOGIN_PATH: &str = "/login";
pub const PENDING_APPROVAL_PATH: &str = "/pending-approval";
pub const ADMIN_DASHBOARD_PATH: &str = "/dashboard/admin";
pub const MENTOR_DASHBOARD_PATH: &str = "/dashboard/mentor";
pub const MENTEE_DASHBOARD_PATH: &str = "/dashboard/mentee";

/// Where a freshly authenticated user lands
pub fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_DASHBOARD_PATH,
        Role::Mentor => MENTOR_DASHBOARD_PATH,
        Role::Mentee => MENTEE_DASHBOARD_PATH,
    }
}

/// A role-restricted slice of the application, shared by pages and API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Area {
    Admin,
    Mentor,
    Mentee,
}

impl Area {
    pub fn required_role(&self) -> Role {
        match self {
            Area::Admin => Role::Admin,
            Area::Mentor => Role::Mentor,
            Area::Mentee => Role::Mentee,
        }
    }

    pub fn page_prefix(&self) -> &'static str {
        landing_path(self.required_role())
    }

    pub fn api_prefix(&self) -> &'static str {
        match self {
            Area::Admin => "/api/admin",
            Area::Mentor => "/api/mentor",
            Area::Mentee => "/api/mentee",
        }
    }

    /// Mentor functionality additionally requires admin approval
    pub fn requires_approval(&self) -> bool {
        matches!(self, Area::Mentor)
    }
}

/// Where a page request goes when a rule refuses it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyAction {
    RedirectToLogin,
    RedirectToPendingApproval,
}

impl DenyAction {
    pub fn target(&self) -> &'static str {
        match self {
            DenyAction::RedirectToLogin => LOGIN_PATH,
            DenyAction::RedirectToPendingApproval => PENDING_APPROVAL_PATH,
        }
    }
}

/// Why an authenticated caller may not use an area
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Denial {
    #[error("insufficient role")]
    InsufficientRole,
    #[error("mentor account awaiting approval")]
    UnapprovedMentor,
}

impl Denial {
    pub fn message(&self) -> &'static str {
        match self {
            Denial::InsufficientRole => "Your role does not permit this action",
            Denial::UnapprovedMentor => "Your mentor account is awaiting admin approval",
        }
    }

    pub fn action(&self) -> DenyAction {
        match self {
            Denial::InsufficientRole => DenyAction::RedirectToLogin,
            Denial::UnapprovedMentor => DenyAction::RedirectToPendingApproval,
        }
    }
}

/// One row of the static rule table
#[derive(Debug, Clone, Copy)]
pub struct AccessRule {
    pub path_prefix: &'static str,
    /// `None` accepts any role
    pub required_role: Option<Role>,
    pub predicate: Option<fn(&Credential) -> bool>,
    pub on_deny: Denial,
}

impl AccessRule {
    pub fn matches(&self, path: &str) -> bool {
        path_has_prefix(path, self.path_prefix)
    }

    pub fn check(&self, credential: &Credential) -> Result<(), Denial> {
        if let Some(role) = self.required_role {
            if credential.role != role {
                return Err(self.on_deny);
            }
        }
        if let Some(predicate) = self.predicate {
            if !predicate(credential) {
                return Err(self.on_deny);
            }
        }
        Ok(())
    }
}

fn approved_if_mentor(credential: &Credential) -> bool {
    !credential.is_unapproved_mentor()
}

const fn role_rule(path_prefix: &'static str, role: Role) -> AccessRule {
    AccessRule {
        path_prefix,
        required_role: Some(role),
        predicate: None,
        on_deny: Denial::InsufficientRole,
    }
}

const fn approval_rule(path_prefix: &'static str) -> AccessRule {
    AccessRule {
        path_prefix,
        required_role: None,
        predicate: Some(approved_if_mentor),
        on_deny: Denial::UnapprovedMentor,
    }
}

/// Ordered rule table; every path matching at least one row needs a credential.
/// The pending-approval page sits outside `/dashboard`, so the approval rows can
/// never redirect it onto itself.
pub static RULES: &[AccessRule] = &[
    role_rule("/dashboard/admin", Role::Admin),
    role_rule("/api/admin", Role::Admin),
    role_rule("/dashboard/mentor", Role::Mentor),
    role_rule("/api/mentor", Role::Mentor),
    role_rule("/dashboard/mentee", Role::Mentee),
    role_rule("/api/mentee", Role::Mentee),
    approval_rule("/dashboard"),
    approval_rule("/api/mentor"),
];

/// Segment-aware prefix test: `/api/admin` covers `/api/admin/users`, not `/api/administrators`
pub fn path_has_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub fn is_protected(path: &str) -> bool {
    RULES.iter().any(|rule| rule.matches(path))
}

/// Handler-side policy: the same predicates the gate applies to an area's prefixes
pub fn authorize(credential: &Credential, area: Area) -> Result<(), Denial> {
    if credential.role != area.required_role() {
        return Err(Denial::InsufficientRole);
    }
    if area.requires_approval() && credential.is_unapproved_mentor() {
        return Err(Denial::UnapprovedMentor);
    }
    Ok(())
}
