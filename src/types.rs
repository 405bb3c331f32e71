/// Shared types used across the codebase
///
/// Every role and status is a closed enum backed by a PostgreSQL enum type,
/// so the stored casing and the code can never drift apart.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role carried in every credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Mentor,
    Mentee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Mentor => "MENTOR",
            Role::Mentee => "MENTEE",
        }
    }
}

/// Lifecycle of a mentor-mentee pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "connection_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Pending => "PENDING",
            ConnectionStatus::Accepted => "ACCEPTED",
            ConnectionStatus::Rejected => "REJECTED",
        }
    }

    /// Only a pending request can be answered
    pub fn can_transition_to(&self, next: ConnectionStatus) -> bool {
        matches!(
            (self, next),
            (ConnectionStatus::Pending, ConnectionStatus::Accepted)
                | (ConnectionStatus::Pending, ConnectionStatus::Rejected)
        )
    }
}

/// Lifecycle of a scheduled mentoring session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "session_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "SCHEDULED",
            SessionStatus::Completed => "COMPLETED",
            SessionStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        matches!(
            (self, next),
            (SessionStatus::Scheduled, SessionStatus::Completed)
                | (SessionStatus::Scheduled, SessionStatus::Cancelled)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "notification_kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    MentorPending,
    MentorApproved,
    MentorRejected,
    ConnectionRequested,
    ConnectionAccepted,
    ConnectionRejected,
    SessionScheduled,
    SessionUpdated,
    MessageReceived,
}

/// Error returned when a query parameter names an unknown variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! impl_case_insensitive_parse {
    ($ty:ty, $kind:literal, [$($variant:expr),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                [$($variant),+]
                    .into_iter()
                    .find(|v: &$ty| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ParseEnumError { kind: $kind, value: s.to_string() })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_case_insensitive_parse!(Role, "role", [Role::Admin, Role::Mentor, Role::Mentee]);
impl_case_insensitive_parse!(
    ConnectionStatus,
    "connection status",
    [ConnectionStatus::Pending, ConnectionStatus::Accepted, ConnectionStatus::Rejected]
);
impl_case_insensitive_parse!(
    SessionStatus,
    "session status",
    [SessionStatus::Scheduled, SessionStatus::Completed, SessionStatus::Cancelled]
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&Role::Mentor).unwrap(), "\"MENTOR\"");
        let parsed: Role = serde_json::from_str("\"MENTEE\"").unwrap();
        assert_eq!(parsed, Role::Mentee);
        assert!(serde_json::from_str::<Role>("\"mentee\"").is_err());
    }

    #[test]
    fn status_parse_ignores_case() {
        assert_eq!("accepted".parse::<ConnectionStatus>(), Ok(ConnectionStatus::Accepted));
        assert_eq!("ACCEPTED".parse::<ConnectionStatus>(), Ok(ConnectionStatus::Accepted));
        assert_eq!(" Completed ".parse::<SessionStatus>(), Ok(SessionStatus::Completed));
        assert!("approved".parse::<ConnectionStatus>().is_err());
    }

    #[test]
    fn connection_transitions() {
        use ConnectionStatus::*;
        assert!(Pending.can_transition_to(Accepted));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Accepted.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Accepted));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn session_transitions() {
        use SessionStatus::*;
        assert!(Scheduled.can_transition_to(Completed));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Scheduled));
        assert!(!Cancelled.can_transition_to(Completed));
    }

    #[test]
    fn display_matches_wire_format() {
        assert_eq!(Role::Admin.to_string(), "ADMIN");
        assert_eq!(SessionStatus::Cancelled.to_string(), "CANCELLED");
    }
}
