use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Role;

/// Decoded proof of identity attached to a request.
///
/// A credential is never updated in place: approving a mentor or changing a
/// role only takes effect once a new credential is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub subject_id: Uuid,
    pub role: Role,
    pub is_approved: bool,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// A credential is usable strictly before its expiry instant
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn is_unapproved_mentor(&self) -> bool {
        self.role == Role::Mentor && !self.is_approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn expiry_is_exclusive() {
        let now = Utc::now();
        let credential = Credential {
            subject_id: Uuid::new_v4(),
            role: Role::Mentee,
            is_approved: true,
            issued_at: now - Duration::hours(1),
            expires_at: now,
        };
        assert!(credential.is_valid_at(now - Duration::seconds(1)));
        assert!(!credential.is_valid_at(now));
        assert!(!credential.is_valid_at(now + Duration::seconds(1)));
    }
}
