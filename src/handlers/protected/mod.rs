// handlers/protected/mod.rs - Handlers requiring an authenticated caller
//
// The access gate has admitted the request; each handler takes `AuthUser`,
// which answers 401 if no credential reached it. Area handlers (mentor,
// mentee) re-check the role with `AuthUser::require` before touching data.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::ApiError;
use crate::types::ParseEnumError;

pub mod auth;
pub mod mentee;
pub mod mentor;
pub mod messages;
pub mod notifications;
pub mod profile;

/// `?status=` filter shared by list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

impl StatusQuery {
    pub fn parse<T>(&self) -> Result<Option<T>, ApiError>
    where
        T: FromStr<Err = ParseEnumError>,
    {
        parse_optional(self.status.as_deref(), "status")
    }
}

/// Case-insensitive enum parse of an optional value; blank means absent
pub fn parse_optional<T>(value: Option<&str>, field: &str) -> Result<Option<T>, ApiError>
where
    T: FromStr<Err = ParseEnumError>,
{
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| ApiError::invalid_field(field, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConnectionStatus, SessionStatus};

    #[test]
    fn status_query_parsing() {
        let query = StatusQuery { status: Some("accepted".into()) };
        assert_eq!(query.parse::<ConnectionStatus>().unwrap(), Some(ConnectionStatus::Accepted));

        let query = StatusQuery { status: Some("  ".into()) };
        assert_eq!(query.parse::<SessionStatus>().unwrap(), None);

        let query = StatusQuery::default();
        assert_eq!(query.parse::<SessionStatus>().unwrap(), None);

        let query = StatusQuery { status: Some("approved".into()) };
        let err = query.parse::<ConnectionStatus>().unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}
