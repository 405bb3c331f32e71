pub mod connection_service;
pub mod matching;
pub mod message_service;
pub mod notification_service;
pub mod profile_service;
pub mod progress;
pub mod session_service;
pub mod stats_service;
pub mod user_service;

pub use connection_service::ConnectionService;
pub use message_service::MessageService;
pub use notification_service::NotificationService;
pub use profile_service::{ProfileService, ProfileUpdate};
pub use session_service::{NewSession, SessionService, SessionUpdate};
pub use stats_service::StatsService;
pub use user_service::{NewUser, UserService};

use crate::database::DatabaseError;
use crate::error::ApiError;

/// Outcome of a data-access operation that can also fail on domain rules
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{field}: {message}")]
    Invalid { field: &'static str, message: String },
}

impl ServiceError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ServiceError::Invalid {
            field,
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Database(err.into())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Database(db) => db.into(),
            ServiceError::NotFound(msg) => ApiError::not_found(msg),
            ServiceError::Conflict(msg) => ApiError::conflict(msg),
            ServiceError::Forbidden(msg) => ApiError::forbidden(msg),
            ServiceError::Invalid { field, message } => ApiError::invalid_field(field, message),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn service_errors_map_to_http() {
        let cases = [
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServiceError::Conflict("x".into()), StatusCode::CONFLICT),
            (ServiceError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (ServiceError::invalid("rating", "out of range"), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn invalid_names_the_field() {
        let err: ApiError = ServiceError::invalid("rating", "must be between 1 and 5").into();
        assert_eq!(err.to_json()["field_errors"]["rating"], "must be between 1 and 5");
    }
}
