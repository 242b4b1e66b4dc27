use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::ValidationError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Backing store unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Post not found")]
    NotFound,

    #[error("Internal server error")]
    Internal(String),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Database(_)
            | Error::Migrate(_)
            | Error::Config(_)
            | Error::Io(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Connection-level failures mean the backing store could not be reached at all.
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => Error::UpstreamUnavailable(err.to_string()),
            other => Error::Database(other),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation(ValidationError::InvalidBody(rejection.body_text()))
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::Validation(ValidationError::InvalidQuery(rejection.body_text()))
    }
}

// A path segment that is not a post id cannot name an existing post.
impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(_) => Error::NotFound,
            other => Error::Internal(other.body_text()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Error::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Database error".to_string()
            }
            Error::UpstreamUnavailable(e) => {
                tracing::error!("Backing store unavailable: {}", e);
                "Backing store unavailable".to_string()
            }
            Error::Migrate(e) => {
                tracing::error!("Migration error: {}", e);
                "Internal server error".to_string()
            }
            Error::Config(e) => {
                tracing::error!("Configuration error: {}", e);
                "Internal server error".to_string()
            }
            Error::Io(e) => {
                tracing::error!("IO error: {}", e);
                "IO error".to_string()
            }
            Error::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            Error::Validation(e) => e.to_string(),
            Error::NotFound => "Post not found".to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_upstream_unavailable() {
        let err: Error = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, Error::UpstreamUnavailable(_)));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_row_not_found_stays_database_error() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::Database(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_status() {
        let err = Error::from(ValidationError::TitleRequired);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "Title is required");
    }
}
