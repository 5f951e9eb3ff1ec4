use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::{debug, error, info, warn};
use serde::Serialize;
use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request data
    #[error("{message}")]
    BadRequest { message: String },

    /// Missing, malformed or expired credentials
    #[error("{message}")]
    Unauthenticated { message: String },

    #[error("{resource} with ID {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("{message}")]
    Conflict { message: String },

    /// No database connection could be acquired in time
    #[error("Service temporarily unavailable")]
    ServiceUnavailable,

    #[error("Failed to {operation}")]
    Internal { operation: String },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Error body, same shape as the success/message responses.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest { message: message.into() }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::Unauthenticated { message: message.into() }
    }

    /// Message safe to return to the client.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Database(sqlx::Error::RowNotFound) => "Resource not found".to_string(),
            ApiError::Database(sqlx::Error::Database(db_err)) => match db_err.kind() {
                ErrorKind::UniqueViolation => "Resource already exists".to_string(),
                ErrorKind::ForeignKeyViolation => "Referenced resource does not exist".to_string(),
                ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                    "Invalid field value".to_string()
                }
                _ => "Internal server error".to_string(),
            },
            ApiError::Database(sqlx::Error::PoolTimedOut) => {
                ApiError::ServiceUnavailable.to_string()
            }
            ApiError::Database(_) | ApiError::Internal { .. } => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Database(err) => match err {
                sqlx::Error::RowNotFound => StatusCode::NOT_FOUND,
                sqlx::Error::PoolTimedOut => StatusCode::SERVICE_UNAVAILABLE,
                sqlx::Error::Database(db_err) => match db_err.kind() {
                    ErrorKind::UniqueViolation => StatusCode::CONFLICT,
                    ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation => StatusCode::BAD_REQUEST,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                },
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else if status == StatusCode::CONFLICT || matches!(self, ApiError::Database(_)) {
            warn!("Database constraint error: {}", self);
        } else if status == StatusCode::UNAUTHORIZED {
            info!("Authentication error: {}", self);
        } else {
            debug!("Client error: {}", self);
        }

        HttpResponse::build(status).json(ErrorResponse {
            success: false,
            message: self.user_message(),
        })
    }
}
