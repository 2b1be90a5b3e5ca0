//! Unified error handling for the meter readings service
//!
//! Three kinds of failure reach callers: bad input (400), a read that
//! matched nothing (404) and everything else (500). Storage and
//! infrastructure variants all collapse into the last kind.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chrono::Utc;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message returned to clients for any unexpected failure
pub const SERVICE_ERROR_MESSAGE: &str = "Service error";

/// Main application error type
///
/// `Validation` and `NotFound` display their message verbatim, because
/// that text is what the client receives.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Client Errors ====================
    /// Malformed or out-of-range input, including tuple conflicts
    #[error("{0}")]
    Validation(String),

    /// A read query matched no rows
    #[error("{0}")]
    NotFound(String),

    // ==================== Database Errors ====================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Database pool error: {0}")]
    Pool(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::Database(_) => "database_error",
            AppError::Pool(_) => "pool_error",
            AppError::Migration(_) => "migration_error",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }

    /// Message safe to show to a client
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) => msg.clone(),
            _ => SERVICE_ERROR_MESSAGE.to_string(),
        }
    }

    /// Whether this is a client-facing validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed with unexpected error");
        }

        let body = json!({
            "status": status.as_u16(),
            "error": self.error_code(),
            "message": self.public_message(),
            "time": Utc::now().to_rfc3339(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Migration(err.to_string())
    }
}
