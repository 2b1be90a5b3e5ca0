//! API layer for meter readings
//!
//! HTTP handlers exposing the reading service under `/api/v1`.

#![forbid(unsafe_code)]
#![warn(clippy::all, missing_docs)]

pub mod dto;
pub mod handlers;

use actix_web::{error, web, HttpRequest};
use meter_core::AppError;
use tracing::warn;

pub use handlers::{configure_health, configure_readings};

/// Malformed path segments answer 400 in the standard error body
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: error::PathError, req: &HttpRequest| {
        warn!(path = %req.path(), "Invalid path parameter: {}", err);
        AppError::Validation(format!("Invalid path parameter: {}", err)).into()
    })
}

/// Mount every endpoint under `/api/v1`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(path_config())
            .configure(configure_health)
            .configure(configure_readings),
    );
}
