//! Health check handler

use crate::dto::HealthResponse;
use actix_web::{web, HttpResponse};

/// Health check endpoint
///
/// GET /api/v1/health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "meter-readings".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Configure health route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
