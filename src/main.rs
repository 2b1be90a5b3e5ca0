//! Meter Readings Server
//!
//! Stores monthly energy consumption per meter and serves yearly totals and
//! monthly breakdowns over HTTP.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use meter_core::{AppConfig, SystemClock};
use meter_db::open_store;
use meter_services::ReadingService;
use std::env;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "meter_readings={lvl},meter_api={lvl},meter_services={lvl},meter_db={lvl},actix_web=info,sqlx=warn",
            lvl = log_level
        ))
    });

    let json = env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    info!(
        "Starting Meter Readings server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = AppConfig::load().context("Failed to load configuration")?;

    let store = open_store(&config)
        .await
        .context("Failed to initialise storage")?;
    let service = web::Data::new(ReadingService::new(store, Arc::new(SystemClock)));

    let bind_addr = config.server_addr();
    let workers = config.server.workers;
    let cors_origins = config.cors_origins();

    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, workers
    );

    HttpServer::new(move || {
        let origins = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                origin
                    .to_str()
                    .map(|o| origins.iter().any(|allowed| allowed == o))
                    .unwrap_or(false)
            })
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .app_data(service.clone())
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(meter_api::configure)
            // Root redirect to health
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/api/v1/health"))
                        .finish()
                }),
            )
    })
    .workers(workers)
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await
    .context("HTTP server error")
}
