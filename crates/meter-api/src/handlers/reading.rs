//! Meter reading handlers
//!
//! HTTP handlers for consumption queries and reading maintenance.

use crate::dto::{parse_reading_body, MeterYearMonthPath, MeterYearPath};
use actix_web::{web, HttpResponse};
use meter_core::AppError;
use meter_services::ReadingService;
use tracing::{debug, instrument};

/// Yearly consumption total for a meter
///
/// GET /api/v1/meters/{id}/consumption/aggregation/{year}
#[instrument(skip(service))]
pub async fn aggregate_consumption(
    service: web::Data<ReadingService>,
    path: web::Path<MeterYearPath>,
) -> Result<HttpResponse, AppError> {
    let MeterYearPath { id, year } = path.into_inner();
    debug!(id, year, "Aggregating consumption");

    let view = service.aggregate_by_meter_and_year(id, year).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Monthly consumption for a meter and year
///
/// GET /api/v1/meters/{id}/{year}
#[instrument(skip(service))]
pub async fn find_by_year(
    service: web::Data<ReadingService>,
    path: web::Path<MeterYearPath>,
) -> Result<HttpResponse, AppError> {
    let MeterYearPath { id, year } = path.into_inner();
    debug!(id, year, "Finding readings for year");

    let view = service.find_by_meter_and_year(id, year).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Consumption for a single month
///
/// GET /api/v1/meters/{id}/{year}/{month}
#[instrument(skip(service))]
pub async fn find_by_month(
    service: web::Data<ReadingService>,
    path: web::Path<MeterYearMonthPath>,
) -> Result<HttpResponse, AppError> {
    let MeterYearMonthPath { id, year, month } = path.into_inner();
    debug!(id, year, month, "Finding reading for month");

    let view = service
        .find_by_meter_and_year_and_month(id, year, month)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Create a reading
///
/// POST /api/v1/meters/reading
#[instrument(skip(service, body))]
pub async fn create_reading(
    service: web::Data<ReadingService>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let input = parse_reading_body(&body)?;
    let created = service.save(input).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Replace the consumption of an existing reading
///
/// PUT /api/v1/meters/reading
#[instrument(skip(service, body))]
pub async fn update_reading(
    service: web::Data<ReadingService>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let input = parse_reading_body(&body)?;
    let updated = service.update(input).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete a reading
///
/// DELETE /api/v1/meters/reading/{id}
#[instrument(skip(service))]
pub async fn delete_reading(
    service: web::Data<ReadingService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let reading_id = path.into_inner();
    service.delete(reading_id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Configure meter reading routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/meters")
            .route("/reading", web::post().to(create_reading))
            .route("/reading", web::put().to(update_reading))
            .route("/reading/{id}", web::delete().to(delete_reading))
            .route(
                "/{id}/consumption/aggregation/{year}",
                web::get().to(aggregate_consumption),
            )
            .route("/{id}/{year}", web::get().to(find_by_year))
            .route("/{id}/{year}/{month}", web::get().to(find_by_month)),
    );
}
