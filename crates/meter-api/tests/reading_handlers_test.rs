//! HTTP tests for the meter reading endpoints
//!
//! Run the full actix service against the in-memory store with a pinned
//! clock, so future-year checks are deterministic.

use actix_web::{http::StatusCode, test, web, App};
use meter_core::{models::MeterReading, traits::MeterReadingStore, FixedClock};
use meter_db::InMemoryMeterReadingStore;
use meter_services::ReadingService;
use serde_json::{json, Value};
use std::sync::Arc;

const NOW: i32 = 2022;

async fn seeded_store() -> Arc<InMemoryMeterReadingStore> {
    let store = Arc::new(InMemoryMeterReadingStore::with_meters([1, 2, 3]));
    let meter_1 = [11, 14, 9, 23, 16, 18, 12, 17, 8, 25, 20, 22];
    let meter_2 = [7, 15, 12, 19, 13, 11, 16, 24, 29, 8, 14, 15];

    for (i, value) in meter_1.iter().enumerate() {
        store
            .save(MeterReading::new(1, 2020, i as i32 + 1, *value))
            .await
            .unwrap();
    }
    for (i, value) in meter_2.iter().enumerate() {
        store
            .save(MeterReading::new(2, 2020, i as i32 + 1, *value))
            .await
            .unwrap();
    }
    store
}

macro_rules! app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(ReadingService::new(
                    $store,
                    Arc::new(FixedClock(NOW)),
                )))
                .configure(meter_api::configure),
        )
        .await
    };
}

async fn message_of(resp: actix_web::dev::ServiceResponse) -> String {
    let body: Value = test::read_body_json(resp).await;
    body["message"].as_str().unwrap_or_default().to_string()
}

#[actix_web::test]
async fn test_health() {
    let app = app!(seeded_store().await);
    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_aggregate_consumption() {
    let app = app!(seeded_store().await);
    let req = test::TestRequest::get()
        .uri("/api/v1/meters/1/consumption/aggregation/2020")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"year": 2020, "total": 195}));
}

#[actix_web::test]
async fn test_year_without_readings_is_404() {
    let app = app!(seeded_store().await);

    for uri in [
        "/api/v1/meters/1/consumption/aggregation/2021",
        "/api/v1/meters/1/2021",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["message"],
            "Meter readings for meter id 1 and year 2021 does not exist"
        );
        assert_eq!(body["status"], 404);
        assert!(body["time"].is_string());
    }
}

#[actix_web::test]
async fn test_monthly_view_in_calendar_order() {
    let app = app!(seeded_store().await);
    let req = test::TestRequest::get()
        .uri("/api/v1/meters/2/2020")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.starts_with(r#"{"year":2020,"monthlyEnergyConsumption":{"January":7,"February":15"#));
    assert!(text.ends_with(r#""December":15}}"#));
}

#[actix_web::test]
async fn test_single_month() {
    let app = app!(seeded_store().await);
    let req = test::TestRequest::get()
        .uri("/api/v1/meters/1/2020/3")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!({"year": 2020, "monthlyEnergyConsumption": {"March": 9}})
    );
}

#[actix_web::test]
async fn test_invalid_meter_id_is_400() {
    let app = app!(seeded_store().await);

    for uri in [
        "/api/v1/meters/0/consumption/aggregation/2020",
        "/api/v1/meters/0/2020",
        "/api/v1/meters/0/2020/3",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(message_of(resp).await, "Meter id must be greater than 0");
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/meters/12/2020/3")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message_of(resp).await, "Meter with id 12 does not exist");
}

#[actix_web::test]
async fn test_year_bounds_are_400() {
    let app = app!(seeded_store().await);

    let req = test::TestRequest::get()
        .uri("/api/v1/meters/1/-1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        message_of(resp).await,
        "Year must be greater than or equal 0"
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/meters/1/consumption/aggregation/{}", NOW + 1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message_of(resp).await, "Year must not be in the future");
}

#[actix_web::test]
async fn test_month_out_of_range_is_400() {
    let app = app!(seeded_store().await);
    let req = test::TestRequest::get()
        .uri("/api/v1/meters/1/2020/13")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message_of(resp).await, "Month must be between 1 and 12");
}

#[actix_web::test]
async fn test_unparseable_path_is_400() {
    let app = app!(seeded_store().await);
    let req = test::TestRequest::get()
        .uri("/api/v1/meters/abc/2020")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(message_of(resp).await.starts_with("Invalid path parameter"));
}

#[actix_web::test]
async fn test_create_then_read() {
    let app = app!(seeded_store().await);
    let payload = json!({"meterId": 3, "year": 2021, "month": 2, "energyConsumed": 23});

    let req = test::TestRequest::post()
        .uri("/api/v1/meters/reading")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, payload);

    let req = test::TestRequest::get()
        .uri("/api/v1/meters/3/2021/2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["monthlyEnergyConsumption"]["February"], 23);
}

#[actix_web::test]
async fn test_create_duplicate_is_400() {
    let app = app!(seeded_store().await);
    let req = test::TestRequest::post()
        .uri("/api/v1/meters/reading")
        .set_json(json!({"meterId": 1, "year": 2020, "month": 2, "energyConsumed": 5}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        message_of(resp).await,
        "Meter reading for meter id 1, year 2020 and month February already exists"
    );
}

#[actix_web::test]
async fn test_create_missing_fields_and_body() {
    let app = app!(seeded_store().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/meters/reading")
        .set_json(json!({"meterId": 1, "year": 2020, "month": 2}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message_of(resp).await, "Energy consumed must not be null");

    let req = test::TestRequest::post()
        .uri("/api/v1/meters/reading")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message_of(resp).await, "Meter reading must not be null");
}

#[actix_web::test]
async fn test_update_existing_and_missing() {
    let app = app!(seeded_store().await);

    let req = test::TestRequest::put()
        .uri("/api/v1/meters/reading")
        .set_json(json!({"meterId": 1, "year": 2020, "month": 1, "energyConsumed": 50}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/meters/1/consumption/aggregation/2020")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 195 - 11 + 50);

    let req = test::TestRequest::put()
        .uri("/api/v1/meters/reading")
        .set_json(json!({"meterId": 3, "year": 2020, "month": 1, "energyConsumed": 50}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        message_of(resp).await,
        "Meter reading for meter id 3, year 2020 and month January does not exist"
    );
}

#[actix_web::test]
async fn test_delete_reading() {
    let store = seeded_store().await;
    let id = store
        .find_reading(1, 2020, 12)
        .await
        .unwrap()
        .and_then(|r| r.id)
        .unwrap();
    let app = app!(store.clone());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/meters/reading/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!store.exists_reading(id).await.unwrap());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/meters/reading/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        message_of(resp).await,
        format!("Meter reading with id {} does not exist", id)
    );
}
