//! Integration tests for the HTTP surface that do not require a live
//! database: parameter validation, ingest counters, and middleware
//! behavior. Handlers under test reject bad input before any query runs.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::{build_test_app, lazy_pool};

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn ingest_stats_starts_at_zero() {
    let app = build_test_app(lazy_pool());

    let response = app
        .oneshot(
            Request::get("/api/v1/ingest/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["received"], 0);
    assert_eq!(json["data"]["stored"], 0);
    assert_eq!(json["data"]["alerts"], 0);
}

#[tokio::test]
async fn unknown_vital_type_is_rejected() {
    let app = build_test_app(lazy_pool());

    let response = app
        .oneshot(
            Request::get("/api/v1/patients/p1/vitals?type=pulseOx")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn time_range_requires_both_bounds() {
    let app = build_test_app(lazy_pool());

    let response = app
        .oneshot(
            Request::get("/api/v1/patients/p1/vitals?type=heartRate&start=2026-01-01T00:00:00Z")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn trend_rejects_out_of_range_window() {
    let app = build_test_app(lazy_pool());

    let response = app
        .oneshot(
            Request::get("/api/v1/patients/p1/vitals/trend?type=heartRate&days=365")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn critical_rejects_out_of_range_lookback() {
    let app = build_test_app(lazy_pool());

    let response = app
        .oneshot(
            Request::get("/api/v1/vitals/critical?hours=500")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn threshold_update_with_inverted_range_is_rejected() {
    let app = build_test_app(lazy_pool());

    let body = serde_json::json!([{
        "type": "heartRate",
        "normalMin": 100.0,
        "normalMax": 60.0,
        "criticalMin": 40.0,
        "criticalMax": 120.0
    }]);

    let response = app
        .oneshot(
            Request::put("/api/v1/thresholds/global")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn empty_threshold_update_is_rejected() {
    let app = build_test_app(lazy_pool());

    let response = app
        .oneshot(
            Request::put("/api/v1/patients/p1/thresholds")
                .header("content-type", "application/json")
                .body(Body::from("[]"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = build_test_app(lazy_pool());

    let response = app
        .oneshot(
            Request::get("/api/v1/ingest/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app(lazy_pool());

    let response = app
        .oneshot(
            Request::get("/api/v1/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
