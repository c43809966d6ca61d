use super::common::*;
use crate::workflows::recovery::domain::{CaseRole, Payment, PaymentStatus};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use rust_decimal_macros::dec;
use serde_json::json;
use tower::ServiceExt;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serializes")))
        .expect("request builds")
}

fn registration_payload() -> serde_json::Value {
    let case = sample_case();
    let assignments = vec![
        assignment(&case.id, chief_dupont(), CaseRole::Chief),
        assignment(&case.id, seizing_moreau(), CaseRole::SeizingAgent),
    ];
    json!({ "case": case, "assignments": assignments })
}

fn settlement_payload(payment: &Payment) -> serde_json::Value {
    serde_json::to_value(payment).expect("serializes")
}

#[tokio::test]
async fn register_settle_and_fetch_round_trip() {
    let (service, _directory, registry, _ledger, _audit) = build_service();
    registry.appoint(dg_window(date(2024, 1, 1), None));
    let router = recovery_router_with_service(service);

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/recovery/cases",
            registration_payload(),
        ))
        .await
        .expect("route responds");
    assert_status(&response, StatusCode::CREATED);

    let paid = payment("enc-001", dec!(1_000_000), date(2024, 2, 10));
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/recovery/payments",
            settlement_payload(&paid),
        ))
        .await
        .expect("route responds");
    assert_status(&response, StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["payment_id"], "enc-001");
    assert_eq!(body["chiefs_pool"], "101250.00");
    // 1 chief + DG in the chiefs pool, 1 seizing agent
    assert_eq!(body["individual_shares"].as_array().expect("array").len(), 3);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/recovery/payments/enc-001/distribution")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route responds");
    assert_status(&response, StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["seizing_pool"], "236250.00");
}

#[tokio::test]
async fn duplicate_case_registration_conflicts() {
    let (service, _directory, _registry, _ledger, _audit) = build_service();
    let router = recovery_router_with_service(service);

    let first = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/recovery/cases",
            registration_payload(),
        ))
        .await
        .expect("route responds");
    assert_status(&first, StatusCode::CREATED);

    let second = router
        .oneshot(json_request(
            "POST",
            "/api/v1/recovery/cases",
            registration_payload(),
        ))
        .await
        .expect("route responds");
    assert_status(&second, StatusCode::CONFLICT);
}

#[tokio::test]
async fn settling_against_an_unknown_case_is_unprocessable() {
    let (service, _directory, _registry, _ledger, _audit) = build_service();
    let router = recovery_router_with_service(service);

    let paid = payment("enc-001", dec!(500), date(2024, 2, 10));
    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/recovery/payments",
            settlement_payload(&paid),
        ))
        .await
        .expect("route responds");
    assert_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn pending_payment_is_unprocessable() {
    let (service, directory, _registry, _ledger, _audit) = build_service();
    seed_standard_case(&directory);
    let router = recovery_router_with_service(service);

    let mut pending = payment("enc-001", dec!(500), date(2024, 2, 10));
    pending.status = PaymentStatus::Pending;
    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/recovery/payments",
            settlement_payload(&pending),
        ))
        .await
        .expect("route responds");
    assert_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn double_settlement_conflicts() {
    let (service, directory, _registry, _ledger, _audit) = build_service();
    seed_standard_case(&directory);
    let router = recovery_router_with_service(service);

    let paid = payment("enc-001", dec!(500), date(2024, 2, 10));
    let first = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/recovery/payments",
            settlement_payload(&paid),
        ))
        .await
        .expect("route responds");
    assert_status(&first, StatusCode::CREATED);

    let second = router
        .oneshot(json_request(
            "POST",
            "/api/v1/recovery/payments",
            settlement_payload(&paid),
        ))
        .await
        .expect("route responds");
    assert_status(&second, StatusCode::CONFLICT);
}

#[tokio::test]
async fn missing_distribution_is_not_found() {
    let (service, _directory, _registry, _ledger, _audit) = build_service();
    let router = recovery_router_with_service(service);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/recovery/payments/enc-none/distribution")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route responds");
    assert_status(&response, StatusCode::NOT_FOUND);
}
