use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::distribution::DistributionError;
use super::domain::{ActorAssignment, Case, Payment, PaymentId};
use super::ledger::{
    AuditSink, CaseDirectory, DirectoryError, DistributionLedger, DistributionRecord, LedgerError,
    SpecialRoleRegistry,
};
use super::resolver::ResolutionError;
use super::service::{RecoveryService, RecoveryServiceError};

/// Router builder exposing HTTP endpoints for case registration, payment
/// settlement, and distribution lookup.
pub fn recovery_router<D, S, L, A>(service: Arc<RecoveryService<D, S, L, A>>) -> Router
where
    D: CaseDirectory + 'static,
    S: SpecialRoleRegistry + 'static,
    L: DistributionLedger + 'static,
    A: AuditSink + 'static,
{
    Router::new()
        .route(
            "/api/v1/recovery/cases",
            post(register_case_handler::<D, S, L, A>),
        )
        .route(
            "/api/v1/recovery/payments",
            post(settle_handler::<D, S, L, A>),
        )
        .route(
            "/api/v1/recovery/payments/:payment_id/distribution",
            get(distribution_handler::<D, S, L, A>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct CaseRegistration {
    pub case: Case,
    #[serde(default)]
    pub assignments: Vec<ActorAssignment>,
}

pub(crate) async fn register_case_handler<D, S, L, A>(
    State(service): State<Arc<RecoveryService<D, S, L, A>>>,
    axum::Json(registration): axum::Json<CaseRegistration>,
) -> Response
where
    D: CaseDirectory + 'static,
    S: SpecialRoleRegistry + 'static,
    L: DistributionLedger + 'static,
    A: AuditSink + 'static,
{
    let case_id = registration.case.id.clone();
    match service.register_case(registration.case, registration.assignments) {
        Ok(()) => {
            let payload = json!({ "case_id": case_id, "status": "registered" });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(RecoveryServiceError::Directory(DirectoryError::Conflict)) => {
            let payload = json!({ "error": "case already registered" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn settle_handler<D, S, L, A>(
    State(service): State<Arc<RecoveryService<D, S, L, A>>>,
    axum::Json(payment): axum::Json<Payment>,
) -> Response
where
    D: CaseDirectory + 'static,
    S: SpecialRoleRegistry + 'static,
    L: DistributionLedger + 'static,
    A: AuditSink + 'static,
{
    match service.settle(&payment) {
        Ok(result) => {
            let record = DistributionRecord {
                payment_id: payment.id,
                settled_on: payment.date,
                result,
            };
            (StatusCode::CREATED, axum::Json(record.view())).into_response()
        }
        Err(
            err @ (RecoveryServiceError::PaymentNotValidated { .. }
            | RecoveryServiceError::Distribution(DistributionError::InvalidAmount(_))
            | RecoveryServiceError::Resolution(ResolutionError::CaseNotFound(_))),
        ) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(err @ RecoveryServiceError::Resolution(ResolutionError::DataIntegrity { .. })) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(RecoveryServiceError::Ledger(LedgerError::Conflict)) => {
            let payload = json!({ "error": "payment already settled" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn distribution_handler<D, S, L, A>(
    State(service): State<Arc<RecoveryService<D, S, L, A>>>,
    Path(payment_id): Path<String>,
) -> Response
where
    D: CaseDirectory + 'static,
    S: SpecialRoleRegistry + 'static,
    L: DistributionLedger + 'static,
    A: AuditSink + 'static,
{
    let id = PaymentId(payment_id);
    match service.distribution(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(RecoveryServiceError::Ledger(LedgerError::NotFound)) => {
            let payload = json!({
                "payment_id": id.0,
                "error": "no distribution recorded for payment",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
