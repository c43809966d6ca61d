use crate::infra::{deserialize_date, AppState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

use contentieux::error::AppError;
use contentieux::workflows::recovery::{
    recovery_router, AggregationView, AuditSink, CaseDirectory, DistributionLedger, Payment,
    PaymentCsvImporter, RecoveryReportSummary, RecoveryService, ReportPeriod,
    SpecialRoleRegistry,
};

#[derive(Debug, Deserialize)]
pub(crate) struct RecoveryReportRequest {
    #[serde(deserialize_with = "deserialize_date")]
    pub(crate) period_start: NaiveDate,
    #[serde(deserialize_with = "deserialize_date")]
    pub(crate) period_end: NaiveDate,
    #[serde(default)]
    pub(crate) view: Option<AggregationView>,
    #[serde(default)]
    pub(crate) payments: Vec<Payment>,
    #[serde(default)]
    pub(crate) payments_csv: Option<String>,
}

pub(crate) fn with_recovery_routes<D, S, L, A>(
    service: Arc<RecoveryService<D, S, L, A>>,
) -> Router
where
    D: CaseDirectory + 'static,
    S: SpecialRoleRegistry + 'static,
    L: DistributionLedger + 'static,
    A: AuditSink + 'static,
{
    let report = Router::new()
        .route(
            "/api/v1/recovery/report",
            post(recovery_report_endpoint::<D, S, L, A>),
        )
        .with_state(service.clone());

    recovery_router(service)
        .merge(report)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Build a period report from inline payments, an attached CSV export, or
/// both. The fold runs on a blocking worker so report-sized batches never
/// stall the request path.
pub(crate) async fn recovery_report_endpoint<D, S, L, A>(
    State(service): State<Arc<RecoveryService<D, S, L, A>>>,
    Json(payload): Json<RecoveryReportRequest>,
) -> Result<Json<RecoveryReportSummary>, AppError>
where
    D: CaseDirectory + 'static,
    S: SpecialRoleRegistry + 'static,
    L: DistributionLedger + 'static,
    A: AuditSink + 'static,
{
    let RecoveryReportRequest {
        period_start,
        period_end,
        view,
        mut payments,
        payments_csv,
    } = payload;

    if let Some(csv) = payments_csv {
        let imported = PaymentCsvImporter::from_reader(Cursor::new(csv.into_bytes()))?;
        payments.extend(imported);
    }

    let period = ReportPeriod {
        from: period_start,
        to: period_end,
    };
    let view = view.unwrap_or(AggregationView::ByAgent);

    let summary = tokio::task::spawn_blocking(move || {
        service.accumulate(period, &payments).summary(view)
    })
    .await?;

    Ok(Json(summary))
}
