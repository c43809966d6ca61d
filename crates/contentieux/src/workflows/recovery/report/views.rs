use rust_decimal::Decimal;
use serde::Serialize;

use super::super::domain::AgentId;
use super::{AggregationView, PoolTotals, ReportPeriod};

#[derive(Debug, Clone, Serialize)]
pub struct AgentTotalsEntry {
    pub agent_id: AgentId,
    pub agent_name: String,
    pub service_code: String,
    pub center_code: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceTotalsEntry {
    pub service_code: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CenterTotalsEntry {
    pub center_code: String,
    pub total: Decimal,
}

/// Per-entity rows for whichever view the template requested.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EntityTotals {
    Agents(Vec<AgentTotalsEntry>),
    Services(Vec<ServiceTotalsEntry>),
    Centers(Vec<CenterTotalsEntry>),
}

/// Serialized report for one period and view. Pooled columns are identical
/// across views; only the entity rows change.
#[derive(Debug, Clone, Serialize)]
pub struct RecoveryReportSummary {
    pub period: ReportPeriod,
    pub view: AggregationView,
    pub view_label: &'static str,
    pub payments_counted: usize,
    pub payments_skipped: usize,
    pub pools: PoolTotals,
    pub entities: EntityTotals,
}
