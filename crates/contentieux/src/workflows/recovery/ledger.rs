use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::distribution::DistributionResult;
use super::domain::{
    ActorAssignment, AgentId, BeneficiaryRole, Case, CaseId, PaymentId, SpecialRole,
    SpecialRoleWindow,
};

/// Read surface over the case-management collaborator, plus the thin write
/// path its workflows use to register files.
pub trait CaseDirectory: Send + Sync {
    fn case(&self, id: &CaseId) -> Result<Option<Case>, DirectoryError>;
    fn case_actors(&self, id: &CaseId) -> Result<Vec<ActorAssignment>, DirectoryError>;
    fn register(&self, case: Case, assignments: Vec<ActorAssignment>)
        -> Result<(), DirectoryError>;
}

/// Authoritative table of special-role activation windows.
///
/// Implementations return every window covering the query date; detecting and
/// refusing duplicate holders is the resolver's job, never the store's.
pub trait SpecialRoleRegistry: Send + Sync {
    fn active_windows(
        &self,
        role: SpecialRole,
        on: NaiveDate,
    ) -> Result<Vec<SpecialRoleWindow>, DirectoryError>;
}

/// Error enumeration for directory and registry failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("case already registered")]
    Conflict,
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Distribution results persisted per payment, consumed by reports and
/// audits.
pub trait DistributionLedger: Send + Sync {
    fn record(&self, record: DistributionRecord) -> Result<DistributionRecord, LedgerError>;
    fn fetch(&self, payment_id: &PaymentId) -> Result<Option<DistributionRecord>, LedgerError>;
}

/// Error enumeration for ledger failures.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("payment already settled")]
    Conflict,
    #[error("no distribution recorded for payment")]
    NotFound,
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// One settled payment as stored by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionRecord {
    pub payment_id: PaymentId,
    pub settled_on: NaiveDate,
    pub result: DistributionResult,
}

impl DistributionRecord {
    pub fn view(&self) -> DistributionRecordView {
        DistributionRecordView {
            payment_id: self.payment_id.clone(),
            settled_on: self.settled_on,
            amount: self.result.amount,
            indicator_share: self.result.indicator_share,
            net_product: self.result.net_product,
            legal_fund_share: self.result.legal_fund_share,
            treasury_share: self.result.treasury_share,
            entitled_net_product: self.result.entitled_net_product,
            chiefs_pool: self.result.chiefs_pool,
            seizing_pool: self.result.seizing_pool,
            mutual_share: self.result.mutual_share,
            common_fund_share: self.result.common_fund_share,
            incentive_share: self.result.incentive_share,
            individual_shares: self
                .result
                .individual_shares
                .iter()
                .map(|share| IndividualShareView {
                    agent_id: share.beneficiary.id.clone(),
                    agent_name: share.beneficiary.name.clone(),
                    role: share.role,
                    role_label: share.role.label(),
                    amount: share.amount,
                })
                .collect(),
        }
    }
}

/// Flattened record shape exposed by the HTTP surface.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionRecordView {
    pub payment_id: PaymentId,
    pub settled_on: NaiveDate,
    pub amount: Decimal,
    pub indicator_share: Decimal,
    pub net_product: Decimal,
    pub legal_fund_share: Decimal,
    pub treasury_share: Decimal,
    pub entitled_net_product: Decimal,
    pub chiefs_pool: Decimal,
    pub seizing_pool: Decimal,
    pub mutual_share: Decimal,
    pub common_fund_share: Decimal,
    pub incentive_share: Decimal,
    pub individual_shares: Vec<IndividualShareView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndividualShareView {
    pub agent_id: AgentId,
    pub agent_name: String,
    pub role: BeneficiaryRole,
    pub role_label: &'static str,
    pub amount: Decimal,
}

/// Trait describing the outbound audit hook; the audit store itself is an
/// external collaborator.
pub trait AuditSink: Send + Sync {
    fn publish(&self, trail: AuditTrail) -> Result<(), AuditError>;
}

/// Audit dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit transport unavailable: {0}")]
    Transport(String),
}

/// Full audit trail for one settlement: one entry per pooled share and per
/// individual share, each carrying the destination, the percentage applied,
/// and the computed amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditTrail {
    pub payment_id: PaymentId,
    pub entries: Vec<AuditEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub destination: Destination,
    pub percentage: Decimal,
    pub amount: Decimal,
}

/// Where a share of the collected amount went.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Pool(PoolKind),
    Agent { id: AgentId, role: BeneficiaryRole },
}

/// The fixed organizational pools of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    Indicator,
    LegalFund,
    Treasury,
    Chiefs,
    Seizing,
    Mutual,
    CommonFund,
    Incentive,
}

impl PoolKind {
    pub const fn code(self) -> &'static str {
        match self {
            PoolKind::Indicator => "indicator",
            PoolKind::LegalFund => "legal_fund",
            PoolKind::Treasury => "treasury",
            PoolKind::Chiefs => "chiefs",
            PoolKind::Seizing => "seizing",
            PoolKind::Mutual => "mutual",
            PoolKind::CommonFund => "common_fund",
            PoolKind::Incentive => "incentive",
        }
    }
}
