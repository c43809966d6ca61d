//! Fine recovery: payment settlement, revenue distribution, and period
//! reports.
//!
//! For each validated payment the beneficiary resolver projects the case's
//! actor assignments and the active special-role holders into a
//! [`domain::BeneficiarySet`], the distribution engine computes an immutable
//! [`distribution::DistributionResult`], and the report module folds results
//! into per-agent, per-service, and per-center totals.

pub mod distribution;
pub mod domain;
pub mod intake;
pub mod ledger;
pub mod report;
pub mod resolver;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use distribution::{
    DistributionEngine, DistributionError, DistributionPolicy, DistributionResult,
    IndividualShare, PolicyError,
};
pub use domain::{
    ActorAssignment, AgentId, AgentRef, BeneficiaryRole, BeneficiarySet, Case, CaseId, CaseRole,
    Payment, PaymentId, PaymentStatus, SpecialRole, SpecialRoleWindow,
};
pub use intake::{ImportError, PaymentCsvImporter};
pub use ledger::{
    AuditEntry, AuditError, AuditSink, AuditTrail, CaseDirectory, Destination, DirectoryError,
    DistributionLedger, DistributionRecord, DistributionRecordView, IndividualShareView,
    LedgerError, PoolKind, SpecialRoleRegistry,
};
pub use report::{
    AggregationView, AgentTotalsEntry, CenterTotalsEntry, DistributionArena, EntityTotals,
    PeriodAggregator, PeriodTotals, PoolTotals, RecoveryReportSummary, ReportPeriod,
    ServiceTotalsEntry,
};
pub use resolver::{BeneficiaryResolver, CaseActors, ResolutionError};
pub use router::{recovery_router, CaseRegistration};
pub use service::{RecoveryService, RecoveryServiceError};
