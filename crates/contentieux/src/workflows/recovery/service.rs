use std::sync::Arc;

use tracing::info;

use super::distribution::{
    DistributionEngine, DistributionError, DistributionPolicy, DistributionResult,
};
use super::domain::{ActorAssignment, BeneficiaryRole, Case, Payment, PaymentId, PaymentStatus};
use super::ledger::{
    AuditEntry, AuditError, AuditSink, AuditTrail, CaseDirectory, Destination, DirectoryError,
    DistributionLedger, DistributionRecord, LedgerError, PoolKind, SpecialRoleRegistry,
};
use super::report::{PeriodAggregator, PeriodTotals, ReportPeriod};
use super::resolver::{BeneficiaryResolver, ResolutionError};

/// Service composing the beneficiary resolver, the distribution engine, the
/// result ledger, and the audit sink.
pub struct RecoveryService<D, S, L, A> {
    directory: Arc<D>,
    resolver: BeneficiaryResolver<D, S>,
    engine: DistributionEngine,
    ledger: Arc<L>,
    audit: Arc<A>,
}

impl<D, S, L, A> RecoveryService<D, S, L, A>
where
    D: CaseDirectory + 'static,
    S: SpecialRoleRegistry + 'static,
    L: DistributionLedger + 'static,
    A: AuditSink + 'static,
{
    pub fn new(
        directory: Arc<D>,
        registry: Arc<S>,
        ledger: Arc<L>,
        audit: Arc<A>,
        policy: DistributionPolicy,
    ) -> Self {
        Self {
            directory: directory.clone(),
            resolver: BeneficiaryResolver::new(directory, registry),
            engine: DistributionEngine::new(policy),
            ledger,
            audit,
        }
    }

    pub fn resolver(&self) -> &BeneficiaryResolver<D, S> {
        &self.resolver
    }

    pub fn engine(&self) -> &DistributionEngine {
        &self.engine
    }

    /// Thin pass-through for the case-management surface.
    pub fn register_case(
        &self,
        case: Case,
        assignments: Vec<ActorAssignment>,
    ) -> Result<(), RecoveryServiceError> {
        self.directory.register(case, assignments)?;
        Ok(())
    }

    /// Settle one validated payment: resolve its beneficiaries as of the
    /// payment date, distribute, record the result, and publish the audit
    /// trail.
    pub fn settle(&self, payment: &Payment) -> Result<DistributionResult, RecoveryServiceError> {
        if !payment.status.is_validated() {
            return Err(RecoveryServiceError::PaymentNotValidated {
                payment_id: payment.id.clone(),
                status: payment.status,
            });
        }

        let beneficiaries = self
            .resolver
            .beneficiaries_for(&payment.case_id, payment.date)?;
        let result = self.engine.distribute(payment.amount, &beneficiaries)?;

        let record = DistributionRecord {
            payment_id: payment.id.clone(),
            settled_on: payment.date,
            result,
        };
        let stored = self.ledger.record(record)?;

        self.audit.publish(audit_trail(
            &payment.id,
            &stored.result,
            self.engine.policy(),
        ))?;

        info!(payment = %payment.id, amount = %stored.result.amount, "payment settled");
        Ok(stored.result)
    }

    /// Fetch a previously recorded distribution.
    pub fn distribution(
        &self,
        payment_id: &PaymentId,
    ) -> Result<DistributionRecord, RecoveryServiceError> {
        self.ledger
            .fetch(payment_id)?
            .ok_or(RecoveryServiceError::Ledger(LedgerError::NotFound))
    }

    /// Fold a period of payments into report totals. Malformed payments are
    /// logged and skipped by the aggregator, never fatal to the period.
    pub fn accumulate(&self, period: ReportPeriod, payments: &[Payment]) -> PeriodTotals {
        PeriodAggregator::new(&self.resolver, &self.engine).accumulate(period, payments)
    }
}

/// One audit entry per pooled share and per individual share, in cascade
/// order. Individual entries carry the rate of the pool they were carved
/// from.
pub(crate) fn audit_trail(
    payment_id: &PaymentId,
    result: &DistributionResult,
    policy: &DistributionPolicy,
) -> AuditTrail {
    let mut entries = vec![
        AuditEntry {
            destination: Destination::Pool(PoolKind::Indicator),
            percentage: policy.indicator_pct,
            amount: result.indicator_share,
        },
        AuditEntry {
            destination: Destination::Pool(PoolKind::LegalFund),
            percentage: policy.legal_fund_pct,
            amount: result.legal_fund_share,
        },
        AuditEntry {
            destination: Destination::Pool(PoolKind::Treasury),
            percentage: policy.treasury_pct,
            amount: result.treasury_share,
        },
        AuditEntry {
            destination: Destination::Pool(PoolKind::Chiefs),
            percentage: policy.chiefs_pct,
            amount: result.chiefs_pool,
        },
        AuditEntry {
            destination: Destination::Pool(PoolKind::Seizing),
            percentage: policy.seizing_pct,
            amount: result.seizing_pool,
        },
        AuditEntry {
            destination: Destination::Pool(PoolKind::Mutual),
            percentage: policy.mutual_pct,
            amount: result.mutual_share,
        },
        AuditEntry {
            destination: Destination::Pool(PoolKind::CommonFund),
            percentage: policy.common_fund_pct,
            amount: result.common_fund_share,
        },
        AuditEntry {
            destination: Destination::Pool(PoolKind::Incentive),
            percentage: policy.incentive_pct,
            amount: result.incentive_share,
        },
    ];

    for share in &result.individual_shares {
        let percentage = match share.role {
            BeneficiaryRole::SeizingAgent => policy.seizing_pct,
            _ => policy.chiefs_pct,
        };
        entries.push(AuditEntry {
            destination: Destination::Agent {
                id: share.beneficiary.id.clone(),
                role: share.role,
            },
            percentage,
            amount: share.amount,
        });
    }

    AuditTrail {
        payment_id: payment_id.clone(),
        entries,
    }
}

/// Error raised by the recovery service.
#[derive(Debug, thiserror::Error)]
pub enum RecoveryServiceError {
    #[error("payment {payment_id} has status {} and cannot be distributed", .status.label())]
    PaymentNotValidated {
        payment_id: PaymentId,
        status: PaymentStatus,
    },
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Distribution(#[from] DistributionError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Audit(#[from] AuditError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
