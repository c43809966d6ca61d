mod summary;
mod views;

pub use views::{
    AgentTotalsEntry, CenterTotalsEntry, EntityTotals, RecoveryReportSummary, ServiceTotalsEntry,
};

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::distribution::{DistributionEngine, DistributionResult};
use super::domain::{AgentId, AgentRef, Payment, PaymentId};
use super::ledger::{CaseDirectory, SpecialRoleRegistry};
use super::resolver::BeneficiaryResolver;

/// Inclusive reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReportPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Entity keying requested by a report template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationView {
    ByAgent,
    ByService,
    ByCenter,
}

impl AggregationView {
    pub const fn label(self) -> &'static str {
        match self {
            AggregationView::ByAgent => "by_agent",
            AggregationView::ByService => "by_service",
            AggregationView::ByCenter => "by_center",
        }
    }
}

/// Running pooled totals. Addition is commutative, so accumulation order
/// never changes the outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PoolTotals {
    pub amount: Decimal,
    pub indicator_share: Decimal,
    pub legal_fund_share: Decimal,
    pub treasury_share: Decimal,
    pub chiefs_pool: Decimal,
    pub seizing_pool: Decimal,
    pub mutual_share: Decimal,
    pub common_fund_share: Decimal,
    pub incentive_share: Decimal,
}

impl PoolTotals {
    pub fn absorb(&mut self, result: &DistributionResult) {
        self.amount += result.amount;
        self.indicator_share += result.indicator_share;
        self.legal_fund_share += result.legal_fund_share;
        self.treasury_share += result.treasury_share;
        self.chiefs_pool += result.chiefs_pool;
        self.seizing_pool += result.seizing_pool;
        self.mutual_share += result.mutual_share;
        self.common_fund_share += result.common_fund_share;
        self.incentive_share += result.incentive_share;
    }
}

/// Per-agent total plus the snapshot used for service/center grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentTotal {
    pub agent: AgentRef,
    pub total: Decimal,
}

/// Distribution results for one aggregation run, keyed by payment.
///
/// Every report template derives its figures from the same arena, so the
/// per-agent, per-service, and per-center indices are built once from here
/// instead of being recomputed per template.
#[derive(Debug, Default)]
pub struct DistributionArena {
    results: BTreeMap<PaymentId, DistributionResult>,
}

impl DistributionArena {
    pub fn insert(&mut self, payment_id: PaymentId, result: DistributionResult) {
        self.results.insert(payment_id, result);
    }

    pub fn get(&self, payment_id: &PaymentId) -> Option<&DistributionResult> {
        self.results.get(payment_id)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn pool_totals(&self) -> PoolTotals {
        let mut totals = PoolTotals::default();
        for result in self.results.values() {
            totals.absorb(result);
        }
        totals
    }

    pub fn agent_index(&self) -> BTreeMap<AgentId, AgentTotal> {
        let mut index: BTreeMap<AgentId, AgentTotal> = BTreeMap::new();
        for result in self.results.values() {
            for share in &result.individual_shares {
                index
                    .entry(share.beneficiary.id.clone())
                    .and_modify(|entry| entry.total += share.amount)
                    .or_insert_with(|| AgentTotal {
                        agent: share.beneficiary.clone(),
                        total: share.amount,
                    });
            }
        }
        index
    }

    pub fn service_index(&self) -> BTreeMap<String, Decimal> {
        let mut index: BTreeMap<String, Decimal> = BTreeMap::new();
        for result in self.results.values() {
            for share in &result.individual_shares {
                *index
                    .entry(share.beneficiary.service_code.clone())
                    .or_insert(Decimal::ZERO) += share.amount;
            }
        }
        index
    }

    pub fn center_index(&self) -> BTreeMap<String, Decimal> {
        let mut index: BTreeMap<String, Decimal> = BTreeMap::new();
        for result in self.results.values() {
            for share in &result.individual_shares {
                *index
                    .entry(share.beneficiary.center_code.clone())
                    .or_insert(Decimal::ZERO) += share.amount;
            }
        }
        index
    }
}

/// Folds a period of payments through the resolver and engine.
pub struct PeriodAggregator<'a, D, S> {
    resolver: &'a BeneficiaryResolver<D, S>,
    engine: &'a DistributionEngine,
}

impl<'a, D, S> PeriodAggregator<'a, D, S>
where
    D: CaseDirectory,
    S: SpecialRoleRegistry,
{
    pub fn new(resolver: &'a BeneficiaryResolver<D, S>, engine: &'a DistributionEngine) -> Self {
        Self { resolver, engine }
    }

    /// Accumulate every validated payment dated inside the period.
    ///
    /// A payment that cannot be resolved or distributed is logged and
    /// skipped; it never aborts the rest of the period.
    pub fn accumulate(&self, period: ReportPeriod, payments: &[Payment]) -> PeriodTotals {
        let mut arena = DistributionArena::default();
        let mut skipped = 0usize;

        for payment in payments {
            if !payment.status.is_validated() || !period.contains(payment.date) {
                continue;
            }

            let beneficiaries = match self
                .resolver
                .beneficiaries_for(&payment.case_id, payment.date)
            {
                Ok(set) => set,
                Err(err) => {
                    warn!(payment = %payment.id, error = %err, "skipping payment during aggregation");
                    skipped += 1;
                    continue;
                }
            };

            match self.engine.distribute(payment.amount, &beneficiaries) {
                Ok(result) => arena.insert(payment.id.clone(), result),
                Err(err) => {
                    warn!(payment = %payment.id, error = %err, "skipping payment during aggregation");
                    skipped += 1;
                }
            }
        }

        PeriodTotals::new(period, arena, skipped)
    }
}

/// Totals for one period, alongside the arena they were derived from.
#[derive(Debug)]
pub struct PeriodTotals {
    pub period: ReportPeriod,
    pub pools: PoolTotals,
    pub arena: DistributionArena,
    pub payments_skipped: usize,
}

impl PeriodTotals {
    fn new(period: ReportPeriod, arena: DistributionArena, payments_skipped: usize) -> Self {
        let pools = arena.pool_totals();
        Self {
            period,
            pools,
            arena,
            payments_skipped,
        }
    }

    pub fn payments_counted(&self) -> usize {
        self.arena.len()
    }
}
