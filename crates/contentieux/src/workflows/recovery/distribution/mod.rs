mod cascade;
mod policy;

pub use policy::{DistributionPolicy, PolicyError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::{AgentRef, BeneficiaryRole, BeneficiarySet};

/// Stateless engine applying the statutory cascade to one collected amount.
///
/// Holds no mutable state and performs no I/O, so settling independent
/// payments concurrently is safe by construction.
pub struct DistributionEngine {
    policy: DistributionPolicy,
}

impl DistributionEngine {
    pub fn new(policy: DistributionPolicy) -> Self {
        Self { policy }
    }

    pub fn statutory() -> Self {
        Self::new(DistributionPolicy::statutory())
    }

    pub fn policy(&self) -> &DistributionPolicy {
        &self.policy
    }

    /// Compute the full breakdown of `amount` for the given beneficiaries.
    ///
    /// A zero amount is legal and produces an all-zero result. A pool with no
    /// eligible recipients keeps its pooled total and emits no individual
    /// shares.
    pub fn distribute(
        &self,
        amount: Decimal,
        beneficiaries: &BeneficiarySet,
    ) -> Result<DistributionResult, DistributionError> {
        if amount < Decimal::ZERO {
            return Err(DistributionError::InvalidAmount(amount));
        }

        let pools = cascade::pooled_breakdown(amount, &self.policy);

        let chiefs_members = beneficiaries.chiefs_pool_members();
        let chief_share = cascade::equal_split(pools.chiefs_pool, chiefs_members.len());
        let seizing_share =
            cascade::equal_split(pools.seizing_pool, beneficiaries.seizing_agents.len());

        let mut individual_shares =
            Vec::with_capacity(chiefs_members.len() + beneficiaries.seizing_agents.len());
        for (agent, role) in chiefs_members {
            individual_shares.push(IndividualShare {
                beneficiary: agent.clone(),
                role,
                amount: chief_share,
            });
        }
        for agent in &beneficiaries.seizing_agents {
            individual_shares.push(IndividualShare {
                beneficiary: agent.clone(),
                role: BeneficiaryRole::SeizingAgent,
                amount: seizing_share,
            });
        }

        Ok(DistributionResult {
            amount,
            indicator_share: pools.indicator_share,
            net_product: pools.net_product,
            legal_fund_share: pools.legal_fund_share,
            treasury_share: pools.treasury_share,
            entitled_net_product: pools.entitled_net_product,
            chiefs_pool: pools.chiefs_pool,
            seizing_pool: pools.seizing_pool,
            mutual_share: pools.mutual_share,
            common_fund_share: pools.common_fund_share,
            incentive_share: pools.incentive_share,
            individual_shares,
        })
    }
}

/// Complete breakdown of one payment. Read-only after construction; the
/// engine is its only producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
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
    pub individual_shares: Vec<IndividualShare>,
}

/// A named beneficiary's cut of a pooled share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualShare {
    pub beneficiary: AgentRef,
    pub role: BeneficiaryRole,
    pub amount: Decimal,
}

/// The engine's only failure mode; beneficiary-set problems belong to the
/// resolver.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DistributionError {
    #[error("payment amount must be non-negative, got {0}")]
    InvalidAmount(Decimal),
}
