use rust_decimal::{Decimal, RoundingStrategy};

use super::policy::DistributionPolicy;

/// Pool-level cascade figures, before any individual attribution.
pub(crate) struct PooledBreakdown {
    pub(crate) indicator_share: Decimal,
    pub(crate) net_product: Decimal,
    pub(crate) legal_fund_share: Decimal,
    pub(crate) treasury_share: Decimal,
    pub(crate) entitled_net_product: Decimal,
    pub(crate) chiefs_pool: Decimal,
    pub(crate) seizing_pool: Decimal,
    pub(crate) mutual_share: Decimal,
    pub(crate) common_fund_share: Decimal,
    pub(crate) incentive_share: Decimal,
}

pub(crate) fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Every multiplication rounds to minor-currency precision before the next
/// step consumes it, so independently generated reports reproduce the exact
/// same figures.
pub(crate) fn pooled_breakdown(amount: Decimal, policy: &DistributionPolicy) -> PooledBreakdown {
    let indicator_share = round_currency(amount * policy.indicator_pct);
    let net_product = amount - indicator_share;
    let legal_fund_share = round_currency(net_product * policy.legal_fund_pct);
    let treasury_share = round_currency(net_product * policy.treasury_pct);
    let entitled_net_product = net_product - legal_fund_share - treasury_share;

    PooledBreakdown {
        indicator_share,
        net_product,
        legal_fund_share,
        treasury_share,
        entitled_net_product,
        chiefs_pool: round_currency(entitled_net_product * policy.chiefs_pct),
        seizing_pool: round_currency(entitled_net_product * policy.seizing_pct),
        mutual_share: round_currency(entitled_net_product * policy.mutual_pct),
        common_fund_share: round_currency(entitled_net_product * policy.common_fund_pct),
        incentive_share: round_currency(entitled_net_product * policy.incentive_pct),
    }
}

/// Equal division of a pool. Zero recipients yield a zero share; the pooled
/// total stays with the pool, unattributed. Rounding residue likewise stays
/// at pool level.
pub(crate) fn equal_split(pool: Decimal, recipients: usize) -> Decimal {
    if recipients == 0 {
        return Decimal::ZERO;
    }
    round_currency(pool / Decimal::from(recipients as u64))
}
