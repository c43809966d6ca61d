use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Allocation rates applied by the distribution engine.
///
/// Rates live in configuration rather than inside the cascade so a
/// regulatory rate change never touches calculation code. `indicator_pct`
/// applies to the collected amount, `legal_fund_pct` and `treasury_pct` to
/// the net product, and the remaining five to the entitled net product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionPolicy {
    pub indicator_pct: Decimal,
    pub legal_fund_pct: Decimal,
    pub treasury_pct: Decimal,
    pub chiefs_pct: Decimal,
    pub seizing_pct: Decimal,
    pub mutual_pct: Decimal,
    pub common_fund_pct: Decimal,
    pub incentive_pct: Decimal,
}

impl DistributionPolicy {
    /// Rates mandated by the current fine-distribution regulation.
    pub fn statutory() -> Self {
        Self {
            indicator_pct: dec!(0.10),
            legal_fund_pct: dec!(0.10),
            treasury_pct: dec!(0.15),
            chiefs_pct: dec!(0.15),
            seizing_pct: dec!(0.35),
            mutual_pct: dec!(0.05),
            common_fund_pct: dec!(0.30),
            incentive_pct: dec!(0.15),
        }
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        let rates = [
            ("indicator_pct", self.indicator_pct),
            ("legal_fund_pct", self.legal_fund_pct),
            ("treasury_pct", self.treasury_pct),
            ("chiefs_pct", self.chiefs_pct),
            ("seizing_pct", self.seizing_pct),
            ("mutual_pct", self.mutual_pct),
            ("common_fund_pct", self.common_fund_pct),
            ("incentive_pct", self.incentive_pct),
        ];
        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(PolicyError::RateOutOfRange { name, rate });
            }
        }

        let net_product_draw = self.legal_fund_pct + self.treasury_pct;
        if net_product_draw > Decimal::ONE {
            return Err(PolicyError::NetProductOverdrawn {
                total: net_product_draw,
            });
        }

        let entitled_split = self.chiefs_pct
            + self.seizing_pct
            + self.mutual_pct
            + self.common_fund_pct
            + self.incentive_pct;
        if entitled_split != Decimal::ONE {
            return Err(PolicyError::EntitledSplitMismatch {
                total: entitled_split,
            });
        }

        Ok(())
    }
}

impl Default for DistributionPolicy {
    fn default() -> Self {
        Self::statutory()
    }
}

/// Validation failures for a distribution policy.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum PolicyError {
    #[error("rate {name} must lie within [0, 1], got {rate}")]
    RateOutOfRange { name: &'static str, rate: Decimal },
    #[error("legal-fund and treasury rates draw {total} of the net product")]
    NetProductOverdrawn { total: Decimal },
    #[error("entitled net product split must sum to 1, got {total}")]
    EntitledSplitMismatch { total: Decimal },
}
