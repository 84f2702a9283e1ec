//! Rate table configuration
//!
//! Pricing is normally the standard schedule, but underwriting can ship an
//! alternate table as a TOML or JSON file and operations can override single
//! values from the environment:
//!
//! ```bash
//! SCHOOLSURE_RATES__FEE_PROTECTION__RATE=0.03
//! SCHOOLSURE_RATES__DISCOUNTS__MULTI_CHILD=0.15
//! ```
//!
//! Sources are layered: standard schedule, then file, then environment.
//! The merged result is validated once and frozen into a [`RateTable`].

use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{CoreError, Currency, Money, Rate};

use crate::error::QuoteError;
use crate::rate_table::{
    Discounts, ExpenseSubLimits, ExpensesCoverRates, FeeProtectionRates, RateTable,
    StudentContinuityRates, TierLevel, TierRates, TieredCoverRates,
};

/// Environment prefix for rate overrides
pub const ENV_PREFIX: &str = "SCHOOLSURE_RATES";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeProtectionConfig {
    pub rate: Decimal,
    pub minimum_premium: Decimal,
    pub full_term_loading: Decimal,
    pub waiting_period_days: u32,
    pub moratorium_period_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentContinuityConfig {
    pub rate: Decimal,
    pub minimum_absence_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSubLimitsConfig {
    pub books_and_study_aids: Decimal,
    pub transport: Decimal,
    pub uniform: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpensesCoverConfig {
    pub flat_premium: Decimal,
    pub maximum_benefit: Decimal,
    pub sub_limits: ExpenseSubLimitsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierConfig {
    pub coverage_limit: Decimal,
    pub nominal_rate: Decimal,
    pub premium: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredCoverConfig {
    pub level1: TierConfig,
    pub level2: TierConfig,
    pub level3: TierConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountsConfig {
    pub multi_child: Decimal,
    pub annual_payment: Decimal,
}

/// Serializable mirror of [`RateTable`]
///
/// Amounts are whole currency units, rates are decimal fractions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTableConfig {
    pub currency: String,
    pub fee_protection: FeeProtectionConfig,
    pub student_continuity: StudentContinuityConfig,
    pub expenses_cover: ExpensesCoverConfig,
    pub tiered_cover: TieredCoverConfig,
    pub discounts: DiscountsConfig,
    pub renewal_loading: Decimal,
}

impl Default for RateTableConfig {
    fn default() -> Self {
        Self::from(RateTable::standard().as_ref())
    }
}

impl RateTableConfig {
    /// Loads the standard schedule overlaid with `path` and the environment
    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuoteError> {
        Self::load_from(Some(path.as_ref()), ENV_PREFIX)
    }

    /// Loads the standard schedule overlaid with the environment only
    pub fn from_env() -> Result<Self, QuoteError> {
        Self::load_from(None, ENV_PREFIX)
    }

    /// Layers the standard schedule, an optional file and environment
    /// variables under `env_prefix` (nested keys separated by `__`)
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::Configuration` if the file is missing or cannot
    /// be parsed, or a value has the wrong type.
    pub fn load_from(file: Option<&Path>, env_prefix: &str) -> Result<Self, QuoteError> {
        let defaults = ::config::Config::try_from(&RateTableConfig::default())?;
        let mut builder = ::config::Config::builder().add_source(defaults);

        if let Some(path) = file {
            info!(path = %path.display(), "Loading rate table file");
            builder = builder.add_source(::config::File::from(path));
        }

        let loaded: RateTableConfig = builder
            .add_source(::config::Environment::with_prefix(env_prefix).separator("__"))
            .build()?
            .try_deserialize()?;

        info!(currency = %loaded.currency, "Rate table configuration loaded");
        Ok(loaded)
    }

    /// Validates the configuration and freezes it into a shared table
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::Configuration` for an unknown currency code or
    /// any value that breaks the rate table's invariants.
    pub fn into_rate_table(self) -> Result<Arc<RateTable>, QuoteError> {
        let currency: Currency = self
            .currency
            .parse()
            .map_err(|e| CoreError::configuration(format!("currency: {}", e)))?;
        let money = |amount: Decimal| Money::new(amount, currency);
        let tier = |t: &TierConfig| {
            TierRates::new(money(t.coverage_limit), Rate::new(t.nominal_rate), money(t.premium))
        };

        let a = &self.fee_protection;
        let c = &self.expenses_cover;
        let d = &self.tiered_cover;

        RateTable::builder()
            .currency(currency)
            .fee_protection(FeeProtectionRates::new(
                Rate::new(a.rate),
                money(a.minimum_premium),
                Rate::new(a.full_term_loading),
                a.waiting_period_days,
                a.moratorium_period_days,
            ))
            .student_continuity(StudentContinuityRates::new(
                Rate::new(self.student_continuity.rate),
                self.student_continuity.minimum_absence_days,
            ))
            .expenses_cover(ExpensesCoverRates::new(
                money(c.flat_premium),
                money(c.maximum_benefit),
                ExpenseSubLimits::new(
                    money(c.sub_limits.books_and_study_aids),
                    money(c.sub_limits.transport),
                    money(c.sub_limits.uniform),
                ),
            ))
            .tiered_cover(TieredCoverRates::new(tier(&d.level1), tier(&d.level2), tier(&d.level3)))
            .discounts(Discounts::new(
                Rate::new(self.discounts.multi_child),
                Rate::new(self.discounts.annual_payment),
            ))
            .renewal_loading(Rate::new(self.renewal_loading))
            .build()
    }
}

impl From<&RateTable> for RateTableConfig {
    fn from(table: &RateTable) -> Self {
        let a = table.fee_protection();
        let b = table.student_continuity();
        let c = table.expenses_cover();
        let tier = |level: TierLevel| {
            let t = table.tiered_cover().level(level);
            TierConfig {
                coverage_limit: t.coverage_limit().amount(),
                nominal_rate: t.nominal_rate().as_decimal(),
                premium: t.premium().amount(),
            }
        };

        Self {
            currency: table.currency().code().to_string(),
            fee_protection: FeeProtectionConfig {
                rate: a.rate().as_decimal(),
                minimum_premium: a.minimum_premium().amount(),
                full_term_loading: a.full_term_loading().as_decimal(),
                waiting_period_days: a.waiting_period_days(),
                moratorium_period_days: a.moratorium_period_days(),
            },
            student_continuity: StudentContinuityConfig {
                rate: b.rate().as_decimal(),
                minimum_absence_days: b.minimum_absence_days(),
            },
            expenses_cover: ExpensesCoverConfig {
                flat_premium: c.flat_premium().amount(),
                maximum_benefit: c.maximum_benefit().amount(),
                sub_limits: ExpenseSubLimitsConfig {
                    books_and_study_aids: c.sub_limits().books_and_study_aids().amount(),
                    transport: c.sub_limits().transport().amount(),
                    uniform: c.sub_limits().uniform().amount(),
                },
            },
            tiered_cover: TieredCoverConfig {
                level1: tier(TierLevel::Level1),
                level2: tier(TierLevel::Level2),
                level3: tier(TierLevel::Level3),
            },
            discounts: DiscountsConfig {
                multi_child: table.discounts().multi_child().as_decimal(),
                annual_payment: table.discounts().annual_payment().as_decimal(),
            },
            renewal_loading: table.renewal_loading().as_decimal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_to_standard_table() {
        let table = RateTableConfig::default().into_rate_table().unwrap();
        assert_eq!(*table, *RateTable::standard());
    }

    #[test]
    fn test_unknown_currency_is_configuration_error() {
        let mut cfg = RateTableConfig::default();
        cfg.currency = "XYZ".to_string();
        assert!(matches!(cfg.into_rate_table(), Err(QuoteError::Configuration(_))));
    }
}
