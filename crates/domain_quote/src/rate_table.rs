//! Rate table
//!
//! The frozen pricing configuration every calculator reads from. A table is
//! built once, either from the standard SchoolSure schedule or from a
//! validated [`RateTableConfig`](crate::config::RateTableConfig), and then
//! shared behind an `Arc`. Every field is private and only exposed through
//! copying getters, so nothing holding a `&RateTable` can change prices.

use std::sync::Arc;

use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use serde::Serialize;

use core_kernel::{Currency, Money, Rate};

use crate::error::QuoteError;

/// Longest waiting or moratorium period a table may configure
pub const MAX_PERIOD_DAYS: u32 = 3650;

static STANDARD: Lazy<Arc<RateTable>> = Lazy::new(|| Arc::new(RateTable::standard_schedule()));

/// Product A: fee protection, the core cover every quote includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeProtectionRates {
    rate: Rate,
    minimum_premium: Money,
    full_term_loading: Rate,
    waiting_period_days: u32,
    moratorium_period_days: u32,
}

impl FeeProtectionRates {
    pub fn new(
        rate: Rate,
        minimum_premium: Money,
        full_term_loading: Rate,
        waiting_period_days: u32,
        moratorium_period_days: u32,
    ) -> Self {
        Self {
            rate,
            minimum_premium,
            full_term_loading,
            waiting_period_days,
            moratorium_period_days,
        }
    }

    /// Rate applied to the school's annual fee
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Floor below which the fee protection premium never drops
    pub fn minimum_premium(&self) -> Money {
        self.minimum_premium
    }

    /// Surcharge on the fee protection premium for the full-term upgrade
    pub fn full_term_loading(&self) -> Rate {
        self.full_term_loading
    }

    pub fn waiting_period_days(&self) -> u32 {
        self.waiting_period_days
    }

    pub fn moratorium_period_days(&self) -> u32 {
        self.moratorium_period_days
    }
}

/// Product B: student continuity add-on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StudentContinuityRates {
    rate: Rate,
    minimum_absence_days: u32,
}

impl StudentContinuityRates {
    pub fn new(rate: Rate, minimum_absence_days: u32) -> Self {
        Self {
            rate,
            minimum_absence_days,
        }
    }

    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Consecutive days of absence before a claim is eligible. Not a pricing input.
    pub fn minimum_absence_days(&self) -> u32 {
        self.minimum_absence_days
    }
}

/// Benefit sub-limits for the expenses cover add-on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpenseSubLimits {
    books_and_study_aids: Money,
    transport: Money,
    uniform: Money,
}

impl ExpenseSubLimits {
    pub fn new(books_and_study_aids: Money, transport: Money, uniform: Money) -> Self {
        Self {
            books_and_study_aids,
            transport,
            uniform,
        }
    }

    pub fn books_and_study_aids(&self) -> Money {
        self.books_and_study_aids
    }

    pub fn transport(&self) -> Money {
        self.transport
    }

    pub fn uniform(&self) -> Money {
        self.uniform
    }
}

/// Product C: expenses cover add-on, a flat fee per child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpensesCoverRates {
    flat_premium: Money,
    maximum_benefit: Money,
    sub_limits: ExpenseSubLimits,
}

impl ExpensesCoverRates {
    pub fn new(flat_premium: Money, maximum_benefit: Money, sub_limits: ExpenseSubLimits) -> Self {
        Self {
            flat_premium,
            maximum_benefit,
            sub_limits,
        }
    }

    pub fn flat_premium(&self) -> Money {
        self.flat_premium
    }

    pub fn maximum_benefit(&self) -> Money {
        self.maximum_benefit
    }

    pub fn sub_limits(&self) -> ExpenseSubLimits {
        self.sub_limits
    }
}

/// Level of the standalone tiered cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TierLevel {
    Level1,
    Level2,
    Level3,
}

impl TierLevel {
    pub const ALL: [TierLevel; 3] = [TierLevel::Level1, TierLevel::Level2, TierLevel::Level3];

    /// Parses the 1-based level number shown on the quote form
    pub fn from_number(level: u8) -> Result<Self, QuoteError> {
        match level {
            1 => Ok(TierLevel::Level1),
            2 => Ok(TierLevel::Level2),
            3 => Ok(TierLevel::Level3),
            other => Err(QuoteError::validation(format!(
                "Tier level must be 1, 2 or 3, got {}",
                other
            ))),
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            TierLevel::Level1 => 1,
            TierLevel::Level2 => 2,
            TierLevel::Level3 => 3,
        }
    }

    fn position(&self) -> usize {
        usize::from(self.number() - 1)
    }
}

/// Pricing for one level of the tiered cover
///
/// The fixed premium is authoritative; limit and nominal rate are descriptive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierRates {
    coverage_limit: Money,
    nominal_rate: Rate,
    premium: Money,
}

impl TierRates {
    pub fn new(coverage_limit: Money, nominal_rate: Rate, premium: Money) -> Self {
        Self {
            coverage_limit,
            nominal_rate,
            premium,
        }
    }

    pub fn coverage_limit(&self) -> Money {
        self.coverage_limit
    }

    pub fn nominal_rate(&self) -> Rate {
        self.nominal_rate
    }

    pub fn premium(&self) -> Money {
        self.premium
    }
}

/// Product D: standalone tiered cover, one level per policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TieredCoverRates {
    levels: [TierRates; 3],
}

impl TieredCoverRates {
    pub fn new(level1: TierRates, level2: TierRates, level3: TierRates) -> Self {
        Self {
            levels: [level1, level2, level3],
        }
    }

    pub fn level(&self, level: TierLevel) -> TierRates {
        self.levels[level.position()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Discounts {
    multi_child: Rate,
    annual_payment: Rate,
}

impl Discounts {
    pub fn new(multi_child: Rate, annual_payment: Rate) -> Self {
        Self {
            multi_child,
            annual_payment,
        }
    }

    /// Fraction taken off every child after the first
    pub fn multi_child(&self) -> Rate {
        self.multi_child
    }

    /// Fraction taken off when the year is paid up front
    pub fn annual_payment(&self) -> Rate {
        self.annual_payment
    }
}

/// The complete, read-only pricing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateTable {
    currency: Currency,
    fee_protection: FeeProtectionRates,
    student_continuity: StudentContinuityRates,
    expenses_cover: ExpensesCoverRates,
    tiered_cover: TieredCoverRates,
    discounts: Discounts,
    renewal_loading: Rate,
}

impl RateTable {
    /// The process-wide standard SchoolSure rate table
    ///
    /// Initialised on first use and shared thereafter. Calculators take the
    /// table as an argument; this is only a convenience for callers.
    pub fn standard() -> Arc<RateTable> {
        Arc::clone(&STANDARD)
    }

    /// Starts a builder pre-filled with the standard schedule
    pub fn builder() -> RateTableBuilder {
        RateTableBuilder {
            table: Self::standard_schedule(),
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn fee_protection(&self) -> FeeProtectionRates {
        self.fee_protection
    }

    pub fn student_continuity(&self) -> StudentContinuityRates {
        self.student_continuity
    }

    pub fn expenses_cover(&self) -> ExpensesCoverRates {
        self.expenses_cover
    }

    pub fn tiered_cover(&self) -> TieredCoverRates {
        self.tiered_cover
    }

    pub fn discounts(&self) -> Discounts {
        self.discounts
    }

    pub fn renewal_loading(&self) -> Rate {
        self.renewal_loading
    }

    fn standard_schedule() -> Self {
        let aud = Money::aud;
        Self {
            currency: Currency::AUD,
            fee_protection: FeeProtectionRates::new(
                Rate::new(dec!(0.025)),
                aud(dec!(250)),
                Rate::new(dec!(0.15)),
                30,
                365,
            ),
            student_continuity: StudentContinuityRates::new(Rate::new(dec!(0.005)), 10),
            expenses_cover: ExpensesCoverRates::new(
                aud(dec!(120)),
                aud(dec!(5000)),
                ExpenseSubLimits::new(aud(dec!(2000)), aud(dec!(1500)), aud(dec!(1500))),
            ),
            tiered_cover: TieredCoverRates::new(
                TierRates::new(aud(dec!(5000)), Rate::new(dec!(0.02)), aud(dec!(100))),
                TierRates::new(aud(dec!(10000)), Rate::new(dec!(0.02)), aud(dec!(200))),
                TierRates::new(aud(dec!(20000)), Rate::new(dec!(0.02)), aud(dec!(400))),
            ),
            discounts: Discounts::new(Rate::new(dec!(0.10)), Rate::new(dec!(0.05))),
            renewal_loading: Rate::new(dec!(0.03)),
        }
    }

    /// Checks the cross-field invariants a usable table must satisfy
    fn validate(&self) -> Result<(), QuoteError> {
        let fraction = |name: &str, rate: Rate| {
            if rate.is_fraction() {
                Ok(())
            } else {
                Err(QuoteError::configuration(format!(
                    "{} must be between 0 and 1, got {}",
                    name,
                    rate.as_decimal()
                )))
            }
        };
        let amount = |name: &str, money: Money| {
            if money.currency() != self.currency {
                Err(QuoteError::configuration(format!(
                    "{} is in {}, table currency is {}",
                    name,
                    money.currency(),
                    self.currency
                )))
            } else if money.is_negative() {
                Err(QuoteError::configuration(format!(
                    "{} must not be negative, got {}",
                    name,
                    money.amount()
                )))
            } else {
                Ok(())
            }
        };

        let a = &self.fee_protection;
        fraction("fee_protection.rate", a.rate)?;
        fraction("fee_protection.full_term_loading", a.full_term_loading)?;
        amount("fee_protection.minimum_premium", a.minimum_premium)?;
        for (name, days) in [
            ("fee_protection.waiting_period_days", a.waiting_period_days),
            ("fee_protection.moratorium_period_days", a.moratorium_period_days),
        ] {
            if days > MAX_PERIOD_DAYS {
                return Err(QuoteError::configuration(format!(
                    "{} must be at most {} days, got {}",
                    name, MAX_PERIOD_DAYS, days
                )));
            }
        }

        fraction("student_continuity.rate", self.student_continuity.rate)?;

        let c = &self.expenses_cover;
        amount("expenses_cover.flat_premium", c.flat_premium)?;
        amount("expenses_cover.maximum_benefit", c.maximum_benefit)?;
        amount("expenses_cover.sub_limits.books_and_study_aids", c.sub_limits.books_and_study_aids)?;
        amount("expenses_cover.sub_limits.transport", c.sub_limits.transport)?;
        amount("expenses_cover.sub_limits.uniform", c.sub_limits.uniform)?;

        let mut previous: Option<Money> = None;
        for level in TierLevel::ALL {
            let tier = self.tiered_cover.level(level);
            let name = format!("tiered_cover.level{}", level.number());
            fraction(&format!("{}.nominal_rate", name), tier.nominal_rate)?;
            amount(&format!("{}.coverage_limit", name), tier.coverage_limit)?;
            amount(&format!("{}.premium", name), tier.premium)?;
            if let Some(prev) = previous {
                if tier.premium.amount() <= prev.amount() {
                    return Err(QuoteError::configuration(format!(
                        "{}.premium must exceed the level below ({} <= {})",
                        name,
                        tier.premium.amount(),
                        prev.amount()
                    )));
                }
            }
            previous = Some(tier.premium);
        }

        fraction("discounts.multi_child", self.discounts.multi_child)?;
        fraction("discounts.annual_payment", self.discounts.annual_payment)?;
        if self.discounts.multi_child.as_decimal() >= rust_decimal::Decimal::ONE
            || self.discounts.annual_payment.as_decimal() >= rust_decimal::Decimal::ONE
        {
            return Err(QuoteError::configuration("Discounts must be below 100%"));
        }

        fraction("renewal_loading", self.renewal_loading)?;
        Ok(())
    }
}

/// Builds an alternate rate table, starting from the standard schedule
///
/// ```rust,ignore
/// let table = RateTable::builder()
///     .discounts(Discounts::new(Rate::new(dec!(0.15)), Rate::new(dec!(0.05))))
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct RateTableBuilder {
    table: RateTable,
}

impl RateTableBuilder {
    pub fn currency(mut self, currency: Currency) -> Self {
        self.table.currency = currency;
        self
    }

    pub fn fee_protection(mut self, rates: FeeProtectionRates) -> Self {
        self.table.fee_protection = rates;
        self
    }

    pub fn student_continuity(mut self, rates: StudentContinuityRates) -> Self {
        self.table.student_continuity = rates;
        self
    }

    pub fn expenses_cover(mut self, rates: ExpensesCoverRates) -> Self {
        self.table.expenses_cover = rates;
        self
    }

    pub fn tiered_cover(mut self, rates: TieredCoverRates) -> Self {
        self.table.tiered_cover = rates;
        self
    }

    pub fn discounts(mut self, discounts: Discounts) -> Self {
        self.table.discounts = discounts;
        self
    }

    pub fn renewal_loading(mut self, loading: Rate) -> Self {
        self.table.renewal_loading = loading;
        self
    }

    /// Validates and freezes the table
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::Configuration` when a rate lies outside `[0, 1]`,
    /// an amount is negative or in a different currency, discounts reach
    /// 100%, or tier premiums do not strictly increase by level.
    pub fn build(self) -> Result<Arc<RateTable>, QuoteError> {
        self.table.validate()?;
        Ok(Arc::new(self.table))
    }
}
