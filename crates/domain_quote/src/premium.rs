//! Premium calculation
//!
//! Prices a roster of children against a [`RateTable`] and produces the
//! itemised breakdown shown on the quote summary. Children are priced in
//! the order given: the first child listed pays the full rate and every
//! child after it receives the multi-child discount.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_quote::{compute_premium, ChildInput, PolicyOptions, RateTable};
//!
//! let rates = RateTable::standard();
//! let children = vec![
//!     ChildInput::new("Ava", "Riverside Grammar", Money::aud(dec!(40000))).with_full_term_upgrade(),
//!     ChildInput::new("Leo", "Riverside Grammar", Money::aud(dec!(40000))).with_full_term_upgrade(),
//! ];
//! let breakdown = compute_premium(&rates, &children, &PolicyOptions::default())?;
//! assert_eq!(breakdown.annual_with_discount.amount(), dec!(2185));
//! ```

use std::sync::Arc;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::{Currency, Money};

use crate::error::QuoteError;
use crate::payment::PaymentFrequency;
use crate::rate_table::RateTable;

/// One child on the quote form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildInput {
    pub name: String,
    pub school_name: String,
    /// School's annual tuition fee; must be positive
    pub annual_fee: Money,
    /// Product B add-on
    #[serde(default)]
    pub student_continuity: bool,
    /// Product C add-on
    #[serde(default)]
    pub expenses_cover: bool,
    #[serde(default)]
    pub full_term_upgrade: bool,
}

impl ChildInput {
    /// Creates a child with fee protection only
    pub fn new(name: impl Into<String>, school_name: impl Into<String>, annual_fee: Money) -> Self {
        Self {
            name: name.into(),
            school_name: school_name.into(),
            annual_fee,
            student_continuity: false,
            expenses_cover: false,
            full_term_upgrade: false,
        }
    }

    pub fn with_student_continuity(mut self) -> Self {
        self.student_continuity = true;
        self
    }

    pub fn with_expenses_cover(mut self) -> Self {
        self.expenses_cover = true;
        self
    }

    pub fn with_full_term_upgrade(mut self) -> Self {
        self.full_term_upgrade = true;
        self
    }
}

/// Policy-level choices made on the quote form
///
/// `full_term_upgrade` mirrors the form's summary checkbox and is
/// informational only: pricing follows each child's own flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyOptions {
    #[serde(default)]
    pub payment_frequency: PaymentFrequency,
    #[serde(default)]
    pub full_term_upgrade: bool,
    /// State or territory code captured on the form. Not used for pricing;
    /// carried so the caller can pass it to `compute_insurance_taxes`.
    #[serde(default)]
    pub jurisdiction: Option<String>,
}

/// Itemised premium for a single child
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildPremiumBreakdown {
    /// Position in the input roster, 0-based
    pub index: usize,
    pub name: String,
    pub school_name: String,
    pub annual_fee: Money,
    /// Product A
    pub fee_protection: Money,
    pub full_term_upgrade: Money,
    /// Product B, zero when not selected
    pub student_continuity: Money,
    /// Product C, zero when not selected
    pub expenses_cover: Money,
    pub subtotal_before_discount: Money,
    /// Zero or negative
    pub multi_child_discount: Money,
    pub child_total: Money,
}

/// Which products the policy carries, as shown on the coverage summary
///
/// Add-on flags are an OR over the roster: the policy includes a product
/// as soon as any one child selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductsIncluded {
    pub fee_protection: bool,
    pub full_term_upgrade: bool,
    pub student_continuity: bool,
    pub expenses_cover: bool,
    /// Product D is quoted on its own and never bundled here
    pub tiered_cover: bool,
}

impl ProductsIncluded {
    fn from_children(children: &[ChildInput]) -> Self {
        Self {
            fee_protection: true,
            full_term_upgrade: children.iter().any(|c| c.full_term_upgrade),
            student_continuity: children.iter().any(|c| c.student_continuity),
            expenses_cover: children.iter().any(|c| c.expenses_cover),
            tiered_cover: false,
        }
    }
}

/// Premium for a whole quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    /// Per-child breakdowns in input order
    pub children: Vec<ChildPremiumBreakdown>,
    /// Sum of subtotals before discount
    pub annual_total: Money,
    /// Sum of child totals
    pub annual_with_discount: Money,
    pub monthly_total: Money,
    pub daily_equivalent: Money,
    pub products_included: ProductsIncluded,
}

impl PremiumBreakdown {
    /// Total multi-child discount across the roster (zero or negative)
    pub fn total_discount(&self) -> Money {
        self.annual_with_discount - self.annual_total
    }

    pub fn currency(&self) -> Currency {
        self.annual_total.currency()
    }
}

/// Premium calculator bound to one rate table
///
/// Cheap to clone and safe to share between threads serving concurrent
/// quote requests.
#[derive(Debug, Clone)]
pub struct PremiumCalculator {
    rates: Arc<RateTable>,
}

impl PremiumCalculator {
    pub fn new(rates: Arc<RateTable>) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// See [`compute_premium`]
    pub fn compute(
        &self,
        children: &[ChildInput],
        options: &PolicyOptions,
    ) -> Result<PremiumBreakdown, QuoteError> {
        compute_premium(&self.rates, children, options)
    }
}

/// Computes the premium breakdown for a roster of children
///
/// # Errors
///
/// Returns `QuoteError::Validation` if `children` is empty, or if any
/// child's annual fee is not positive or is not in the rate table's
/// currency. Every other input is priced.
#[instrument(
    skip(rates, children, options),
    fields(children = children.len(), frequency = ?options.payment_frequency)
)]
pub fn compute_premium(
    rates: &RateTable,
    children: &[ChildInput],
    options: &PolicyOptions,
) -> Result<PremiumBreakdown, QuoteError> {
    validate_children(rates, children)?;

    let priced = children
        .iter()
        .enumerate()
        .map(|(index, child)| price_child(rates, index, child))
        .collect::<Result<Vec<_>, _>>()?;

    let currency = rates.currency();
    let annual_total = Money::sum(currency, priced.iter().map(|c| &c.subtotal_before_discount))?;
    let annual_with_discount = Money::sum(currency, priced.iter().map(|c| &c.child_total))?;
    let monthly_total = annual_with_discount.divide(dec!(12))?;
    let daily_equivalent = annual_with_discount.divide(dec!(365))?;

    let products_included = ProductsIncluded::from_children(children);
    if options.full_term_upgrade != products_included.full_term_upgrade {
        debug!(
            requested = options.full_term_upgrade,
            priced = products_included.full_term_upgrade,
            "Policy-level full-term flag differs from roster; roster wins"
        );
    }

    debug!(
        annual_total = %annual_total.amount(),
        annual_with_discount = %annual_with_discount.amount(),
        "Premium computed"
    );

    Ok(PremiumBreakdown {
        children: priced,
        annual_total,
        annual_with_discount,
        monthly_total,
        daily_equivalent,
        products_included,
    })
}

fn validate_children(rates: &RateTable, children: &[ChildInput]) -> Result<(), QuoteError> {
    if children.is_empty() {
        return Err(QuoteError::validation("At least one child is required"));
    }

    for (index, child) in children.iter().enumerate() {
        if child.annual_fee.currency() != rates.currency() {
            return Err(QuoteError::validation(format!(
                "Child {} annual fee is in {}, expected {}",
                index,
                child.annual_fee.currency(),
                rates.currency()
            )));
        }
        if !child.annual_fee.is_positive() {
            return Err(QuoteError::validation(format!(
                "Child {} annual fee must be greater than zero, got {}",
                index,
                child.annual_fee.amount()
            )));
        }
    }

    Ok(())
}

fn price_child(
    rates: &RateTable,
    index: usize,
    child: &ChildInput,
) -> Result<ChildPremiumBreakdown, QuoteError> {
    let zero = Money::zero(rates.currency());
    let core = rates.fee_protection();

    let fee_protection = core
        .rate()
        .apply(&child.annual_fee)
        .max(core.minimum_premium())?;

    let full_term_upgrade = if child.full_term_upgrade {
        core.full_term_loading().apply(&fee_protection)
    } else {
        zero
    };

    // No minimum on the continuity add-on; small amounts are fine.
    let student_continuity = if child.student_continuity {
        rates.student_continuity().rate().apply(&child.annual_fee)
    } else {
        zero
    };

    let expenses_cover = if child.expenses_cover {
        rates.expenses_cover().flat_premium()
    } else {
        zero
    };

    let subtotal_before_discount =
        fee_protection + full_term_upgrade + student_continuity + expenses_cover;

    // Eligibility is positional: the first child listed always pays full rate.
    let multi_child_discount = if index == 0 {
        zero
    } else {
        -rates.discounts().multi_child().apply(&subtotal_before_discount)
    };

    let child_total = subtotal_before_discount + multi_child_discount;

    debug!(
        index,
        fee_protection = %fee_protection.amount(),
        subtotal = %subtotal_before_discount.amount(),
        discount = %multi_child_discount.amount(),
        "Child priced"
    );

    Ok(ChildPremiumBreakdown {
        index,
        name: child.name.clone(),
        school_name: child.school_name.clone(),
        annual_fee: child.annual_fee,
        fee_protection,
        full_term_upgrade,
        student_continuity,
        expenses_cover,
        subtotal_before_discount,
        multi_child_discount,
        child_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(fee: rust_decimal::Decimal) -> ChildInput {
        ChildInput::new("Test Child", "Test School", Money::aud(fee))
    }

    #[test]
    fn test_single_child_core_only() {
        let rates = RateTable::standard();
        let breakdown = compute_premium(&rates, &[child(dec!(30000))], &PolicyOptions::default()).unwrap();

        let first = &breakdown.children[0];
        assert_eq!(first.fee_protection.amount(), dec!(750));
        assert!(first.multi_child_discount.is_zero());
        assert_eq!(first.child_total.amount(), dec!(750));
    }

    #[test]
    fn test_minimum_premium_floor() {
        let rates = RateTable::standard();
        let breakdown = compute_premium(&rates, &[child(dec!(5000))], &PolicyOptions::default()).unwrap();
        assert_eq!(breakdown.children[0].fee_protection.amount(), dec!(250));
    }

    #[test]
    fn test_second_child_is_discounted() {
        let rates = RateTable::standard();
        let roster = [
            child(dec!(40000)).with_full_term_upgrade(),
            child(dec!(40000)).with_full_term_upgrade(),
        ];
        let breakdown = compute_premium(&rates, &roster, &PolicyOptions::default()).unwrap();

        assert_eq!(breakdown.children[0].child_total.amount(), dec!(1150));
        assert_eq!(breakdown.children[1].multi_child_discount.amount(), dec!(-115));
        assert_eq!(breakdown.children[1].child_total.amount(), dec!(1035));
        assert_eq!(breakdown.annual_with_discount.amount(), dec!(2185));
        assert_eq!(breakdown.total_discount().amount(), dec!(-115));
    }

    #[test]
    fn test_empty_roster_rejected() {
        let rates = RateTable::standard();
        let result = compute_premium(&rates, &[], &PolicyOptions::default());
        assert!(matches!(result, Err(QuoteError::Validation(_))));
    }

    #[test]
    fn test_zero_fee_rejected() {
        let rates = RateTable::standard();
        let result = compute_premium(&rates, &[child(dec!(0))], &PolicyOptions::default());
        assert!(matches!(result, Err(QuoteError::Validation(_))));
    }

    #[test]
    fn test_calculator_uses_injected_table() {
        let calculator = PremiumCalculator::new(RateTable::standard());
        let breakdown = calculator.compute(&[child(dec!(30000))], &PolicyOptions::default()).unwrap();
        assert_eq!(breakdown.annual_total.amount(), dec!(750));
    }
}
