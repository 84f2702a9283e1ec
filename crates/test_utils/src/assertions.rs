//! Custom Test Assertions
//!
//! Assertion helpers for money and premium breakdowns that give more
//! meaningful failure messages than bare `assert_eq!`.

use core_kernel::{Currency, Money};
use domain_quote::{PremiumBreakdown, RateTable};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tolerance for comparisons after division by 12 or 365
pub const DIVISION_TOLERANCE: Decimal = dec!(0.000000001);

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value is in AUD and has exactly the given amount
pub fn assert_aud(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.currency(),
        Currency::AUD,
        "Expected an AUD amount, got {}",
        actual.currency()
    );
    assert_amount(actual, expected);
}

/// Asserts the amount only, in whatever currency the value carries
pub fn assert_amount(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "Expected {}{}, got {}",
        actual.currency().symbol(),
        expected,
        actual.amount()
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that a Money value is zero or negative
pub fn assert_money_non_positive(money: &Money) {
    assert!(
        !money.is_positive(),
        "Expected zero or negative money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts the structural invariants every premium breakdown must hold
///
/// - each child's subtotal is the sum of its product lines
/// - each child's total is subtotal plus discount, and the discount is not positive
/// - the first child is never discounted, later children are discounted in proportion
/// - aggregates are the sums of the per-child figures
/// - monthly and daily figures multiply back to the discounted annual total
///
/// # Panics
///
/// Panics with a description of the first invariant that fails
pub fn assert_breakdown_consistent(breakdown: &PremiumBreakdown, rates: &RateTable) {
    let multi_child = rates.discounts().multi_child();
    let mut annual_total = Decimal::ZERO;
    let mut annual_with_discount = Decimal::ZERO;

    for (position, child) in breakdown.children.iter().enumerate() {
        assert_eq!(child.index, position, "Child index should equal its position");

        let lines = child.fee_protection
            + child.full_term_upgrade
            + child.student_continuity
            + child.expenses_cover;
        assert_eq!(
            child.subtotal_before_discount, lines,
            "Child {} subtotal should equal the sum of its lines",
            position
        );
        assert!(
            child.fee_protection >= rates.fee_protection().minimum_premium(),
            "Child {} fee protection {} is below the minimum premium",
            position,
            child.fee_protection.amount()
        );

        assert_money_non_positive(&child.multi_child_discount);
        let expected_discount = if position == 0 {
            Money::zero(rates.currency())
        } else {
            -multi_child.apply(&child.subtotal_before_discount)
        };
        assert_eq!(
            child.multi_child_discount, expected_discount,
            "Child {} multi-child discount is wrong",
            position
        );
        assert_eq!(
            child.child_total,
            child.subtotal_before_discount + child.multi_child_discount,
            "Child {} total should be subtotal plus discount",
            position
        );

        annual_total += child.subtotal_before_discount.amount();
        annual_with_discount += child.child_total.amount();
    }

    assert_eq!(breakdown.annual_total.amount(), annual_total, "Annual total mismatch");
    assert_eq!(
        breakdown.annual_with_discount.amount(),
        annual_with_discount,
        "Annual total after discount mismatch"
    );
    assert!(
        breakdown.annual_total >= breakdown.annual_with_discount,
        "Discounted total {} exceeds undiscounted total {}",
        breakdown.annual_with_discount.amount(),
        breakdown.annual_total.amount()
    );

    assert_money_approx_eq(
        &breakdown.monthly_total.multiply(dec!(12)),
        &breakdown.annual_with_discount,
        DIVISION_TOLERANCE,
    );
    assert_money_approx_eq(
        &breakdown.daily_equivalent.multiply(dec!(365)),
        &breakdown.annual_with_discount,
        DIVISION_TOLERANCE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_aud_passes() {
        assert_aud(&Money::aud(dec!(750)), dec!(750));
    }

    #[test]
    #[should_panic(expected = "Expected an AUD amount")]
    fn test_assert_aud_rejects_other_currency() {
        assert_aud(&Money::new(dec!(750), Currency::NZD), dec!(750));
    }

    #[test]
    fn test_assert_amount_ignores_currency() {
        assert_amount(&Money::new(dec!(750), Currency::NZD), dec!(750));
    }

    #[test]
    #[should_panic(expected = "Currency mismatch")]
    fn test_assert_money_approx_eq_currency_mismatch() {
        let aud = Money::aud(dec!(100));
        let nzd = Money::new(dec!(100), Currency::NZD);
        assert_money_approx_eq(&aud, &nzd, DIVISION_TOLERANCE);
    }
}
