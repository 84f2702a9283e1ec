//! Property-Based Test Generators
//!
//! Proptest strategies for quote inputs that satisfy the engine's
//! preconditions (positive AUD fees, non-empty rosters).

use core_kernel::Money;
use domain_quote::{ChildInput, Jurisdiction, TierLevel};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Annual fees from one cent to $150,000, in cents
pub fn fee_strategy() -> impl Strategy<Value = Money> {
    (1i64..15_000_000i64).prop_map(|cents| Money::aud(Decimal::new(cents, 2)))
}

/// Gross premiums from $0 to $100,000, in cents
pub fn gross_premium_strategy() -> impl Strategy<Value = Money> {
    (0i64..10_000_000i64).prop_map(|cents| Money::aud(Decimal::new(cents, 2)))
}

/// A child with a random fee and random product selection
pub fn child_input_strategy() -> impl Strategy<Value = ChildInput> {
    (fee_strategy(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(fee, student_continuity, expenses_cover, full_term_upgrade)| ChildInput {
            name: "Generated Child".to_string(),
            school_name: "Generated School".to_string(),
            annual_fee: fee,
            student_continuity,
            expenses_cover,
            full_term_upgrade,
        },
    )
}

/// A non-empty roster of up to `max` children
pub fn children_strategy(max: usize) -> impl Strategy<Value = Vec<ChildInput>> {
    prop::collection::vec(child_input_strategy(), 1..=max.max(1))
}

/// One of the eight recognised jurisdictions
pub fn jurisdiction_strategy() -> impl Strategy<Value = Jurisdiction> {
    prop::sample::select(Jurisdiction::ALL.to_vec())
}

/// A recognised jurisdiction code in random letter case
pub fn jurisdiction_code_strategy() -> impl Strategy<Value = String> {
    (jurisdiction_strategy(), any::<bool>()).prop_map(|(j, lower)| {
        if lower {
            j.code().to_ascii_lowercase()
        } else {
            j.code().to_string()
        }
    })
}

/// Codes that are not a recognised jurisdiction
pub fn unknown_jurisdiction_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{1,4}".prop_filter("must not be a recognised code", |code| {
        Jurisdiction::from_code(code).is_none()
    })
}

pub fn tier_level_strategy() -> impl Strategy<Value = TierLevel> {
    prop::sample::select(TierLevel::ALL.to_vec())
}
