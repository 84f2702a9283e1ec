//! Pre-built Test Fixtures
//!
//! Ready-to-use children and amounts matching the worked examples on the
//! quote wizard's help pages. Fees are chosen either side of the minimum
//! premium breakpoint (fee protection rate 2.5%, floor $250, so $10,000).

use core_kernel::{Currency, Money};
use domain_quote::ChildInput;
use rust_decimal_macros::dec;

/// Fixture for money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Typical private secondary school fee
    pub fn fee_30k() -> Money {
        Money::aud(dec!(30000))
    }

    pub fn fee_40k() -> Money {
        Money::aud(dec!(40000))
    }

    /// Fee whose rated premium falls under the minimum
    pub fn fee_5k() -> Money {
        Money::aud(dec!(5000))
    }

    /// Fee exactly at the minimum premium breakpoint
    pub fn fee_at_breakpoint() -> Money {
        Money::aud(dec!(10000))
    }

    pub fn gross_1000() -> Money {
        Money::aud(dec!(1000))
    }

    /// Fee in a currency the standard table does not price
    pub fn nzd_fee() -> Money {
        Money::new(dec!(30000), Currency::NZD)
    }
}

/// Fixture for children on the quote form
pub struct ChildFixtures;

impl ChildFixtures {
    /// Fee protection only, $30,000 fee
    pub fn core_only() -> ChildInput {
        ChildInput::new("Ava Nguyen", "Riverside Grammar", MoneyFixtures::fee_30k())
    }

    /// Fee protection with the full-term upgrade, $40,000 fee
    pub fn full_term(name: &str) -> ChildInput {
        ChildInput::new(name, "Harbour College", MoneyFixtures::fee_40k()).with_full_term_upgrade()
    }

    /// Every add-on selected, $40,000 fee
    pub fn all_add_ons(name: &str) -> ChildInput {
        ChildInput::new(name, "Harbour College", MoneyFixtures::fee_40k())
            .with_full_term_upgrade()
            .with_student_continuity()
            .with_expenses_cover()
    }

    /// Two full-term children at $40,000 each
    pub fn two_full_term_siblings() -> Vec<ChildInput> {
        vec![Self::full_term("Leo Walsh"), Self::full_term("Mia Walsh")]
    }
}
