//! Test Data Builders
//!
//! Builder patterns for constructing quote inputs with sensible defaults.
//! Tests specify only the fields they care about.

use core_kernel::Money;
use domain_quote::{ChildInput, PaymentFrequency, PolicyOptions};
use rust_decimal::Decimal;

use crate::fixtures::MoneyFixtures;

/// Builder for a single child on the quote form
pub struct ChildInputBuilder {
    name: String,
    school_name: String,
    annual_fee: Money,
    student_continuity: bool,
    expenses_cover: bool,
    full_term_upgrade: bool,
}

impl Default for ChildInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChildInputBuilder {
    /// Creates a builder for a fee-protection-only child at $30,000
    pub fn new() -> Self {
        Self {
            name: "Test Child".to_string(),
            school_name: "Test School".to_string(),
            annual_fee: MoneyFixtures::fee_30k(),
            student_continuity: false,
            expenses_cover: false,
            full_term_upgrade: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_school(mut self, school_name: impl Into<String>) -> Self {
        self.school_name = school_name.into();
        self
    }

    /// Sets the annual fee in AUD
    pub fn with_fee(mut self, amount: Decimal) -> Self {
        self.annual_fee = Money::aud(amount);
        self
    }

    pub fn with_fee_money(mut self, fee: Money) -> Self {
        self.annual_fee = fee;
        self
    }

    pub fn with_student_continuity(mut self, selected: bool) -> Self {
        self.student_continuity = selected;
        self
    }

    pub fn with_expenses_cover(mut self, selected: bool) -> Self {
        self.expenses_cover = selected;
        self
    }

    pub fn with_full_term_upgrade(mut self, selected: bool) -> Self {
        self.full_term_upgrade = selected;
        self
    }

    pub fn build(self) -> ChildInput {
        ChildInput {
            name: self.name,
            school_name: self.school_name,
            annual_fee: self.annual_fee,
            student_continuity: self.student_continuity,
            expenses_cover: self.expenses_cover,
            full_term_upgrade: self.full_term_upgrade,
        }
    }
}

/// Builder for a roster of children, in enrollment order
#[derive(Default)]
pub struct RosterBuilder {
    children: Vec<ChildInput>,
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, child: ChildInput) -> Self {
        self.children.push(child);
        self
    }

    /// Adds a fee-protection-only child with the given AUD fee
    pub fn child_with_fee(self, amount: Decimal) -> Self {
        let name = format!("Child {}", self.children.len() + 1);
        self.child(ChildInputBuilder::new().with_name(name).with_fee(amount).build())
    }

    pub fn build(self) -> Vec<ChildInput> {
        self.children
    }
}

/// Builder for policy-level options
#[derive(Default)]
pub struct PolicyOptionsBuilder {
    options: PolicyOptions,
}

impl PolicyOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn monthly(mut self) -> Self {
        self.options.payment_frequency = PaymentFrequency::Monthly;
        self
    }

    pub fn with_full_term_upgrade(mut self, requested: bool) -> Self {
        self.options.full_term_upgrade = requested;
        self
    }

    pub fn with_jurisdiction(mut self, code: impl Into<String>) -> Self {
        self.options.jurisdiction = Some(code.into());
        self
    }

    pub fn build(self) -> PolicyOptions {
        self.options
    }
}
