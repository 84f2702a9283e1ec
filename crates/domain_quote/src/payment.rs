//! Payment plans
//!
//! Turns a premium breakdown into what the customer actually pays for the
//! chosen frequency: renewal loading first, then the annual-payment
//! discount on the loaded amount, then the split into instalments.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::Money;

use crate::premium::PremiumBreakdown;
use crate::rate_table::RateTable;

/// How often the policyholder pays
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    /// One payment up front, eligible for the annual-payment discount
    #[default]
    Annual,
    Monthly,
}

impl PaymentFrequency {
    pub fn payments_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Annual => 1,
            PaymentFrequency::Monthly => 12,
        }
    }

    /// Calendar months between consecutive payments
    pub fn months_between_payments(&self) -> u32 {
        12 / self.payments_per_year()
    }

    /// Calculates the next due date after `from_date`
    ///
    /// Same day of the month one period later. A day the target month does
    /// not have (29 February, the 31st) clamps to that month's last day.
    pub fn next_due_date(&self, from_date: NaiveDate) -> NaiveDate {
        self.due_date(from_date, 1)
    }

    /// Due date of the payment `periods` periods after `start`
    ///
    /// Always measured from `start`, so a clamped month does not pull
    /// later dates back to the 28th.
    pub fn due_date(&self, start: NaiveDate, periods: u32) -> NaiveDate {
        start
            .checked_add_months(Months::new(self.months_between_payments().saturating_mul(periods)))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// One scheduled payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instalment {
    /// 1-based
    pub sequence_number: u32,
    pub due_date: NaiveDate,
    pub amount: Money,
}

/// What the customer pays over one policy year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPlan {
    pub frequency: PaymentFrequency,
    pub renewal: bool,
    /// Annual premium after the multi-child discount
    pub base_annual_premium: Money,
    /// Zero or positive
    pub renewal_loading: Money,
    /// Zero or negative; only non-zero for annual payment
    pub annual_payment_discount: Money,
    pub annual_payable: Money,
    pub instalments_per_year: u32,
    pub instalment_amount: Money,
}

impl PaymentPlan {
    /// Lists the year's instalments starting on `start`
    pub fn schedule(&self, start: NaiveDate) -> Vec<Instalment> {
        (0..self.instalments_per_year)
            .map(|period| Instalment {
                sequence_number: period + 1,
                due_date: self.frequency.due_date(start, period),
                amount: self.instalment_amount,
            })
            .collect()
    }
}

/// Builds the payment plan for a priced quote
///
/// Renewal loading applies to the discounted annual premium; the
/// annual-payment discount then applies to the loaded amount.
#[instrument(skip(rates, breakdown), fields(annual = %breakdown.annual_with_discount.amount()))]
pub fn compute_payment_plan(
    rates: &RateTable,
    breakdown: &PremiumBreakdown,
    frequency: PaymentFrequency,
    renewal: bool,
) -> PaymentPlan {
    let base = breakdown.annual_with_discount;
    let zero = Money::zero(base.currency());

    let renewal_loading = if renewal {
        rates.renewal_loading().apply(&base)
    } else {
        zero
    };
    let loaded = base + renewal_loading;

    let annual_payment_discount = match frequency {
        PaymentFrequency::Annual => -rates.discounts().annual_payment().apply(&loaded),
        PaymentFrequency::Monthly => zero,
    };
    let annual_payable = loaded + annual_payment_discount;

    let instalments_per_year = frequency.payments_per_year();
    let instalment_amount = annual_payable / Decimal::from(instalments_per_year);

    debug!(
        payable = %annual_payable.amount(),
        instalment = %instalment_amount.amount(),
        "Payment plan computed"
    );

    PaymentPlan {
        frequency,
        renewal,
        base_annual_premium: base,
        renewal_loading,
        annual_payment_discount,
        annual_payable,
        instalments_per_year,
        instalment_amount,
    }
}
