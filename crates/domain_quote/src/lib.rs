//! SchoolSure Quote Engine
//!
//! Pure pricing for the SchoolSure quote wizard. Given a roster of children,
//! their schools' annual fees and the products selected for each, the
//! engine produces an itemised premium; separately it applies government
//! levies and splits commission on a gross premium.
//!
//! # Products
//!
//! - **Fee protection** (Product A): core cover, priced on the annual fee with a minimum premium
//! - **Student continuity** (Product B): add-on, priced on the annual fee
//! - **Expenses cover** (Product C): add-on, flat fee per child
//! - **Tiered cover** (Product D): standalone, fixed premium per level
//!
//! # Flow
//!
//! ```text
//! roster + options --compute_premium--> PremiumBreakdown
//!                                          |
//!            annual_with_discount ---------+--> compute_insurance_taxes --> TaxBreakdown
//!                                          +--> compute_commission      --> CommissionBreakdown
//!                                          +--> compute_payment_plan    --> PaymentPlan
//! ```
//!
//! Every calculator takes the [`RateTable`] explicitly, so alternate tables
//! can be tested side by side with the standard one.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_quote::{compute_premium, compute_insurance_taxes, ChildInput, PolicyOptions, RateTable};
//!
//! let rates = RateTable::standard();
//! let roster = vec![ChildInput::new("Ava", "Riverside Grammar", Money::aud(dec!(30000)))];
//! let premium = compute_premium(&rates, &roster, &PolicyOptions::default())?;
//! let taxes = compute_insurance_taxes(premium.annual_with_discount, "NSW");
//! ```

pub mod commission;
pub mod config;
pub mod coverage;
pub mod error;
pub mod payment;
pub mod premium;
pub mod rate_table;
pub mod tax;
pub mod tier;

pub use commission::{compute_commission, CommissionBreakdown, COMMISSION_RATE};
pub use crate::config::RateTableConfig;
pub use coverage::CoverageDates;
pub use error::QuoteError;
pub use payment::{compute_payment_plan, Instalment, PaymentFrequency, PaymentPlan};
pub use premium::{
    compute_premium, ChildInput, ChildPremiumBreakdown, PolicyOptions, PremiumBreakdown,
    PremiumCalculator, ProductsIncluded,
};
pub use rate_table::{
    Discounts, ExpenseSubLimits, ExpensesCoverRates, FeeProtectionRates, RateTable,
    RateTableBuilder, StudentContinuityRates, TierLevel, TierRates, TieredCoverRates,
    MAX_PERIOD_DAYS,
};
pub use tax::{compute_insurance_taxes, Jurisdiction, TaxBreakdown, GST_RATE};
pub use tier::{compute_tier_options, compute_tier_premium, TierQuote};
