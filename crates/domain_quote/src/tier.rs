//! Tiered cover pricing
//!
//! Product D is sold on its own at one of three levels. Each level has a
//! fixed premium; the nominal rate and coverage limit are quoted to the
//! customer but never multiplied out.

use serde::Serialize;
use tracing::{debug, instrument};

use core_kernel::{Money, Rate};

use crate::rate_table::{RateTable, TierLevel};

/// Price of one tiered cover level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierQuote {
    pub level: TierLevel,
    pub coverage_limit: Money,
    pub nominal_rate: Rate,
    pub premium: Money,
}

/// Looks up the premium for a tiered cover level
#[instrument(skip(rates))]
pub fn compute_tier_premium(rates: &RateTable, level: TierLevel) -> TierQuote {
    let tier = rates.tiered_cover().level(level);
    debug!(premium = %tier.premium().amount(), "Tier priced");
    TierQuote {
        level,
        coverage_limit: tier.coverage_limit(),
        nominal_rate: tier.nominal_rate(),
        premium: tier.premium(),
    }
}

/// Quotes every level, lowest first, for the comparison table
pub fn compute_tier_options(rates: &RateTable) -> Vec<TierQuote> {
    TierLevel::ALL
        .into_iter()
        .map(|level| compute_tier_premium(rates, level))
        .collect()
}
