//! Distributor commission

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use core_kernel::{Money, Rate};

/// Share of the gross premium retained by the distributor
pub const COMMISSION_RATE: Rate = Rate::new(dec!(0.35));

/// Split of a gross premium between distributor and underwriter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionBreakdown {
    pub gross_premium: Money,
    pub commission_rate: Rate,
    pub commission: Money,
    pub net_to_underwriter: Money,
}

/// Splits a gross premium into commission and the underwriter's net
///
/// The two parts always sum back to `gross_premium` exactly. Whether the
/// split is taken before or after levies is the caller's decision.
#[instrument(skip(gross_premium), fields(gross = %gross_premium.amount()))]
pub fn compute_commission(gross_premium: Money) -> CommissionBreakdown {
    let commission = COMMISSION_RATE.apply(&gross_premium);
    CommissionBreakdown {
        gross_premium,
        commission_rate: COMMISSION_RATE,
        commission,
        net_to_underwriter: gross_premium - commission,
    }
}
