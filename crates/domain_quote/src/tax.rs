//! Government levies on insurance premiums
//!
//! GST is charged on the gross premium; stamp duty is then charged by the
//! state or territory on the GST-inclusive premium.

use std::fmt;
use std::str::FromStr;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use core_kernel::{Money, Rate};

use crate::error::QuoteError;

/// Goods and services tax on the gross premium
pub const GST_RATE: Rate = Rate::new(dec!(0.10));

/// Australian state or territory the policyholder lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Jurisdiction {
    NSW,
    VIC,
    QLD,
    WA,
    SA,
    TAS,
    ACT,
    NT,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 8] = [
        Jurisdiction::NSW,
        Jurisdiction::VIC,
        Jurisdiction::QLD,
        Jurisdiction::WA,
        Jurisdiction::SA,
        Jurisdiction::TAS,
        Jurisdiction::ACT,
        Jurisdiction::NT,
    ];

    /// Looks up a code, ignoring case and surrounding whitespace
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|j| j.code().eq_ignore_ascii_case(code))
    }

    /// Strict lookup for callers that want unknown codes rejected
    pub fn parse(code: &str) -> Result<Self, QuoteError> {
        Self::from_code(code).ok_or_else(|| {
            QuoteError::validation(format!("Unknown jurisdiction code: {:?}", code))
        })
    }

    pub fn code(&self) -> &'static str {
        match self {
            Jurisdiction::NSW => "NSW",
            Jurisdiction::VIC => "VIC",
            Jurisdiction::QLD => "QLD",
            Jurisdiction::WA => "WA",
            Jurisdiction::SA => "SA",
            Jurisdiction::TAS => "TAS",
            Jurisdiction::ACT => "ACT",
            Jurisdiction::NT => "NT",
        }
    }

    /// Stamp duty charged on the GST-inclusive premium
    pub fn stamp_duty_rate(&self) -> Rate {
        let rate = match self {
            Jurisdiction::NSW => dec!(0.09),
            Jurisdiction::VIC => dec!(0.10),
            Jurisdiction::QLD => dec!(0.09),
            Jurisdiction::WA => dec!(0.10),
            Jurisdiction::SA => dec!(0.11),
            Jurisdiction::TAS => dec!(0.10),
            Jurisdiction::ACT => dec!(0),
            Jurisdiction::NT => dec!(0.10),
        };
        Rate::new(rate)
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Jurisdiction {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Levies payable on a gross premium
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub gross_premium: Money,
    /// `None` when the code supplied was not recognised
    pub jurisdiction: Option<Jurisdiction>,
    pub gst: Money,
    pub premium_inc_gst: Money,
    pub stamp_duty_rate: Rate,
    pub stamp_duty: Money,
    pub total_payable: Money,
}

/// Computes GST and stamp duty on a gross premium
///
/// An unrecognised jurisdiction code is charged 0% stamp duty rather than
/// rejected; use [`Jurisdiction::parse`] first to reject it instead.
#[instrument(skip(gross_premium), fields(gross = %gross_premium.amount()))]
pub fn compute_insurance_taxes(gross_premium: Money, jurisdiction: &str) -> TaxBreakdown {
    let recognised = Jurisdiction::from_code(jurisdiction);
    let stamp_duty_rate = match recognised {
        Some(j) => j.stamp_duty_rate(),
        None => {
            warn!(jurisdiction, "Unrecognised jurisdiction, charging no stamp duty");
            Rate::ZERO
        }
    };

    let gst = GST_RATE.apply(&gross_premium);
    let premium_inc_gst = gross_premium + gst;
    let stamp_duty = stamp_duty_rate.apply(&premium_inc_gst);
    let total_payable = premium_inc_gst + stamp_duty;

    TaxBreakdown {
        gross_premium,
        jurisdiction: recognised,
        gst,
        premium_inc_gst,
        stamp_duty_rate,
        stamp_duty,
        total_payable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nsw_levies() {
        let taxes = compute_insurance_taxes(Money::aud(dec!(1000)), "NSW");
        assert_eq!(taxes.gst.amount(), dec!(100));
        assert_eq!(taxes.premium_inc_gst.amount(), dec!(1100));
        assert_eq!(taxes.stamp_duty.amount(), dec!(99));
        assert_eq!(taxes.total_payable.amount(), dec!(1199));
        assert_eq!(taxes.jurisdiction, Some(Jurisdiction::NSW));
    }

    #[test]
    fn test_unknown_code_charges_no_stamp_duty() {
        let taxes = compute_insurance_taxes(Money::aud(dec!(1000)), "XX");
        assert!(taxes.stamp_duty.is_zero());
        assert!(taxes.stamp_duty_rate.is_zero());
        assert_eq!(taxes.jurisdiction, None);
        assert_eq!(taxes.total_payable.amount(), dec!(1100));
    }

    #[test]
    fn test_code_lookup_is_case_insensitive() {
        assert_eq!(Jurisdiction::from_code(" vic "), Some(Jurisdiction::VIC));
        assert!(Jurisdiction::parse("Victoria").is_err());
    }
}
