//! Coverage dates
//!
//! Waiting and moratorium periods are not priced but are printed on the
//! quote, so they are derived here from the same rate table.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::rate_table::RateTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageDates {
    pub cover_start: NaiveDate,
    /// First day a fee protection claim can arise
    pub waiting_period_end: NaiveDate,
    /// First day pre-existing conditions are covered
    pub moratorium_end: NaiveDate,
}

impl CoverageDates {
    /// Dates past the end of the calendar saturate at `NaiveDate::MAX`
    pub fn from_start(rates: &RateTable, cover_start: NaiveDate) -> Self {
        let core = rates.fee_protection();
        let after = |days: u32| {
            cover_start
                .checked_add_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MAX)
        };
        Self {
            cover_start,
            waiting_period_end: after(core.waiting_period_days()),
            moratorium_end: after(core.moratorium_period_days()),
        }
    }

    /// True once the waiting period has been served on `date`
    pub fn claims_open_on(&self, date: NaiveDate) -> bool {
        date >= self.waiting_period_end
    }

    /// True while pre-existing conditions are still excluded on `date`
    pub fn in_moratorium(&self, date: NaiveDate) -> bool {
        date >= self.cover_start && date < self.moratorium_end
    }
}
