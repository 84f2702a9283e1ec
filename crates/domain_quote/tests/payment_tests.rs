//! Payment Plan, Tiered Cover and Coverage Date Tests
//!
//! # Test Organization
//!
//! - `payment_plan_tests` - Annual-payment discount, renewal loading, instalments
//! - `schedule_tests` - Instalment due dates
//! - `tier_tests` - Standalone tiered cover pricing
//! - `coverage_date_tests` - Waiting period and moratorium

use chrono::{Datelike, NaiveDate};
use core_kernel::{Money, Rate};
use domain_quote::{
    compute_payment_plan, compute_premium, compute_tier_options, compute_tier_premium,
    CoverageDates, PaymentFrequency, PolicyOptions, PremiumBreakdown, RateTable, TierLevel,
    TierRates, TieredCoverRates,
};
use proptest::prelude::*;
use rust_decimal_macros::dec;
use test_utils::{
    assert_aud, assert_money_approx_eq, assert_money_zero, tier_level_strategy, ChildFixtures,
    RosterBuilder, DIVISION_TOLERANCE,
};

/// A single-child quote priced at exactly $1,000 a year
fn thousand_dollar_quote(rates: &RateTable) -> PremiumBreakdown {
    let roster = RosterBuilder::new().child_with_fee(dec!(40000)).build();
    compute_premium(rates, &roster, &PolicyOptions::default()).unwrap()
}

// ============================================================================
// PAYMENT PLAN TESTS
// ============================================================================

mod payment_plan_tests {
    use super::*;

    /// Paying annually takes 5% off
    #[test]
    fn test_annual_new_business() {
        let rates = RateTable::standard();
        let plan = compute_payment_plan(&rates, &thousand_dollar_quote(&rates), PaymentFrequency::Annual, false);

        assert_aud(&plan.base_annual_premium, dec!(1000));
        assert_money_zero(&plan.renewal_loading);
        assert_aud(&plan.annual_payment_discount, dec!(-50));
        assert_aud(&plan.annual_payable, dec!(950));
        assert_eq!(plan.instalments_per_year, 1);
        assert_aud(&plan.instalment_amount, dec!(950));
    }

    /// Monthly payment gets no discount and splits into twelve
    #[test]
    fn test_monthly_new_business() {
        let rates = RateTable::standard();
        let plan = compute_payment_plan(&rates, &thousand_dollar_quote(&rates), PaymentFrequency::Monthly, false);

        assert_money_zero(&plan.annual_payment_discount);
        assert_aud(&plan.annual_payable, dec!(1000));
        assert_eq!(plan.instalments_per_year, 12);
        assert_money_approx_eq(
            &plan.instalment_amount,
            &Money::aud(dec!(1000) / dec!(12)),
            DIVISION_TOLERANCE,
        );
    }

    /// Renewal loading is applied before the annual-payment discount
    #[test]
    fn test_annual_renewal() {
        let rates = RateTable::standard();
        let plan = compute_payment_plan(&rates, &thousand_dollar_quote(&rates), PaymentFrequency::Annual, true);

        assert_aud(&plan.renewal_loading, dec!(30));
        assert_aud(&plan.annual_payment_discount, dec!(-51.5));
        assert_aud(&plan.annual_payable, dec!(978.5));
    }

    #[test]
    fn test_monthly_renewal() {
        let rates = RateTable::standard();
        let plan = compute_payment_plan(&rates, &thousand_dollar_quote(&rates), PaymentFrequency::Monthly, true);

        assert_aud(&plan.annual_payable, dec!(1030));
        assert!(plan.renewal);
    }

    /// The plan starts from the multi-child discounted total
    #[test]
    fn test_plan_uses_discounted_total() {
        let rates = RateTable::standard();
        let breakdown = compute_premium(
            &rates,
            &ChildFixtures::two_full_term_siblings(),
            &PolicyOptions::default(),
        )
        .unwrap();
        let plan = compute_payment_plan(&rates, &breakdown, PaymentFrequency::Monthly, false);

        assert_eq!(plan.base_annual_premium, breakdown.annual_with_discount);
        assert_eq!(plan.instalment_amount, breakdown.monthly_total);
    }

    #[test]
    fn test_default_frequency_is_annual() {
        assert_eq!(PaymentFrequency::default(), PaymentFrequency::Annual);
        assert_eq!(PolicyOptions::default().payment_frequency, PaymentFrequency::Annual);
    }
}

// ============================================================================
// SCHEDULE TESTS
// ============================================================================

mod schedule_tests {
    use super::*;

    #[test]
    fn test_monthly_schedule() {
        let rates = RateTable::standard();
        let plan = compute_payment_plan(&rates, &thousand_dollar_quote(&rates), PaymentFrequency::Monthly, false);
        let start = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let schedule = plan.schedule(start);

        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule[0].sequence_number, 1);
        assert_eq!(schedule[0].due_date, start);
        assert_eq!(schedule[11].due_date, NaiveDate::from_ymd_opt(2026, 12, 15).unwrap());

        let total = Money::sum(plan.annual_payable.currency(), schedule.iter().map(|i| &i.amount)).unwrap();
        let diff = (total.amount() - plan.annual_payable.amount()).abs();
        assert!(diff < dec!(0.000000001));
    }

    #[test]
    fn test_annual_schedule_has_one_instalment() {
        let rates = RateTable::standard();
        let plan = compute_payment_plan(&rates, &thousand_dollar_quote(&rates), PaymentFrequency::Annual, false);
        let schedule = plan.schedule(NaiveDate::from_ymd_opt(2026, 2, 2).unwrap());

        assert_eq!(schedule.len(), 1);
        assert_aud(&schedule[0].amount, dec!(950));
    }

    /// Days a month lacks clamp to that month's last day
    #[test]
    fn test_month_end_next_due_dates() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let monthly = PaymentFrequency::Monthly;

        assert_eq!(monthly.next_due_date(date(2026, 1, 31)), date(2026, 2, 28));
        assert_eq!(monthly.next_due_date(date(2028, 1, 31)), date(2028, 2, 29));
        assert_eq!(monthly.next_due_date(date(2026, 3, 31)), date(2026, 4, 30));
        assert_eq!(PaymentFrequency::Annual.next_due_date(date(2028, 2, 29)), date(2029, 2, 28));
    }

    /// A schedule starting on the 31st pays once in every month of the policy year
    #[test]
    fn test_month_end_schedule_covers_every_month() {
        let rates = RateTable::standard();
        let plan = compute_payment_plan(&rates, &thousand_dollar_quote(&rates), PaymentFrequency::Monthly, false);
        let start = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let schedule = plan.schedule(start);
        let policy_year_end = NaiveDate::from_ymd_opt(2027, 1, 31).unwrap();

        let months: Vec<u32> = schedule.iter().map(|i| i.due_date.month()).collect();
        assert_eq!(months, (1..=12).collect::<Vec<u32>>());
        assert!(schedule.iter().all(|i| i.due_date >= start && i.due_date < policy_year_end));

        assert_eq!(schedule[1].due_date, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(schedule[2].due_date, NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());
        assert_eq!(schedule[3].due_date, NaiveDate::from_ymd_opt(2026, 4, 30).unwrap());
        assert_eq!(schedule[11].due_date, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }
}

// ============================================================================
// TIERED COVER TESTS
// ============================================================================

mod tier_tests {
    use super::*;

    #[test]
    fn test_each_level() {
        let rates = RateTable::standard();
        let expected = [
            (TierLevel::Level1, dec!(5000), dec!(100)),
            (TierLevel::Level2, dec!(10000), dec!(200)),
            (TierLevel::Level3, dec!(20000), dec!(400)),
        ];

        for (level, limit, premium) in expected {
            let quote = compute_tier_premium(&rates, level);
            assert_eq!(quote.level, level);
            assert_aud(&quote.coverage_limit, limit);
            assert_aud(&quote.premium, premium);
        }
    }

    /// The fixed premium wins even when limit times rate disagrees
    #[test]
    fn test_fixed_premium_is_authoritative() {
        let aud = Money::aud;
        let rates = RateTable::builder()
            .tiered_cover(TieredCoverRates::new(
                TierRates::new(aud(dec!(5000)), Rate::new(dec!(0.05)), aud(dec!(100))),
                TierRates::new(aud(dec!(10000)), Rate::new(dec!(0.05)), aud(dec!(200))),
                TierRates::new(aud(dec!(20000)), Rate::new(dec!(0.05)), aud(dec!(400))),
            ))
            .build()
            .unwrap();
        let quote = compute_tier_premium(&rates, TierLevel::Level1);

        assert_aud(&quote.nominal_rate.apply(&quote.coverage_limit), dec!(250));
        assert_aud(&quote.premium, dec!(100));
    }

    #[test]
    fn test_options_in_level_order() {
        let rates = RateTable::standard();
        let levels: Vec<u8> = compute_tier_options(&rates).iter().map(|q| q.level.number()).collect();
        assert_eq!(levels, vec![1, 2, 3]);
    }

    #[test]
    fn test_level_number_validation() {
        assert_eq!(TierLevel::from_number(2).unwrap(), TierLevel::Level2);
        assert!(TierLevel::from_number(7).unwrap_err().is_validation());
    }

    proptest! {
        #[test]
        fn tier_quote_echoes_table(level in tier_level_strategy()) {
            let rates = RateTable::standard();
            let quote = compute_tier_premium(&rates, level);
            let tier = rates.tiered_cover().level(level);

            prop_assert_eq!(quote.premium, tier.premium());
            prop_assert_eq!(TierLevel::from_number(level.number()).unwrap(), level);
        }
    }
}

// ============================================================================
// COVERAGE DATE TESTS
// ============================================================================

mod coverage_date_tests {
    use super::*;

    #[test]
    fn test_waiting_period_and_moratorium() {
        let rates = RateTable::standard();
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let dates = CoverageDates::from_start(&rates, start);

        assert_eq!(dates.cover_start, start);
        assert_eq!(dates.waiting_period_end, NaiveDate::from_ymd_opt(2026, 7, 31).unwrap());
        assert_eq!(dates.moratorium_end, NaiveDate::from_ymd_opt(2027, 7, 1).unwrap());
    }

    #[test]
    fn test_claims_open_after_waiting_period() {
        let rates = RateTable::standard();
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let dates = CoverageDates::from_start(&rates, start);

        assert!(!dates.claims_open_on(NaiveDate::from_ymd_opt(2026, 7, 30).unwrap()));
        assert!(dates.claims_open_on(NaiveDate::from_ymd_opt(2026, 7, 31).unwrap()));
    }

    #[test]
    fn test_moratorium_window() {
        let rates = RateTable::standard();
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let dates = CoverageDates::from_start(&rates, start);

        assert!(!dates.in_moratorium(NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()));
        assert!(dates.in_moratorium(NaiveDate::from_ymd_opt(2027, 6, 30).unwrap()));
        assert!(!dates.in_moratorium(NaiveDate::from_ymd_opt(2027, 7, 1).unwrap()));
    }
}
