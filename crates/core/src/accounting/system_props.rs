//! Property-based tests for accounting period systems.

use chrono::{Datelike, Month, NaiveDate, Weekday};
use proptest::prelude::*;

use super::system::{AccountingPeriodSystem, FiftyTwoFiftyThreeWeekMethodology, month_from_number};
use crate::calendar::days_inclusive;
use crate::unit::FinestSpan;

fn weekday_strategy() -> impl Strategy<Value = Weekday> {
    (0u8..7).prop_map(|n| match n {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    })
}

fn month_strategy() -> impl Strategy<Value = Month> {
    (1u32..=12).prop_map(|n| month_from_number(n).unwrap())
}

fn methodology_strategy() -> impl Strategy<Value = FiftyTwoFiftyThreeWeekMethodology> {
    prop_oneof![
        Just(FiftyTwoFiftyThreeWeekMethodology::LastOccurrenceInAnchorMonth),
        Just(FiftyTwoFiftyThreeWeekMethodology::ClosestToLastDayOfAnchorMonth),
    ]
}

/// Strategy for any accounting period system.
fn system_strategy() -> impl Strategy<Value = AccountingPeriodSystem> {
    prop_oneof![
        Just(AccountingPeriodSystem::CalendarYear),
        (1u32..=11).prop_map(|n| AccountingPeriodSystem::fiscal_year_from_month_number(n).unwrap()),
        (weekday_strategy(), month_strategy(), methodology_strategy()).prop_map(
            |(weekday, month, methodology)| {
                AccountingPeriodSystem::fifty_two_fifty_three_week(weekday, month, methodology)
            }
        ),
    ]
}

fn bounds(system: AccountingPeriodSystem, fiscal_year: i32) -> (NaiveDate, NaiveDate) {
    match system
        .reporting_period_for_fiscal_year(fiscal_year)
        .unwrap()
        .to_finest_span()
        .unwrap()
    {
        FinestSpan::Days { first, last } => (first, last),
        FinestSpan::Months { .. } => unreachable!("fiscal years are expressed in calendar days"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Consecutive fiscal years leave no gap and do not overlap.
    #[test]
    fn prop_fiscal_years_are_contiguous(system in system_strategy(), year in 10i32..9990) {
        let (_, last) = bounds(system, year);
        let (next_first, _) = bounds(system, year + 1);
        prop_assert_eq!(last.succ_opt().unwrap(), next_first);
    }

    /// Every fiscal year is as long as a calendar year or 52/53 weeks.
    #[test]
    fn prop_fiscal_year_lengths(system in system_strategy(), year in 10i32..9990) {
        let (first, last) = bounds(system, year);
        let length = days_inclusive(first, last);
        match system {
            AccountingPeriodSystem::FiftyTwoFiftyThreeWeek(weeks) => {
                prop_assert!(length == 364 || length == 371);
                prop_assert_eq!(last.weekday(), weeks.last_day_of_week());
            }
            _ => prop_assert!(length == 365 || length == 366),
        }
    }

    /// Every day of a fiscal year is found in that fiscal year.
    #[test]
    fn prop_fiscal_year_containing_agrees(
        system in system_strategy(),
        year in 10i32..9990,
        offset in 0u64..364,
    ) {
        let (first, _) = bounds(system, year);
        let day = first.checked_add_days(chrono::Days::new(offset)).unwrap();
        prop_assert_eq!(system.fiscal_year_containing(day), Ok(year));
    }
}
