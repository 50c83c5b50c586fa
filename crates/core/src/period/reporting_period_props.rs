//! Property-based tests for reporting period containment and re-expression.

use proptest::prelude::*;

use super::reporting_period::ReportingPeriod;
use crate::unit::{UnitOfTime, UnitOfTimeGranularity, UnitOfTimeKind};

/// Strategy for a bounded fiscal month period of up to three years.
fn fiscal_month_period() -> impl Strategy<Value = ReportingPeriod> {
    (2000i32..2100, 1u32..=12, 0i32..36).prop_map(|(year, month, length)| {
        let start = UnitOfTime::fiscal_month(year, month).unwrap();
        ReportingPeriod::new(start, start.plus(length).unwrap()).unwrap()
    })
}

/// Strategy for a bounded calendar quarter period.
fn calendar_quarter_period() -> impl Strategy<Value = ReportingPeriod> {
    (2000i32..2100, 1u32..=4, 0i32..12).prop_map(|(year, quarter, length)| {
        let start = UnitOfTime::calendar_quarter(year, quarter).unwrap();
        ReportingPeriod::new(start, start.plus(length).unwrap()).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Containment implies overlap, in both directions of the check.
    #[test]
    fn prop_contains_implies_overlaps(a in fiscal_month_period(), b in fiscal_month_period()) {
        if a.contains(&b) {
            prop_assert!(a.overlaps(&b));
            prop_assert!(b.overlaps(&a));
        }
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    /// A month period has as many units as its span has months.
    #[test]
    fn prop_units_within_matches_span(period in fiscal_month_period()) {
        let units = period.units_within().unwrap();
        let span = period.to_finest_span().unwrap();
        prop_assert_eq!(i64::try_from(units.len()).unwrap(), span.unit_count());
    }

    /// A calendar quarter period can always be re-expressed in months and
    /// days, and covers the same extent each way.
    #[test]
    fn prop_quarters_split_into_months_and_days(period in calendar_quarter_period()) {
        let span = period.to_finest_span().unwrap();

        for granularity in [UnitOfTimeGranularity::Month, UnitOfTimeGranularity::Day] {
            let unit = crate::unit::Unit::new(UnitOfTimeKind::Calendar, granularity).unwrap();
            let split = ReportingPeriod::from_finest_span(span, unit).unwrap();
            prop_assert_eq!(split.granularity(), granularity);
            prop_assert_eq!(split.to_finest_span().unwrap(), span);
        }
    }
}
