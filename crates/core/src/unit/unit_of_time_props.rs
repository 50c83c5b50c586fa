//! Property-based tests for unit of time arithmetic and spans.

use chrono::NaiveDate;
use proptest::prelude::*;

use super::kind::UnitOfTimeKind;
use super::span::FinestSpan;
use super::unit_of_time::{Bucket, UnitOfTime};

/// Strategy for a kind.
fn kind_strategy() -> impl Strategy<Value = UnitOfTimeKind> {
    prop_oneof![
        Just(UnitOfTimeKind::Calendar),
        Just(UnitOfTimeKind::Fiscal),
        Just(UnitOfTimeKind::Generic),
    ]
}

/// Strategy for a bounded unit of time away from the edges of the year range.
fn bounded_unit_strategy() -> impl Strategy<Value = UnitOfTime> {
    (kind_strategy(), 100i32..9900, 1u32..=12, 1u32..=4, 1u32..=28, 0u8..4).prop_map(
        |(kind, year, month, quarter, day, granularity)| {
            let bucket = match granularity {
                0 if kind == UnitOfTimeKind::Calendar => {
                    Bucket::Day(NaiveDate::from_ymd_opt(year, month, day).unwrap())
                }
                0 | 1 => Bucket::Month { year, month },
                2 => Bucket::Quarter { year, quarter },
                _ => Bucket::Year { year },
            };
            UnitOfTime::new(kind, bucket).unwrap()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Moving forward and back again returns the original unit.
    #[test]
    fn prop_plus_is_reversible(unit in bounded_unit_strategy(), n in -50i32..50) {
        let moved = unit.plus(n).unwrap();
        prop_assert_eq!(moved.plus(-n).unwrap(), unit);
    }

    /// Moving forward always yields a later unit of the same family.
    #[test]
    fn prop_plus_respects_order(unit in bounded_unit_strategy(), n in 1i32..50) {
        let later = unit.plus(n).unwrap();
        prop_assert!(unit < later);
        prop_assert_eq!(later.unit(), unit.unit());
    }

    /// Adjacent units have adjacent spans on the finest grid.
    #[test]
    fn prop_adjacent_units_have_adjacent_spans(unit in bounded_unit_strategy()) {
        let next = unit.plus(1).unwrap();
        let span = unit.to_finest_span().unwrap();
        let next_span = next.to_finest_span().unwrap();

        match (span, next_span) {
            (FinestSpan::Days { last, .. }, FinestSpan::Days { first, .. }) => {
                prop_assert_eq!(last.succ_opt().unwrap(), first);
            }
            (FinestSpan::Months { last, .. }, FinestSpan::Months { first, .. }) => {
                prop_assert_eq!(last + 1, first);
            }
            _ => prop_assert!(false, "units of one kind share a grid"),
        }
    }

    /// Non-calendar spans cover exactly 1, 3 or 12 months.
    #[test]
    fn prop_month_grid_span_lengths(unit in bounded_unit_strategy()) {
        prop_assume!(unit.kind() != UnitOfTimeKind::Calendar);
        let expected = match unit.bucket() {
            Bucket::Month { .. } => 1,
            Bucket::Quarter { .. } => 3,
            _ => 12,
        };
        prop_assert_eq!(unit.to_finest_span().unwrap().unit_count(), expected);
    }
}
