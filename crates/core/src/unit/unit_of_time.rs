//! The unit of time value.

use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use super::error::UnitOfTimeError;
use super::kind::{Unit, UnitOfTimeGranularity, UnitOfTimeKind};
use super::span::FinestSpan;
use crate::calendar::{MAX_YEAR, MIN_YEAR, from_month_ordinal, month_ordinal, ordinal_suffix};

/// Granularity-specific payload of a unit of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// A calendar day.
    Day(NaiveDate),
    /// A month; for fiscal and generic kinds `month` is the position within
    /// the year (1 = first month of the fiscal year).
    Month {
        /// Year.
        year: i32,
        /// Month, 1-12.
        month: u32,
    },
    /// A quarter.
    Quarter {
        /// Year.
        year: i32,
        /// Quarter, 1-4.
        quarter: u32,
    },
    /// A year.
    Year {
        /// Year.
        year: i32,
    },
    /// No specific point in time.
    Unbounded,
}

impl Bucket {
    /// Granularity of the bucket.
    #[must_use]
    pub const fn granularity(&self) -> UnitOfTimeGranularity {
        match self {
            Self::Day(_) => UnitOfTimeGranularity::Day,
            Self::Month { .. } => UnitOfTimeGranularity::Month,
            Self::Quarter { .. } => UnitOfTimeGranularity::Quarter,
            Self::Year { .. } => UnitOfTimeGranularity::Year,
            Self::Unbounded => UnitOfTimeGranularity::Unbounded,
        }
    }
}

/// An immutable calendar, fiscal or generic unit of time.
///
/// Values are only ordered against values of the same kind and granularity;
/// comparing a fiscal quarter with a calendar month yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UnitOfTime {
    kind: UnitOfTimeKind,
    bucket: Bucket,
}

impl UnitOfTime {
    /// Creates a unit of time after validating the payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is outside [1, 9999], the month, quarter
    /// or day does not exist, or a day is requested for a non-calendar kind.
    pub fn new(kind: UnitOfTimeKind, bucket: Bucket) -> Result<Self, UnitOfTimeError> {
        // Day granularity is calendar-only
        Unit::new(kind, bucket.granularity())?;

        match bucket {
            Bucket::Day(date) => validate_year(date.year())?,
            Bucket::Month { year, month } => {
                validate_year(year)?;
                validate_month(month)?;
            }
            Bucket::Quarter { year, quarter } => {
                validate_year(year)?;
                if !(1..=4).contains(&quarter) {
                    return Err(UnitOfTimeError::QuarterOutOfRange(quarter));
                }
            }
            Bucket::Year { year } => validate_year(year)?,
            Bucket::Unbounded => {}
        }

        Ok(Self { kind, bucket })
    }

    /// A calendar day.
    pub fn calendar_day(year: i32, month: u32, day: u32) -> Result<Self, UnitOfTimeError> {
        validate_year(year)?;
        validate_month(month)?;
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(UnitOfTimeError::DayOutOfRange { year, month, day })?;
        Self::new(UnitOfTimeKind::Calendar, Bucket::Day(date))
    }

    /// A calendar day from a date.
    pub fn calendar_date(date: NaiveDate) -> Result<Self, UnitOfTimeError> {
        Self::new(UnitOfTimeKind::Calendar, Bucket::Day(date))
    }

    /// A calendar month.
    pub fn calendar_month(year: i32, month: u32) -> Result<Self, UnitOfTimeError> {
        Self::new(UnitOfTimeKind::Calendar, Bucket::Month { year, month })
    }

    /// A calendar quarter.
    pub fn calendar_quarter(year: i32, quarter: u32) -> Result<Self, UnitOfTimeError> {
        Self::new(UnitOfTimeKind::Calendar, Bucket::Quarter { year, quarter })
    }

    /// A calendar year.
    pub fn calendar_year(year: i32) -> Result<Self, UnitOfTimeError> {
        Self::new(UnitOfTimeKind::Calendar, Bucket::Year { year })
    }

    /// The `month`-th month of fiscal year `year`.
    pub fn fiscal_month(year: i32, month: u32) -> Result<Self, UnitOfTimeError> {
        Self::new(UnitOfTimeKind::Fiscal, Bucket::Month { year, month })
    }

    /// A fiscal quarter.
    pub fn fiscal_quarter(year: i32, quarter: u32) -> Result<Self, UnitOfTimeError> {
        Self::new(UnitOfTimeKind::Fiscal, Bucket::Quarter { year, quarter })
    }

    /// A fiscal year.
    pub fn fiscal_year(year: i32) -> Result<Self, UnitOfTimeError> {
        Self::new(UnitOfTimeKind::Fiscal, Bucket::Year { year })
    }

    /// The `month`-th month of generic year `year`.
    pub fn generic_month(year: i32, month: u32) -> Result<Self, UnitOfTimeError> {
        Self::new(UnitOfTimeKind::Generic, Bucket::Month { year, month })
    }

    /// A generic quarter.
    pub fn generic_quarter(year: i32, quarter: u32) -> Result<Self, UnitOfTimeError> {
        Self::new(UnitOfTimeKind::Generic, Bucket::Quarter { year, quarter })
    }

    /// A generic year.
    pub fn generic_year(year: i32) -> Result<Self, UnitOfTimeError> {
        Self::new(UnitOfTimeKind::Generic, Bucket::Year { year })
    }

    /// The unbounded marker of a kind.
    #[must_use]
    pub const fn unbounded(kind: UnitOfTimeKind) -> Self {
        Self {
            kind,
            bucket: Bucket::Unbounded,
        }
    }

    /// The kind.
    #[must_use]
    pub const fn kind(&self) -> UnitOfTimeKind {
        self.kind
    }

    /// The granularity.
    #[must_use]
    pub const fn granularity(&self) -> UnitOfTimeGranularity {
        self.bucket.granularity()
    }

    /// Kind and granularity together.
    #[must_use]
    pub const fn unit(&self) -> Unit {
        // Invariant upheld by `new`
        Unit::from_parts(self.kind, self.bucket.granularity())
    }

    /// The payload.
    #[must_use]
    pub const fn bucket(&self) -> Bucket {
        self.bucket
    }

    /// The year, if bounded.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        match self.bucket {
            Bucket::Day(date) => Some(date.year()),
            Bucket::Month { year, .. } | Bucket::Quarter { year, .. } | Bucket::Year { year } => {
                Some(year)
            }
            Bucket::Unbounded => None,
        }
    }

    /// The date of a calendar day.
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        match self.bucket {
            Bucket::Day(date) => Some(date),
            _ => None,
        }
    }

    /// True for the unbounded marker.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        matches!(self.bucket, Bucket::Unbounded)
    }

    /// Extent of this unit on the finest grid of its kind.
    ///
    /// # Errors
    ///
    /// Returns `UnitOfTimeError::Unbounded` for the unbounded marker.
    pub fn to_finest_span(&self) -> Result<FinestSpan, UnitOfTimeError> {
        let (first_month, last_month) = match self.bucket {
            Bucket::Day(date) => {
                return Ok(FinestSpan::Days {
                    first: date,
                    last: date,
                });
            }
            Bucket::Month { year, month } => (month_ordinal(year, month), month_ordinal(year, month)),
            Bucket::Quarter { year, quarter } => (
                month_ordinal(year, quarter * 3 - 2),
                month_ordinal(year, quarter * 3),
            ),
            Bucket::Year { year } => (month_ordinal(year, 1), month_ordinal(year, 12)),
            Bucket::Unbounded => return Err(UnitOfTimeError::Unbounded),
        };

        FinestSpan::from_month_ordinals(self.kind, first_month, last_month)
            .ok_or(UnitOfTimeError::Unbounded)
    }

    /// The unit `n` steps away at the same granularity (negative moves back).
    ///
    /// # Errors
    ///
    /// Returns an error for the unbounded marker or when the result leaves
    /// years [1, 9999].
    pub fn plus(&self, n: i32) -> Result<Self, UnitOfTimeError> {
        let bucket = match self.bucket {
            Bucket::Day(date) => {
                let moved = if n >= 0 {
                    date.checked_add_days(Days::new(u64::from(n.unsigned_abs())))
                } else {
                    date.checked_sub_days(Days::new(u64::from(n.unsigned_abs())))
                };
                let moved = moved.ok_or(if n >= 0 {
                    UnitOfTimeError::YearGreaterThanMax(date.year())
                } else {
                    UnitOfTimeError::YearLessThanOne(date.year())
                })?;
                Bucket::Day(moved)
            }
            Bucket::Month { year, month } => {
                let ordinal = month_ordinal(year, month)
                    .checked_add(n)
                    .ok_or(UnitOfTimeError::YearGreaterThanMax(year))?;
                let (year, month) = from_month_ordinal(ordinal);
                Bucket::Month { year, month }
            }
            Bucket::Quarter { year, quarter } => {
                #[allow(clippy::cast_possible_wrap)]
                let ordinal = (year * 4 + quarter as i32 - 1)
                    .checked_add(n)
                    .ok_or(UnitOfTimeError::YearGreaterThanMax(year))?;
                #[allow(clippy::cast_sign_loss)]
                let quarter = ordinal.rem_euclid(4) as u32 + 1;
                Bucket::Quarter {
                    year: ordinal.div_euclid(4),
                    quarter,
                }
            }
            Bucket::Year { year } => Bucket::Year {
                year: year
                    .checked_add(n)
                    .ok_or(UnitOfTimeError::YearGreaterThanMax(year))?,
            },
            Bucket::Unbounded => return Err(UnitOfTimeError::Unbounded),
        };

        Self::new(self.kind, bucket)
    }
}

impl PartialOrd for UnitOfTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.kind != other.kind {
            return None;
        }

        match (self.bucket, other.bucket) {
            (Bucket::Day(a), Bucket::Day(b)) => Some(a.cmp(&b)),
            (
                Bucket::Month { year, month },
                Bucket::Month {
                    year: other_year,
                    month: other_month,
                },
            ) => Some((year, month).cmp(&(other_year, other_month))),
            (
                Bucket::Quarter { year, quarter },
                Bucket::Quarter {
                    year: other_year,
                    quarter: other_quarter,
                },
            ) => Some((year, quarter).cmp(&(other_year, other_quarter))),
            (Bucket::Year { year }, Bucket::Year { year: other_year }) => {
                Some(year.cmp(&other_year))
            }
            (Bucket::Unbounded, Bucket::Unbounded) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl fmt::Display for UnitOfTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            UnitOfTimeKind::Calendar => "CY",
            UnitOfTimeKind::Fiscal => "FY",
            UnitOfTimeKind::Generic => "GY",
        };

        match self.bucket {
            Bucket::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Bucket::Month { year, month } if self.kind == UnitOfTimeKind::Calendar => {
                write!(f, "{year:04}-{month:02}")
            }
            Bucket::Month { year, month } => {
                write!(f, "{month}{} month of {prefix}{year}", ordinal_suffix(month))
            }
            Bucket::Quarter { year, quarter } => write!(f, "{quarter}Q{year}"),
            Bucket::Year { year } => write!(f, "{prefix}{year}"),
            Bucket::Unbounded => f.write_str("unbounded"),
        }
    }
}

fn validate_year(year: i32) -> Result<(), UnitOfTimeError> {
    if year < MIN_YEAR {
        return Err(UnitOfTimeError::YearLessThanOne(year));
    }
    if year > MAX_YEAR {
        return Err(UnitOfTimeError::YearGreaterThanMax(year));
    }
    Ok(())
}

fn validate_month(month: u32) -> Result<(), UnitOfTimeError> {
    if !(1..=12).contains(&month) {
        return Err(UnitOfTimeError::MonthOutOfRange(month));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[rstest]
    #[case(UnitOfTime::calendar_day(2020, 4, 1), "2020-04-01")]
    #[case(UnitOfTime::calendar_month(2020, 4), "2020-04")]
    #[case(UnitOfTime::calendar_quarter(2020, 2), "2Q2020")]
    #[case(UnitOfTime::calendar_year(2020), "CY2020")]
    #[case(UnitOfTime::fiscal_month(2020, 1), "1st month of FY2020")]
    #[case(UnitOfTime::fiscal_month(2020, 12), "12th month of FY2020")]
    #[case(UnitOfTime::fiscal_quarter(2020, 1), "1Q2020")]
    #[case(UnitOfTime::fiscal_year(2020), "FY2020")]
    #[case(UnitOfTime::generic_month(3, 2), "2nd month of GY3")]
    #[case(UnitOfTime::generic_year(3), "GY3")]
    fn test_display(#[case] unit: Result<UnitOfTime, UnitOfTimeError>, #[case] expected: &str) {
        assert_eq!(unit.unwrap().to_string(), expected);
    }

    #[test]
    fn test_unbounded_display() {
        assert_eq!(
            UnitOfTime::unbounded(UnitOfTimeKind::Fiscal).to_string(),
            "unbounded"
        );
    }

    #[test]
    fn test_year_range() {
        assert_eq!(
            UnitOfTime::calendar_year(0),
            Err(UnitOfTimeError::YearLessThanOne(0))
        );
        assert_eq!(
            UnitOfTime::fiscal_quarter(10_000, 1),
            Err(UnitOfTimeError::YearGreaterThanMax(10_000))
        );
        assert!(UnitOfTime::generic_year(1).is_ok());
        assert!(UnitOfTime::generic_year(9999).is_ok());
    }

    #[test]
    fn test_month_quarter_day_range() {
        assert_eq!(
            UnitOfTime::fiscal_month(2020, 13),
            Err(UnitOfTimeError::MonthOutOfRange(13))
        );
        assert_eq!(
            UnitOfTime::calendar_month(2020, 0),
            Err(UnitOfTimeError::MonthOutOfRange(0))
        );
        assert_eq!(
            UnitOfTime::calendar_quarter(2020, 5),
            Err(UnitOfTimeError::QuarterOutOfRange(5))
        );
        assert_eq!(
            UnitOfTime::calendar_day(2021, 2, 29),
            Err(UnitOfTimeError::DayOutOfRange {
                year: 2021,
                month: 2,
                day: 29
            })
        );
        assert!(UnitOfTime::calendar_day(2020, 2, 29).is_ok());
    }

    #[test]
    fn test_day_only_for_calendar() {
        assert_eq!(
            UnitOfTime::new(UnitOfTimeKind::Fiscal, Bucket::Day(date(2020, 1, 1))),
            Err(UnitOfTimeError::DayRequiresCalendarKind(UnitOfTimeKind::Fiscal))
        );
    }

    #[test]
    fn test_ordering_within_family() {
        let q1 = UnitOfTime::fiscal_quarter(2020, 1).unwrap();
        let q4 = UnitOfTime::fiscal_quarter(2019, 4).unwrap();
        assert!(q4 < q1);
        assert_eq!(q1.partial_cmp(&q1), Some(Ordering::Equal));
    }

    #[test]
    fn test_no_ordering_across_families() {
        let fiscal = UnitOfTime::fiscal_quarter(2020, 1).unwrap();
        let calendar = UnitOfTime::calendar_quarter(2020, 1).unwrap();
        let fiscal_month = UnitOfTime::fiscal_month(2020, 1).unwrap();
        assert_eq!(fiscal.partial_cmp(&calendar), None);
        assert_eq!(fiscal.partial_cmp(&fiscal_month), None);
        assert_eq!(
            fiscal.partial_cmp(&UnitOfTime::unbounded(UnitOfTimeKind::Fiscal)),
            None
        );
    }

    #[test]
    fn test_calendar_finest_span() {
        let quarter = UnitOfTime::calendar_quarter(2020, 1).unwrap();
        assert_eq!(
            quarter.to_finest_span(),
            Ok(FinestSpan::Days {
                first: date(2020, 1, 1),
                last: date(2020, 3, 31)
            })
        );
    }

    #[test]
    fn test_fiscal_finest_span() {
        let quarter = UnitOfTime::fiscal_quarter(2020, 2).unwrap();
        assert_eq!(
            quarter.to_finest_span(),
            Ok(FinestSpan::Months {
                first: month_ordinal(2020, 4),
                last: month_ordinal(2020, 6)
            })
        );
    }

    #[test]
    fn test_unbounded_has_no_span() {
        assert_eq!(
            UnitOfTime::unbounded(UnitOfTimeKind::Calendar).to_finest_span(),
            Err(UnitOfTimeError::Unbounded)
        );
    }

    #[test]
    fn test_date_only_for_days() {
        assert_eq!(
            UnitOfTime::calendar_day(2020, 2, 29).unwrap().date(),
            Some(date(2020, 2, 29))
        );
        assert_eq!(UnitOfTime::calendar_month(2020, 2).unwrap().date(), None);
        assert_eq!(UnitOfTime::fiscal_year(2020).unwrap().date(), None);
    }

    #[test]
    fn test_plus() {
        let month = UnitOfTime::fiscal_month(2020, 12).unwrap();
        assert_eq!(month.plus(1), UnitOfTime::fiscal_month(2021, 1));
        assert_eq!(month.plus(-12), UnitOfTime::fiscal_month(2019, 12));

        let quarter = UnitOfTime::calendar_quarter(2020, 1).unwrap();
        assert_eq!(quarter.plus(-1), UnitOfTime::calendar_quarter(2019, 4));
        assert_eq!(quarter.plus(7), UnitOfTime::calendar_quarter(2021, 4));

        let day = UnitOfTime::calendar_day(2020, 2, 28).unwrap();
        assert_eq!(day.plus(1), UnitOfTime::calendar_day(2020, 2, 29));
        assert_eq!(day.plus(-28), UnitOfTime::calendar_day(2020, 1, 31));

        let year = UnitOfTime::generic_year(9999).unwrap();
        assert_eq!(year.plus(1), Err(UnitOfTimeError::YearGreaterThanMax(10_000)));
    }

    #[test]
    fn test_serialization_shape() {
        let unit = UnitOfTime::fiscal_quarter(2020, 1).unwrap();
        let json = serde_json::to_value(unit).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "fiscal", "bucket": { "quarter": { "year": 2020, "quarter": 1 } } })
        );
    }
}
