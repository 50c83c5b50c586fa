//! The reporting period value.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::error::ReportingPeriodError;
use crate::calendar::from_month_ordinal;
use crate::unit::{
    Bucket, Edge, FinestSpan, Unit, UnitOfTime, UnitOfTimeGranularity, UnitOfTimeKind,
};

/// An inclusive `[start, end]` range of units of time of one kind.
///
/// An unbounded start means "from the beginning of time" and an unbounded end
/// means "to the end of time".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ReportingPeriod {
    start: UnitOfTime,
    end: UnitOfTime,
}

impl ReportingPeriod {
    /// Creates a reporting period.
    ///
    /// # Errors
    ///
    /// Returns an error if the components differ in kind, if bounded
    /// components differ in granularity, or if start is after end.
    pub fn new(start: UnitOfTime, end: UnitOfTime) -> Result<Self, ReportingPeriodError> {
        if start.kind() != end.kind() {
            return Err(ReportingPeriodError::KindMismatch {
                start: start.kind(),
                end: end.kind(),
            });
        }

        if !start.is_unbounded() && !end.is_unbounded() {
            if start.granularity() != end.granularity() {
                return Err(ReportingPeriodError::GranularityMismatch {
                    start: start.granularity(),
                    end: end.granularity(),
                });
            }

            if start.partial_cmp(&end) == Some(Ordering::Greater) {
                return Err(ReportingPeriodError::StartAfterEnd { start, end });
            }
        }

        Ok(Self { start, end })
    }

    /// A period covering exactly one unit.
    #[must_use]
    pub const fn single(unit: UnitOfTime) -> Self {
        Self {
            start: unit,
            end: unit,
        }
    }

    /// A period of calendar days.
    ///
    /// # Errors
    ///
    /// Returns an error if either date is outside years [1, 9999] or
    /// `first > last`.
    pub fn calendar_days(first: NaiveDate, last: NaiveDate) -> Result<Self, ReportingPeriodError> {
        Self::new(
            UnitOfTime::calendar_date(first)?,
            UnitOfTime::calendar_date(last)?,
        )
    }

    /// First unit.
    #[must_use]
    pub const fn start(&self) -> UnitOfTime {
        self.start
    }

    /// Last unit.
    #[must_use]
    pub const fn end(&self) -> UnitOfTime {
        self.end
    }

    /// The kind shared by both components.
    #[must_use]
    pub const fn kind(&self) -> UnitOfTimeKind {
        self.start.kind()
    }

    /// The granularity of the bounded components; `Unbounded` only when both
    /// components are unbounded.
    #[must_use]
    pub const fn granularity(&self) -> UnitOfTimeGranularity {
        if self.start.is_unbounded() {
            self.end.granularity()
        } else {
            self.start.granularity()
        }
    }

    /// True if either component is unbounded.
    #[must_use]
    pub const fn has_unbounded_component(&self) -> bool {
        self.start.is_unbounded() || self.end.is_unbounded()
    }

    /// Extent of the period on the finest grid of its kind.
    ///
    /// # Errors
    ///
    /// Returns `ReportingPeriodError::HasUnboundedComponent` if either
    /// component is unbounded.
    pub fn to_finest_span(&self) -> Result<FinestSpan, ReportingPeriodError> {
        if self.has_unbounded_component() {
            return Err(ReportingPeriodError::HasUnboundedComponent);
        }

        let start = self.start.to_finest_span()?;
        let end = self.end.to_finest_span()?;
        start.through(end).ok_or(ReportingPeriodError::KindMismatch {
            start: self.start.kind(),
            end: self.end.kind(),
        })
    }

    /// Re-expresses a finest-grid extent as a period of `unit`.
    ///
    /// Returns `None` when the extent is on the wrong grid for the unit's
    /// kind or does not begin and end on boundaries of the unit's
    /// granularity (e.g., two months expressed in quarters).
    #[must_use]
    pub fn from_finest_span(span: FinestSpan, unit: Unit) -> Option<Self> {
        let kind = unit.kind();
        let granularity = unit.granularity();

        match span {
            FinestSpan::Days { first, last } if granularity == UnitOfTimeGranularity::Day => {
                return Self::calendar_days(first, last).ok();
            }
            FinestSpan::Days { .. } if kind != UnitOfTimeKind::Calendar => return None,
            FinestSpan::Months { .. } if kind == UnitOfTimeKind::Calendar => return None,
            _ => {}
        }

        let (first, last) = span.as_months()?;
        let (first_year, first_month) = from_month_ordinal(first);
        let (last_year, last_month) = from_month_ordinal(last);

        let (start, end) = match granularity {
            UnitOfTimeGranularity::Month => (
                Bucket::Month {
                    year: first_year,
                    month: first_month,
                },
                Bucket::Month {
                    year: last_year,
                    month: last_month,
                },
            ),
            UnitOfTimeGranularity::Quarter => {
                if (first_month - 1) % 3 != 0 || last_month % 3 != 0 {
                    return None;
                }
                (
                    Bucket::Quarter {
                        year: first_year,
                        quarter: (first_month + 2) / 3,
                    },
                    Bucket::Quarter {
                        year: last_year,
                        quarter: last_month / 3,
                    },
                )
            }
            UnitOfTimeGranularity::Year => {
                if first_month != 1 || last_month != 12 {
                    return None;
                }
                (
                    Bucket::Year { year: first_year },
                    Bucket::Year { year: last_year },
                )
            }
            UnitOfTimeGranularity::Day | UnitOfTimeGranularity::Unbounded => return None,
        };

        Self::new(
            UnitOfTime::new(kind, start).ok()?,
            UnitOfTime::new(kind, end).ok()?,
        )
        .ok()
    }

    /// True if `unit` falls within this period.
    #[must_use]
    pub fn contains_unit(&self, unit: &UnitOfTime) -> bool {
        self.contains(&Self::single(*unit))
    }

    /// True if `other` lies entirely within this period.
    ///
    /// Periods of different kinds never contain one another.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        if self.kind() != other.kind() {
            return false;
        }

        if let (Ok(outer), Ok(inner)) = (self.to_finest_span(), other.to_finest_span()) {
            return outer.contains(inner);
        }

        let starts_no_later = match (self.start.is_unbounded(), other.start.is_unbounded()) {
            (true, _) => true,
            (false, true) => false,
            (false, false) => compare_units(&self.start, Edge::First, &other.start, Edge::First)
                .is_some_and(Ordering::is_le),
        };

        let ends_no_earlier = match (self.end.is_unbounded(), other.end.is_unbounded()) {
            (true, _) => true,
            (false, true) => false,
            (false, false) => compare_units(&self.end, Edge::Last, &other.end, Edge::Last)
                .is_some_and(Ordering::is_ge),
        };

        starts_no_later && ends_no_earlier
    }

    /// True if the two periods share any time.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.kind() != other.kind() {
            return false;
        }

        if let (Ok(left), Ok(right)) = (self.to_finest_span(), other.to_finest_span()) {
            return left.overlaps(right);
        }

        // self starts before other ends, and other starts before self ends
        let self_starts_in_time = self.start.is_unbounded()
            || other.end.is_unbounded()
            || compare_units(&self.start, Edge::First, &other.end, Edge::Last)
                .is_some_and(Ordering::is_le);
        let other_starts_in_time = other.start.is_unbounded()
            || self.end.is_unbounded()
            || compare_units(&other.start, Edge::First, &self.end, Edge::Last)
                .is_some_and(Ordering::is_le);

        self_starts_in_time && other_starts_in_time
    }

    /// Every unit from start to end, inclusive.
    ///
    /// # Errors
    ///
    /// Returns `ReportingPeriodError::HasUnboundedComponent` if either
    /// component is unbounded.
    pub fn units_within(&self) -> Result<Vec<UnitOfTime>, ReportingPeriodError> {
        if self.has_unbounded_component() {
            return Err(ReportingPeriodError::HasUnboundedComponent);
        }

        let mut units = vec![self.start];
        let mut current = self.start;
        while current != self.end {
            current = current.plus(1)?;
            units.push(current);
        }

        Ok(units)
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

fn compare_units(a: &UnitOfTime, a_edge: Edge, b: &UnitOfTime, b_edge: Edge) -> Option<Ordering> {
    a.to_finest_span()
        .ok()?
        .compare_edges(a_edge, b.to_finest_span().ok()?, b_edge)
}
