//! Finest-granularity extents of units of time and reporting periods.

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::kind::UnitOfTimeKind;
use crate::calendar::{
    days_inclusive, first_day_of_month, from_month_ordinal, is_last_day_of_month, last_day_of_month,
    month_ordinal,
};

/// Inclusive extent of time on the finest grid a kind supports.
///
/// Calendar extents are day ranges. Fiscal and generic extents are ranges of
/// month ordinals (see [`crate::calendar::month_ordinal`]); those kinds have
/// no notion of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "grid", rename_all = "snake_case")]
pub enum FinestSpan {
    /// Calendar days.
    Days {
        /// First day.
        first: NaiveDate,
        /// Last day.
        last: NaiveDate,
    },
    /// Month ordinals.
    Months {
        /// First month ordinal.
        first: i32,
        /// Last month ordinal.
        last: i32,
    },
}

/// One end of an extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// The first day or month.
    First,
    /// The last day or month.
    Last,
}

impl FinestSpan {
    /// Builds the extent of a month-ordinal range on the grid of `kind`.
    #[must_use]
    pub fn from_month_ordinals(kind: UnitOfTimeKind, first: i32, last: i32) -> Option<Self> {
        match kind {
            UnitOfTimeKind::Calendar => {
                let (first_year, first_month) = from_month_ordinal(first);
                let (last_year, last_month) = from_month_ordinal(last);
                Some(Self::Days {
                    first: first_day_of_month(first_year, first_month)?,
                    last: last_day_of_month(last_year, last_month)?,
                })
            }
            UnitOfTimeKind::Fiscal | UnitOfTimeKind::Generic => Some(Self::Months { first, last }),
        }
    }

    /// Extent running from the start of `self` to the end of `other`.
    ///
    /// Returns `None` when the two live on different grids.
    #[must_use]
    pub fn through(self, other: Self) -> Option<Self> {
        match (self, other) {
            (Self::Days { first, .. }, Self::Days { last, .. }) => Some(Self::Days { first, last }),
            (Self::Months { first, .. }, Self::Months { last, .. }) => {
                Some(Self::Months { first, last })
            }
            _ => None,
        }
    }

    /// Orders `edge` of `self` against `other_edge` of `other`.
    ///
    /// Returns `None` when the two live on different grids.
    #[must_use]
    pub fn compare_edges(self, edge: Edge, other: Self, other_edge: Edge) -> Option<Ordering> {
        fn pick<T>(first: T, last: T, edge: Edge) -> T {
            match edge {
                Edge::First => first,
                Edge::Last => last,
            }
        }

        match (self, other) {
            (Self::Days { first, last }, Self::Days { first: f, last: l }) => {
                Some(pick(first, last, edge).cmp(&pick(f, l, other_edge)))
            }
            (Self::Months { first, last }, Self::Months { first: f, last: l }) => {
                Some(pick(first, last, edge).cmp(&pick(f, l, other_edge)))
            }
            _ => None,
        }
    }

    /// True if `other` lies entirely within `self` on the same grid.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.compare_edges(Edge::First, other, Edge::First)
            .is_some_and(Ordering::is_le)
            && self
                .compare_edges(Edge::Last, other, Edge::Last)
                .is_some_and(Ordering::is_ge)
    }

    /// True if `self` and `other` share at least one day or month.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.compare_edges(Edge::First, other, Edge::Last)
            .is_some_and(Ordering::is_le)
            && other
                .compare_edges(Edge::First, self, Edge::Last)
                .is_some_and(Ordering::is_le)
    }

    /// Number of days or months covered.
    #[must_use]
    pub fn unit_count(self) -> i64 {
        match self {
            Self::Days { first, last } => days_inclusive(first, last),
            Self::Months { first, last } => i64::from(last - first) + 1,
        }
    }

    /// The extent as an inclusive range of month ordinals, if it starts on
    /// the first day of a month and ends on the last day of a month.
    #[must_use]
    pub fn as_months(self) -> Option<(i32, i32)> {
        match self {
            Self::Months { first, last } => Some((first, last)),
            Self::Days { first, last } => (first.day() == 1 && is_last_day_of_month(last)).then(
                || {
                    (
                        month_ordinal(first.year(), first.month()),
                        month_ordinal(last.year(), last.month()),
                    )
                },
            ),
        }
    }
}
