//! Unit of time validation errors.

use thiserror::Error;

use super::kind::UnitOfTimeKind;

/// Errors raised while constructing or manipulating a unit of time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitOfTimeError {
    /// Year below the supported range.
    #[error("year is less than 1: {0}")]
    YearLessThanOne(i32),

    /// Year above the supported range.
    #[error("year is greater than 9999: {0}")]
    YearGreaterThanMax(i32),

    /// Month number outside 1-12.
    #[error("month is not in the range [1, 12]: {0}")]
    MonthOutOfRange(u32),

    /// Quarter number outside 1-4.
    #[error("quarter is not in the range [1, 4]: {0}")]
    QuarterOutOfRange(u32),

    /// Day does not exist in the given month.
    #[error("day {day} does not exist in {year:04}-{month:02}")]
    DayOutOfRange {
        /// Year.
        year: i32,
        /// Month.
        month: u32,
        /// Day of month.
        day: u32,
    },

    /// Day granularity only exists for the calendar kind.
    #[error("Day UnitOfTimeGranularity requires the Calendar UnitOfTimeKind, got {0}")]
    DayRequiresCalendarKind(UnitOfTimeKind),

    /// Unrecognized kind name.
    #[error("unknown UnitOfTimeKind: {0}")]
    UnknownKind(String),

    /// Operation needs a bounded unit of time.
    #[error("unit of time is Unbounded and has no finite extent")]
    Unbounded,
}

impl UnitOfTimeError {
    /// Returns the error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::YearLessThanOne(_) | Self::YearGreaterThanMax(_) => "YEAR_OUT_OF_RANGE",
            Self::MonthOutOfRange(_) => "MONTH_OUT_OF_RANGE",
            Self::QuarterOutOfRange(_) => "QUARTER_OUT_OF_RANGE",
            Self::DayOutOfRange { .. } => "DAY_OUT_OF_RANGE",
            Self::DayRequiresCalendarKind(_) => "DAY_REQUIRES_CALENDAR_KIND",
            Self::UnknownKind(_) => "UNKNOWN_KIND",
            Self::Unbounded => "UNBOUNDED_UNIT_OF_TIME",
        }
    }
}
