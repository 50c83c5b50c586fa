//! Accounting period system errors.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by accounting period systems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountingPeriodError {
    /// A configuration value is outside its allowed range.
    #[error("{parameter} is out of range: {reason}")]
    OutOfRange {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Weekday name not recognized.
    #[error("last_day_of_week is not a weekday: {0}")]
    InvalidWeekday(String),

    /// 52/53-week methodology not recognized.
    #[error("unsupported FiftyTwoFiftyThreeWeekMethodology: {0}")]
    UnsupportedMethodology(String),

    /// Requested fiscal year outside [1, 9999].
    #[error("fiscal_year is not in the range [1, 9999]: {0}")]
    FiscalYearOutOfRange(i32),

    /// A boundary of the fiscal year falls outside calendar years [1, 9999].
    #[error("fiscal year {0} has a boundary outside calendar years [1, 9999]")]
    BoundaryOutOfRange(i32),

    /// No supported fiscal year contains the date.
    #[error("no fiscal year in [1, 9999] contains {0}")]
    DateOutOfRange(NaiveDate),
}

impl AccountingPeriodError {
    /// Returns the error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "OUT_OF_RANGE",
            Self::InvalidWeekday(_) => "INVALID_WEEKDAY",
            Self::UnsupportedMethodology(_) => "UNSUPPORTED_METHODOLOGY",
            Self::FiscalYearOutOfRange(_) => "FISCAL_YEAR_OUT_OF_RANGE",
            Self::BoundaryOutOfRange(_) => "BOUNDARY_OUT_OF_RANGE",
            Self::DateOutOfRange(_) => "DATE_OUT_OF_RANGE",
        }
    }
}
