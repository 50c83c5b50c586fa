//! Accounting period systems: which calendar days make up a fiscal year.
//!
//! - Calendar year (January through December)
//! - Fiscal year ending on the last day of a month other than December
//! - 52/53-week year ending on a weekday anchored to a month

pub mod error;
pub mod system;

#[cfg(test)]
mod system_props;

pub use error::AccountingPeriodError;
pub use system::{
    AccountingPeriodSystem, FiftyTwoFiftyThreeWeekMethodology, FiftyTwoFiftyThreeWeekSystem,
    FiscalYearSystem,
};
