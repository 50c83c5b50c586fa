//! Reporting periods: inclusive ranges of same-kind units of time.

pub mod error;
pub mod reporting_period;

#[cfg(test)]
mod reporting_period_props;

pub use error::ReportingPeriodError;
pub use reporting_period::ReportingPeriod;
