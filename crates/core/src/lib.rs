//! Accounting time for acctime.
//!
//! This crate contains pure date logic with ZERO I/O dependencies.
//! Units of time, reporting periods, fiscal year rules and conversions
//! between calendar, fiscal and generic time all live here.
//!
//! # Modules
//!
//! - `unit` - Calendar, fiscal and generic units of time
//! - `period` - Reporting periods over units of time
//! - `accounting` - Which calendar days make up a fiscal year
//! - `conversion` - Translating reporting periods between kinds
//! - `calendar` - Date arithmetic shared by the modules above
//! - `settings` - Building all of the above from configuration

pub mod accounting;
pub mod calendar;
pub mod conversion;
pub mod period;
pub mod settings;
pub mod unit;

pub use accounting::{AccountingPeriodError, AccountingPeriodSystem};
pub use conversion::{ConversionError, UnitKindAssociation, UnitKindConverter};
pub use period::{ReportingPeriod, ReportingPeriodError};
pub use settings::AccountingTime;
pub use unit::{Unit, UnitOfTime, UnitOfTimeError, UnitOfTimeGranularity, UnitOfTimeKind};
