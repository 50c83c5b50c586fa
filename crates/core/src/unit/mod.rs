//! Units of time: calendar, fiscal and generic days, months, quarters and
//! years, plus the unbounded marker.

pub mod error;
pub mod kind;
pub mod span;
pub mod unit_of_time;

#[cfg(test)]
mod unit_of_time_props;

pub use error::UnitOfTimeError;
pub use kind::{Unit, UnitOfTimeGranularity, UnitOfTimeKind};
pub use span::{Edge, FinestSpan};
pub use unit_of_time::{Bucket, UnitOfTime};
