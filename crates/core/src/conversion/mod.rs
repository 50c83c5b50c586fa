//! Conversion of reporting periods between calendar, fiscal and generic
//! units of time, driven by declared associations.

pub mod association;
pub mod converter;
pub mod error;

pub use association::UnitKindAssociation;
pub use converter::UnitKindConverter;
pub use error::ConversionError;
