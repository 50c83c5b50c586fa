//! Reporting period validation errors.

use thiserror::Error;

use crate::unit::{UnitOfTime, UnitOfTimeError, UnitOfTimeGranularity, UnitOfTimeKind};

/// Errors raised while building or reducing a reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportingPeriodError {
    /// Start and end belong to different kinds.
    #[error("start ({start}) and end ({end}) have different UnitOfTimeKinds")]
    KindMismatch {
        /// Kind of the start.
        start: UnitOfTimeKind,
        /// Kind of the end.
        end: UnitOfTimeKind,
    },

    /// Bounded start and end have different granularities.
    #[error("start ({start}) and end ({end}) have different UnitOfTimeGranularities")]
    GranularityMismatch {
        /// Granularity of the start.
        start: UnitOfTimeGranularity,
        /// Granularity of the end.
        end: UnitOfTimeGranularity,
    },

    /// Start comes after end.
    #[error("start ({start}) is greater than end ({end})")]
    StartAfterEnd {
        /// Start.
        start: UnitOfTime,
        /// End.
        end: UnitOfTime,
    },

    /// Operation needs a period without unbounded components.
    #[error("reporting period has a component with Unbounded UnitOfTimeGranularity")]
    HasUnboundedComponent,

    /// A component could not be built.
    #[error(transparent)]
    UnitOfTime(#[from] UnitOfTimeError),
}

impl ReportingPeriodError {
    /// Returns the error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::KindMismatch { .. } => "KIND_MISMATCH",
            Self::GranularityMismatch { .. } => "GRANULARITY_MISMATCH",
            Self::StartAfterEnd { .. } => "START_AFTER_END",
            Self::HasUnboundedComponent => "HAS_UNBOUNDED_COMPONENT",
            Self::UnitOfTime(err) => err.error_code(),
        }
    }
}
