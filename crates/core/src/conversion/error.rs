//! Unit-kind conversion errors.

use acctime_shared::types::AssociationId;
use thiserror::Error;

use crate::period::{ReportingPeriod, ReportingPeriodError};
use crate::unit::UnitOfTimeKind;

/// Errors raised while declaring associations or converting reporting
/// periods between kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// An association side is open-ended.
    #[error("association {0} has a reporting period with a component with Unbounded UnitOfTimeGranularity")]
    AssociationHasUnboundedComponent(AssociationId),

    /// Both association sides are the same kind.
    #[error("association {id} relates two reporting periods of UnitOfTimeKind {kind}")]
    AssociationSameKind {
        /// Offending association.
        id: AssociationId,
        /// Kind shared by both sides.
        kind: UnitOfTimeKind,
    },

    /// Month-aligned association sides cover different numbers of months.
    #[error("association {id} relates {first} and {second}, which cover a different number of months")]
    AssociationLengthMismatch {
        /// Offending association.
        id: AssociationId,
        /// First side.
        first: ReportingPeriod,
        /// Second side.
        second: ReportingPeriod,
    },

    /// Two associations map one reporting period to different periods of
    /// the same kind.
    #[error(
        "reporting period {period} is associated with {existing} for UnitOfTimeKind {kind}, which conflicts with {conflicting}"
    )]
    ConflictingAssociation {
        /// Period being mapped.
        period: ReportingPeriod,
        /// Kind of the mapped periods.
        kind: UnitOfTimeKind,
        /// Mapping already accepted.
        existing: ReportingPeriod,
        /// Mapping that contradicts it.
        conflicting: ReportingPeriod,
    },

    /// Query period is open-ended.
    #[error("reporting_period has a component with Unbounded UnitOfTimeGranularity")]
    UnboundedReportingPeriod,

    /// Target unit is unbounded.
    #[error("unit is Unbounded")]
    UnboundedUnit,

    /// Target unit is the query's own kind.
    #[error("unit has the same UnitOfTimeKind as the specified reporting_period")]
    SameKind,

    /// A reporting period could not be reduced.
    #[error(transparent)]
    ReportingPeriod(#[from] ReportingPeriodError),
}

impl ConversionError {
    /// Returns the error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AssociationHasUnboundedComponent(_) => "ASSOCIATION_HAS_UNBOUNDED_COMPONENT",
            Self::AssociationSameKind { .. } => "ASSOCIATION_SAME_KIND",
            Self::AssociationLengthMismatch { .. } => "ASSOCIATION_LENGTH_MISMATCH",
            Self::ConflictingAssociation { .. } => "CONFLICTING_ASSOCIATION",
            Self::UnboundedReportingPeriod => "UNBOUNDED_REPORTING_PERIOD",
            Self::UnboundedUnit => "UNBOUNDED_UNIT",
            Self::SameKind => "SAME_KIND",
            Self::ReportingPeriod(err) => err.error_code(),
        }
    }

    /// True for contradictions between otherwise valid associations.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::ConflictingAssociation { .. })
    }
}
