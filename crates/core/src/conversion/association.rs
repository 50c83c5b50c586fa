//! Declared equivalences between reporting periods of different kinds.

use acctime_shared::types::AssociationId;

use super::error::ConversionError;
use crate::period::ReportingPeriod;
use crate::unit::FinestSpan;

/// Two bounded reporting periods of different kinds that cover the same
/// time, e.g., fiscal 1Q2020 and calendar 2Q2020.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitKindAssociation {
    id: AssociationId,
    first: ReportingPeriod,
    second: ReportingPeriod,
    first_span: FinestSpan,
    second_span: FinestSpan,
}

impl UnitKindAssociation {
    /// Declares that `first` and `second` are equivalent.
    ///
    /// # Errors
    ///
    /// Returns an error if either period has an unbounded component, if both
    /// are the same kind, or if both are month aligned but cover a different
    /// number of months.
    pub fn new(
        id: AssociationId,
        first: ReportingPeriod,
        second: ReportingPeriod,
    ) -> Result<Self, ConversionError> {
        if first.has_unbounded_component() || second.has_unbounded_component() {
            return Err(ConversionError::AssociationHasUnboundedComponent(id));
        }

        if first.kind() == second.kind() {
            return Err(ConversionError::AssociationSameKind {
                id,
                kind: first.kind(),
            });
        }

        let first_span = first.to_finest_span()?;
        let second_span = second.to_finest_span()?;

        if let (Some((a_first, a_last)), Some((b_first, b_last))) =
            (first_span.as_months(), second_span.as_months())
            && a_last - a_first != b_last - b_first
        {
            return Err(ConversionError::AssociationLengthMismatch { id, first, second });
        }

        Ok(Self {
            id,
            first,
            second,
            first_span,
            second_span,
        })
    }

    /// Identifier of the association.
    #[must_use]
    pub const fn id(&self) -> AssociationId {
        self.id
    }

    /// First side.
    #[must_use]
    pub const fn first(&self) -> ReportingPeriod {
        self.first
    }

    /// Second side.
    #[must_use]
    pub const fn second(&self) -> ReportingPeriod {
        self.second
    }

    pub(crate) const fn first_span(&self) -> FinestSpan {
        self.first_span
    }

    pub(crate) const fn second_span(&self) -> FinestSpan {
        self.second_span
    }
}
