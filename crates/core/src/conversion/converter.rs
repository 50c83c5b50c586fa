//! Translation of reporting periods between unit-of-time kinds.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::association::UnitKindAssociation;
use super::error::ConversionError;
use crate::period::ReportingPeriod;
use crate::unit::{FinestSpan, Unit, UnitOfTimeKind};

/// A reporting period together with its finest-grid extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Member {
    period: ReportingPeriod,
    span: FinestSpan,
}

impl Member {
    const fn kind(&self) -> UnitOfTimeKind {
        self.period.kind()
    }

    const fn key(&self) -> (UnitOfTimeKind, FinestSpan) {
        (self.kind(), self.span)
    }
}

/// Periods declared equivalent, directly or transitively. Holds at most one
/// extent per kind.
#[derive(Debug, Clone, Default)]
struct EquivalenceClass {
    members: Vec<Member>,
}

impl EquivalenceClass {
    fn member(&self, kind: UnitOfTimeKind) -> Option<&Member> {
        self.members.iter().find(|member| member.kind() == kind)
    }
}

/// Accumulates associations into equivalence classes, rejecting
/// contradictions as they are found.
#[derive(Debug, Default)]
struct ClassBuilder {
    classes: Vec<EquivalenceClass>,
    index: HashMap<(UnitOfTimeKind, FinestSpan), usize>,
}

impl ClassBuilder {
    fn find(&self, member: &Member) -> Option<usize> {
        self.index.get(&member.key()).copied()
    }

    fn insert(&mut self, class: usize, member: Member) {
        self.index.insert(member.key(), class);
        if let Some(target) = self.classes.get_mut(class) {
            target.members.push(member);
        }
    }

    fn associate(&mut self, association: &UnitKindAssociation) -> Result<(), ConversionError> {
        let left = Member {
            period: association.first(),
            span: association.first_span(),
        };
        let right = Member {
            period: association.second(),
            span: association.second_span(),
        };

        match (self.find(&left), self.find(&right)) {
            (None, None) => {
                let class = self.classes.len();
                self.classes.push(EquivalenceClass::default());
                self.insert(class, left);
                self.insert(class, right);
                Ok(())
            }
            (Some(class), None) => self.admit(class, &left, right),
            (None, Some(class)) => self.admit(class, &right, left),
            (Some(a), Some(b)) if a == b => Ok(()),
            (Some(a), Some(b)) => self.merge(a, b, &left, &right),
        }
    }

    /// Adds `newcomer` to the class already holding `anchor`.
    fn admit(
        &mut self,
        class: usize,
        anchor: &Member,
        newcomer: Member,
    ) -> Result<(), ConversionError> {
        if let Some(existing) = self
            .classes
            .get(class)
            .and_then(|c| c.member(newcomer.kind()))
        {
            return Err(ConversionError::ConflictingAssociation {
                period: anchor.period,
                kind: newcomer.kind(),
                existing: existing.period,
                conflicting: newcomer.period,
            });
        }

        self.insert(class, newcomer);
        Ok(())
    }

    /// Joins the class holding `left` with the class holding `right`.
    fn merge(
        &mut self,
        left_class: usize,
        right_class: usize,
        left: &Member,
        right: &Member,
    ) -> Result<(), ConversionError> {
        let left_members = self
            .classes
            .get(left_class)
            .map(|c| c.members.clone())
            .unwrap_or_default();
        let right_members = self
            .classes
            .get(right_class)
            .map(|c| c.members.clone())
            .unwrap_or_default();
        let find = |members: &[Member], kind| members.iter().find(|m| m.kind() == kind).copied();

        for kind in UnitOfTimeKind::ALL {
            let (Some(ours), Some(theirs)) = (
                find(left_members.as_slice(), kind),
                find(right_members.as_slice(), kind),
            )
            else {
                continue;
            };

            // Spans of one kind differ across classes, or the classes would be one
            let (period, existing, conflicting) = if kind == left.kind() {
                (right.period, theirs.period, left.period)
            } else if kind == right.kind() {
                (left.period, ours.period, right.period)
            } else {
                (left.period, ours.period, theirs.period)
            };

            return Err(ConversionError::ConflictingAssociation {
                period,
                kind,
                existing,
                conflicting,
            });
        }

        let (keep, absorb) = (left_class.min(right_class), left_class.max(right_class));
        let absorbed = self
            .classes
            .get_mut(absorb)
            .map(|c| std::mem::take(&mut c.members))
            .unwrap_or_default();
        for member in absorbed {
            self.insert(keep, member);
        }

        Ok(())
    }

    fn finish(self) -> Vec<EquivalenceClass> {
        self.classes
            .into_iter()
            .filter(|class| !class.members.is_empty())
            .collect()
    }
}

/// Converts reporting periods of one kind into equivalent reporting periods
/// of another kind using declared associations.
///
/// Associations are transitive: declaring fiscal 2020 equivalent to generic
/// year 1 and to calendar April 2019 through March 2020 makes generic year 1
/// convertible to calendar months. Any period nested inside an association
/// converts by month offset, so associating fiscal 1Q2020 with calendar
/// 2Q2020 also maps the second fiscal month of 2020 to calendar May 2020.
///
/// The converter is immutable once built and safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct UnitKindConverter {
    associations: Vec<UnitKindAssociation>,
    classes: Vec<EquivalenceClass>,
}

impl UnitKindConverter {
    /// Builds a converter from `associations`.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::ConflictingAssociation` if two associations
    /// map one reporting period to different periods of the same kind.
    pub fn new(
        associations: impl IntoIterator<Item = UnitKindAssociation>,
    ) -> Result<Self, ConversionError> {
        let associations: Vec<UnitKindAssociation> = associations.into_iter().collect();

        let mut builder = ClassBuilder::default();
        for association in &associations {
            builder.associate(association).inspect_err(|err| {
                warn!(
                    association_id = %association.id(),
                    error = %err,
                    "Rejected contradictory unit-kind association"
                );
            })?;
        }

        let classes = builder.finish();
        debug!(
            associations = associations.len(),
            classes = classes.len(),
            "Built unit-kind converter"
        );

        Ok(Self {
            associations,
            classes,
        })
    }

    /// The associations the converter was built from.
    #[must_use]
    pub fn associations(&self) -> &[UnitKindAssociation] {
        &self.associations
    }

    /// Converts `reporting_period` into the equivalent period of `unit`.
    ///
    /// Returns `Ok(None)` when no association covers the period, or when the
    /// equivalent extent does not line up with the boundaries of the target
    /// granularity.
    ///
    /// # Errors
    ///
    /// Returns an error if the period has an unbounded component, if the unit
    /// is unbounded, or if the unit is the period's own kind.
    pub fn try_convert(
        &self,
        reporting_period: &ReportingPeriod,
        unit: Unit,
    ) -> Result<Option<ReportingPeriod>, ConversionError> {
        if reporting_period.has_unbounded_component() {
            return Err(ConversionError::UnboundedReportingPeriod);
        }

        if unit.is_unbounded() {
            return Err(ConversionError::UnboundedUnit);
        }

        let source_kind = reporting_period.kind();
        if unit.kind() == source_kind {
            return Err(ConversionError::SameKind);
        }

        let query = reporting_period.to_finest_span()?;
        let converted = self
            .classes
            .iter()
            .filter_map(|class| Some((class.member(source_kind)?, class.member(unit.kind())?)))
            .filter(|(source, _)| source.span.contains(query))
            .min_by_key(|(source, _)| source.span.unit_count())
            .and_then(|(source, target)| project(query, source.span, target.span, unit.kind()))
            .and_then(|span| ReportingPeriod::from_finest_span(span, unit));

        debug!(
            reporting_period = %reporting_period,
            unit = %unit,
            found = converted.is_some(),
            "Converted reporting period"
        );

        Ok(converted)
    }
}

/// Maps `query`, nested in `source`, onto the corresponding part of `target`.
fn project(
    query: FinestSpan,
    source: FinestSpan,
    target: FinestSpan,
    target_kind: UnitOfTimeKind,
) -> Option<FinestSpan> {
    if let (Some((query_first, query_last)), Some((source_first, _)), Some((target_first, _))) =
        (query.as_months(), source.as_months(), target.as_months())
    {
        let first = target_first + (query_first - source_first);
        return FinestSpan::from_month_ordinals(target_kind, first, first + (query_last - query_first));
    }

    // Sides that are not whole months only convert as a whole
    (query == source).then_some(target)
}
