//! Kind and granularity discriminants for units of time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::UnitOfTimeError;

/// The family a unit of time belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitOfTimeKind {
    /// The Gregorian calendar.
    Calendar,
    /// An organization's fiscal calendar.
    Fiscal,
    /// A calendar with no specific semantics (e.g., plan year 1, 2, 3).
    Generic,
}

impl UnitOfTimeKind {
    /// All kinds.
    pub const ALL: [Self; 3] = [Self::Calendar, Self::Fiscal, Self::Generic];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Calendar => "Calendar",
            Self::Fiscal => "Fiscal",
            Self::Generic => "Generic",
        }
    }
}

impl fmt::Display for UnitOfTimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitOfTimeKind {
    type Err = UnitOfTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "calendar" => Ok(Self::Calendar),
            "fiscal" => Ok(Self::Fiscal),
            "generic" => Ok(Self::Generic),
            _ => Err(UnitOfTimeError::UnknownKind(s.to_string())),
        }
    }
}

/// How much time a unit of time covers, ordered from most to least granular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitOfTimeGranularity {
    /// A single day.
    Day,
    /// A month.
    Month,
    /// Three months.
    Quarter,
    /// Twelve months.
    Year,
    /// No specific point in time.
    Unbounded,
}

impl UnitOfTimeGranularity {
    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Month => "Month",
            Self::Quarter => "Quarter",
            Self::Year => "Year",
            Self::Unbounded => "Unbounded",
        }
    }
}

impl fmt::Display for UnitOfTimeGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A kind paired with a granularity, e.g., "Calendar Quarter".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawUnit")]
pub struct Unit {
    kind: UnitOfTimeKind,
    granularity: UnitOfTimeGranularity,
}

impl Unit {
    /// Creates a unit.
    ///
    /// # Errors
    ///
    /// Returns `UnitOfTimeError::DayRequiresCalendarKind` for a non-calendar day.
    pub fn new(
        kind: UnitOfTimeKind,
        granularity: UnitOfTimeGranularity,
    ) -> Result<Self, UnitOfTimeError> {
        if matches!(granularity, UnitOfTimeGranularity::Day)
            && !matches!(kind, UnitOfTimeKind::Calendar)
        {
            return Err(UnitOfTimeError::DayRequiresCalendarKind(kind));
        }

        Ok(Self { kind, granularity })
    }

    /// Pairs a kind and granularity already known to be compatible.
    pub(crate) const fn from_parts(
        kind: UnitOfTimeKind,
        granularity: UnitOfTimeGranularity,
    ) -> Self {
        Self { kind, granularity }
    }

    /// The kind.
    #[must_use]
    pub const fn kind(self) -> UnitOfTimeKind {
        self.kind
    }

    /// The granularity.
    #[must_use]
    pub const fn granularity(self) -> UnitOfTimeGranularity {
        self.granularity
    }

    /// True if the granularity is `Unbounded`.
    #[must_use]
    pub const fn is_unbounded(self) -> bool {
        matches!(self.granularity, UnitOfTimeGranularity::Unbounded)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.granularity)
    }
}

#[derive(Deserialize)]
struct RawUnit {
    kind: UnitOfTimeKind,
    granularity: UnitOfTimeGranularity,
}

impl TryFrom<RawUnit> for Unit {
    type Error = UnitOfTimeError;

    fn try_from(raw: RawUnit) -> Result<Self, Self::Error> {
        Self::new(raw.kind, raw.granularity)
    }
}
