//! Accounting period system policies.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate, Weekday};
use serde::Serialize;

use super::error::AccountingPeriodError;
use crate::calendar::{
    MAX_YEAR, MIN_YEAR, add_years, last_day_of_month, next_weekday, previous_weekday,
};
use crate::period::ReportingPeriod;

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Converts a month number (1-12) into a month.
#[must_use]
pub fn month_from_number(number: u32) -> Option<Month> {
    let index = usize::try_from(number.checked_sub(1)?).ok()?;
    MONTHS.get(index).copied()
}

/// How a 52/53-week year end is pinned to its anchor month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FiftyTwoFiftyThreeWeekMethodology {
    /// Year ends on the last occurrence of the weekday in the anchor month.
    LastOccurrenceInAnchorMonth,
    /// Year ends on the occurrence of the weekday closest to the last day of
    /// the anchor month, which may fall in the following month.
    ClosestToLastDayOfAnchorMonth,
}

impl fmt::Display for FiftyTwoFiftyThreeWeekMethodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LastOccurrenceInAnchorMonth => "last_occurrence_in_anchor_month",
            Self::ClosestToLastDayOfAnchorMonth => "closest_to_last_day_of_anchor_month",
        })
    }
}

impl FromStr for FiftyTwoFiftyThreeWeekMethodology {
    type Err = AccountingPeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "lastoccurrenceinanchormonth" => Ok(Self::LastOccurrenceInAnchorMonth),
            "closesttolastdayofanchormonth" => Ok(Self::ClosestToLastDayOfAnchorMonth),
            _ => Err(AccountingPeriodError::UnsupportedMethodology(s.to_string())),
        }
    }
}

/// Fiscal year ending on the last day of a month other than December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FiscalYearSystem {
    last_month_in_fiscal_year: Month,
}

impl FiscalYearSystem {
    /// Creates the system.
    ///
    /// # Errors
    ///
    /// Returns `AccountingPeriodError::OutOfRange` for December, which is the
    /// calendar year system.
    pub fn new(last_month_in_fiscal_year: Month) -> Result<Self, AccountingPeriodError> {
        if last_month_in_fiscal_year == Month::December {
            return Err(AccountingPeriodError::OutOfRange {
                parameter: "last_month_in_fiscal_year",
                reason: "December is handled by the calendar year system".to_string(),
            });
        }

        Ok(Self {
            last_month_in_fiscal_year,
        })
    }

    /// The month the fiscal year ends in.
    #[must_use]
    pub const fn last_month_in_fiscal_year(&self) -> Month {
        self.last_month_in_fiscal_year
    }

    fn bounds(&self, fiscal_year: i32) -> Option<(NaiveDate, NaiveDate)> {
        let last_day = last_day_of_month(
            fiscal_year,
            self.last_month_in_fiscal_year.number_from_month(),
        )?;
        let first_day = add_years(last_day.succ_opt()?, -1)?;
        Some((first_day, last_day))
    }
}

/// Fiscal year ending on a weekday anchored to a month, giving years of 52
/// or 53 weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FiftyTwoFiftyThreeWeekSystem {
    last_day_of_week: Weekday,
    anchor_month: Month,
    methodology: FiftyTwoFiftyThreeWeekMethodology,
}

impl FiftyTwoFiftyThreeWeekSystem {
    /// Creates the system.
    #[must_use]
    pub const fn new(
        last_day_of_week: Weekday,
        anchor_month: Month,
        methodology: FiftyTwoFiftyThreeWeekMethodology,
    ) -> Self {
        Self {
            last_day_of_week,
            anchor_month,
            methodology,
        }
    }

    /// Weekday every accounting year ends on.
    #[must_use]
    pub const fn last_day_of_week(&self) -> Weekday {
        self.last_day_of_week
    }

    /// Month the year end is anchored to.
    #[must_use]
    pub const fn anchor_month(&self) -> Month {
        self.anchor_month
    }

    /// How the year end is pinned to the anchor month.
    #[must_use]
    pub const fn methodology(&self) -> FiftyTwoFiftyThreeWeekMethodology {
        self.methodology
    }

    /// Last day of the accounting year that ends in or near the anchor month
    /// of `year`.
    #[must_use]
    pub fn accounting_year_end_date(&self, year: i32) -> Option<NaiveDate> {
        let candidate = last_day_of_month(year, self.anchor_month.number_from_month())?;
        if candidate.weekday() == self.last_day_of_week {
            return Some(candidate);
        }

        match self.methodology {
            FiftyTwoFiftyThreeWeekMethodology::LastOccurrenceInAnchorMonth => {
                previous_weekday(candidate, self.last_day_of_week)
            }
            FiftyTwoFiftyThreeWeekMethodology::ClosestToLastDayOfAnchorMonth => {
                let prior = previous_weekday(candidate, self.last_day_of_week)?;
                let next = next_weekday(candidate, self.last_day_of_week)?;
                // Equal distances resolve to the later date
                if candidate - prior < next - candidate {
                    Some(prior)
                } else {
                    Some(next)
                }
            }
        }
    }

    fn bounds(&self, fiscal_year: i32) -> Option<(NaiveDate, NaiveDate)> {
        let last_day = self.accounting_year_end_date(fiscal_year)?;
        let first_day = self.accounting_year_end_date(fiscal_year - 1)?.succ_opt()?;
        Some((first_day, last_day))
    }
}

/// Maps a fiscal year number to the calendar days it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountingPeriodSystem {
    /// Fiscal year N is calendar year N.
    CalendarYear,
    /// Fiscal year ends on the last day of a configured month.
    FiscalYear(FiscalYearSystem),
    /// Fiscal year ends on a configured weekday near a configured month.
    FiftyTwoFiftyThreeWeek(FiftyTwoFiftyThreeWeekSystem),
}

impl AccountingPeriodSystem {
    /// A fiscal year system ending in `last_month_in_fiscal_year`.
    ///
    /// # Errors
    ///
    /// Returns `AccountingPeriodError::OutOfRange` for December.
    pub fn fiscal_year(last_month_in_fiscal_year: Month) -> Result<Self, AccountingPeriodError> {
        FiscalYearSystem::new(last_month_in_fiscal_year).map(Self::FiscalYear)
    }

    /// A fiscal year system from a month number.
    ///
    /// # Errors
    ///
    /// Returns `AccountingPeriodError::OutOfRange` for anything other than
    /// 1 through 11.
    pub fn fiscal_year_from_month_number(
        last_month_in_fiscal_year: u32,
    ) -> Result<Self, AccountingPeriodError> {
        let month = month_from_number(last_month_in_fiscal_year).ok_or_else(|| {
            AccountingPeriodError::OutOfRange {
                parameter: "last_month_in_fiscal_year",
                reason: format!("{last_month_in_fiscal_year} is not a month number"),
            }
        })?;
        Self::fiscal_year(month)
    }

    /// A 52/53-week system.
    #[must_use]
    pub const fn fifty_two_fifty_three_week(
        last_day_of_week: Weekday,
        anchor_month: Month,
        methodology: FiftyTwoFiftyThreeWeekMethodology,
    ) -> Self {
        Self::FiftyTwoFiftyThreeWeek(FiftyTwoFiftyThreeWeekSystem::new(
            last_day_of_week,
            anchor_month,
            methodology,
        ))
    }

    /// The calendar days making up `fiscal_year`.
    ///
    /// # Errors
    ///
    /// Returns `AccountingPeriodError::FiscalYearOutOfRange` for a year
    /// outside [1, 9999] and `AccountingPeriodError::BoundaryOutOfRange` when
    /// the fiscal year starts or ends outside calendar years [1, 9999].
    pub fn reporting_period_for_fiscal_year(
        &self,
        fiscal_year: i32,
    ) -> Result<ReportingPeriod, AccountingPeriodError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&fiscal_year) {
            return Err(AccountingPeriodError::FiscalYearOutOfRange(fiscal_year));
        }

        let (first_day, last_day) = self
            .bounds(fiscal_year)
            .ok_or(AccountingPeriodError::BoundaryOutOfRange(fiscal_year))?;

        ReportingPeriod::calendar_days(first_day, last_day)
            .map_err(|_| AccountingPeriodError::BoundaryOutOfRange(fiscal_year))
    }

    /// The fiscal year whose days include `date`.
    ///
    /// # Errors
    ///
    /// Returns `AccountingPeriodError::DateOutOfRange` if the containing
    /// fiscal year is outside [1, 9999] or has a boundary outside calendar
    /// years [1, 9999].
    pub fn fiscal_year_containing(&self, date: NaiveDate) -> Result<i32, AccountingPeriodError> {
        // A fiscal year never drifts more than a year from the calendar year
        // of its days
        let year = date.year();
        [year, year + 1, year - 1]
            .into_iter()
            .find(|&candidate| {
                self.reporting_period_for_fiscal_year(candidate)
                    .is_ok_and(|period| {
                        matches!(
                            (period.start().date(), period.end().date()),
                            (Some(first_day), Some(last_day)) if first_day <= date && date <= last_day
                        )
                    })
            })
            .ok_or(AccountingPeriodError::DateOutOfRange(date))
    }

    fn bounds(&self, fiscal_year: i32) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Self::CalendarYear => Some((
                NaiveDate::from_ymd_opt(fiscal_year, 1, 1)?,
                NaiveDate::from_ymd_opt(fiscal_year, 12, 31)?,
            )),
            Self::FiscalYear(system) => system.bounds(fiscal_year),
            Self::FiftyTwoFiftyThreeWeek(system) => system.bounds(fiscal_year),
        }
    }
}
