//! Bootstraps accounting time values from application configuration.

use acctime_shared::config::{
    AssociationConfig, PeriodSystemConfig, ReportingPeriodConfig, UnitOfTimeConfig,
};
use acctime_shared::types::AssociationId;
use acctime_shared::{AppConfig, AppError, AppResult};
use chrono::Weekday;
use tracing::info;

use crate::accounting::system::month_from_number;
use crate::accounting::{AccountingPeriodError, AccountingPeriodSystem};
use crate::conversion::{ConversionError, UnitKindAssociation, UnitKindConverter};
use crate::period::{ReportingPeriod, ReportingPeriodError};
use crate::unit::{Bucket, Unit, UnitOfTime, UnitOfTimeError, UnitOfTimeKind};

impl From<UnitOfTimeError> for AppError {
    fn from(err: UnitOfTimeError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ReportingPeriodError> for AppError {
    fn from(err: ReportingPeriodError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<AccountingPeriodError> for AppError {
    fn from(err: AccountingPeriodError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        if err.is_conflict() {
            Self::Conflict(err.to_string())
        } else {
            Self::Validation(err.to_string())
        }
    }
}

/// Builds the configured accounting period system.
///
/// # Errors
///
/// Returns `AppError::Validation` naming the offending setting if a month
/// number, weekday or methodology is not recognized.
pub fn period_system_from_config(config: &PeriodSystemConfig) -> AppResult<AccountingPeriodSystem> {
    let system = match config {
        PeriodSystemConfig::CalendarYear => AccountingPeriodSystem::CalendarYear,
        PeriodSystemConfig::FiscalYear {
            last_month_in_fiscal_year,
        } => AccountingPeriodSystem::fiscal_year_from_month_number(*last_month_in_fiscal_year)?,
        PeriodSystemConfig::FiftyTwoFiftyThreeWeek {
            last_day_of_week,
            anchor_month,
            methodology,
        } => {
            let weekday: Weekday = last_day_of_week
                .trim()
                .parse()
                .map_err(|_| AccountingPeriodError::InvalidWeekday(last_day_of_week.clone()))?;
            let anchor_month = month_from_number(*anchor_month).ok_or_else(|| {
                AccountingPeriodError::OutOfRange {
                    parameter: "anchor_month",
                    reason: format!("{anchor_month} is not a month number"),
                }
            })?;

            AccountingPeriodSystem::fifty_two_fifty_three_week(
                weekday,
                anchor_month,
                methodology.parse()?,
            )
        }
    };

    Ok(system)
}

fn unit_of_time_from_config(
    kind: UnitOfTimeKind,
    config: UnitOfTimeConfig,
) -> Result<UnitOfTime, UnitOfTimeError> {
    match config {
        UnitOfTimeConfig::Day { year, month, day } => {
            if kind != UnitOfTimeKind::Calendar {
                return Err(UnitOfTimeError::DayRequiresCalendarKind(kind));
            }
            UnitOfTime::calendar_day(year, month, day)
        }
        UnitOfTimeConfig::Month { year, month } => {
            UnitOfTime::new(kind, Bucket::Month { year, month })
        }
        UnitOfTimeConfig::Quarter { year, quarter } => {
            UnitOfTime::new(kind, Bucket::Quarter { year, quarter })
        }
        UnitOfTimeConfig::Year { year } => UnitOfTime::new(kind, Bucket::Year { year }),
        UnitOfTimeConfig::Unbounded(_) => Ok(UnitOfTime::unbounded(kind)),
    }
}

/// Builds a reporting period from its configured form.
///
/// # Errors
///
/// Returns an error if the kind is unknown or the components do not form a
/// valid reporting period.
pub fn reporting_period_from_config(
    config: &ReportingPeriodConfig,
) -> Result<ReportingPeriod, ReportingPeriodError> {
    let kind: UnitOfTimeKind = config.kind.parse()?;
    ReportingPeriod::new(
        unit_of_time_from_config(kind, config.start)?,
        unit_of_time_from_config(kind, config.end)?,
    )
}

fn association_from_config(config: &AssociationConfig) -> Result<UnitKindAssociation, ConversionError> {
    let id = config
        .id
        .map_or_else(AssociationId::new, AssociationId::from_uuid);

    UnitKindAssociation::new(
        id,
        reporting_period_from_config(&config.first)?,
        reporting_period_from_config(&config.second)?,
    )
}

/// Builds a converter from configured associations.
///
/// # Errors
///
/// Returns `AppError::Validation` naming the association index if an
/// association is malformed, and `AppError::Conflict` if two associations
/// contradict each other.
pub fn converter_from_config(associations: &[AssociationConfig]) -> AppResult<UnitKindConverter> {
    let associations = associations
        .iter()
        .enumerate()
        .map(|(index, config)| {
            association_from_config(config).map_err(|err| {
                AppError::Validation(format!("accounting.associations[{index}]: {err}"))
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(UnitKindConverter::new(associations)?)
}

/// The accounting period system and unit-kind converter an application runs
/// with.
#[derive(Debug, Clone)]
pub struct AccountingTime {
    period_system: AccountingPeriodSystem,
    converter: UnitKindConverter,
}

impl AccountingTime {
    /// Bundles an already-built system and converter.
    #[must_use]
    pub const fn new(period_system: AccountingPeriodSystem, converter: UnitKindConverter) -> Self {
        Self {
            period_system,
            converter,
        }
    }

    /// Builds accounting time from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the period system or any association is invalid.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let period_system = period_system_from_config(&config.accounting.period_system)?;
        let converter = converter_from_config(&config.accounting.associations)?;

        info!(
            period_system = ?period_system,
            associations = converter.associations().len(),
            "Loaded accounting time configuration"
        );

        Ok(Self::new(period_system, converter))
    }

    /// Loads configuration from files and environment, then builds
    /// accounting time from it.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> AppResult<Self> {
        Self::from_config(&AppConfig::load()?)
    }

    /// The accounting period system.
    #[must_use]
    pub const fn period_system(&self) -> &AccountingPeriodSystem {
        &self.period_system
    }

    /// The unit-kind converter.
    #[must_use]
    pub const fn converter(&self) -> &UnitKindConverter {
        &self.converter
    }

    /// The calendar days making up `fiscal_year`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the fiscal year is out of range.
    pub fn reporting_period_for_fiscal_year(&self, fiscal_year: i32) -> AppResult<ReportingPeriod> {
        Ok(self.period_system.reporting_period_for_fiscal_year(fiscal_year)?)
    }

    /// Converts `reporting_period` into the equivalent period of `unit`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` on an unbounded or same-kind request.
    pub fn try_convert(
        &self,
        reporting_period: &ReportingPeriod,
        unit: Unit,
    ) -> AppResult<Option<ReportingPeriod>> {
        Ok(self.converter.try_convert(reporting_period, unit)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::UnitOfTimeGranularity;
    use chrono::NaiveDate;

    const FISCAL_MARCH: &str = r#"
        [accounting.period_system]
        type = "fiscal_year"
        last_month_in_fiscal_year = 3

        [[accounting.associations]]
        first = { kind = "fiscal", start = { year = 2020, quarter = 1 }, end = { year = 2020, quarter = 1 } }
        second = { kind = "calendar", start = { year = 2019, month = 4 }, end = { year = 2019, month = 6 } }
    "#;

    fn accounting_time(toml: &str) -> AppResult<AccountingTime> {
        AccountingTime::from_config(&AppConfig::from_toml(toml)?)
    }

    #[test]
    fn test_default_config_is_calendar_year() {
        let time = accounting_time("").unwrap();
        assert_eq!(time.period_system(), &AccountingPeriodSystem::CalendarYear);
        assert!(time.converter().associations().is_empty());
    }

    #[test]
    fn test_fiscal_year_config() {
        let time = accounting_time(FISCAL_MARCH).unwrap();

        let year = time.reporting_period_for_fiscal_year(2020).unwrap();
        assert_eq!(year.to_string(), "2019-04-01 to 2020-03-31");

        let fiscal = ReportingPeriod::single(UnitOfTime::fiscal_month(2020, 3).unwrap());
        let converted = time
            .try_convert(
                &fiscal,
                Unit::new(UnitOfTimeKind::Calendar, UnitOfTimeGranularity::Month).unwrap(),
            )
            .unwrap();
        assert_eq!(converted.unwrap().to_string(), "2019-06 to 2019-06");
    }

    #[test]
    fn test_fifty_two_fifty_three_week_config() {
        let time = accounting_time(
            r#"
            [accounting.period_system]
            type = "fifty_two_fifty_three_week"
            last_day_of_week = "Saturday"
            anchor_month = 8
            methodology = "last_occurrence_in_anchor_month"
            "#,
        )
        .unwrap();

        let year = time.reporting_period_for_fiscal_year(2007).unwrap();
        let first = NaiveDate::from_ymd_opt(2006, 8, 27).unwrap();
        let last = NaiveDate::from_ymd_opt(2007, 8, 25).unwrap();
        assert_eq!(year, ReportingPeriod::calendar_days(first, last).unwrap());
    }

    #[test]
    fn test_invalid_period_system_names_parameter() {
        let err = period_system_from_config(&PeriodSystemConfig::FiscalYear {
            last_month_in_fiscal_year: 13,
        })
        .unwrap_err();
        assert!(matches!(&err, AppError::Validation(msg) if msg.contains("last_month_in_fiscal_year")));

        let err = period_system_from_config(&PeriodSystemConfig::FiftyTwoFiftyThreeWeek {
            last_day_of_week: "someday".into(),
            anchor_month: 8,
            methodology: "last_occurrence_in_anchor_month".into(),
        })
        .unwrap_err();
        assert!(matches!(&err, AppError::Validation(msg) if msg.contains("last_day_of_week")));

        let err = period_system_from_config(&PeriodSystemConfig::FiftyTwoFiftyThreeWeek {
            last_day_of_week: "sat".into(),
            anchor_month: 0,
            methodology: "last_occurrence_in_anchor_month".into(),
        })
        .unwrap_err();
        assert!(matches!(&err, AppError::Validation(msg) if msg.contains("anchor_month")));

        let err = period_system_from_config(&PeriodSystemConfig::FiftyTwoFiftyThreeWeek {
            last_day_of_week: "sat".into(),
            anchor_month: 8,
            methodology: "nearest".into(),
        })
        .unwrap_err();
        assert!(matches!(&err, AppError::Validation(msg) if msg.contains("nearest")));
    }

    #[test]
    fn test_invalid_association_names_index() {
        let err = accounting_time(
            r#"
            [[accounting.associations]]
            first = { kind = "lunar", start = { year = 2020 }, end = { year = 2020 } }
            second = { kind = "calendar", start = { year = 2020 }, end = { year = 2020 } }
            "#,
        )
        .unwrap_err();
        assert!(
            matches!(&err, AppError::Validation(msg) if msg.starts_with("accounting.associations[0]"))
        );
    }

    #[test]
    fn test_fiscal_day_rejected() {
        let config = ReportingPeriodConfig {
            kind: "fiscal".into(),
            start: UnitOfTimeConfig::Day {
                year: 2020,
                month: 1,
                day: 1,
            },
            end: UnitOfTimeConfig::Day {
                year: 2020,
                month: 1,
                day: 2,
            },
        };
        assert_eq!(
            reporting_period_from_config(&config),
            Err(ReportingPeriodError::UnitOfTime(
                UnitOfTimeError::DayRequiresCalendarKind(UnitOfTimeKind::Fiscal)
            ))
        );
    }

    #[test]
    fn test_contradictory_associations_are_a_conflict() {
        let err = accounting_time(
            r#"
            [[accounting.associations]]
            first = { kind = "fiscal", start = { year = 2020, quarter = 1 }, end = { year = 2020, quarter = 1 } }
            second = { kind = "calendar", start = { year = 2020, quarter = 1 }, end = { year = 2020, quarter = 1 } }

            [[accounting.associations]]
            first = { kind = "fiscal", start = { year = 2020, quarter = 1 }, end = { year = 2020, quarter = 1 } }
            second = { kind = "calendar", start = { year = 2020, quarter = 2 }, end = { year = 2020, quarter = 2 } }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.error_code(), "CONFLICT");
    }

    #[test]
    fn test_same_kind_request_is_validation_error() {
        let time = accounting_time(FISCAL_MARCH).unwrap();
        let fiscal = ReportingPeriod::single(UnitOfTime::fiscal_year(2020).unwrap());
        let err = time
            .try_convert(
                &fiscal,
                Unit::new(UnitOfTimeKind::Fiscal, UnitOfTimeGranularity::Quarter).unwrap(),
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
