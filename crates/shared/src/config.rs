//! Application configuration management.
//!
//! Configuration is deliberately raw: months are plain numbers, weekdays and
//! methodologies are strings. The core crate validates these into its own
//! types so that a bad setting is reported with the parameter that caused it.

use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;

/// Environment variable prefix for overrides (`ACCTIME__ACCOUNTING__...`).
pub const ENV_PREFIX: &str = "ACCTIME";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Accounting time configuration.
    #[serde(default)]
    pub accounting: AccountingConfig,
}

/// Accounting time configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountingConfig {
    /// The accounting period system in use.
    #[serde(default)]
    pub period_system: PeriodSystemConfig,
    /// Declared equivalences between reporting periods of different kinds.
    #[serde(default)]
    pub associations: Vec<AssociationConfig>,
}

/// Accounting period system configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PeriodSystemConfig {
    /// Fiscal year equals calendar year.
    #[default]
    CalendarYear,
    /// Fiscal year ends on the last day of a month other than December.
    FiscalYear {
        /// Month number (1-12) of the last month in the fiscal year.
        last_month_in_fiscal_year: u32,
    },
    /// Fiscal year ends on a weekday anchored to a month.
    FiftyTwoFiftyThreeWeek {
        /// Weekday name (e.g., "saturday" or "sat").
        last_day_of_week: String,
        /// Month number (1-12) the year end is anchored to.
        anchor_month: u32,
        /// "last_occurrence_in_anchor_month" or "closest_to_last_day_of_anchor_month".
        methodology: String,
    },
}

/// A declared equivalence between two reporting periods.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssociationConfig {
    /// Optional stable identifier; a fresh one is generated when absent.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// First reporting period.
    pub first: ReportingPeriodConfig,
    /// Second reporting period, of a different kind.
    pub second: ReportingPeriodConfig,
}

/// A reporting period as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportingPeriodConfig {
    /// "calendar", "fiscal" or "generic".
    pub kind: String,
    /// First unit of the period.
    pub start: UnitOfTimeConfig,
    /// Last unit of the period.
    pub end: UnitOfTimeConfig,
}

/// A unit of time as written in configuration.
///
/// The shape of the table decides the granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UnitOfTimeConfig {
    /// `{ year, month, day }`
    Day {
        /// Year.
        year: i32,
        /// Month (1-12).
        month: u32,
        /// Day of month.
        day: u32,
    },
    /// `{ year, month }`
    Month {
        /// Year.
        year: i32,
        /// Month (1-12).
        month: u32,
    },
    /// `{ year, quarter }`
    Quarter {
        /// Year.
        year: i32,
        /// Quarter (1-4).
        quarter: u32,
    },
    /// `{ year }`
    Year {
        /// Year.
        year: i32,
    },
    /// `"unbounded"`
    Unbounded(UnboundedMarker),
}

/// The literal `"unbounded"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnboundedMarker {
    /// No specific point in time.
    Unbounded,
}

impl AppConfig {
    /// Loads configuration from environment and config files under `config/`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> AppResult<Self> {
        Self::load_from(Path::new("config"))
    }

    /// Loads `default` and then `{RUN_MODE}` from `config_dir`, then applies
    /// `ACCTIME__*` environment overrides. `RUN_MODE` defaults to
    /// `development`. Missing files are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is malformed or the merged result does not
    /// deserialize.
    pub fn load_from(config_dir: &Path) -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let default_file = config_dir.join("default");
        let run_mode_file = config_dir.join(&run_mode);

        let config = config::Config::builder()
            .add_source(config::File::with_name(&default_file.to_string_lossy()).required(false))
            .add_source(config::File::with_name(&run_mode_file.to_string_lossy()).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Loads configuration from a TOML document alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed.
    pub fn from_toml(toml: &str) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Loads configuration from a TOML document with environment overrides
    /// read under `env_prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed.
    pub fn from_toml_with_env(toml: &str, env_prefix: &str) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .add_source(config::Environment::with_prefix(env_prefix).separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
