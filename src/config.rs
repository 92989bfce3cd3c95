use crate::components::calendar::{CalendarSettings, DEFAULT_TZ_OFFSET_HOURS, DEFAULT_WINDOW_DAYS};
use crate::components::planner::catalog::{TimeCatalog, DEFAULT_FIRST_HOUR, DEFAULT_LAST_HOUR};
use crate::error::{env_error, PlannerResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default submission service location
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default display language
pub const DEFAULT_LOCALE: &str = "zh-TW";

/// Default HTTP timeout for submissions
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Optional file with calendar and catalog overrides
pub const CONFIG_FILE: &str = "config/planner.toml";

/// Main configuration structure for the planner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the submission service
    pub api_base_url: String,
    /// Locale for user-facing text
    pub locale: String,
    /// Number of days offered for selection
    pub window_days: u32,
    /// Fixed timezone shift used to cut instants into days
    pub tz_offset_hours: i32,
    /// First hour of the time catalog
    pub catalog_first_hour: u32,
    /// Last hour of the time catalog
    pub catalog_last_hour: u32,
    /// Timeout for submission requests
    pub request_timeout_secs: u64,
}

/// Values that may be set in `config/planner.toml`
#[derive(Debug, Default, Deserialize)]
struct FileOverrides {
    api_base_url: Option<String>,
    locale: Option<String>,
    window_days: Option<u32>,
    tz_offset_hours: Option<i32>,
    catalog_first_hour: Option<u32>,
    catalog_last_hour: Option<u32>,
    request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
            tz_offset_hours: DEFAULT_TZ_OFFSET_HOURS,
            catalog_first_hour: DEFAULT_FIRST_HOUR,
            catalog_last_hour: DEFAULT_LAST_HOUR,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> PlannerResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let file = fs::read_to_string(CONFIG_FILE).ok();
        if file.is_some() {
            debug!("Reading overrides from {}", CONFIG_FILE);
        }

        Self::from_sources(file.as_deref(), |key| env::var(key).ok())
    }

    /// Build configuration from defaults, then the TOML file, then the
    /// environment lookup
    pub fn from_sources<F>(file: Option<&str>, lookup: F) -> PlannerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(content) = file {
            let overrides: FileOverrides = toml::from_str(content)?;
            config.apply(overrides);
        }

        if let Some(url) = lookup("VACATION_API_URL") {
            config.api_base_url = url;
        }
        if let Some(locale) = lookup("PLANNER_LOCALE") {
            config.locale = locale;
        }
        if let Some(days) = parse_var(&lookup, "PLANNER_WINDOW_DAYS")? {
            config.window_days = days;
        }
        if let Some(hours) = parse_var(&lookup, "PLANNER_TZ_OFFSET_HOURS")? {
            config.tz_offset_hours = hours;
        }
        if let Some(secs) = parse_var(&lookup, "VACATION_API_TIMEOUT_SECS")? {
            config.request_timeout_secs = secs;
        }

        // Fail early on values the planner cannot use
        config.api_base_url()?;
        config.time_catalog()?;
        CalendarSettings::localized(config.tz_offset_hours, config.window_days)?;

        Ok(config)
    }

    fn apply(&mut self, overrides: FileOverrides) {
        if let Some(url) = overrides.api_base_url {
            self.api_base_url = url;
        }
        if let Some(locale) = overrides.locale {
            self.locale = locale;
        }
        if let Some(days) = overrides.window_days {
            self.window_days = days;
        }
        if let Some(hours) = overrides.tz_offset_hours {
            self.tz_offset_hours = hours;
        }
        if let Some(hour) = overrides.catalog_first_hour {
            self.catalog_first_hour = hour;
        }
        if let Some(hour) = overrides.catalog_last_hour {
            self.catalog_last_hour = hour;
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.request_timeout_secs = secs;
        }
    }

    pub fn api_base_url(&self) -> PlannerResult<Url> {
        Ok(Url::parse(&self.api_base_url)?)
    }

    /// Calendar settings with weekday labels of the active locale
    pub fn calendar_settings(&self) -> PlannerResult<CalendarSettings> {
        CalendarSettings::localized(self.tz_offset_hours, self.window_days)
    }

    pub fn time_catalog(&self) -> PlannerResult<TimeCatalog> {
        TimeCatalog::hourly(self.catalog_first_hour, self.catalog_last_hour)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> PlannerResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| env_error(key)),
        None => Ok(None),
    }
}
