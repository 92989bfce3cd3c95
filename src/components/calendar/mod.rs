pub mod models;

pub use models::{display_label, CalendarWindow, DayNumber, DayOption, WeekWindow, MS_PER_DAY};

use crate::error::{config_error, PlannerResult};
use chrono::{DateTime, Utc};
use rust_i18n::t;
use tracing::debug;

/// Default timezone shift applied before cutting instants into days
pub const DEFAULT_TZ_OFFSET_HOURS: i32 = 8;

/// Default number of days offered for selection, starting today
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Longest window that may be configured
pub const MAX_WINDOW_DAYS: u32 = 366;

/// Inputs of the calendar window generator that do not change per instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSettings {
    /// Timezone shift in milliseconds
    pub tz_offset_ms: i64,
    pub window_days: u32,
    /// Indexed by day of week, 0 = Sunday
    pub weekday_labels: [String; 7],
}

impl CalendarSettings {
    /// Build settings with weekday labels taken from the active locale
    pub fn localized(tz_offset_hours: i32, window_days: u32) -> PlannerResult<Self> {
        if !(-23..=23).contains(&tz_offset_hours) {
            return Err(config_error(&format!(
                "Timezone offset must be between -23 and 23 hours, got {}",
                tz_offset_hours
            )));
        }
        if window_days == 0 || window_days > MAX_WINDOW_DAYS {
            return Err(config_error(&format!(
                "Window length must be between 1 and {} days, got {}",
                MAX_WINDOW_DAYS, window_days
            )));
        }

        Ok(Self {
            tz_offset_ms: i64::from(tz_offset_hours) * 60 * 60 * 1000,
            window_days,
            weekday_labels: localized_weekday_labels(),
        })
    }

    /// Display label for any day number, using these weekday labels
    pub fn label_for(&self, day_number: DayNumber) -> String {
        display_label(day_number, &self.weekday_labels)
    }

    /// Day number of an instant under this timezone shift
    pub fn day_number(&self, instant: DateTime<Utc>) -> DayNumber {
        DayNumber::from_instant(instant, self.tz_offset_ms)
    }
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            tz_offset_ms: i64::from(DEFAULT_TZ_OFFSET_HOURS) * 60 * 60 * 1000,
            window_days: DEFAULT_WINDOW_DAYS,
            weekday_labels: localized_weekday_labels(),
        }
    }
}

/// Weekday labels of the active locale, Sunday first
pub fn localized_weekday_labels() -> [String; 7] {
    [
        t!("weekday_sun").to_string(),
        t!("weekday_mon").to_string(),
        t!("weekday_tue").to_string(),
        t!("weekday_wed").to_string(),
        t!("weekday_thu").to_string(),
        t!("weekday_fri").to_string(),
        t!("weekday_sat").to_string(),
    ]
}

/// Produce the rolling selection window for a reference instant
pub fn generate(reference: DateTime<Utc>, settings: &CalendarSettings) -> CalendarWindow {
    let today = settings.day_number(reference);
    let days = (0..i64::from(settings.window_days))
        .map(|offset| DayOption::new(today.plus(offset), &settings.weekday_labels))
        .collect();
    let week = WeekWindow::from_today(today);

    debug!(
        "Generated calendar window: today={} ({}), {} days",
        today,
        today.iso_date(),
        settings.window_days
    );

    CalendarWindow { today, days, week }
}
