use crate::utils::time::{format_iso_date, format_month_day};
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds in one calendar day
pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Weekday index of 1970-01-01 (a Thursday), with 0 = Sunday
const EPOCH_WEEKDAY_INDEX: i64 = 4;

/// Whole days since 1970-01-01 in the deployment timezone.
///
/// Two instants with the same day number are the same calendar day regardless
/// of their time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayNumber(i64);

impl DayNumber {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// Day number of an instant after shifting it by the timezone offset
    pub fn from_instant(instant: DateTime<Utc>, tz_offset_ms: i64) -> Self {
        Self((instant.timestamp_millis() + tz_offset_ms).div_euclid(MS_PER_DAY))
    }

    /// Day number of a calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.signed_duration_since(epoch()).num_days())
    }

    /// Calendar date of this day number, saturating at chrono's date range
    pub fn date(self) -> NaiveDate {
        let days = Days::new(self.0.unsigned_abs());
        let date = if self.0 >= 0 {
            epoch().checked_add_days(days)
        } else {
            epoch().checked_sub_days(days)
        };
        date.unwrap_or(if self.0 >= 0 {
            NaiveDate::MAX
        } else {
            NaiveDate::MIN
        })
    }

    /// Day of week, 0 = Sunday
    pub fn weekday_index(self) -> usize {
        (self.0 + EPOCH_WEEKDAY_INDEX).rem_euclid(7) as usize
    }

    pub fn iso_date(self) -> String {
        format_iso_date(self.date())
    }

    pub const fn plus(self, days: i64) -> Self {
        Self(self.0 + days)
    }

    pub const fn minus(self, days: i64) -> Self {
        Self(self.0 - days)
    }
}

impl fmt::Display for DayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn epoch() -> NaiveDate {
    DateTime::UNIX_EPOCH.date_naive()
}

/// A candidate date offered for selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOption {
    pub day_number: DayNumber,
    /// YYYY-MM-DD
    pub iso_date: String,
    /// e.g. "6/10 (Mon)"
    pub label: String,
}

impl DayOption {
    pub fn new(day_number: DayNumber, weekday_labels: &[String; 7]) -> Self {
        Self {
            day_number,
            iso_date: day_number.iso_date(),
            label: display_label(day_number, weekday_labels),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.day_number.date()
    }
}

/// Month/day plus the localized weekday, e.g. "6/10 (Mon)"
pub fn display_label(day_number: DayNumber, weekday_labels: &[String; 7]) -> String {
    format!(
        "{} ({})",
        format_month_day(day_number.date()),
        weekday_labels[day_number.weekday_index()]
    )
}

/// Current and next calendar week, Sunday to Saturday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    pub current_week_start: DayNumber,
    pub current_week_end: DayNumber,
    pub next_week_start: DayNumber,
    pub next_week_end: DayNumber,
}

impl WeekWindow {
    pub fn from_today(today: DayNumber) -> Self {
        let current_week_start = today.minus(today.weekday_index() as i64);
        let next_week_start = current_week_start.plus(7);
        Self {
            current_week_start,
            current_week_end: current_week_start.plus(6),
            next_week_start,
            next_week_end: next_week_start.plus(6),
        }
    }

    pub fn in_current_week(&self, day: DayNumber) -> bool {
        day >= self.current_week_start && day <= self.current_week_end
    }

    pub fn in_next_week(&self, day: DayNumber) -> bool {
        day >= self.next_week_start && day <= self.next_week_end
    }
}

/// Output of one generator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarWindow {
    pub today: DayNumber,
    /// Ascending, starting at today
    pub days: Vec<DayOption>,
    pub week: WeekWindow,
}

impl CalendarWindow {
    /// Find the offered day for a calendar date
    pub fn find(&self, date: NaiveDate) -> Option<&DayOption> {
        let day_number = DayNumber::from_date(date);
        self.days.iter().find(|day| day.day_number == day_number)
    }
}
