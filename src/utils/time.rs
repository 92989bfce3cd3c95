use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// Parse time string in HH:MM format
pub fn parse_time(time_str: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hour = parts[0].parse::<u32>().ok()?;
    let minute = parts[1].parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Parse an HH:MM string into a time of day
pub fn parse_time_of_day(time_str: &str) -> Option<NaiveTime> {
    let (hour, minute) = parse_time(time_str.trim())?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Format a time of day as zero-padded 24-hour HH:MM
pub fn format_time_of_day(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Parse a YYYY-MM-DD date
pub fn parse_iso_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").ok()
}

/// Format a date as YYYY-MM-DD
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Month/day without zero padding, e.g. "6/9"
pub fn format_month_day(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

/// Same as [`format_month_day`], starting from an ISO date string.
/// Strings that do not parse are returned unchanged.
pub fn format_iso_month_day(date_str: &str) -> String {
    match parse_iso_date(date_str) {
        Some(date) => format_month_day(date),
        None => date_str.to_string(),
    }
}
