use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;
use std::collections::BTreeMap;
use vacation_planner::utils::time::parse_time_of_day;

use crate::model::NormalizedEntry;

const DEFAULT_START: &str = "09:00";
const DEFAULT_END: &str = "18:00";

/// A validated `POST /vacation-requests` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub employee_id: i64,
    /// One entry per date, ordered by date
    pub entries: Vec<NormalizedEntry>,
}

/// Validate a request body. The error is the message returned to the caller.
pub fn validate_request(payload: &Value) -> Result<ValidatedRequest, String> {
    let employee_id = payload
        .get("employee_id")
        .and_then(parse_employee_id)
        .ok_or_else(|| "employee_id is required".to_string())?;

    let dates = match payload.get("dates") {
        Some(Value::Array(dates)) if !dates.is_empty() => dates,
        _ => return Err("dates array is required".to_string()),
    };

    // Later entries for the same date replace earlier ones
    let mut by_date: BTreeMap<NaiveDate, NormalizedEntry> = BTreeMap::new();
    for raw in dates {
        let entry = normalize_entry(raw)?;
        by_date.insert(entry.date, entry);
    }

    Ok(ValidatedRequest {
        employee_id,
        entries: by_date.into_values().collect(),
    })
}

fn parse_employee_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn normalize_entry(raw: &Value) -> Result<NormalizedEntry, String> {
    let (date, start, end) = match raw {
        Value::String(date) => (
            Some(Value::String(date.clone())),
            Value::String(DEFAULT_START.to_string()),
            Value::String(DEFAULT_END.to_string()),
        ),
        Value::Object(fields) => (
            fields.get("date").cloned(),
            fields.get("start_time").cloned().unwrap_or(Value::Null),
            fields.get("end_time").cloned().unwrap_or(Value::Null),
        ),
        _ => return Err("dates must be strings or objects".to_string()),
    };

    let date = match date {
        None | Some(Value::Null) => return Err("date field is required".to_string()),
        Some(Value::String(s)) if s.is_empty() => return Err("date field is required".to_string()),
        Some(value) => parse_date(&value)?,
    };

    let start_time = parse_time(&start)?;
    let end_time = parse_time(&end)?;
    if start_time >= end_time {
        return Err("start_time must be earlier than end_time".to_string());
    }

    Ok(NormalizedEntry {
        date,
        start_time,
        end_time,
    })
}

fn parse_date(value: &Value) -> Result<NaiveDate, String> {
    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| format!("Invalid date format: {}", raw))
}

fn parse_time(value: &Value) -> Result<NaiveTime, String> {
    value
        .as_str()
        .and_then(parse_time_of_day)
        .ok_or_else(|| "start_time/end_time must be HH:MM".to_string())
}
