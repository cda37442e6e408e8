//! Field checks shared by the proxy routes.
//!
//! Bodies are validated as loose JSON because they are forwarded verbatim;
//! only the fields a route checks are ever read.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://\S+$").expect("URL pattern is valid"));

static MONTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("month pattern is valid"));

static YEAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}$").expect("year pattern is valid"));

/// Earliest year accepted by the filter endpoints.
pub const MIN_FILTER_YEAR: u32 = 2000;

/// Whether a JSON value counts as "provided".
///
/// `null`, `false`, `0`, `""` and absent fields are all treated as missing.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Look up a dotted path such as `eligibility.batch`.
pub fn lookup<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(body, |value, key| value.get(key))
}

/// Return the dotted paths from `fields` that are not present in `body`.
pub fn missing_fields<'a>(body: &Value, fields: &[&'a str]) -> Vec<&'a str> {
    fields
        .iter()
        .copied()
        .filter(|field| !is_present(lookup(body, field)))
        .collect()
}

/// Fail with a 400 naming every missing field.
pub fn require_fields(body: &Value, fields: &[&str]) -> Result<()> {
    let missing = missing_fields(body, fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Fail with the given message if any of `fields` is missing.
pub fn require_fields_or(body: &Value, fields: &[&str], message: &str) -> Result<()> {
    if missing_fields(body, fields).is_empty() {
        Ok(())
    } else {
        Err(Error::validation(message))
    }
}

/// Require the body to be a JSON object.
pub fn parse_object(bytes: &[u8]) -> Result<Value> {
    let body: Value = serde_json::from_slice(bytes)?;
    if body.is_object() {
        Ok(body)
    } else {
        Err(Error::InvalidInput("Invalid JSON body".to_string()))
    }
}

/// Copy only the listed top-level keys that exist in `body`.
pub fn pick(body: &Value, keys: &[&str]) -> Value {
    let picked: Map<String, Value> = keys
        .iter()
        .filter_map(|key| body.get(*key).map(|value| (key.to_string(), value.clone())))
        .collect();
    Value::Object(picked)
}

/// A text field, or a 400 if it is present but not a string.
pub fn text_field<'a>(body: &'a Value, key: &str) -> Result<Option<&'a str>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(Error::validation(format!("{} must be a string", key))),
    }
}

pub fn is_valid_url(value: &str) -> bool {
    URL_PATTERN.is_match(value)
}

/// A non-empty JSON array.
pub fn non_empty_array(value: Option<&Value>) -> Option<&Vec<Value>> {
    value.and_then(Value::as_array).filter(|items| !items.is_empty())
}

/// Word count as the portal UI counts it: split on single spaces.
pub fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

/// Validate an optional `month` filter value (1-12).
pub fn check_month(month: Option<&str>) -> Result<()> {
    match month.filter(|m| !m.is_empty()) {
        None => Ok(()),
        Some(m) if MONTH_PATTERN.is_match(m) && matches!(m.parse::<u32>(), Ok(1..=12)) => Ok(()),
        Some(_) => Err(Error::validation("Invalid month value.")),
    }
}

/// Validate an optional `year` filter value (four digits, not before 2000).
pub fn check_year(year: Option<&str>) -> Result<()> {
    match year.filter(|y| !y.is_empty()) {
        None => Ok(()),
        Some(y)
            if YEAR_PATTERN.is_match(y)
                && y.parse::<u32>().map(|n| n >= MIN_FILTER_YEAR).unwrap_or(false) =>
        {
            Ok(())
        }
        Some(_) => Err(Error::validation("Invalid year value.")),
    }
}

/// Parse a date the way the portal sends them.
///
/// Accepts RFC 3339, a zone-less `YYYY-MM-DDTHH:MM:SS` (UTC) or a plain
/// `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|ndt| ndt.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|ndt| ndt.and_utc())
        })
}
