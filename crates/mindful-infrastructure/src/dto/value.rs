//! Lenient scalar shapes shared by the wire DTOs.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// An id sent either as a string or as a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(i64),
}

impl WireId {
    pub fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// A reference sent either as a bare name or as an object with `name`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NamedRef {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
    Other(Value),
}

impl NamedRef {
    pub fn name(self) -> Option<String> {
        match self {
            Self::Name(name) => Some(name),
            Self::Object { name } => name,
            Self::Other(_) => None,
        }
    }
}

/// Resolves an optional reference to a display name.
pub fn display_name(reference: Option<NamedRef>, fallback: &str) -> String {
    reference
        .and_then(NamedRef::name)
        .unwrap_or_else(|| fallback.to_string())
}

/// A counter, if the value is numeric.
pub fn count(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.floor() as i64)),
        _ => None,
    }
}

/// Clamps a counter into `u32`; absent is 0.
pub fn non_negative(count: Option<i64>) -> u32 {
    count.unwrap_or(0).clamp(0, u32::MAX as i64) as u32
}

/// A counter field that must always render.
pub fn counter(value: Option<&Value>) -> u32 {
    non_negative(count(value))
}

/// Any numeric value, fractional or not.
pub fn number(value: Option<&Value>) -> Option<f64> {
    value?.as_f64()
}

/// A flag, if the value is a boolean.
pub fn flag(value: Option<&Value>) -> Option<bool> {
    value?.as_bool()
}

/// Parses an RFC 3339 timestamp, or a zone-less one taken as UTC.
pub fn timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}
