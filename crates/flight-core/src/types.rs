//! # Domain Types
//!
//! Row and input types shared by every lookup.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │     Value       │   │       Record        │   │   FlightDate    │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  Null           │   │  [(name, Value)]    │   │  day            │   │
//! │  │  Integer(i64)   │   │  column order kept  │   │  month          │   │
//! │  │  Real(f64)      │   │  one per SQL row    │   │  year           │   │
//! │  │  Text(String)   │   │                     │   │  (validated)    │   │
//! │  └─────────────────┘   └─────────────────────┘   └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Value
// =============================================================================

/// A single scalar column value.
///
/// Serializes as the bare JSON scalar (`null`, `35`, `12.5`, `"ATL"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// Returns true for SQL NULL.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the integer, if this is an integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Real(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the text, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Real(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

// =============================================================================
// Record
// =============================================================================

/// One materialized result row: column names mapped to values, in the
/// order the query projected them.
///
/// Duplicate column names are kept (e.g. `flights.*` next to a joined
/// column of the same name). [`Record::get`] returns the first exact match and
/// falls back to the first ASCII case-insensitive match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: Vec<(String, Value)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record::default()
    }

    /// Creates an empty record with room for `capacity` columns.
    pub fn with_capacity(capacity: usize) -> Self {
        Record {
            columns: Vec::with_capacity(capacity),
        }
    }

    /// Appends a column.
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.columns.push((name.into(), value));
    }

    /// Looks up a column by name.
    ///
    /// ## Example
    /// ```rust
    /// use flight_core::{Record, Value};
    ///
    /// let mut record = Record::new();
    /// record.push("AIRLINE", Value::Integer(3));
    /// record.push("airline", Value::from("Delta Air Lines Inc."));
    ///
    /// assert_eq!(record.get("AIRLINE"), Some(&Value::Integer(3)));
    /// assert_eq!(record.get("airline").and_then(Value::as_str), Some("Delta Air Lines Inc."));
    /// assert_eq!(record.get("Airline"), Some(&Value::Integer(3)));
    /// ```
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .or_else(|| {
                self.columns
                    .iter()
                    .find(|(column, _)| column.eq_ignore_ascii_case(name))
            })
            .map(|(_, value)| value)
    }

    /// Number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when the record has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in projection order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, value)` pairs in projection order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Record {
            columns: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}

/// Serializes as a JSON object in column order.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Flight Date
// =============================================================================

/// A validated calendar date, as stored in the `DAY`/`MONTH`/`YEAR`
/// columns of `flights`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct FlightDate {
    day: u32,
    month: u32,
    year: i32,
}

impl FlightDate {
    /// Creates a date, rejecting impossible ones like 31/2/2015.
    ///
    /// ## Example
    /// ```rust
    /// use flight_core::FlightDate;
    ///
    /// assert!(FlightDate::new(1, 1, 2015).is_ok());
    /// assert!(FlightDate::new(31, 2, 2015).is_err());
    /// ```
    pub fn new(day: u32, month: u32, year: i32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(FlightDate::from)
            .ok_or(ValidationError::InvalidDate { day, month, year })
    }

    #[inline]
    pub const fn day(&self) -> u32 {
        self.day
    }

    #[inline]
    pub const fn month(&self) -> u32 {
        self.month
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }
}

impl From<NaiveDate> for FlightDate {
    fn from(date: NaiveDate) -> Self {
        FlightDate {
            day: date.day(),
            month: date.month(),
            year: date.year(),
        }
    }
}

impl fmt::Display for FlightDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.day, self.month, self.year)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Record {
        let mut record = Record::new();
        record.push("ID", Value::Integer(42));
        record.push("ORIGIN_AIRPORT", Value::from("ATL"));
        record.push("DELAY", Value::Real(35.0));
        record.push("TAIL_NUMBER", Value::Null);
        record
    }

    #[test]
    fn test_record_preserves_column_order() {
        let record = sample_record();
        let names: Vec<&str> = record.column_names().collect();
        assert_eq!(names, vec!["ID", "ORIGIN_AIRPORT", "DELAY", "TAIL_NUMBER"]);
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn test_record_get_is_case_insensitive_fallback() {
        let record = sample_record();
        assert_eq!(record.get("id"), Some(&Value::Integer(42)));
        assert_eq!(record.get("origin_airport").and_then(Value::as_str), Some("ATL"));
        assert!(record.get("MISSING").is_none());
    }

    #[test]
    fn test_record_serializes_as_ordered_object() {
        let json = serde_json::to_string(&sample_record()).unwrap();
        assert_eq!(
            json,
            r#"{"ID":42,"ORIGIN_AIRPORT":"ATL","DELAY":35.0,"TAIL_NUMBER":null}"#
        );
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(20_i32), Value::Integer(20));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("DL")), Value::Text("DL".to_string()));
        assert_eq!(Value::Integer(35).as_f64(), Some(35.0));
        assert_eq!(Value::Real(1.5).as_i64(), None);
    }

    #[test]
    fn test_value_deserializes_untagged() {
        let values: Vec<Value> = serde_json::from_str(r#"[null, 7, 2.5, "JFK"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Integer(7),
                Value::Real(2.5),
                Value::Text("JFK".to_string())
            ]
        );
    }

    #[test]
    fn test_flight_date_validation() {
        let date = FlightDate::new(1, 1, 2015).unwrap();
        assert_eq!((date.day(), date.month(), date.year()), (1, 1, 2015));
        assert_eq!(date.to_string(), "1/1/2015");

        assert_eq!(
            FlightDate::new(31, 2, 2015),
            Err(ValidationError::InvalidDate {
                day: 31,
                month: 2,
                year: 2015
            })
        );
        assert!(FlightDate::new(1, 13, 2015).is_err());
        assert!(FlightDate::new(0, 1, 2015).is_err());
    }
}
