// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw and coerced records.

extern crate alloc;

use alloc::string::String;

use chrono::NaiveDate;
use hashbrown::HashMap;

/// A flat mapping of field names to raw string values (one CSV row).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Builder form of [`Record::insert`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Returns the raw value of a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Iterates over `(field, value)` pairs in unspecified order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A coerced field value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A field passed through unchanged.
    Text(String),
    /// A numeric field; `NaN` when the raw text was not a number.
    Number(f64),
    /// A date field; `None` when the raw text was not a date.
    Date(Option<NaiveDate>),
}

impl Value {
    /// Returns the text of a pass-through field.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number of a numeric field (possibly `NaN`).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the date of a valid date field.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => *d,
            _ => None,
        }
    }
}

/// A record whose designated fields have been converted to numbers or dates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoercedRecord {
    fields: HashMap<String, Value>,
}

impl CoercedRecord {
    pub(crate) fn from_fields(fields: HashMap<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a pass-through text field.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field)?.as_str()
    }

    /// Returns a numeric field (possibly `NaN`).
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field)?.as_f64()
    }

    /// Returns a valid date field.
    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        self.get(field)?.as_date()
    }

    /// Returns a date field as seconds since the Unix epoch (midnight UTC).
    pub fn timestamp(&self, field: &str) -> Option<f64> {
        let date = self.date(field)?;
        let secs = date.and_hms_opt(0, 0, 0)?.and_utc().timestamp();
        Some(secs as f64)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn record_collects_from_pairs() {
        let r: Record = [("AgeGroup", "18-25"), ("Likes", "120")].into_iter().collect();
        assert_eq!(r.get("AgeGroup"), Some("18-25"));
        assert_eq!(r.get("Likes"), Some("120"));
        assert_eq!(r.get("Platform"), None);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn timestamp_is_midnight_utc() {
        let mut fields = HashMap::new();
        fields.insert(
            String::from("Date"),
            Value::Date(NaiveDate::from_ymd_opt(1970, 1, 2)),
        );
        let r = CoercedRecord::from_fields(fields);
        assert_eq!(r.timestamp("Date"), Some(86_400.0));
        assert_eq!(r.text("Date"), None);
    }
}
