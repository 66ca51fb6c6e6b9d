// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field coercion: raw string fields into numbers and dates.
//!
//! Coercion never fails. A field that cannot be converted becomes a sentinel
//! (`NaN` for numbers, `Date(None)` for dates) and is reported as a [`CoercionWarning`].

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use chrono::{NaiveDate, Weekday};
use hashbrown::HashMap;

use crate::log::{log_debug, log_warn};
use crate::record::{CoercedRecord, Record, Value};

/// Target type of a coerced field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Base-10 floating point number.
    Number,
    /// Calendar date written as `M/D/YYYY (Weekday)`.
    Date,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Number => "number",
            Self::Date => "date",
        })
    }
}

/// A field that could not be converted to its target type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoercionWarning {
    /// Zero-based index of the record in the input.
    pub row: usize,
    /// Field name.
    pub field: String,
    /// Raw text, or `None` if the record has no such field.
    pub raw: Option<String>,
    /// Requested type.
    pub target: FieldType,
}

impl fmt::Display for CoercionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => write!(
                f,
                "row {}: field `{}` value {:?} is not a valid {}",
                self.row, self.field, raw, self.target
            ),
            None => write!(
                f,
                "row {}: field `{}` is missing (expected a {})",
                self.row, self.field, self.target
            ),
        }
    }
}

/// Output of [`Coercion::apply`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Coerced {
    /// Coerced records, in input order.
    pub records: Vec<CoercedRecord>,
    /// One entry per field that fell back to a sentinel.
    pub warnings: Vec<CoercionWarning>,
}

/// A set of `field -> type` directives.
///
/// Fields without a directive are passed through as [`Value::Text`]. When a field is
/// directed twice, the last directive wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Coercion {
    directives: Vec<(String, FieldType)>,
}

impl Coercion {
    /// Creates an empty directive set (every field passes through).
    pub fn new() -> Self {
        Self::default()
    }

    /// Directs `field` to be parsed as a number.
    pub fn number(self, field: impl Into<String>) -> Self {
        self.with(field, FieldType::Number)
    }

    /// Directs `field` to be parsed as a `M/D/YYYY (Weekday)` date.
    pub fn date(self, field: impl Into<String>) -> Self {
        self.with(field, FieldType::Date)
    }

    /// Adds a directive.
    pub fn with(mut self, field: impl Into<String>, target: FieldType) -> Self {
        let field = field.into();
        self.directives.retain(|(f, _)| *f != field);
        self.directives.push((field, target));
        self
    }

    /// Returns the directives in insertion order.
    pub fn directives(&self) -> &[(String, FieldType)] {
        &self.directives
    }

    /// Coerces every record.
    pub fn apply(&self, records: &[Record]) -> Coerced {
        let mut out = Coerced {
            records: Vec::with_capacity(records.len()),
            warnings: Vec::new(),
        };

        for (row, record) in records.iter().enumerate() {
            let mut fields: HashMap<String, Value> = record
                .fields()
                .map(|(k, v)| (k.to_string(), Value::Text(v.to_string())))
                .collect();

            for (field, target) in &self.directives {
                let raw = record.get(field);
                let (value, ok) = match target {
                    FieldType::Number => {
                        let parsed = raw.and_then(parse_number);
                        (Value::Number(parsed.unwrap_or(f64::NAN)), parsed.is_some())
                    }
                    FieldType::Date => {
                        let parsed = raw.and_then(parse_weekday_date);
                        (Value::Date(parsed), parsed.is_some())
                    }
                };
                if !ok {
                    let warning = CoercionWarning {
                        row,
                        field: field.clone(),
                        raw: raw.map(String::from),
                        target: *target,
                    };
                    log_warn!(%warning, "field coercion fell back to a sentinel");
                    out.warnings.push(warning);
                }
                fields.insert(field.clone(), value);
            }

            out.records.push(CoercedRecord::from_fields(fields));
        }

        log_debug!(
            records = out.records.len(),
            warnings = out.warnings.len(),
            "coerced records"
        );
        out
    }
}

/// Parses a finite base-10 floating point number, ignoring surrounding whitespace.
///
/// Returns `None` for empty or malformed text, and for values that are not finite
/// (`NaN`, `inf`, `Infinity`, or literals that overflow `f64`).
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a date written as `M/D/YYYY (Weekday)`, e.g. `3/1/2024 (Friday)`.
///
/// Month and day may have one or two digits. The weekday must name a day of the week
/// (full or abbreviated, any case) but is not checked against the date.
pub fn parse_weekday_date(raw: &str) -> Option<NaiveDate> {
    let (date, rest) = raw.trim().split_once('(')?;
    let weekday = rest.strip_suffix(')')?.trim();
    weekday.parse::<Weekday>().ok()?;
    NaiveDate::parse_from_str(date.trim(), "%m/%d/%Y").ok()
}
