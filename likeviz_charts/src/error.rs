// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart construction errors and the field accessors that raise them.

extern crate alloc;

use alloc::string::String;

use likeviz_transforms::{CoercedRecord, EmptyGroupError, Value};

/// Why a chart could not be built.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChartError {
    /// A record lacks a field, or the field does not have the type the chart reads.
    #[error("record {row}: field `{field}` is missing or has the wrong type")]
    MissingField {
        /// Zero-based index of the record.
        row: usize,
        /// Field name.
        field: String,
    },
    /// A group to summarize had no values.
    #[error(transparent)]
    EmptyGroup(#[from] EmptyGroupError),
}

impl ChartError {
    fn missing(row: usize, field: &str) -> Self {
        Self::MissingField {
            row,
            field: field.into(),
        }
    }
}

pub(crate) fn text_field<'a>(
    record: &'a CoercedRecord,
    row: usize,
    field: &str,
) -> Result<&'a str, ChartError> {
    record.text(field).ok_or_else(|| ChartError::missing(row, field))
}

/// The value of a numeric field, `NaN` included.
pub(crate) fn number_field(
    record: &CoercedRecord,
    row: usize,
    field: &str,
) -> Result<f64, ChartError> {
    record
        .number(field)
        .ok_or_else(|| ChartError::missing(row, field))
}

/// A date field as epoch seconds; `Ok(None)` when the date itself was invalid.
pub(crate) fn timestamp_field(
    record: &CoercedRecord,
    row: usize,
    field: &str,
) -> Result<Option<f64>, ChartError> {
    match record.get(field) {
        Some(Value::Date(_)) => Ok(record.timestamp(field)),
        _ => Err(ChartError::missing(row, field)),
    }
}
