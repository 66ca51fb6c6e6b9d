// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Record transforms for `likeviz` charts.
//!
//! This crate provides the data side of every chart pipeline:
//! - [`Record`]s of raw string fields, as produced by a CSV reader,
//! - [`Coercion`] of designated fields into numbers and dates,
//! - grouping helpers ([`distinct`], [`group`], [`rollup`], [`extent`]), and
//! - order statistics ([`quantile_sorted`], [`summarize`], [`summarize_by`]).
//!
//! Everything here is a pure transform: inputs are borrowed, outputs are new values.

#![no_std]

extern crate alloc;

mod coerce;
mod group;
mod log;
mod record;
mod summary;

pub use coerce::{
    Coerced, Coercion, CoercionWarning, FieldType, parse_number, parse_weekday_date,
};
pub use group::{distinct, extent, group, max, rollup};
pub use record::{CoercedRecord, Record, Value};
pub use summary::{EmptyGroupError, GroupSummary, quantile_sorted, summarize, summarize_by};
