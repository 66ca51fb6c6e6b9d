// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engagement charts for `likeviz_core` scenes.
//!
//! This crate turns coerced records into [`likeviz_core::Scene`]s:
//! - **Scales** map data values into screen coordinates: [`ScaleBand`] for categories,
//!   [`ScaleLinear`] for numbers, [`ScaleTime`] for dates and [`ScaleOrdinal`] for colors.
//! - **Guides** (axes, legends) and **mark specs** (rects, rules, lines, text) generate
//!   `likeviz_core::Mark`s with stable ids.
//! - **Chart builders** compose the above: [`BoxPlotSpec`], [`GroupedBarChartSpec`] and
//!   [`LineChartSpec`]. Each returns a scene or a [`ChartError`].
//!
//! Text shaping is out of scope; text marks store unshaped strings.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
mod box_plot;
#[cfg(test)]
mod chart_tests;
mod curve;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod grouped_bar_chart;
mod layout;
mod legend;
mod line_chart;
mod line_mark;
mod log;
mod rect_mark;
mod rule_mark;
mod scale;
mod text_mark;
mod time;
mod z_order;

pub use axis::{AxisOrient, AxisScale, AxisSpec, AxisStyle, StrokeStyle};
pub use box_plot::BoxPlotSpec;
pub use curve::Curve;
pub use error::ChartError;
pub use grouped_bar_chart::{GroupedBarChartSpec, GroupedBarScales, SERIES_PALETTE};
pub use layout::{ChartLayout, ChartLayoutSpec, Margin, Size};
pub use legend::{LegendItem, LegendSwatchesSpec};
pub use line_chart::LineChartSpec;
pub use line_mark::LineMarkSpec;
pub use rect_mark::RectMarkSpec;
pub use rule_mark::RuleMarkSpec;
pub use scale::{
    CATEGORY10, ScaleBand, ScaleContinuous, ScaleLinear, ScaleLinearSpec, ScaleOrdinal, ScaleTime,
};
pub use text_mark::{TextMarkSpec, TextStyle};
pub use time::{format_time_seconds, nice_time_ticks_seconds};
pub use z_order::*;
