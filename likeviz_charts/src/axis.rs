// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An axis is a domain line along one edge of the plot, a short tick at every tick value,
//! a label per tick and an optional title. Band axes tick every category at its band
//! center; continuous axes tick round values inside the domain.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use likeviz_core::{Mark, MarkId, TextAnchor, TextBaseline};
use peniko::Brush;
use peniko::color::palette::css;

use crate::format::format_tick_with_step;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{ScaleBand, ScaleContinuous, ScaleLinear, ScaleTime};
use crate::text_mark::{TextMarkSpec, TextStyle};
use crate::{time, z_order};

/// A paint + width pair for stroked paths (domain lines, ticks, whiskers, lines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling: black 1px rules, 10px labels and a 12px title by default.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Domain line and tick marks.
    pub rule: StrokeStyle,
    /// Tick labels.
    pub label: TextStyle,
    /// Axis title.
    pub title: TextStyle,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            rule: StrokeStyle::default(),
            label: TextStyle::new(10.0, css::BLACK),
            title: TextStyle::new(12.0, css::BLACK),
        }
    }
}

/// Which plot edge an axis runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis below the plot area.
    Bottom,
    /// A vertical axis left of the plot area.
    Left,
}

/// The instantiated scale an axis reads its ticks from.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisScale {
    /// One tick per category, at the band center.
    Band(ScaleBand),
    /// Round ticks inside the domain.
    Continuous(ScaleContinuous),
}

impl From<ScaleBand> for AxisScale {
    fn from(value: ScaleBand) -> Self {
        Self::Band(value)
    }
}

impl From<ScaleContinuous> for AxisScale {
    fn from(value: ScaleContinuous) -> Self {
        Self::Continuous(value)
    }
}

impl From<ScaleLinear> for AxisScale {
    fn from(value: ScaleLinear) -> Self {
        Self::Continuous(value.into())
    }
}

impl From<ScaleTime> for AxisScale {
    fn from(value: ScaleTime) -> Self {
        Self::Continuous(value.into())
    }
}

/// An axis specification.
#[derive(Clone, Debug)]
pub struct AxisSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// The scale the axis is drawn for; its range should span the plot edge.
    pub scale: AxisScale,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks on a continuous axis.
    pub tick_count: usize,
    /// Tick line length, pointing away from the plot.
    pub tick_size: f64,
    /// Gap between the tick end and its label.
    pub tick_padding: f64,
    /// Tick label rotation in degrees. Rotated labels hang from their end.
    pub label_angle: f64,
    /// Whether to draw the axis domain line.
    pub show_domain: bool,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional axis title text.
    pub title: Option<String>,
    /// Distance from the plot edge to the title baseline.
    pub title_offset: f64,
}

impl AxisSpec {
    /// Creates an axis with 10 ticks of size 6, padding 3 and no title.
    pub fn new(id_base: u64, scale: impl Into<AxisScale>, orient: AxisOrient) -> Self {
        Self {
            id_base,
            scale: scale.into(),
            orient,
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
            label_angle: 0.0,
            show_domain: true,
            style: AxisStyle::default(),
            title: None,
            title_offset: 40.0,
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: u64, scale: impl Into<AxisScale>) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: u64, scale: impl Into<AxisScale>) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set tick size in scene coordinates.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Set tick padding in scene coordinates.
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Set tick label rotation angle in degrees.
    pub fn with_label_angle(mut self, angle_degrees: f64) -> Self {
        self.label_angle = angle_degrees;
        self
    }

    /// Enable or disable the axis domain line.
    pub fn with_domain(mut self, domain: bool) -> Self {
        self.show_domain = domain;
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the axis title and its distance from the plot edge.
    pub fn with_title(mut self, title: impl Into<String>, offset: f64) -> Self {
        self.title = Some(title.into());
        self.title_offset = offset;
        self
    }

    /// Returns `(position, label)` for every tick that falls on the plot edge.
    fn ticks(&self, plot: Rect) -> Vec<(f64, String)> {
        let (lo, hi) = match self.orient {
            AxisOrient::Bottom => (plot.x0, plot.x1),
            AxisOrient::Left => (plot.y0, plot.y1),
        };
        match &self.scale {
            AxisScale::Band(band) => band
                .domain()
                .iter()
                .enumerate()
                .map(|(i, key)| (band.x(i) + band.band_width() * 0.5, key.clone()))
                .collect(),
            AxisScale::Continuous(scale) => {
                let values = scale.ticks(self.tick_count);
                let step = tick_step(&values);
                values
                    .into_iter()
                    .map(|v| {
                        let label = match scale {
                            ScaleContinuous::Time(_) => time::format_time_seconds(v, step),
                            ScaleContinuous::Linear(_) => format_tick_with_step(v, step),
                        };
                        (scale.map(v), label)
                    })
                    .filter(|(pos, _)| *pos >= lo - 1.0e-9 && *pos <= hi + 1.0e-9)
                    .collect()
            }
        }
    }

    /// Generates axis marks along the matching edge of `plot`.
    pub fn marks(&self, plot: Rect) -> Vec<Mark> {
        let rule = |id: u64, from: Point, to: Point| {
            RuleMarkSpec::new(MarkId::from_raw(id), from, to)
                .with_stroke(self.style.rule.clone())
                .with_z_index(z_order::AXIS_RULES)
                .mark()
        };
        let size = self.tick_size.abs();
        let gap = size + self.tick_padding.max(0.0);

        let mut out = Vec::new();
        if self.show_domain {
            let (from, to) = match self.orient {
                AxisOrient::Bottom => (Point::new(plot.x0, plot.y1), Point::new(plot.x1, plot.y1)),
                AxisOrient::Left => (Point::new(plot.x0, plot.y0), Point::new(plot.x0, plot.y1)),
            };
            out.push(rule(self.id_base, from, to));
        }

        for (i, (pos, label)) in self.ticks(plot).into_iter().enumerate() {
            let (tick_from, tick_to, label_pos) = match self.orient {
                AxisOrient::Bottom => (
                    Point::new(pos, plot.y1),
                    Point::new(pos, plot.y1 + size),
                    Point::new(pos, plot.y1 + gap),
                ),
                AxisOrient::Left => (
                    Point::new(plot.x0, pos),
                    Point::new(plot.x0 - size, pos),
                    Point::new(plot.x0 - gap, pos),
                ),
            };
            out.push(rule(self.id_base + 1 + i as u64, tick_from, tick_to));

            let (anchor, baseline) = match self.orient {
                AxisOrient::Bottom if self.label_angle != 0.0 => {
                    (TextAnchor::End, TextBaseline::Hanging)
                }
                AxisOrient::Bottom => (TextAnchor::Middle, TextBaseline::Hanging),
                AxisOrient::Left => (TextAnchor::End, TextBaseline::Middle),
            };
            out.push(
                TextMarkSpec::new(MarkId::from_raw(self.id_base + 1000 + i as u64), label_pos, label)
                    .with_style(self.style.label.clone())
                    .with_placement(anchor, baseline)
                    .with_angle(self.label_angle)
                    .mark(),
            );
        }

        if let Some(title) = &self.title {
            let (pos, angle) = match self.orient {
                AxisOrient::Bottom => (
                    Point::new((plot.x0 + plot.x1) * 0.5, plot.y1 + self.title_offset),
                    0.0,
                ),
                AxisOrient::Left => (
                    Point::new(plot.x0 - self.title_offset, (plot.y0 + plot.y1) * 0.5),
                    -90.0,
                ),
            };
            out.push(
                TextMarkSpec::new(MarkId::from_raw(self.id_base + 9000), pos, title.clone())
                    .with_style(self.style.title.clone())
                    .with_placement(TextAnchor::Middle, TextBaseline::Alphabetic)
                    .with_angle(angle)
                    .with_z_index(z_order::AXIS_TITLES)
                    .mark(),
            );
        }
        out
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => (b - a).abs(),
        _ => 0.0,
    }
}
