// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single text marks: tick labels, axis titles and legend entries.

extern crate alloc;

use alloc::string::String;

use kurbo::Point;
use likeviz_core::{Mark, MarkId, TextAnchor, TextBaseline};
use peniko::Brush;
use peniko::color::palette::css;

/// Font size and paint shared by a family of text marks.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Fill paint.
    pub fill: Brush,
}

impl TextStyle {
    /// Creates a style.
    pub fn new(font_size: f64, fill: impl Into<Brush>) -> Self {
        Self {
            font_size,
            fill: fill.into(),
        }
    }
}

impl Default for TextStyle {
    /// Black 12px text.
    fn default() -> Self {
        Self::new(12.0, css::BLACK)
    }
}

/// One unshaped text run anchored at a point.
#[derive(Clone, Debug)]
pub struct TextMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Size and paint.
    pub style: TextStyle,
    /// Rotation about `pos`, in degrees (negative is counter-clockwise on screen).
    pub angle: f64,
    /// Which horizontal point of the text sits at `pos.x`.
    pub anchor: TextAnchor,
    /// Which vertical line of the text sits at `pos.y`.
    pub baseline: TextBaseline,
    /// Paint order.
    pub z_index: i32,
}

impl TextMarkSpec {
    /// Start-anchored, vertically centered text in the default style, painted with the
    /// axis labels.
    pub fn new(id: MarkId, pos: impl Into<Point>, text: impl Into<String>) -> Self {
        Self {
            id,
            pos: pos.into(),
            text: text.into(),
            style: TextStyle::default(),
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            z_index: crate::z_order::AXIS_LABELS,
        }
    }

    /// Sets the size and paint.
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets how the text sits relative to `pos`.
    pub fn with_placement(mut self, anchor: TextAnchor, baseline: TextBaseline) -> Self {
        self.anchor = anchor;
        self.baseline = baseline;
        self
    }

    /// Rotates the text about `pos` (degrees).
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the paint order.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        Mark::builder(self.id)
            .text()
            .z_index(self.z_index)
            .x(self.pos.x)
            .y(self.pos.y)
            .label(self.text.clone())
            .font_size(self.style.font_size)
            .fill(self.style.fill.clone())
            .anchor(self.anchor)
            .baseline(self.baseline)
            .angle(self.angle)
            .build()
    }
}
