// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule mark generation.
//!
//! A rule is a straight stroked segment: whiskers, medians, axis domains and ticks.

use kurbo::{BezPath, Point};
use likeviz_core::{Mark, MarkId};
use peniko::Color;

use crate::axis::StrokeStyle;
use crate::z_order;

/// A stroked line segment.
#[derive(Clone, Debug)]
pub struct RuleMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Start point in scene coordinates.
    pub from: Point,
    /// End point in scene coordinates.
    pub to: Point,
    /// Stroke style.
    pub stroke: StrokeStyle,
    /// Rendering order hint.
    pub z_index: i32,
}

impl RuleMarkSpec {
    /// Creates a new rule between two points.
    pub fn new(id: MarkId, from: impl Into<Point>, to: impl Into<Point>) -> Self {
        Self {
            id,
            from: from.into(),
            to: to.into(),
            stroke: StrokeStyle::default(),
            z_index: z_order::SERIES_STROKE,
        }
    }

    /// Creates a horizontal rule.
    pub fn horizontal(id: MarkId, y: f64, x0: f64, x1: f64) -> Self {
        Self::new(id, (x0, y), (x1, y))
    }

    /// Creates a vertical rule.
    pub fn vertical(id: MarkId, x: f64, y0: f64, y1: f64) -> Self {
        Self::new(id, (x, y0), (x, y1))
    }

    /// Sets the stroke style.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the rule mark.
    pub fn mark(&self) -> Mark {
        let mut p = BezPath::new();
        p.move_to(self.from);
        p.line_to(self.to);
        Mark::builder(self.id)
            .path()
            .geometry(p)
            .z_index(self.z_index)
            .fill(Color::TRANSPARENT)
            .stroke(self.stroke.brush.clone(), self.stroke.stroke_width)
            .build()
    }
}
