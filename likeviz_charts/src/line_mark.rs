// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line mark generation.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Point;
use likeviz_core::{Mark, MarkId};
use peniko::Color;

use crate::axis::StrokeStyle;
use crate::curve::Curve;

/// An unfilled path through points already in scene coordinates.
///
/// This generates a single [`likeviz_core::MarkKind::Path`] mark.
#[derive(Clone, Debug)]
pub struct LineMarkSpec {
    /// Stable id for the mark emitted by this spec.
    pub id: MarkId,
    /// Points in drawing order.
    pub points: Vec<Point>,
    /// Interpolation between points.
    pub curve: Curve,
    /// Stroke style for the line.
    pub stroke: StrokeStyle,
    /// Rendering order hint.
    pub z_index: i32,
}

impl LineMarkSpec {
    /// Creates a straight-segment line with a black stroke at width 1.
    pub fn new(id: MarkId, points: Vec<Point>) -> Self {
        Self {
            id,
            points,
            curve: Curve::Linear,
            stroke: StrokeStyle::default(),
            z_index: crate::z_order::SERIES_STROKE,
        }
    }

    /// Sets the interpolation.
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
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

    /// Generates the line mark.
    pub fn mark(&self) -> Mark {
        Mark::builder(self.id)
            .path()
            .z_index(self.z_index)
            .geometry(self.curve.path(&self.points))
            .fill(Color::TRANSPARENT)
            .stroke(self.stroke.brush.clone(), self.stroke.stroke_width)
            .build()
    }
}
