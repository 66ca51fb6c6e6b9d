// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-margin chart layout.
//!
//! The view is the full drawing surface; the plot is the view inset by the margins. Axes
//! and legends are drawn in the margins.

use kurbo::{Point, Rect};

/// Id offset (from a chart's `id_base`) of the bottom axis marks.
pub(crate) const X_AXIS_IDS: u64 = 100_000;
/// Id offset of the left axis marks.
pub(crate) const Y_AXIS_IDS: u64 = 200_000;
/// Id offset of the legend marks.
pub(crate) const LEGEND_IDS: u64 = 300_000;

/// A width/height pair in scene coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in scene coordinates.
    pub width: f64,
    /// Height in scene coordinates.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Space reserved around the plot area.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    /// Space above the plot.
    pub top: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space below the plot.
    pub bottom: f64,
    /// Space left of the plot.
    pub left: f64,
}

impl Margin {
    /// Creates margins in CSS order: top, right, bottom, left.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// A view size plus margins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayoutSpec {
    /// Overall view size.
    pub view_size: Size,
    /// Margins around the plot.
    pub margin: Margin,
}

impl ChartLayoutSpec {
    /// Creates a layout spec.
    pub const fn new(view_size: Size, margin: Margin) -> Self {
        Self { view_size, margin }
    }

    /// Computes the view and plot rectangles.
    ///
    /// Margins larger than the view collapse the plot to zero size rather than inverting it.
    pub fn arrange(&self) -> ChartLayout {
        let view = Rect::new(0.0, 0.0, self.view_size.width, self.view_size.height);
        let m = self.margin;
        let x0 = view.x0 + m.left;
        let y0 = view.y0 + m.top;
        let plot = Rect::new(
            x0,
            y0,
            (view.x1 - m.right).max(x0),
            (view.y1 - m.bottom).max(y0),
        );
        ChartLayout { view, plot }
    }
}

/// Resolved chart rectangles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Full view rectangle, origin at `(0, 0)`.
    pub view: Rect,
    /// Plot rectangle inside the margins.
    pub plot: Rect,
}

impl ChartLayout {
    /// A point `offset` to the right of the plot's top-right corner.
    pub fn right_of_plot(&self, offset: f64) -> Point {
        Point::new(self.plot.x1 + offset, self.plot.y0)
    }
}
