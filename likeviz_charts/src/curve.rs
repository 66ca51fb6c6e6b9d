// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path construction through a sequence of points.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Point};

/// How consecutive points of a line are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Curve {
    /// Straight segments.
    #[default]
    Linear,
    /// A natural cubic spline: passes through every point, with continuous first and second
    /// derivatives and zero second derivative at both ends.
    Natural,
}

impl Curve {
    /// Builds a path through `points`, in order.
    ///
    /// No points give an empty path and one point a bare `move_to`. Two points are always
    /// joined by a straight segment.
    pub fn path(self, points: &[Point]) -> BezPath {
        match self {
            Self::Linear => linear_path(points),
            Self::Natural => natural_path(points),
        }
    }
}

fn linear_path(points: &[Point]) -> BezPath {
    let mut p = BezPath::new();
    let mut iter = points.iter();
    if let Some(&first) = iter.next() {
        p.move_to(first);
        for &pt in iter {
            p.line_to(pt);
        }
    }
    p
}

fn natural_path(points: &[Point]) -> BezPath {
    if points.len() < 3 {
        return linear_path(points);
    }
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let (x1, x2) = control_points(&xs);
    let (y1, y2) = control_points(&ys);

    let mut p = BezPath::new();
    p.move_to(points[0]);
    for (i, &end) in points[1..].iter().enumerate() {
        p.curve_to(Point::new(x1[i], y1[i]), Point::new(x2[i], y2[i]), end);
    }
    p
}

/// Bezier control points for a natural spline through `k` (one coordinate).
///
/// Solves the tridiagonal system for the first control point of every segment with the
/// Thomas algorithm; the second control point follows from C1 continuity, and from the
/// zero-curvature condition on the last segment. Requires `k.len() >= 3`.
fn control_points(k: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = k.len() - 1;
    let mut a = alloc::vec![0.0; n];
    let mut b = alloc::vec![0.0; n];
    let mut r = alloc::vec![0.0; n];

    b[0] = 2.0;
    r[0] = k[0] + 2.0 * k[1];
    for i in 1..n - 1 {
        a[i] = 1.0;
        b[i] = 4.0;
        r[i] = 4.0 * k[i] + 2.0 * k[i + 1];
    }
    a[n - 1] = 2.0;
    b[n - 1] = 7.0;
    r[n - 1] = 8.0 * k[n - 1] + k[n];

    for i in 1..n {
        let m = a[i] / b[i - 1];
        b[i] -= m;
        r[i] -= m * r[i - 1];
    }

    let mut p1 = alloc::vec![0.0; n];
    p1[n - 1] = r[n - 1] / b[n - 1];
    for i in (0..n - 1).rev() {
        p1[i] = (r[i] - p1[i + 1]) / b[i];
    }

    let mut p2 = alloc::vec![0.0; n];
    p2[n - 1] = (k[n] + p1[n - 1]) / 2.0;
    for i in 0..n - 1 {
        p2[i] = 2.0 * k[i + 1] - p1[i + 1];
    }

    (p1, p2)
}
