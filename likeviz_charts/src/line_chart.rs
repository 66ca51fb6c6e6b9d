// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-series line chart builder.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use likeviz_core::{MarkId, Scene};
use likeviz_transforms::{CoercedRecord, Coercion, extent, max};
use peniko::Color;

use crate::axis::{AxisSpec, StrokeStyle};
use crate::curve::Curve;
use crate::error::{ChartError, number_field, timestamp_field};
use crate::layout::{ChartLayoutSpec, Margin, Size, X_AXIS_IDS, Y_AXIS_IDS};
use crate::line_mark::LineMarkSpec;
use crate::log::{log_debug, log_warn};
use crate::scale::{ScaleLinear, ScaleLinearSpec, ScaleTime};

/// A single line of `value` over the date field `time`.
///
/// Points are drawn in ascending time order whatever the input order. Records with an
/// invalid date or a non-finite value are left out; when two records share a date the
/// first one wins.
#[derive(Clone, Debug)]
pub struct LineChartSpec {
    /// Stable-id base for every generated mark.
    pub id_base: u64,
    /// Date field.
    pub time: String,
    /// Numeric field.
    pub value: String,
    /// View size and margins.
    pub layout: ChartLayoutSpec,
    /// Interpolation between points.
    pub curve: Curve,
    /// Line stroke.
    pub stroke: StrokeStyle,
    /// Whether to round the y domain outward to tick values.
    pub nice: bool,
    /// Rotation of the date labels, in degrees.
    pub label_angle: f64,
    /// Bottom axis title.
    pub x_title: String,
    /// Left axis title.
    pub y_title: String,
}

impl Default for LineChartSpec {
    fn default() -> Self {
        Self::new("Date", "AvgLikes")
    }
}

impl LineChartSpec {
    /// Creates an 800x380 natural-curve line chart.
    pub fn new(time: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id_base: 0,
            time: time.into(),
            value: value.into(),
            layout: ChartLayoutSpec::new(
                Size::new(800.0, 380.0),
                Margin::new(20.0, 20.0, 50.0, 60.0),
            ),
            curve: Curve::Natural,
            stroke: StrokeStyle::solid(Color::from_rgba8(0x1f, 0x77, 0xb4, 0xff), 2.0),
            nice: true,
            label_angle: -35.0,
            x_title: "Date".into(),
            y_title: "Average Likes".into(),
        }
    }

    /// Sets the stable-id base.
    pub fn with_id_base(mut self, id_base: u64) -> Self {
        self.id_base = id_base;
        self
    }

    /// Sets the view size and margins.
    pub fn with_layout(mut self, layout: ChartLayoutSpec) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the interpolation.
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Sets the line stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the date label rotation.
    pub fn with_label_angle(mut self, angle: f64) -> Self {
        self.label_angle = angle;
        self
    }

    /// Sets both axis titles.
    pub fn with_titles(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_title = x.into();
        self.y_title = y.into();
        self
    }

    /// The coercion this chart expects its records to have gone through.
    pub fn coercion(&self) -> Coercion {
        Coercion::new()
            .date(self.time.as_str())
            .number(self.value.as_str())
    }

    /// `(seconds, value)` pairs in drawing order.
    pub fn series(&self, records: &[CoercedRecord]) -> Result<Vec<(f64, f64)>, ChartError> {
        let mut points = Vec::with_capacity(records.len());
        let mut dropped = 0_usize;
        for (row, r) in records.iter().enumerate() {
            let t = timestamp_field(r, row, &self.time)?;
            let v = number_field(r, row, &self.value)?;
            match t {
                Some(t) if v.is_finite() => points.push((t, v)),
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            log_warn!(dropped, "line chart left out records without a valid date and value");
        }

        // Stable, so equal timestamps keep input order and dedup keeps the first.
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points.dedup_by(|later, earlier| later.0 == earlier.0);
        Ok(points)
    }

    /// Time and value scales for `series` inside `plot`.
    pub fn scales(&self, series: &[(f64, f64)], plot: Rect) -> (ScaleTime, ScaleLinear) {
        let domain = extent(series.iter().map(|(t, _)| *t)).unwrap_or((0.0, 0.0));
        let x = ScaleTime::new(domain, (plot.x0, plot.x1));
        let top = max(series.iter().map(|(_, v)| *v)).unwrap_or(0.0);
        let y = ScaleLinearSpec::new((0.0, top))
            .with_nice(self.nice)
            .instantiate_resolved((plot.y1, plot.y0), 10);
        (x, y)
    }

    /// Builds the chart.
    pub fn scene(&self, records: &[CoercedRecord]) -> Result<Scene, ChartError> {
        let layout = self.layout.arrange();
        let plot = layout.plot;
        let series = self.series(records)?;
        let (x, y) = self.scales(&series, plot);

        let mut scene = Scene::new(layout.view);
        let points: Vec<Point> = series
            .iter()
            .map(|&(t, v)| Point::new(x.map(t), y.map(v)))
            .collect();
        scene.push(
            LineMarkSpec::new(MarkId::from_raw(self.id_base), points)
                .with_curve(self.curve)
                .with_stroke(self.stroke.clone())
                .mark(),
        );

        scene.extend(
            AxisSpec::bottom(self.id_base + X_AXIS_IDS, x)
                .with_tick_count(series.len())
                .with_label_angle(self.label_angle)
                .with_title(self.x_title.clone(), 40.0)
                .marks(plot),
        );
        scene.extend(
            AxisSpec::left(self.id_base + Y_AXIS_IDS, y)
                .with_title(self.y_title.clone(), 45.0)
                .marks(plot),
        );

        log_debug!(
            points = series.len(),
            marks = scene.len(),
            "built line chart"
        );
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::{ParamCurve, PathEl};
    use likeviz_transforms::Record;

    use super::*;

    fn records(rows: &[(&str, &str)]) -> Vec<CoercedRecord> {
        let raw: Vec<Record> = rows
            .iter()
            .map(|&(d, v)| Record::new().with("Date", d).with("AvgLikes", v))
            .collect();
        LineChartSpec::default().coercion().apply(&raw).records
    }

    #[test]
    fn points_are_drawn_in_date_order() {
        let recs = records(&[
            ("3/3/2024 (Sunday)", "10"),
            ("3/1/2024 (Friday)", "20"),
            ("3/2/2024 (Saturday)", "30"),
        ]);
        let series = LineChartSpec::default().series(&recs).expect("valid records");
        let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![20.0, 30.0, 10.0]);
        assert!(series.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn invalid_points_are_dropped_and_duplicates_keep_the_first() {
        let recs = records(&[
            ("3/1/2024 (Friday)", "5"),
            ("not a date", "7"),
            ("3/2/2024 (Saturday)", "n/a"),
            ("3/1/2024 (Friday)", "9"),
            ("3/4/2024 (Monday)", "11"),
        ]);
        let series = LineChartSpec::default().series(&recs).expect("valid records");
        let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![5.0, 11.0]);
    }

    #[test]
    fn line_passes_through_every_projected_point() {
        let spec = LineChartSpec::default();
        let recs = records(&[
            ("3/1/2024 (Friday)", "120"),
            ("3/2/2024 (Saturday)", "340"),
            ("3/3/2024 (Sunday)", "90"),
            ("3/4/2024 (Monday)", "210"),
        ]);
        let scene = spec.scene(&recs).expect("valid records");
        let series = spec.series(&recs).expect("valid records");
        let plot = spec.layout.arrange().plot;
        let (x, y) = spec.scales(&series, plot);

        let line = scene
            .get(MarkId::from_raw(0))
            .and_then(|m| m.as_path())
            .expect("line");
        assert_eq!(line.stroke_width, 2.0);
        assert!(matches!(line.path.elements()[1], PathEl::CurveTo(..)));

        let segs: Vec<_> = line.path.segments().collect();
        assert_eq!(segs.len(), 3);
        for (i, &(t, v)) in series.iter().enumerate() {
            let expected = Point::new(x.map(t), y.map(v));
            let got = if i == 0 {
                segs[0].eval(0.0)
            } else {
                segs[i - 1].eval(1.0)
            };
            assert!((got - expected).hypot() < 1e-9, "point {i}: {got:?} vs {expected:?}");
        }
        assert_eq!(x.map(series[0].0), plot.x0);
        assert_eq!(x.map(series[3].0), plot.x1);
        assert_eq!(y.domain(), (0.0, 350.0));
    }

    #[test]
    fn one_label_per_day() {
        let recs = records(&[
            ("3/1/2024 (Friday)", "1"),
            ("3/2/2024 (Saturday)", "2"),
            ("3/3/2024 (Sunday)", "3"),
            ("3/4/2024 (Monday)", "4"),
        ]);
        let scene = LineChartSpec::default().scene(&recs).expect("valid records");
        let labels: Vec<&str> = scene
            .marks
            .iter()
            .filter(|m| m.id.0 >= X_AXIS_IDS + 1000 && m.id.0 < X_AXIS_IDS + 9000)
            .filter_map(|m| m.as_text().map(|t| t.text.as_str()))
            .collect();
        assert_eq!(labels, vec!["Fri 01", "Sat 02", "Sun 03", "Mon 04"]);
    }

    #[test]
    fn a_single_point_is_a_bare_move() {
        let recs = records(&[("3/1/2024 (Friday)", "1")]);
        let scene = LineChartSpec::default().scene(&recs).expect("valid records");
        let line = scene
            .get(MarkId::from_raw(0))
            .and_then(|m| m.as_path())
            .expect("line");
        assert_eq!(line.path.elements().len(), 1);
    }

    #[test]
    fn uncoerced_date_field_is_an_error() {
        let raw = vec![Record::new().with("Date", "3/1/2024 (Friday)").with("AvgLikes", "1")];
        let recs = Coercion::new().number("AvgLikes").apply(&raw).records;
        let err = LineChartSpec::default().series(&recs).expect_err("Date is text");
        assert!(matches!(err, ChartError::MissingField { row: 0, .. }));
    }
}
