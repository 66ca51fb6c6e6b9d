// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box plot builder: one box per category, summarizing a numeric field.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Rect;
use likeviz_core::{MarkId, Scene};
use likeviz_transforms::{CoercedRecord, Coercion, GroupSummary, extent, summarize_by};
use peniko::color::palette::css;
use peniko::{Brush, Color};

use crate::axis::{AxisSpec, StrokeStyle};
use crate::error::{ChartError, number_field, text_field};
use crate::layout::{ChartLayoutSpec, Margin, Size, X_AXIS_IDS, Y_AXIS_IDS};
use crate::log::log_debug;
use crate::rect_mark::RectMarkSpec;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{ScaleBand, ScaleLinear, ScaleLinearSpec};
use crate::z_order;

/// Box plot of `value` grouped by `category`.
///
/// Each category gets a whisker from min to max, a box from the first to the third
/// quartile and a thicker median rule. Categories appear left to right in first-occurrence
/// order.
#[derive(Clone, Debug)]
pub struct BoxPlotSpec {
    /// Stable-id base for every generated mark.
    pub id_base: u64,
    /// Categorical field (text).
    pub category: String,
    /// Numeric field.
    pub value: String,
    /// View size and margins.
    pub layout: ChartLayoutSpec,
    /// Band padding (inner and outer) of the category scale.
    pub band_padding: f64,
    /// Fixed y domain, or `None` to use the niced data extent.
    pub y_domain: Option<(f64, f64)>,
    /// Box width as a fraction of the band width.
    pub box_width_ratio: f64,
    /// Box fill.
    pub box_fill: Brush,
    /// Whisker, box outline and median stroke.
    pub stroke: StrokeStyle,
    /// Median stroke width.
    pub median_stroke_width: f64,
    /// Bottom axis title.
    pub x_title: String,
    /// Left axis title.
    pub y_title: String,
}

impl Default for BoxPlotSpec {
    fn default() -> Self {
        Self::new("AgeGroup", "Likes")
    }
}

impl BoxPlotSpec {
    /// Creates a 900x420 box plot over a fixed `[0, 1000]` y domain.
    pub fn new(category: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id_base: 0,
            category: category.into(),
            value: value.into(),
            layout: ChartLayoutSpec::new(
                Size::new(900.0, 420.0),
                Margin::new(30.0, 180.0, 70.0, 70.0),
            ),
            band_padding: 0.2,
            y_domain: Some((0.0, 1000.0)),
            box_width_ratio: 0.6,
            box_fill: Brush::Solid(Color::from_rgba8(0x2b, 0x4e, 0x7b, 0xff)),
            stroke: StrokeStyle::solid(css::BLACK, 1.0),
            median_stroke_width: 2.0,
            x_title: "Age Group".into(),
            y_title: "Number of Likes".into(),
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

    /// Sets a fixed y domain, or `None` to fit the data.
    pub fn with_y_domain(mut self, y_domain: Option<(f64, f64)>) -> Self {
        self.y_domain = y_domain;
        self
    }

    /// Sets the category band padding.
    pub fn with_band_padding(mut self, padding: f64) -> Self {
        self.band_padding = padding;
        self
    }

    /// Sets the box fill.
    pub fn with_box_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.box_fill = fill.into();
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
        Coercion::new().number(self.value.as_str())
    }

    /// Five-number summaries per category, in first-occurrence order.
    pub fn summaries(
        &self,
        records: &[CoercedRecord],
    ) -> Result<Vec<(String, GroupSummary)>, ChartError> {
        let pairs = records
            .iter()
            .enumerate()
            .map(|(row, r)| {
                Ok((
                    text_field(r, row, &self.category)?,
                    number_field(r, row, &self.value)?,
                ))
            })
            .collect::<Result<Vec<(&str, f64)>, ChartError>>()?;
        let summaries = summarize_by(&pairs, |(k, _)| *k, |(_, v)| *v)?;
        Ok(summaries
            .into_iter()
            .map(|(k, s)| (k.to_string(), s))
            .collect())
    }

    /// Category and value scales for the given summaries and plot.
    pub fn scales(
        &self,
        summaries: &[(String, GroupSummary)],
        plot: Rect,
    ) -> (ScaleBand, ScaleLinear) {
        let x = ScaleBand::new(summaries.iter().map(|(k, _)| k.as_str()), (plot.x0, plot.x1))
            .with_padding(self.band_padding);
        let y = match self.y_domain {
            Some(domain) => ScaleLinear::new(domain, (plot.y1, plot.y0)),
            None => {
                let domain = extent(summaries.iter().flat_map(|(_, s)| [s.min, s.max]))
                    .unwrap_or((0.0, 1.0));
                ScaleLinearSpec::new(domain)
                    .with_nice(true)
                    .instantiate_resolved((plot.y1, plot.y0), 10)
            }
        };
        (x, y)
    }

    /// Builds the chart.
    pub fn scene(&self, records: &[CoercedRecord]) -> Result<Scene, ChartError> {
        let layout = self.layout.arrange();
        let plot = layout.plot;
        let summaries = self.summaries(records)?;
        let (x, y) = self.scales(&summaries, plot);

        let mut scene = Scene::new(layout.view);
        let box_width = x.band_width() * self.box_width_ratio;
        let median_stroke = StrokeStyle {
            stroke_width: self.median_stroke_width,
            ..self.stroke.clone()
        };

        for (i, (key, s)) in summaries.iter().enumerate() {
            let Some(cx) = x.center(key) else {
                continue;
            };
            let (left, right) = (cx - box_width * 0.5, cx + box_width * 0.5);

            scene.push(
                RuleMarkSpec::vertical(
                    MarkId::for_row(self.id_base, 3 * i),
                    cx,
                    y.map(s.min),
                    y.map(s.max),
                )
                .with_stroke(self.stroke.clone())
                .with_z_index(z_order::SERIES_FILL)
                .mark(),
            );
            scene.push(
                RectMarkSpec::new(
                    MarkId::for_row(self.id_base, 3 * i + 1),
                    Rect::new(left, y.map(s.q3), right, y.map(s.q1)),
                )
                .with_fill(self.box_fill.clone())
                .with_stroke(self.stroke.clone())
                .mark(),
            );
            scene.push(
                RuleMarkSpec::horizontal(
                    MarkId::for_row(self.id_base, 3 * i + 2),
                    y.map(s.median),
                    left,
                    right,
                )
                .with_stroke(median_stroke.clone())
                .mark(),
            );
        }

        scene.extend(
            AxisSpec::bottom(self.id_base + X_AXIS_IDS, x)
                .with_title(self.x_title.clone(), 30.0)
                .marks(plot),
        );
        scene.extend(
            AxisSpec::left(self.id_base + Y_AXIS_IDS, y)
                .with_title(self.y_title.clone(), 45.0)
                .marks(plot),
        );

        log_debug!(
            groups = summaries.len(),
            marks = scene.len(),
            "built box plot"
        );
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use likeviz_transforms::Record;

    use super::*;

    fn records(rows: &[(&str, &str)]) -> Vec<CoercedRecord> {
        let raw: Vec<Record> = rows
            .iter()
            .map(|&(a, l)| Record::new().with("AgeGroup", a).with("Likes", l))
            .collect();
        BoxPlotSpec::default().coercion().apply(&raw).records
    }

    #[test]
    fn one_box_per_group_in_first_occurrence_order() {
        let spec = BoxPlotSpec::default();
        let recs = records(&[
            ("26-35", "100"),
            ("18-25", "200"),
            ("26-35", "300"),
            ("18-25", "400"),
            ("36-45", "500"),
        ]);
        let summaries = spec.summaries(&recs).expect("valid records");
        let keys: Vec<&str> = summaries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["26-35", "18-25", "36-45"]);
        assert_eq!(summaries[0].1.median, 200.0);

        let scene = spec.scene(&recs).expect("valid records");
        let boxes = scene
            .marks
            .iter()
            .filter(|m| m.z_index == z_order::SERIES_FILL && m.as_rect().is_some())
            .count();
        assert_eq!(boxes, 3);
    }

    #[test]
    fn box_spans_the_quartiles_and_median_is_thicker() {
        let spec = BoxPlotSpec::default();
        let recs = records(&[("a", "0"), ("a", "400"), ("a", "1000")]);
        let scene = spec.scene(&recs).expect("valid records");

        // Plot is y in [30, 350]; the y scale maps [0, 1000] onto [350, 30].
        let body = scene
            .get(MarkId::from_raw(1))
            .and_then(|m| m.as_rect())
            .expect("box");
        assert!((body.rect.y0 - (350.0 - 0.32 * 700.0)).abs() < 1e-9, "{body:?}");
        assert!((body.rect.y1 - (350.0 - 0.32 * 200.0)).abs() < 1e-9, "{body:?}");
        assert_eq!(body.stroke_width, 1.0);

        let median = scene
            .get(MarkId::from_raw(2))
            .and_then(|m| m.as_path())
            .expect("median");
        assert_eq!(median.stroke_width, 2.0);
        let b = median.path.elements();
        assert_eq!(b.len(), 2);

        let whisker = scene
            .get(MarkId::from_raw(0))
            .and_then(|m| m.as_path())
            .expect("whisker");
        let wb = kurbo::Shape::bounding_box(&whisker.path);
        assert_eq!((wb.y0, wb.y1), (30.0, 350.0));
    }

    #[test]
    fn box_is_centered_in_its_band() {
        let spec = BoxPlotSpec::default();
        let recs = records(&[("a", "1"), ("b", "2")]);
        let plot = spec.layout.arrange().plot;
        let summaries = spec.summaries(&recs).expect("valid records");
        let (x, _) = spec.scales(&summaries, plot);
        let scene = spec.scene(&recs).expect("valid records");
        let body = scene
            .get(MarkId::from_raw(4))
            .and_then(|m| m.as_rect())
            .expect("second box");
        let center = x.center("b").expect("b is in the domain");
        assert!((body.rect.center().x - center).abs() < 1e-9);
        assert!((body.rect.width() - 0.6 * x.band_width()).abs() < 1e-9);
    }

    #[test]
    fn missing_category_field_is_an_error() {
        let raw = vec![Record::new().with("Likes", "5")];
        let recs = BoxPlotSpec::default().coercion().apply(&raw).records;
        let err = BoxPlotSpec::default().scene(&recs).expect_err("no AgeGroup");
        assert_eq!(
            err,
            ChartError::MissingField {
                row: 0,
                field: "AgeGroup".into(),
            }
        );
    }

    #[test]
    fn fitted_domain_is_niced() {
        let spec = BoxPlotSpec::default().with_y_domain(None);
        let recs = records(&[("a", "3"), ("a", "97")]);
        let plot = spec.layout.arrange().plot;
        let summaries = spec.summaries(&recs).expect("valid records");
        let (_, y) = spec.scales(&summaries, plot);
        assert_eq!(y.domain(), (0.0, 100.0));
    }

    #[test]
    fn no_records_gives_axes_only() {
        let scene = BoxPlotSpec::default().scene(&[]).expect("empty is fine");
        assert!(!scene.is_empty());
        assert!(scene.marks.iter().all(|m| m.id.0 >= X_AXIS_IDS));
    }
}
