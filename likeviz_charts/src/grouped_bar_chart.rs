// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped bar chart builder: one cluster per group, one colored bar per series.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use likeviz_core::{MarkId, Scene};
use likeviz_transforms::{CoercedRecord, Coercion, distinct, max};
use peniko::Color;

use crate::axis::AxisSpec;
use crate::error::{ChartError, number_field, text_field};
use crate::layout::{ChartLayoutSpec, LEGEND_IDS, Margin, Size, X_AXIS_IDS, Y_AXIS_IDS};
use crate::legend::LegendSwatchesSpec;
use crate::log::log_debug;
use crate::rect_mark::RectMarkSpec;
use crate::scale::{CATEGORY10, ScaleBand, ScaleLinear, ScaleLinearSpec, ScaleOrdinal};

/// Default series colors: the first three of [`CATEGORY10`]. A fourth series reuses the first.
pub const SERIES_PALETTE: [Color; 3] = [CATEGORY10[0], CATEGORY10[1], CATEGORY10[2]];

/// Scales resolved for one grouped bar chart.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupedBarScales {
    /// Outer band scale over groups, spanning the plot width.
    pub group: ScaleBand,
    /// Inner band scale over series, spanning one group band.
    pub series: ScaleBand,
    /// Value scale, `[0, max]` (niced) onto the plot height.
    pub y: ScaleLinear,
    /// Series colors.
    pub color: ScaleOrdinal,
}

/// Grouped bar chart of `value`, clustered by `group` and colored by `series`.
///
/// Every record becomes one bar. Groups and series keep first-occurrence order.
#[derive(Clone, Debug)]
pub struct GroupedBarChartSpec {
    /// Stable-id base for every generated mark.
    pub id_base: u64,
    /// Outer categorical field (text).
    pub group: String,
    /// Inner categorical field (text).
    pub series: String,
    /// Numeric field.
    pub value: String,
    /// View size and margins.
    pub layout: ChartLayoutSpec,
    /// Inner padding between group bands.
    pub group_padding: f64,
    /// Inner and outer padding of the series bands within a group.
    pub series_padding: f64,
    /// Series palette, cycled in series order. Defaults to [`SERIES_PALETTE`].
    pub palette: Vec<Color>,
    /// Whether to round the y domain outward to tick values.
    pub nice: bool,
    /// Distance from the plot's right edge to the legend, or `None` for no legend.
    pub legend_offset: Option<f64>,
    /// Bottom axis title.
    pub x_title: String,
    /// Left axis title.
    pub y_title: String,
}

impl Default for GroupedBarChartSpec {
    fn default() -> Self {
        Self::new("Platform", "PostType", "AvgLikes")
    }
}

impl GroupedBarChartSpec {
    /// Creates a 900x420 grouped bar chart with a legend right of the plot.
    pub fn new(
        group: impl Into<String>,
        series: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id_base: 0,
            group: group.into(),
            series: series.into(),
            value: value.into(),
            layout: ChartLayoutSpec::new(
                Size::new(900.0, 420.0),
                Margin::new(20.0, 180.0, 60.0, 60.0),
            ),
            group_padding: 0.2,
            series_padding: 0.15,
            palette: SERIES_PALETTE.to_vec(),
            nice: true,
            legend_offset: Some(20.0),
            x_title: "Platform".into(),
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

    /// Sets the series palette.
    pub fn with_palette(mut self, palette: impl IntoIterator<Item = Color>) -> Self {
        self.palette = palette.into_iter().collect();
        self
    }

    /// Enables or disables nice-domain behavior for the y scale.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Places the legend `offset` right of the plot, or hides it with `None`.
    pub fn with_legend_offset(mut self, offset: Option<f64>) -> Self {
        self.legend_offset = offset;
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

    /// Resolves the scales for `records` inside `plot`.
    pub fn scales(
        &self,
        records: &[CoercedRecord],
        plot: Rect,
    ) -> Result<GroupedBarScales, ChartError> {
        let rows = self.rows(records)?;
        Ok(self.scales_for_rows(&rows, plot))
    }

    /// Builds the chart.
    pub fn scene(&self, records: &[CoercedRecord]) -> Result<Scene, ChartError> {
        let layout = self.layout.arrange();
        let plot = layout.plot;
        let rows = self.rows(records)?;
        let scales = self.scales_for_rows(&rows, plot);
        let GroupedBarScales {
            group,
            series,
            y,
            color,
        } = &scales;

        let mut scene = Scene::new(layout.view);
        let baseline = y.map(0.0);
        let bar_width = series.band_width();

        for (row, &(g, s, v)) in rows.iter().enumerate() {
            let (Some(gx), Some(sx)) = (group.band(g), series.band(s)) else {
                continue;
            };
            if !v.is_finite() {
                continue;
            }
            let x0 = gx + sx;
            let top = y.map(v);
            scene.push(
                RectMarkSpec::new(
                    MarkId::for_row(self.id_base, row),
                    Rect::new(x0, top.min(baseline), x0 + bar_width, top.max(baseline)),
                )
                .with_fill(color.brush(s))
                .mark(),
            );
        }

        scene.extend(
            AxisSpec::bottom(self.id_base + X_AXIS_IDS, group.clone())
                .with_title(self.x_title.clone(), 40.0)
                .marks(plot),
        );
        scene.extend(
            AxisSpec::left(self.id_base + Y_AXIS_IDS, *y)
                .with_title(self.y_title.clone(), 45.0)
                .marks(plot),
        );
        if let Some(offset) = self.legend_offset {
            scene.extend(
                LegendSwatchesSpec::from_ordinal(self.id_base + LEGEND_IDS, color)
                    .marks(layout.right_of_plot(offset)),
            );
        }

        log_debug!(
            records = rows.len(),
            marks = scene.len(),
            "built grouped bar chart"
        );
        Ok(scene)
    }

    fn rows<'a>(
        &self,
        records: &'a [CoercedRecord],
    ) -> Result<Vec<(&'a str, &'a str, f64)>, ChartError> {
        records
            .iter()
            .enumerate()
            .map(|(row, r)| {
                Ok((
                    text_field(r, row, &self.group)?,
                    text_field(r, row, &self.series)?,
                    number_field(r, row, &self.value)?,
                ))
            })
            .collect()
    }

    fn scales_for_rows(&self, rows: &[(&str, &str, f64)], plot: Rect) -> GroupedBarScales {
        let groups = distinct(rows, |(g, _, _)| *g);
        let series_keys = distinct(rows, |(_, s, _)| *s);

        let group =
            ScaleBand::new(groups, (plot.x0, plot.x1)).with_padding_inner(self.group_padding);
        let series = ScaleBand::new(series_keys.iter().copied(), (0.0, group.band_width()))
            .with_padding(self.series_padding);
        let top = max(rows.iter().map(|(_, _, v)| *v)).unwrap_or(0.0);
        let y = ScaleLinearSpec::new((0.0, top))
            .with_nice(self.nice)
            .instantiate_resolved((plot.y1, plot.y0), 10);
        let color = ScaleOrdinal::new(series_keys, self.palette.iter().copied());

        GroupedBarScales {
            group,
            series,
            y,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use likeviz_transforms::Record;
    use peniko::Brush;

    use super::*;
    use crate::z_order;

    fn records(rows: &[(&str, &str, &str)]) -> Vec<CoercedRecord> {
        let raw: Vec<Record> = rows
            .iter()
            .map(|&(p, t, v)| {
                Record::new()
                    .with("Platform", p)
                    .with("PostType", t)
                    .with("AvgLikes", v)
            })
            .collect();
        GroupedBarChartSpec::default().coercion().apply(&raw).records
    }

    fn sample() -> Vec<CoercedRecord> {
        records(&[
            ("Facebook", "Image", "120"),
            ("Facebook", "Video", "437"),
            ("Facebook", "Link", "80"),
            ("Instagram", "Image", "300"),
            ("Instagram", "Video", "210"),
            ("Instagram", "Link", "45"),
        ])
    }

    #[test]
    fn y_domain_is_zero_to_niced_max() {
        let spec = GroupedBarChartSpec::default();
        let plot = spec.layout.arrange().plot;
        let scales = spec.scales(&sample(), plot).expect("valid records");
        assert_eq!(scales.y.domain(), (0.0, 450.0));
        assert_eq!(scales.group.domain(), &["Facebook", "Instagram"]);
        assert_eq!(scales.series.domain(), &["Image", "Video", "Link"]);
    }

    #[test]
    fn bars_nest_inside_their_group_band() {
        let spec = GroupedBarChartSpec::default();
        let recs = sample();
        let plot = spec.layout.arrange().plot;
        let scales = spec.scales(&recs, plot).expect("valid records");
        let scene = spec.scene(&recs).expect("valid records");

        for (row, group) in [(0, "Facebook"), (2, "Facebook"), (4, "Instagram")] {
            let bar = scene
                .get(MarkId::from_raw(row))
                .and_then(|m| m.as_rect())
                .expect("bar");
            let g0 = scales.group.band(group).expect("known group");
            let g1 = g0 + scales.group.band_width();
            assert!(bar.rect.x0 >= g0 - 1e-9 && bar.rect.x1 <= g1 + 1e-9, "{bar:?}");
            assert!((bar.rect.y1 - plot.y1).abs() < 1e-9, "bars stand on the baseline");
        }
    }

    #[test]
    fn bar_height_and_color_follow_value_and_series() {
        let spec = GroupedBarChartSpec::default();
        let scene = spec.scene(&sample()).expect("valid records");
        let plot = spec.layout.arrange().plot;
        let video = scene
            .get(MarkId::from_raw(1))
            .and_then(|m| m.as_rect())
            .expect("bar");
        let expected = plot.height() * 437.0 / 450.0;
        assert!((video.rect.height() - expected).abs() < 1e-9);
        assert_eq!(video.fill, Brush::Solid(SERIES_PALETTE[1]));
    }

    #[test]
    fn legend_lists_series_right_of_the_plot() {
        let spec = GroupedBarChartSpec::default();
        let scene = spec.scene(&sample()).expect("valid records");
        let labels: Vec<&str> = scene
            .marks
            .iter()
            .filter(|m| m.z_index == z_order::LEGEND_LABELS)
            .filter_map(|m| m.as_text().map(|t| t.text.as_str()))
            .collect();
        assert_eq!(labels, vec!["Image", "Video", "Link"]);

        let swatch = scene
            .get(MarkId::from_raw(LEGEND_IDS))
            .and_then(|m| m.as_rect())
            .expect("swatch");
        assert_eq!(swatch.rect.x0, 720.0 + 20.0);

        let hidden = spec.with_legend_offset(None).scene(&sample()).expect("valid");
        assert!(hidden.get(MarkId::from_raw(LEGEND_IDS)).is_none());
    }

    #[test]
    fn non_numeric_values_are_skipped() {
        let recs = records(&[("A", "x", "10"), ("A", "y", "oops")]);
        let scene = GroupedBarChartSpec::default().scene(&recs).expect("valid");
        assert!(scene.get(MarkId::from_raw(0)).is_some());
        assert!(scene.get(MarkId::from_raw(1)).is_none());
    }

    #[test]
    fn fourth_series_cycles_back_to_the_first_color() {
        let recs = records(&[
            ("Facebook", "Image", "10"),
            ("Facebook", "Video", "20"),
            ("Facebook", "Link", "30"),
            ("Facebook", "Story", "40"),
        ]);
        let scene = GroupedBarChartSpec::default().scene(&recs).expect("valid records");
        let fills: Vec<Brush> = (0..4)
            .map(|row| {
                scene
                    .get(MarkId::from_raw(row))
                    .and_then(|m| m.as_rect())
                    .expect("bar")
                    .fill
                    .clone()
            })
            .collect();
        let blue = Brush::Solid(Color::from_rgba8(0x1f, 0x77, 0xb4, 0xff));
        assert_eq!(fills[0], blue);
        assert_eq!(fills[1], Brush::Solid(Color::from_rgba8(0xff, 0x7f, 0x0e, 0xff)));
        assert_eq!(fills[2], Brush::Solid(Color::from_rgba8(0x2c, 0xa0, 0x2c, 0xff)));
        assert_eq!(fills[3], blue);
    }
}
