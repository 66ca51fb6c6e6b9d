// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;
use likeviz_core::{MarkId, MarkKind, Scene};
use likeviz_transforms::{CoercedRecord, Record};

use crate::{
    BoxPlotSpec, ChartError, GroupedBarChartSpec, LineChartSpec, SERIES_FILL, SERIES_STROKE,
};

fn raw(header: &[&str], rows: &[&[&str]]) -> Vec<Record> {
    rows.iter()
        .map(|row| header.iter().copied().zip(row.iter().copied()).collect())
        .collect()
}

fn social_media() -> Vec<Record> {
    raw(
        &["Platform", "PostType", "AgeGroup", "Likes"],
        &[
            &["Instagram", "Image", "18-25", "961"],
            &["Facebook", "Link", "36-45", "72"],
            &["Twitter", "Video", "26-35", "318"],
            &["Instagram", "Video", "18-25", "503"],
            &["Facebook", "Image", "26-35", "229"],
            &["Twitter", "Link", "36-45", "143"],
            &["Instagram", "Link", "26-35", "610"],
            &["Facebook", "Video", "18-25", "455"],
            &["Twitter", "Image", "36-45", "822"],
        ],
    )
}

fn social_media_avg() -> Vec<Record> {
    raw(
        &["Platform", "PostType", "AvgLikes"],
        &[
            &["Instagram", "Image", "482.5"],
            &["Instagram", "Link", "301.0"],
            &["Instagram", "Video", "517.3"],
            &["Facebook", "Image", "236.0"],
            &["Facebook", "Link", "140.5"],
            &["Facebook", "Video", "372.8"],
            &["Twitter", "Image", "412.0"],
            &["Twitter", "Link", "88.2"],
            &["Twitter", "Video", "250.1"],
        ],
    )
}

fn social_media_time() -> Vec<Record> {
    raw(
        &["Date", "AvgLikes"],
        &[
            &["3/3/2024 (Sunday)", "402.1"],
            &["3/1/2024 (Friday)", "351.5"],
            &["3/2/2024 (Saturday)", "288.0"],
            &["3/5/2024 (Tuesday)", "470.9"],
            &["3/4/2024 (Monday)", "320.4"],
            &["3/7/2024 (Thursday)", "515.2"],
            &["3/6/2024 (Wednesday)", "298.7"],
        ],
    )
}

fn ids(scene: &Scene) -> Vec<MarkId> {
    scene.marks.iter().map(|m| m.id).collect()
}

fn assert_inside(r: Rect, outer: Rect) {
    let eps = 1e-9;
    assert!(r.x0 >= outer.x0 - eps && r.x1 <= outer.x1 + eps, "{r:?} outside {outer:?}");
    assert!(r.y0 >= outer.y0 - eps && r.y1 <= outer.y1 + eps, "{r:?} outside {outer:?}");
}

#[test]
fn box_plot_end_to_end() {
    let spec = BoxPlotSpec::default();
    let coerced = spec.coercion().apply(&social_media());
    assert!(coerced.warnings.is_empty());

    let scene = spec.scene(&coerced.records).expect("valid records");
    assert_eq!(scene.view, Rect::new(0.0, 0.0, 900.0, 420.0));

    let plot = spec.layout.arrange().plot;
    let boxes: Vec<_> = scene
        .marks
        .iter()
        .filter(|m| m.z_index == SERIES_FILL)
        .filter_map(|m| m.as_rect())
        .collect();
    assert_eq!(boxes.len(), 3);
    for b in boxes {
        assert_inside(b.rect, plot);
    }
}

#[test]
fn grouped_bars_end_to_end() {
    let spec = GroupedBarChartSpec::default();
    let coerced = spec.coercion().apply(&social_media_avg());
    let scene = spec.scene(&coerced.records).expect("valid records");

    let plot = spec.layout.arrange().plot;
    let bars: Vec<_> = scene
        .marks
        .iter()
        .filter(|m| m.z_index == SERIES_FILL)
        .filter_map(|m| m.as_rect())
        .collect();
    assert_eq!(bars.len(), 9);
    for b in &bars {
        assert_inside(b.rect, plot);
    }

    // 517.3 nices up to 550; the tallest bar is the Instagram video.
    let tallest = bars
        .iter()
        .max_by(|a, b| a.rect.height().total_cmp(&b.rect.height()))
        .expect("bars");
    assert!((tallest.rect.height() - plot.height() * 517.3 / 550.0).abs() < 1e-9);
}

#[test]
fn line_chart_end_to_end() {
    let spec = LineChartSpec::default();
    let coerced = spec.coercion().apply(&social_media_time());
    assert!(coerced.warnings.is_empty(), "{:?}", coerced.warnings);
    let scene = spec.scene(&coerced.records).expect("valid records");

    let lines: Vec<_> = scene
        .marks
        .iter()
        .filter(|m| m.z_index == SERIES_STROKE && m.kind == MarkKind::Path)
        .collect();
    assert_eq!(lines.len(), 1);

    let series = spec.series(&coerced.records).expect("valid records");
    let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
    assert_eq!(
        values,
        vec![351.5, 288.0, 402.1, 320.4, 470.9, 298.7, 515.2]
    );
}

#[test]
fn rebuilding_a_chart_yields_identical_scenes() {
    let spec = GroupedBarChartSpec::default().with_id_base(10_000_000);
    let coerced = spec.coercion().apply(&social_media_avg());
    let a = spec.scene(&coerced.records).expect("valid records");
    let b = spec.scene(&coerced.records).expect("valid records");
    assert_eq!(a, b);

    let mut unique = ids(&a);
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), a.len(), "mark ids collide");
    assert!(ids(&a).iter().all(|id| id.0 >= 10_000_000));
}

#[test]
fn axes_paint_above_series() {
    let spec = BoxPlotSpec::default();
    let coerced = spec.coercion().apply(&social_media());
    let scene = spec.scene(&coerced.records).expect("valid records");
    let order = scene.paint_order();
    let first_axis = order
        .iter()
        .position(|m| m.id.0 >= 100_000)
        .expect("axis marks");
    assert!(order[..first_axis].iter().all(|m| m.id.0 < 100_000));
}

#[test]
fn uncoerced_records_are_rejected() {
    let records: Vec<CoercedRecord> = likeviz_transforms::Coercion::new()
        .apply(&social_media())
        .records;
    let err = BoxPlotSpec::default().scene(&records).expect_err("Likes is text");
    assert_eq!(
        err,
        ChartError::MissingField {
            row: 0,
            field: String::from("Likes"),
        }
    );
}
