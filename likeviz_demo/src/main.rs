// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders the social media engagement charts from CSV files.
//!
//! Each chart is an independent pipeline (load, coerce, build a scene, serialize). A failing
//! pipeline is logged and leaves an empty slot on the page; the others still render.

mod cli;
mod html;
mod load;
mod svg;

use std::fs;
use std::path::Path;

use anyhow::Context as _;
use clap::Parser;
use likeviz_charts::{BoxPlotSpec, ChartError, GroupedBarChartSpec, LineChartSpec};
use likeviz_core::Scene;
use likeviz_transforms::{CoercedRecord, Coercion};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::html::Section;

/// Log filter used when `RUST_LOG` is unset. Library coercion warnings stay visible.
const DEFAULT_FILTER: &str = "likeviz_demo=info,likeviz_transforms=warn,likeviz_charts=warn";

/// One chart pipeline: where its data lives and how to turn it into a scene.
struct Pipeline<'a> {
    id: &'static str,
    title: &'static str,
    file: &'static str,
    required: Vec<&'a str>,
    coercion: Coercion,
    build: Box<dyn Fn(&[CoercedRecord]) -> Result<Scene, ChartError> + 'a>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let box_plot = BoxPlotSpec::default();
    let bar_chart = GroupedBarChartSpec::default();
    let line_chart = LineChartSpec::default();

    let pipelines = [
        Pipeline {
            id: "boxplot",
            title: "Likes by Age Group",
            file: "socialMedia.csv",
            required: vec![box_plot.category.as_str(), box_plot.value.as_str()],
            coercion: box_plot.coercion(),
            build: Box::new(|records: &[CoercedRecord]| box_plot.scene(records)),
        },
        Pipeline {
            id: "barplot",
            title: "Average Likes by Platform and Post Type",
            file: "socialMediaAvg.csv",
            required: vec![
                bar_chart.group.as_str(),
                bar_chart.series.as_str(),
                bar_chart.value.as_str(),
            ],
            coercion: bar_chart.coercion(),
            build: Box::new(|records: &[CoercedRecord]| bar_chart.scene(records)),
        },
        Pipeline {
            id: "lineplot",
            title: "Average Likes over Time",
            file: "socialMediaTime.csv",
            required: vec![line_chart.time.as_str(), line_chart.value.as_str()],
            coercion: line_chart.coercion(),
            build: Box::new(|records: &[CoercedRecord]| line_chart.scene(records)),
        },
    ];

    let mut sections = Vec::with_capacity(pipelines.len());
    for pipeline in &pipelines {
        let svg = match run(&cli.data_dir, pipeline) {
            Ok(scene) => Some(svg::scene_to_svg(&scene)),
            Err(e) => {
                error!(chart = pipeline.id, "{e:#}");
                None
            }
        };
        sections.push(Section {
            id: pipeline.id,
            title: pipeline.title.to_string(),
            svg,
        });
    }

    if let Some(dir) = &cli.svg_dir {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        for section in &sections {
            if let Some(svg) = &section.svg {
                let path = dir.join(format!("{}.svg", section.id));
                fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), "wrote SVG");
            }
        }
    }

    let page = html::render_page("Social media engagement", &sections);
    fs::write(&cli.out, page).with_context(|| format!("writing {}", cli.out.display()))?;
    info!(path = %cli.out.display(), "wrote report");
    Ok(())
}

fn run(data_dir: &Path, pipeline: &Pipeline<'_>) -> anyhow::Result<Scene> {
    let records = load::load_csv(&data_dir.join(pipeline.file), &pipeline.required)?;
    let coerced = pipeline.coercion.apply(&records);
    if !coerced.warnings.is_empty() {
        warn!(
            chart = pipeline.id,
            count = coerced.warnings.len(),
            "some fields could not be coerced"
        );
    }
    let scene = (pipeline.build)(&coerced.records)
        .with_context(|| format!("building the {} chart", pipeline.id))?;
    info!(chart = pipeline.id, marks = scene.len(), "built chart");
    Ok(scene)
}
