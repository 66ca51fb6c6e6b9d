// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use clap::Parser;

/// Render the social media engagement charts to an HTML page.
#[derive(Parser, Clone, Debug)]
#[command(name = "likeviz_demo", version)]
pub(crate) struct Cli {
    /// Directory holding `socialMedia.csv`, `socialMediaAvg.csv` and `socialMediaTime.csv`
    #[arg(long, default_value = "data")]
    pub(crate) data_dir: PathBuf,

    /// Output HTML file
    #[arg(long, default_value = "likeviz.html")]
    pub(crate) out: PathBuf,

    /// Also write one SVG file per chart into this directory
    #[arg(long)]
    pub(crate) svg_dir: Option<PathBuf>,
}
