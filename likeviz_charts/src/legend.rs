// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation: a vertical list of color swatches with text labels.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use likeviz_core::{Mark, MarkId, TextAnchor, TextBaseline};
use peniko::{Brush, Color};

use crate::rect_mark::RectMarkSpec;
use crate::scale::ScaleOrdinal;
use crate::text_mark::{TextMarkSpec, TextStyle};
use crate::z_order;

/// A simple legend row item.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// The label string shown next to the swatch.
    pub label: String,
    /// The swatch fill paint.
    pub fill: Brush,
}

impl LegendItem {
    /// Convenience constructor for a solid-color swatch.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            fill: Brush::Solid(color),
        }
    }
}

/// A swatch legend, positioned when its marks are generated.
#[derive(Clone, Debug)]
pub struct LegendSwatchesSpec {
    /// Stable-id base; swatch `i` is `id_base + i`, its label `id_base + 1000 + i`.
    pub id_base: u64,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Label size and paint.
    pub label_style: TextStyle,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSwatchesSpec {
    /// Creates a legend with 15px swatches on a 20px pitch and 12px labels.
    pub fn new(id_base: u64, items: Vec<LegendItem>) -> Self {
        Self {
            id_base,
            swatch_size: 15.0,
            row_gap: 5.0,
            label_dx: 5.0,
            label_style: TextStyle::default(),
            items,
        }
    }

    /// One item per domain entry of an ordinal color scale, in domain order.
    pub fn from_ordinal(id_base: u64, scale: &ScaleOrdinal) -> Self {
        let items = scale
            .domain()
            .iter()
            .map(|key| LegendItem::solid(key.clone(), scale.color(key)))
            .collect();
        Self::new(id_base, items)
    }

    /// Set the label size and paint.
    pub fn with_label_style(mut self, style: TextStyle) -> Self {
        self.label_style = style;
        self
    }

    /// Set the swatch size.
    pub fn with_swatch_size(mut self, swatch_size: f64) -> Self {
        self.swatch_size = swatch_size;
        self
    }

    /// Generates swatch and label marks with the legend's top-left corner at `origin`.
    pub fn marks(&self, origin: Point) -> Vec<Mark> {
        let mut out = Vec::with_capacity(self.items.len() * 2);
        let row_height = self.swatch_size.max(self.label_style.font_size);

        for (i, item) in self.items.iter().enumerate() {
            let y = origin.y + i as f64 * (row_height + self.row_gap);
            let swatch_y = y + (row_height - self.swatch_size) * 0.5;

            out.push(
                RectMarkSpec::new(
                    MarkId::from_raw(self.id_base + i as u64),
                    Rect::new(
                        origin.x,
                        swatch_y,
                        origin.x + self.swatch_size,
                        swatch_y + self.swatch_size,
                    ),
                )
                .with_fill(item.fill.clone())
                .with_z_index(z_order::LEGEND_SWATCHES)
                .mark(),
            );

            out.push(
                TextMarkSpec::new(
                    MarkId::from_raw(self.id_base + 1000 + i as u64),
                    (
                        origin.x + self.swatch_size + self.label_dx,
                        y + row_height * 0.5,
                    ),
                    item.label.clone(),
                )
                .with_style(self.label_style.clone())
                .with_placement(TextAnchor::Start, TextBaseline::Middle)
                .with_z_index(z_order::LEGEND_LABELS)
                .mark(),
            );
        }
        out
    }
}
