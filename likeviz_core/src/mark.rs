// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark types and a small builder.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::color::palette::css;
use peniko::{Brush, Color};

/// Stable identity for a mark.
///
/// Chart code derives ids from an `id_base` plus a fixed offset, so re-running a pipeline
/// on the same data yields the same ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Id for the `row`-th mark generated from `id_base`.
    pub const fn for_row(id_base: u64, row: usize) -> Self {
        Self(id_base + row as u64)
    }
}

/// The primitive kind of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// Axis-aligned rectangle.
    Rect,
    /// Bezier path (lines, rules, curves).
    Path,
    /// Unshaped single-line text.
    Text,
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// `pos.x` is the start of the text.
    #[default]
    Start,
    /// `pos.x` is the center of the text.
    Middle,
    /// `pos.x` is the end of the text.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// `pos.y` is the vertical middle of the text.
    #[default]
    Middle,
    /// `pos.y` is the alphabetic baseline.
    Alphabetic,
    /// `pos.y` is the top (hanging) baseline.
    Hanging,
    /// `pos.y` is the ideographic (bottom) baseline.
    Ideographic,
}

/// Rectangle payload.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Outline paint.
    pub stroke: Brush,
    /// Outline width; `0` means no outline.
    pub stroke_width: f64,
}

/// Path payload.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// Geometry in scene coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` means no stroke.
    pub stroke_width: f64,
}

/// Text payload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Rotation around `pos`, in degrees.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// The resolved geometry and paint of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A rectangle.
    Rect(RectPayload),
    /// A path.
    Path(PathPayload),
    /// A text run.
    Text(TextPayload),
}

impl MarkPayload {
    /// Returns the geometric bounds, when they are known without text metrics.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Path(p) => {
                if p.path.elements().is_empty() {
                    None
                } else {
                    Some(p.path.bounding_box())
                }
            }
            Self::Text(_) => None,
        }
    }
}

/// A single drawing primitive in a [`crate::Scene`].
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Primitive kind (matches `payload`).
    pub kind: MarkKind,
    /// Paint order; lower values paint first.
    pub z_index: i32,
    /// Geometry and paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// Starts building a mark with the given id. The kind defaults to [`MarkKind::Rect`].
    pub fn builder(id: MarkId) -> MarkBuilder {
        MarkBuilder::new(id)
    }

    /// Returns the rectangle payload, if this is a rect mark.
    pub fn as_rect(&self) -> Option<&RectPayload> {
        match &self.payload {
            MarkPayload::Rect(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the path payload, if this is a path mark.
    pub fn as_path(&self) -> Option<&PathPayload> {
        match &self.payload {
            MarkPayload::Path(p) => Some(p),
            _ => None,
        }
    }

    /// Returns the text payload, if this is a text mark.
    pub fn as_text(&self) -> Option<&TextPayload> {
        match &self.payload {
            MarkPayload::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Builder for [`Mark`].
///
/// Fields that do not apply to the selected kind are ignored by [`MarkBuilder::build`].
#[derive(Clone, Debug)]
pub struct MarkBuilder {
    id: MarkId,
    kind: MarkKind,
    z_index: i32,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    geometry: BezPath,
    label: String,
    font_size: f64,
    angle: f64,
    anchor: TextAnchor,
    baseline: TextBaseline,
    fill: Option<Brush>,
    stroke: Brush,
    stroke_width: f64,
}

impl MarkBuilder {
    fn new(id: MarkId) -> Self {
        Self {
            id,
            kind: MarkKind::Rect,
            z_index: 0,
            x: 0.0,
            y: 0.0,
            w: 0.0,
            h: 0.0,
            geometry: BezPath::new(),
            label: String::new(),
            font_size: 12.0,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            fill: None,
            stroke: Brush::Solid(Color::TRANSPARENT),
            stroke_width: 0.0,
        }
    }

    /// Selects a rectangle mark.
    pub fn rect(mut self) -> Self {
        self.kind = MarkKind::Rect;
        self
    }

    /// Selects a path mark.
    pub fn path(mut self) -> Self {
        self.kind = MarkKind::Path;
        self
    }

    /// Selects a text mark.
    pub fn text(mut self) -> Self {
        self.kind = MarkKind::Text;
        self
    }

    /// Sets the paint order.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the x position (rect origin or text anchor).
    pub fn x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Sets the y position (rect origin or text anchor).
    pub fn y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Sets the rect width.
    pub fn w(mut self, w: f64) -> Self {
        self.w = w;
        self
    }

    /// Sets the rect height.
    pub fn h(mut self, h: f64) -> Self {
        self.h = h;
        self
    }

    /// Sets rect geometry from a [`Rect`].
    pub fn bounds(self, rect: Rect) -> Self {
        self.x(rect.x0).y(rect.y0).w(rect.width()).h(rect.height())
    }

    /// Sets the path geometry.
    pub fn geometry(mut self, path: BezPath) -> Self {
        self.geometry = path;
        self
    }

    /// Sets the text content.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the font size.
    pub fn font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the text rotation in degrees.
    pub fn angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the text anchor.
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the text baseline.
    pub fn baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the fill paint.
    pub fn fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Sets the stroke paint and width.
    pub fn stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = stroke_width;
        self
    }

    /// Finishes the mark.
    ///
    /// Without an explicit fill, rects and text are black and paths are unfilled.
    pub fn build(self) -> Mark {
        let payload = match self.kind {
            MarkKind::Rect => MarkPayload::Rect(RectPayload {
                rect: Rect::new(self.x, self.y, self.x + self.w, self.y + self.h),
                fill: self.fill.unwrap_or(Brush::Solid(css::BLACK)),
                stroke: self.stroke,
                stroke_width: self.stroke_width,
            }),
            MarkKind::Path => MarkPayload::Path(PathPayload {
                path: self.geometry,
                fill: self.fill.unwrap_or(Brush::Solid(Color::TRANSPARENT)),
                stroke: self.stroke,
                stroke_width: self.stroke_width,
            }),
            MarkKind::Text => MarkPayload::Text(TextPayload {
                pos: Point::new(self.x, self.y),
                text: self.label,
                font_size: self.font_size,
                angle: self.angle,
                anchor: self.anchor,
                baseline: self.baseline,
                fill: self.fill.unwrap_or(Brush::Solid(css::BLACK)),
            }),
        };
        Mark {
            id: self.id,
            kind: self.kind,
            z_index: self.z_index,
            payload,
        }
    }
}
