// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization of a [`Scene`].

use likeviz_core::{MarkPayload, Scene, TextAnchor, TextBaseline};
use peniko::Brush;

/// Serializes `scene` as a standalone `<svg>` element.
///
/// The view box is the scene's view; marks are written in paint order.
pub(crate) fn scene_to_svg(scene: &Scene) -> String {
    let view = scene.view;
    let mut out = String::new();

    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    let (w, h) = (view.width(), view.height());
    out.push_str(&format!(
        r#"viewBox="{} {} {w} {h}" width="{w}" height="{h}" font-family="sans-serif">"#,
        view.x0, view.y0
    ));
    out.push('\n');

    for mark in scene.paint_order() {
        match &mark.payload {
            MarkPayload::Rect(r) => {
                out.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    r.rect.x0,
                    r.rect.y0,
                    r.rect.width(),
                    r.rect.height(),
                ));
                write_paint_attr(&mut out, "fill", &r.fill);
                if r.stroke_width > 0.0 {
                    write_paint_attr(&mut out, "stroke", &r.stroke);
                    out.push_str(&format!(r#" stroke-width="{}""#, r.stroke_width));
                }
                out.push_str("/>\n");
            }
            MarkPayload::Text(t) => {
                let baseline = match t.baseline {
                    TextBaseline::Middle => "middle",
                    TextBaseline::Alphabetic => "alphabetic",
                    TextBaseline::Hanging => "hanging",
                    TextBaseline::Ideographic => "ideographic",
                };
                out.push_str(&format!(
                    r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{baseline}""#,
                    t.pos.x, t.pos.y, t.font_size
                ));
                if t.angle != 0.0 {
                    out.push_str(&format!(
                        r#" transform="rotate({} {} {})""#,
                        t.angle, t.pos.x, t.pos.y
                    ));
                }
                out.push_str(match t.anchor {
                    TextAnchor::Start => r#" text-anchor="start""#,
                    TextAnchor::Middle => r#" text-anchor="middle""#,
                    TextAnchor::End => r#" text-anchor="end""#,
                });
                write_paint_attr(&mut out, "fill", &t.fill);
                out.push('>');
                out.push_str(&escape_xml(&t.text));
                out.push_str("</text>\n");
            }
            MarkPayload::Path(p) => {
                out.push_str(&format!(r#"<path d="{}""#, p.path.to_svg()));
                write_paint_attr(&mut out, "fill", &p.fill);
                if p.stroke_width > 0.0 {
                    write_paint_attr(&mut out, "stroke", &p.stroke);
                    out.push_str(&format!(r#" stroke-width="{}""#, p.stroke_width));
                }
                out.push_str("/>\n");
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

/// SVG paint value and opacity for a brush. Only solid colors are supported.
fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            if rgba.a == 0 {
                return ("none".to_string(), None);
            }
            let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = (rgba.a != 255).then(|| f64::from(rgba.a) / 255.0);
            (value, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
