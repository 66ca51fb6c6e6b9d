// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The HTML page that hosts the charts.

use crate::svg::escape_xml;

/// One chart slot on the page.
#[derive(Clone, Debug)]
pub(crate) struct Section {
    /// Element id of the mount point, e.g. `boxplot`.
    pub(crate) id: &'static str,
    pub(crate) title: String,
    /// Inline SVG, or `None` when the chart failed to build.
    pub(crate) svg: Option<String>,
}

/// Renders a page with one `<div id=...>` per section.
///
/// A section without SVG keeps its mount point and shows a short notice instead.
pub(crate) fn render_page(title: &str, sections: &[Section]) -> String {
    let title = escape_xml(title);
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{title}</title>\n"));
    out.push_str(
        "<style>\
         body { font-family: sans-serif; margin: 2em; }\
         section { margin-bottom: 2em; }\
         .missing { color: #a00; }\
         </style>\n",
    );
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{title}</h1>\n"));

    for section in sections {
        out.push_str(&format!("<section>\n<h2>{}</h2>\n", escape_xml(&section.title)));
        out.push_str(&format!("<div id=\"{}\">\n", section.id));
        match &section.svg {
            Some(svg) => out.push_str(svg),
            None => out.push_str("<p class=\"missing\">chart unavailable, see the log</p>\n"),
        }
        out.push_str("</div>\n</section>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<Section> {
        vec![
            Section {
                id: "boxplot",
                title: "Likes by Age Group".to_string(),
                svg: Some("<svg></svg>\n".to_string()),
            },
            Section {
                id: "barplot",
                title: "Platform & Post Type".to_string(),
                svg: None,
            },
        ]
    }

    #[test]
    fn every_section_gets_a_mount_point() {
        let html = render_page("Engagement", &sections());
        assert!(html.contains("<div id=\"boxplot\">\n<svg></svg>\n</div>"), "{html}");
        assert!(html.contains("<div id=\"barplot\">"), "{html}");
    }

    #[test]
    fn failed_charts_leave_a_notice() {
        let html = render_page("Engagement", &sections());
        assert!(html.contains("chart unavailable"), "{html}");
    }

    #[test]
    fn titles_are_escaped() {
        let html = render_page("A <b> report", &sections());
        assert!(html.contains("<title>A &lt;b&gt; report</title>"), "{html}");
        assert!(html.contains("<h2>Platform &amp; Post Type</h2>"), "{html}");
    }
}
