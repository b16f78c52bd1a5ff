// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of a donut render pass.

use donut_geometry::{HighlightShape, SectorShape};
use donut_mod::{DonutState, Label, TextAnchor, TextMeasurer};
use kurbo::Rect;
use peniko::Color;

/// Renders `state` as a standalone SVG document.
///
/// Marked sectors get an outline ring; the drag rectangle, if any, is drawn on top.
pub(crate) fn render_svg(
    state: &DonutState,
    measurer: &dyn TextMeasurer,
    selection: Option<Rect>,
) -> String {
    let size = state.size();
    let styling = state.styling();
    let geometry = state.geometry();
    let mut out = String::new();

    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        r#"viewBox="0 0 {w} {h}" width="{w}" height="{h}" font-family="{}">"#,
        escape_xml(&styling.font_family),
        w = size.width,
        h = size.height,
    ));
    out.push('\n');

    out.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}""#,
        size.width, size.height
    ));
    write_paint_attr(&mut out, "fill", styling.background_color);
    out.push_str("/>\n");

    for sector in state.sectors() {
        let shape = SectorShape::new(geometry, &sector.arc);
        if shape.is_empty() {
            continue;
        }
        out.push_str(&format!(r#"<path d="{}""#, shape.path().to_svg()));
        write_paint_attr(&mut out, "fill", sector.color);
        out.push_str(&format!(
            r#"><title>{}</title></path>"#,
            escape_xml(&sector.category)
        ));
        out.push('\n');

        if sector.is_marked() {
            let highlight = HighlightShape::new(geometry, &sector.arc);
            out.push_str(&format!(
                r#"<path d="{}" fill="none" stroke-width="1""#,
                highlight.path().to_svg()
            ));
            write_paint_attr(&mut out, "stroke", styling.font_color);
            out.push_str("/>\n");
        }
    }

    for label in state.labels(measurer).iter().filter(|l| l.visible) {
        write_label(&mut out, label, styling.font_size);
    }

    let center = state.center_text();
    let c = geometry.center;
    if let Some(category) = &center.category {
        out.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="middle" dominant-baseline="middle""#,
            c.x,
            c.y - styling.font_size,
            styling.font_size
        ));
        write_paint_attr(&mut out, "fill", styling.font_color);
        out.push_str(&format!(">{}</text>\n", escape_xml(category)));
    }
    if let Some(value) = &center.value {
        let y = if center.category.is_some() {
            c.y + styling.font_size
        } else {
            c.y
        };
        out.push_str(&format!(
            r#"<text x="{}" y="{y}" font-size="{}" text-anchor="middle" dominant-baseline="middle""#,
            c.x,
            styling.font_size * 1.5
        ));
        write_paint_attr(&mut out, "fill", styling.font_color);
        out.push_str(&format!(">{}</text>\n", escape_xml(value)));
    }

    if let Some(r) = selection {
        out.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke-dasharray="4 2""#,
            r.x0,
            r.y0,
            r.width(),
            r.height()
        ));
        write_paint_attr(&mut out, "stroke", styling.font_color);
        out.push_str("/>\n");
    }

    out.push_str("</svg>\n");
    out
}

fn write_label(out: &mut String, label: &Label, font_size: f64) {
    let p = label.placement.position;
    out.push_str(&format!(
        r#"<text x="{}" y="{}" font-size="{font_size}" dominant-baseline="middle""#,
        p.x, p.y
    ));
    out.push_str(match label.placement.anchor {
        TextAnchor::Start => r#" text-anchor="start""#,
        TextAnchor::Middle => r#" text-anchor="middle""#,
        TextAnchor::End => r#" text-anchor="end""#,
    });
    write_paint_attr(out, "fill", label.color);
    out.push('>');
    out.push_str(&escape_xml(&label.text));
    out.push_str("</text>\n");
}

fn svg_paint(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (fill, opacity)
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let (value, opacity) = svg_paint(color);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn escape_xml(s: &str) -> String {
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
