// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump for `ringchart_demo`.

use kurbo::{BezPath, Cap, Rect, Shape, Size};
use peniko::Color;
use ringchart::{ArcDescriptor, ArcRenderer};

/// Collects painted arcs and serializes them as one SVG document.
#[derive(Debug)]
pub(crate) struct SvgScene {
    view_box: Rect,
    arcs: Vec<ArcDescriptor>,
}

impl SvgScene {
    pub(crate) fn new(size: Size) -> Self {
        Self {
            view_box: size.to_rect(),
            arcs: Vec::new(),
        }
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self.view_box;
        let mut out = String::new();

        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        ));
        out.push('\n');

        // Paint order is document order.
        for arc in &self.arcs {
            let path: BezPath = arc.to_arc().path_elements(0.1).collect();
            let d = path.to_svg();
            out.push_str(&format!(r#"<path d="{d}" fill="none""#));
            write_paint_attr(&mut out, "stroke", arc.color);
            out.push_str(&format!(
                r#" stroke-width="{}" stroke-linecap="{}""#,
                arc.stroke_width,
                svg_cap(arc.cap)
            ));
            out.push_str("/>\n");
        }

        out.push_str("</svg>\n");
        out
    }
}

impl ArcRenderer for SvgScene {
    fn draw_arc(&mut self, arc: &ArcDescriptor) {
        self.arcs.push(*arc);
    }
}

fn svg_cap(cap: Cap) -> &'static str {
    match cap {
        Cap::Butt => "butt",
        Cap::Square => "square",
        Cap::Round => "round",
    }
}

fn svg_paint(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (paint, opacity)
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let (value, opacity) = svg_paint(color);
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
