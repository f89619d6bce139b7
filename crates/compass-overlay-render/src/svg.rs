//! Standalone SVG export of a rendered [`Frame`].

use std::f64::consts::PI;
use std::fmt::Write;

use nalgebra::Point2;

use crate::primitive::{Frame, LayerKind, Primitive, Rgba, Shape, Stroke};

const ARROW_HEAD: f64 = 10.0;

impl Frame {
    /// Serialize the frame as an SVG document, one `<g>` per layer.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt_num(self.viewport.width),
            h = fmt_num(self.viewport.height),
        );
        for layer in &self.layers {
            let _ = writeln!(out, r#"  <g id="{}">"#, layer_id(layer.kind));
            for p in &layer.primitives {
                write_primitive(&mut out, p);
            }
            let _ = writeln!(out, "  </g>");
        }
        out.push_str("</svg>\n");
        out
    }
}

fn layer_id(kind: LayerKind) -> &'static str {
    match kind {
        LayerKind::Background => "background",
        LayerKind::Heatmap => "heatmap",
        LayerKind::Grid => "grid",
        LayerKind::Markers => "markers",
        LayerKind::Compass => "compass",
    }
}

fn write_primitive(out: &mut String, p: &Primitive) {
    let _ = match p {
        Primitive::Line { from, to, stroke } => writeln!(
            out,
            r#"    <line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
            fmt_num(from.x),
            fmt_num(from.y),
            fmt_num(to.x),
            fmt_num(to.y),
            stroke_attrs(stroke),
        ),
        Primitive::Circle {
            center,
            radius,
            stroke,
        } => writeln!(
            out,
            r#"    <circle cx="{}" cy="{}" r="{}" fill="none" {}/>"#,
            fmt_num(center.x),
            fmt_num(center.y),
            fmt_num(*radius),
            stroke_attrs(stroke),
        ),
        Primitive::Fill { shape, color, .. } => write_fill(out, shape, color),
        Primitive::Arrow {
            tail, tip, stroke, ..
        } => {
            let d = tip - tail;
            let len = d.norm();
            let mut path = format!(
                "M {} {} L {} {}",
                fmt_num(tail.x),
                fmt_num(tail.y),
                fmt_num(tip.x),
                fmt_num(tip.y)
            );
            if len > 1e-9 {
                let u = d / len;
                let head = ARROW_HEAD.min(len * 0.5);
                for side in [-1.0, 1.0] {
                    // barbs at ±30° from the shaft
                    let (s, c) = (side * PI / 6.0).sin_cos();
                    let bx = -(c * u.x - s * u.y) * head;
                    let by = -(s * u.x + c * u.y) * head;
                    let _ = write!(
                        path,
                        " M {} {} L {} {}",
                        fmt_num(tip.x),
                        fmt_num(tip.y),
                        fmt_num(tip.x + bx),
                        fmt_num(tip.y + by)
                    );
                }
            }
            writeln!(
                out,
                r#"    <path d="{}" fill="none" {}/>"#,
                path,
                stroke_attrs(stroke)
            )
        }
        Primitive::Label {
            position,
            text,
            color,
            size,
        } => writeln!(
            out,
            r#"    <text x="{}" y="{}" font-size="{}" {}>{}</text>"#,
            fmt_num(position.x),
            fmt_num(position.y),
            fmt_num(*size),
            fill_attrs(color),
            escape(text),
        ),
        Primitive::Image {
            source,
            x,
            y,
            width,
            height,
        } => writeln!(
            out,
            r#"    <image href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none"/>"#,
            escape(source),
            fmt_num(*x),
            fmt_num(*y),
            fmt_num(*width),
            fmt_num(*height),
        ),
        Primitive::Placeholder { center, text } => writeln!(
            out,
            r##"    <text x="{}" y="{}" text-anchor="middle" fill="#888888">{}</text>"##,
            fmt_num(center.x),
            fmt_num(center.y),
            escape(text),
        ),
    };
}

fn write_fill(out: &mut String, shape: &Shape, color: &Rgba) -> std::fmt::Result {
    match shape {
        Shape::Polygon { points } => {
            let pts: Vec<String> = points
                .iter()
                .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
                .collect();
            writeln!(
                out,
                r#"    <polygon points="{}" {}/>"#,
                pts.join(" "),
                fill_attrs(color)
            )
        }
        Shape::Disc { center, radius } => writeln!(
            out,
            r#"    <circle cx="{}" cy="{}" r="{}" {}/>"#,
            fmt_num(center.x),
            fmt_num(center.y),
            fmt_num(*radius),
            fill_attrs(color)
        ),
        Shape::Wedge {
            center,
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
        } => {
            let large = if end_angle - start_angle > PI { 1 } else { 0 };
            let at = |r: f64, a: f64| Point2::new(center.x + r * a.cos(), center.y + r * a.sin());
            let o0 = at(*outer_radius, *start_angle);
            let o1 = at(*outer_radius, *end_angle);
            let i1 = at(*inner_radius, *end_angle);
            let i0 = at(*inner_radius, *start_angle);
            writeln!(
                out,
                r#"    <path d="M {} {} A {r} {r} 0 {large} 1 {} {} L {} {} A {ri} {ri} 0 {large} 0 {} {} Z" {}/>"#,
                fmt_num(o0.x),
                fmt_num(o0.y),
                fmt_num(o1.x),
                fmt_num(o1.y),
                fmt_num(i1.x),
                fmt_num(i1.y),
                fmt_num(i0.x),
                fmt_num(i0.y),
                fill_attrs(color),
                r = fmt_num(*outer_radius),
                ri = fmt_num(*inner_radius),
                large = large,
            )
        }
    }
}

fn stroke_attrs(s: &Stroke) -> String {
    format!(
        r#"stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
        hex(&s.color),
        fmt_num(s.color.a),
        fmt_num(s.width)
    )
}

fn fill_attrs(c: &Rgba) -> String {
    format!(r#"fill="{}" fill-opacity="{}""#, hex(c), fmt_num(c.a))
}

fn hex(c: &Rgba) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

/// Fixed precision keeps repeated exports byte-identical and diffable.
fn fmt_num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
