use std::f64::consts::PI;
use std::fmt::Write as _;

use benchtop_core::render::{Surface, TextAlign, TextBaseline};

fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Split a canvas font string such as `"14px Arial"` into size and family.
fn parse_font(font: &str) -> (f64, String) {
    let mut parts = font.split_whitespace();
    let size = parts
        .next()
        .and_then(|s| s.trim_end_matches("px").parse::<f64>().ok())
        .unwrap_or(10.0);
    let family = parts.collect::<Vec<_>>().join(" ");
    let family = if family.is_empty() { "sans-serif".to_string() } else { family };
    (size, family)
}

/// Surface that writes an SVG document.
#[derive(Clone, Debug)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
    path: String,
    fill: String,
    stroke: String,
    line_width: f64,
    dash: Vec<f64>,
    alpha: f64,
    font: String,
    align: TextAlign,
    baseline: TextBaseline,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        SvgSurface {
            width,
            height,
            body: String::new(),
            path: String::new(),
            fill: "#000".to_string(),
            stroke: "#000".to_string(),
            line_width: 1.0,
            dash: Vec::new(),
            alpha: 1.0,
            font: "10px sans-serif".to_string(),
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
        }
    }

    /// Complete document on a white background.
    pub fn finish(&self) -> String {
        let mut s = String::new();
        s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        s.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = self.width,
            h = self.height
        ));
        s.push_str("<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");
        s.push_str(&self.body);
        s.push_str("</svg>\n");
        s
    }

    fn opacity_attr(&self) -> String {
        if self.alpha < 1.0 {
            format!(" opacity=\"{:.3}\"", self.alpha)
        } else {
            String::new()
        }
    }

    fn stroke_attrs(&self) -> String {
        let mut a = format!(
            "stroke=\"{}\" stroke-width=\"{}\"",
            self.stroke, self.line_width
        );
        if !self.dash.is_empty() {
            let d: Vec<String> = self.dash.iter().map(|v| v.to_string()).collect();
            let _ = write!(a, " stroke-dasharray=\"{}\"", d.join(","));
        }
        a
    }

    fn text_anchor(&self) -> &'static str {
        match self.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
        }
    }

    fn text_baseline(&self) -> Option<&'static str> {
        match self.baseline {
            TextBaseline::Alphabetic => None,
            TextBaseline::Top => Some("text-before-edge"),
            TextBaseline::Middle => Some("central"),
            TextBaseline::Bottom => Some("text-after-edge"),
        }
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.body.clear();
        self.path.clear();
    }
    fn set_fill(&mut self, color: &str) {
        self.fill = color.to_string();
    }
    fn set_stroke(&mut self, color: &str) {
        self.stroke = color.to_string();
    }
    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }
    fn set_line_dash(&mut self, dash: &[f64]) {
        self.dash = dash.to_vec();
    }
    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }
    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }
    fn set_text_align(&mut self, align: TextAlign) {
        self.align = align;
    }
    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.baseline = baseline;
    }
    fn begin_path(&mut self) {
        self.path.clear();
    }
    fn move_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.path, "M {x:.2} {y:.2} ");
    }
    fn line_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.path, "L {x:.2} {y:.2} ");
    }
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        let _ = write!(self.path, "Q {cpx:.2} {cpy:.2} {x:.2} {y:.2} ");
    }
    fn arc(&mut self, cx: f64, cy: f64, r: f64, start: f64, end: f64) {
        let (sx, sy) = (cx + r * start.cos(), cy + r * start.sin());
        let lead = if self.path.is_empty() { 'M' } else { 'L' };
        let _ = write!(self.path, "{lead} {sx:.2} {sy:.2} ");
        let sweep = end - start;
        if sweep.abs() >= 2.0 * PI - 1e-9 {
            // a full turn needs two half arcs
            let (mx, my) = (cx - r * start.cos(), cy - r * start.sin());
            let _ = write!(
                self.path,
                "A {r:.2} {r:.2} 0 1 1 {mx:.2} {my:.2} A {r:.2} {r:.2} 0 1 1 {sx:.2} {sy:.2} "
            );
        } else {
            let (ex, ey) = (cx + r * end.cos(), cy + r * end.sin());
            let large = if sweep.abs() > PI { 1 } else { 0 };
            let dir = if sweep > 0.0 { 1 } else { 0 };
            let _ = write!(self.path, "A {r:.2} {r:.2} 0 {large} {dir} {ex:.2} {ey:.2} ");
        }
    }
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let _ = write!(
            self.path,
            "M {x:.2} {y:.2} L {:.2} {y:.2} L {:.2} {:.2} L {x:.2} {:.2} Z ",
            x + w,
            x + w,
            y + h,
            y + h
        );
    }
    fn close_path(&mut self) {
        self.path.push_str("Z ");
    }
    fn fill(&mut self) {
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill=\"{}\" stroke=\"none\"{}/>",
            self.path.trim_end(),
            self.fill,
            self.opacity_attr()
        );
    }
    fn stroke(&mut self) {
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill=\"none\" {}{}/>",
            self.path.trim_end(),
            self.stroke_attrs(),
            self.opacity_attr()
        );
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let _ = writeln!(
            self.body,
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" fill=\"{}\"{}/>",
            self.fill,
            self.opacity_attr()
        );
    }
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let _ = writeln!(
            self.body,
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" fill=\"none\" {}{}/>",
            self.stroke_attrs(),
            self.opacity_attr()
        );
    }
    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let (size, family) = parse_font(&self.font);
        let baseline = self
            .text_baseline()
            .map(|b| format!(" dominant-baseline=\"{b}\""))
            .unwrap_or_default();
        let _ = writeln!(
            self.body,
            "<text x=\"{x:.2}\" y=\"{y:.2}\" fill=\"{}\" font-size=\"{size}\" font-family=\"{}\" text-anchor=\"{}\"{baseline}>{}</text>",
            self.fill,
            svg_escape(&family),
            self.text_anchor(),
            svg_escape(text)
        );
    }
}
