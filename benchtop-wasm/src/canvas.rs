use benchtop_core::render::{Surface, TextAlign, TextBaseline};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// Renderer surface backed by a 2D canvas context.
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        CanvasSurface { ctx }
    }

    // `fillStyle`/`strokeStyle` take any CSS color; assigned as properties
    // since the typed setters are deprecated.
    fn set_style(&self, property: &str, color: &str) {
        let _ = js_sys::Reflect::set(
            self.ctx.as_ref(),
            &JsValue::from_str(property),
            &JsValue::from_str(color),
        );
    }
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.set_global_alpha(1.0);
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }
    fn set_fill(&mut self, color: &str) {
        self.set_style("fillStyle", color);
    }
    fn set_stroke(&mut self, color: &str) {
        self.set_style("strokeStyle", color);
    }
    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }
    fn set_line_dash(&mut self, dash: &[f64]) {
        let segments = js_sys::Array::new();
        for d in dash {
            segments.push(&JsValue::from_f64(*d));
        }
        let _ = self.ctx.set_line_dash(&segments);
    }
    fn set_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }
    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }
    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
    }
    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.ctx.set_text_baseline(match baseline {
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
            TextBaseline::Bottom => "bottom",
        });
    }
    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.ctx.quadratic_curve_to(cpx, cpy, x, y);
    }
    fn arc(&mut self, cx: f64, cy: f64, r: f64, start: f64, end: f64) {
        let _ = self.ctx.arc(cx, cy, r, start, end);
    }
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.rect(x, y, w, h);
    }
    fn close_path(&mut self) {
        self.ctx.close_path();
    }
    fn fill(&mut self) {
        self.ctx.fill();
    }
    fn stroke(&mut self) {
        self.ctx.stroke();
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.stroke_rect(x, y, w, h);
    }
    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let _ = self.ctx.fill_text(text, x, y);
    }
}
