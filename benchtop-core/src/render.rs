//! Benchtop drawing routine and the surfaces it can target.
//!
//! [`render`] is a pure function of the store: it issues the same calls every
//! time for the same state, whether the target is a browser canvas, an SVG
//! document or a [`DrawList`] in tests.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::constants::ARROW_HEAD_PX;
use crate::geometry::{
    Outline, basin_outline, cutout_outline, cutout_placement, hole_center, hole_radius_px,
};
use crate::model::HoleSlot;
use crate::store::FeatureStore;
use crate::units::{BoardFrame, Point, round_mm};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Top,
    Middle,
    Bottom,
}

/// Minimal 2D drawing API, modelled on the HTML canvas context.
///
/// Paint state (colours, width, dash, alpha, font, alignment) persists until
/// changed; paths are built between `begin_path` and `fill`/`stroke`.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn set_fill(&mut self, color: &str);
    fn set_stroke(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_line_dash(&mut self, dash: &[f64]);
    fn set_alpha(&mut self, alpha: f64);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64);
    fn arc(&mut self, cx: f64, cy: f64, r: f64, start: f64, end: f64);
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear(f64, f64),
    Fill(String),
    Stroke(String),
    LineWidth(f64),
    LineDash(Vec<f64>),
    Alpha(f64),
    Font(String),
    Align(TextAlign),
    Baseline(TextBaseline),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    QuadTo(f64, f64, f64, f64),
    Arc { cx: f64, cy: f64, r: f64 },
    Rect(f64, f64, f64, f64),
    ClosePath,
    FillPath,
    StrokePath,
    FillRect(f64, f64, f64, f64),
    StrokeRect(f64, f64, f64, f64),
    Text { text: String, x: f64, y: f64 },
}

/// Surface that records every call instead of drawing.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text strings in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Arcs as `(cx, cy, r)`.
    pub fn arcs(&self) -> Vec<(f64, f64, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::Arc { cx, cy, r } => Some((cx, cy, r)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for DrawList {
    fn clear(&mut self, width: f64, height: f64) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear(width, height));
    }
    fn set_fill(&mut self, color: &str) {
        self.ops.push(DrawOp::Fill(color.to_string()));
    }
    fn set_stroke(&mut self, color: &str) {
        self.ops.push(DrawOp::Stroke(color.to_string()));
    }
    fn set_line_width(&mut self, width: f64) {
        self.ops.push(DrawOp::LineWidth(width));
    }
    fn set_line_dash(&mut self, dash: &[f64]) {
        self.ops.push(DrawOp::LineDash(dash.to_vec()));
    }
    fn set_alpha(&mut self, alpha: f64) {
        self.ops.push(DrawOp::Alpha(alpha));
    }
    fn set_font(&mut self, font: &str) {
        self.ops.push(DrawOp::Font(font.to_string()));
    }
    fn set_text_align(&mut self, align: TextAlign) {
        self.ops.push(DrawOp::Align(align));
    }
    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.ops.push(DrawOp::Baseline(baseline));
    }
    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::LineTo(x, y));
    }
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.ops.push(DrawOp::QuadTo(cpx, cpy, x, y));
    }
    fn arc(&mut self, cx: f64, cy: f64, r: f64, _start: f64, _end: f64) {
        self.ops.push(DrawOp::Arc { cx, cy, r });
    }
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::Rect(x, y, w, h));
    }
    fn close_path(&mut self) {
        self.ops.push(DrawOp::ClosePath);
    }
    fn fill(&mut self) {
        self.ops.push(DrawOp::FillPath);
    }
    fn stroke(&mut self) {
        self.ops.push(DrawOp::StrokePath);
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::FillRect(x, y, w, h));
    }
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::StrokeRect(x, y, w, h));
    }
    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
        });
    }
}

/// Legend rows follow the report pairing (each tap before its waste).
const LEGEND_ORDER: [HoleSlot; 6] = [
    HoleSlot::Tap,
    HoleSlot::Waste,
    HoleSlot::Tap1,
    HoleSlot::Waste1,
    HoleSlot::Tap2,
    HoleSlot::Waste2,
];

const BASIN_FILL: &str = "rgba(128,128,128,0.3)";
const BASIN_STROKE: &str = "red";
const CUTOUT_STROKE: &str = "orange";
const CENTERLINE: &str = "#aaa";
const INK: &str = "#000";

/// Draw the complete benchtop for the current store contents.
pub fn render(store: &FeatureStore, canvas_w: f64, canvas_h: f64, s: &mut dyn Surface) {
    let frame = store.frame(canvas_w);
    s.clear(canvas_w, canvas_h);

    draw_outline(s, &frame);
    draw_centerlines(s, &frame);

    for (slot, hole) in store.holes() {
        let c = hole_center(&frame, &hole);
        draw_hole(s, slot, c, hole_radius_px(store.hole_diameter(slot)));
    }

    if let Some(basin) = store.basin()
        && let Some(outline) = basin_outline(basin, store.effective_corner_radius(), &frame)
    {
        s.begin_path();
        trace(s, outline);
        s.set_alpha(1.0);
        s.set_fill(BASIN_FILL);
        s.fill();
        s.set_stroke(BASIN_STROKE);
        s.set_line_width(2.0);
        s.stroke();
    }

    if let Some(cutout) = store.cutout() {
        let placement = cutout_placement(cutout, store.orientation(), &frame);
        if let Some(outline) = cutout_outline(cutout, &placement) {
            s.set_stroke(CUTOUT_STROKE);
            s.set_line_width(2.0);
            s.set_line_dash(&[6.0, 4.0]);
            s.begin_path();
            trace(s, outline);
            s.stroke();
            s.set_line_dash(&[]);
        }
    }

    draw_legend(s, store, canvas_h);

    if store.show_measurements() {
        for (slot, hole) in store.holes() {
            draw_measurements(s, &frame, slot, hole_center(&frame, &hole), hole.offset());
        }
    }
}

fn draw_outline(s: &mut dyn Surface, f: &BoardFrame) {
    s.set_stroke(INK);
    s.set_line_width(1.0);
    s.set_line_dash(&[]);
    s.stroke_rect(f.x0, f.y0, f.width_px, f.height_px);
}

fn draw_centerlines(s: &mut dyn Surface, f: &BoardFrame) {
    let c = f.center();
    s.set_stroke(CENTERLINE);
    s.set_line_dash(&[4.0, 4.0]);
    s.begin_path();
    s.move_to(f.x0, c.y);
    s.line_to(f.x0 + f.width_px, c.y);
    s.stroke();
    s.begin_path();
    s.move_to(c.x, f.y0);
    s.line_to(c.x, f.y0 + f.height_px);
    s.stroke();
    s.set_line_dash(&[]);

    s.begin_path();
    s.arc(c.x, c.y, 3.0, 0.0, 2.0 * PI);
    s.set_fill(INK);
    s.fill();
}

fn draw_hole(s: &mut dyn Surface, slot: HoleSlot, c: Point, r: f64) {
    let color = slot.color();
    s.begin_path();
    s.arc(c.x, c.y, r, 0.0, 2.0 * PI);
    s.set_fill(color);
    s.set_alpha(0.4);
    s.fill();
    s.set_alpha(1.0);
    s.set_stroke(color);
    s.set_line_width(2.0);
    s.stroke();

    s.set_fill(INK);
    s.set_font("10px sans-serif");
    s.set_text_align(TextAlign::Left);
    s.set_text_baseline(TextBaseline::Alphabetic);
    s.fill_text(slot.label(), c.x + r + 4.0, c.y - 4.0);
}

/// Add an outline to the current path. Rounded corners use quadratic curves.
fn trace(s: &mut dyn Surface, outline: Outline) {
    match outline {
        Outline::Circle { center, radius } => s.arc(center.x, center.y, radius, 0.0, 2.0 * PI),
        Outline::Rect { x, y, w, h, radius } if radius > 0.0 => {
            let (right, bottom) = (x + w, y + h);
            s.move_to(x + radius, y);
            s.line_to(right - radius, y);
            s.quadratic_curve_to(right, y, right, y + radius);
            s.line_to(right, bottom - radius);
            s.quadratic_curve_to(right, bottom, right - radius, bottom);
            s.line_to(x + radius, bottom);
            s.quadratic_curve_to(x, bottom, x, bottom - radius);
            s.line_to(x, y + radius);
            s.quadratic_curve_to(x, y, x + radius, y);
            s.close_path();
        }
        Outline::Rect { x, y, w, h, .. } => s.rect(x, y, w, h),
    }
}

fn draw_legend(s: &mut dyn Surface, store: &FeatureStore, canvas_h: f64) {
    const X: f64 = 20.0;
    const LINE_HEIGHT: f64 = 18.0;
    s.set_font("12px Arial");
    s.set_text_align(TextAlign::Left);
    s.set_text_baseline(TextBaseline::Middle);
    let mut y = canvas_h - 100.0;
    for slot in LEGEND_ORDER.into_iter().filter(|slot| store.has_hole(*slot)) {
        s.set_fill(slot.color());
        s.fill_rect(X, y, 12.0, 12.0);
        s.set_fill(INK);
        s.fill_text(slot.legend(), X + 20.0, y + 6.0);
        y += LINE_HEIGHT;
    }
}

/// Arrowhead with its tip at `tip`, pointing along `angle`.
fn arrowhead(s: &mut dyn Surface, tip: Point, angle: f64) {
    let spread = PI / 6.0;
    s.begin_path();
    s.move_to(tip.x, tip.y);
    s.line_to(
        tip.x - ARROW_HEAD_PX * (angle - spread).cos(),
        tip.y - ARROW_HEAD_PX * (angle - spread).sin(),
    );
    s.line_to(
        tip.x - ARROW_HEAD_PX * (angle + spread).cos(),
        tip.y - ARROW_HEAD_PX * (angle + spread).sin(),
    );
    s.line_to(tip.x, tip.y);
    s.stroke();
}

fn vertical_angle(from_y: f64, to_y: f64) -> f64 {
    if to_y < from_y { -FRAC_PI_2 } else { FRAC_PI_2 }
}

fn horizontal_angle(from_x: f64, to_x: f64) -> f64 {
    if to_x > from_x { 0.0 } else { PI }
}

/// Dimension arrows from the back edge and from the centerline to a hole.
fn draw_measurements(
    s: &mut dyn Surface,
    f: &BoardFrame,
    slot: HoleSlot,
    hole: Point,
    offset_mm: Point,
) {
    let base = f.origin();
    let color = slot.color();
    s.set_stroke(color);
    s.set_line_width(2.0);

    s.begin_path();
    s.move_to(hole.x, base.y);
    s.line_to(hole.x, hole.y);
    s.stroke();
    arrowhead(s, hole, vertical_angle(base.y, hole.y));
    arrowhead(s, Point::new(hole.x, base.y), vertical_angle(hole.y, base.y));

    s.set_fill(color);
    s.set_font("14px Arial");
    s.set_text_align(TextAlign::Center);
    s.set_text_baseline(TextBaseline::Bottom);
    let mid_y = (base.y + hole.y) / 2.0;
    s.fill_text(
        &format!("{} mm (back edge)", round_mm(offset_mm.y.abs())),
        hole.x,
        mid_y - 5.0,
    );

    s.begin_path();
    s.move_to(base.x, hole.y);
    s.line_to(hole.x, hole.y);
    s.stroke();
    arrowhead(s, hole, horizontal_angle(base.x, hole.x));
    arrowhead(s, Point::new(base.x, hole.y), horizontal_angle(hole.x, base.x));

    s.set_text_baseline(TextBaseline::Top);
    let mid_x = (base.x + hole.x) / 2.0;
    s.fill_text(
        &format!("{} mm (centerline)", round_mm(offset_mm.x.abs())),
        mid_x,
        hole.y + 16.0,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CANVAS_HEIGHT_PX, CANVAS_WIDTH_PX};
    use crate::model::{BasinShape, BasinSpec, Cutout, CutoutShape};

    fn draw(store: &FeatureStore) -> DrawList {
        let mut list = DrawList::new();
        render(store, CANVAS_WIDTH_PX, CANVAS_HEIGHT_PX, &mut list);
        list
    }

    #[test]
    fn empty_board_draws_outline_and_marker() {
        let list = draw(&FeatureStore::default());
        assert_eq!(list.ops[0], DrawOp::Clear(1000.0, 360.0));
        assert!(list.ops.contains(&DrawOp::StrokeRect(350.0, 20.0, 300.0, 232.5)));
        assert_eq!(list.arcs(), vec![(500.0, 136.25, 3.0)]);
        assert!(list.texts().is_empty());
    }

    #[test]
    fn legend_lists_present_holes_only() {
        let mut store = FeatureStore::default();
        store.set_hole(HoleSlot::Waste1, Some(0.0), Some(100.0));
        store.set_hole(HoleSlot::Tap1, Some(0.0), Some(50.0));
        let list = draw(&store);
        let texts = list.texts();
        assert!(texts.contains(&"Taphole 1 = Blue"));
        assert!(texts.contains(&"Waste hole 1 = Green"));
        assert!(!texts.iter().any(|t| t.contains("Taphole 2")));
        let legend: Vec<_> = texts.into_iter().filter(|t| t.contains(" = ")).collect();
        assert_eq!(legend, ["Taphole 1 = Blue", "Waste hole 1 = Green"]);
    }

    #[test]
    fn waste_radius_follows_observer() {
        let mut store = FeatureStore::new(Box::new(crate::store::FixedWaste(90.0)));
        store.set_hole(HoleSlot::Waste1, Some(0.0), Some(100.0));
        let list = draw(&store);
        assert!(list.arcs().contains(&(500.0, 70.0, 22.5)));
    }

    #[test]
    fn rounded_basin_uses_curves() {
        let mut store = FeatureStore::default();
        store.set_basin(BasinSpec {
            shape: BasinShape::Square { side: Some(300.0) },
            offset_x: None,
            offset_y: None,
        });
        store.set_corner_radius(40.0);
        let list = draw(&store);
        assert_eq!(list.count(|op| matches!(op, DrawOp::QuadTo(..))), 4);
        assert!(list.ops.contains(&DrawOp::Fill(BASIN_FILL.to_string())));
    }

    #[test]
    fn features_draw_in_layer_order() {
        let mut store = FeatureStore::default();
        store.set_hole(HoleSlot::Tap1, Some(0.0), Some(200.0));
        store.set_basin(BasinSpec {
            shape: BasinShape::Rect {
                width: Some(400.0),
                height: Some(300.0),
            },
            offset_x: Some(0.0),
            offset_y: Some(200.0),
        });
        store.set_cutout(Cutout {
            shape: CutoutShape::Rect,
            length: Some(300.0),
            width: Some(200.0),
            offset_y: 200.0,
            ..Default::default()
        });
        store.set_show_measurements(true);
        let list = draw(&store);
        let position = |pred: &dyn Fn(&DrawOp) -> bool| {
            list.ops.iter().position(pred).expect("op is drawn")
        };
        let order = [
            position(&|op| matches!(op, DrawOp::Arc { r, .. } if *r != 3.0)),
            position(&|op| *op == DrawOp::Fill(BASIN_FILL.to_string())),
            position(&|op| *op == DrawOp::LineDash(vec![6.0, 4.0])),
            position(&|op| matches!(op, DrawOp::Text { text, .. } if text.contains(" = "))),
            position(&|op| {
                matches!(op, DrawOp::Text { text, .. } if text.ends_with("(back edge)"))
            }),
        ];
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{order:?}");
    }

    #[test]
    fn measurements_label_rounded_offsets() {
        let mut store = FeatureStore::default();
        store.set_hole(HoleSlot::Tap1, Some(-120.0), Some(80.4));
        store.set_show_measurements(true);
        let texts = draw(&store).texts().into_iter().map(String::from).collect::<Vec<_>>();
        assert!(texts.contains(&"80 mm (back edge)".to_string()));
        assert!(texts.contains(&"120 mm (centerline)".to_string()));
    }

    #[test]
    fn measurements_hidden_by_default() {
        let mut store = FeatureStore::default();
        store.set_hole(HoleSlot::Tap1, Some(-120.0), Some(80.0));
        assert!(!draw(&store).texts().iter().any(|t| t.ends_with("(centerline)")));
    }
}
