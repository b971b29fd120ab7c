//! Plain-text summary of the configured features.

use crate::constants::CANVAS_WIDTH_PX;
use crate::geometry::cutout_placement;
use crate::model::{Basin, BasinShape, Hole, HoleSlot};
use crate::store::FeatureStore;
use crate::units::round_mm;

/// Format millimeters: whole numbers without decimals, otherwise up to three
/// decimals with trailing zeros trimmed.
pub fn fmt_mm(v: f64) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    if (v - v.round()).abs() < 1e-6 {
        format!("{:.0}", v)
    } else {
        format!("{:.3}", v)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

fn hole_line(slot: HoleSlot, hole: &Hole, diameter: f64) -> String {
    let side = if hole.offset_x == 0.0 {
        "0mm from benchtop center".to_string()
    } else {
        let dir = if hole.offset_x < 0.0 { "LEFT" } else { "RIGHT" };
        format!("{}mm {dir} of benchtop center", fmt_mm(hole.offset_x.abs()))
    };
    format!(
        "{} Hole: {side}, {}mm from back. Diameter {}mm.",
        slot.report_name(),
        fmt_mm(hole.offset_y),
        fmt_mm(diameter)
    )
}

fn basin_size(shape: &BasinShape) -> Option<String> {
    match *shape {
        BasinShape::Circle { diameter: Some(d) } => Some(format!("Ø{}mm", fmt_mm(d))),
        BasinShape::Square { side: Some(s) } => Some(format!("{}mm square", fmt_mm(s))),
        BasinShape::Rect {
            width: Some(w),
            height: Some(h),
        } => Some(format!("{}mm × {}mm rectangle", fmt_mm(w), fmt_mm(h))),
        _ => None,
    }
}

fn basin_line(basin: &Basin, corner_radius: f64) -> String {
    // a centered basin reads "0mm right of center"
    let dir = if basin.offset_x < 0.0 { "left" } else { "right" };
    let mut line = format!(
        "Basin ({}): {}mm {dir} of center, {}mm from back.",
        basin.shape.name(),
        fmt_mm(basin.offset_x.abs()),
        fmt_mm(basin.offset_y)
    );
    if let Some(size) = basin_size(&basin.shape) {
        line.push_str(&format!(" Size {size}."));
    }
    if basin.shape.takes_corner_radius() && corner_radius > 0.0 {
        line.push_str(&format!(" Corner radius: {}mm.", fmt_mm(round_mm(corner_radius))));
    }
    line
}

/// One line per present feature, always in the order Tap 1, Waste 1, Tap 2,
/// Waste 2, basin, cut-out.
pub fn report_lines(store: &FeatureStore) -> Vec<String> {
    let mut lines: Vec<String> = HoleSlot::REPORT_ORDER
        .into_iter()
        .filter_map(|slot| {
            store
                .hole(slot)
                .map(|h| hole_line(slot, &h, store.hole_diameter(slot)))
        })
        .collect();

    if let Some(basin) = store.basin() {
        lines.push(basin_line(basin, store.effective_corner_radius()));
    }

    if let Some(cutout) = store.cutout() {
        let p = cutout_placement(cutout, store.orientation(), &store.frame(CANVAS_WIDTH_PX));
        let dims = match (p.diameter_mm, p.length_mm, p.width_mm) {
            (Some(d), _, _) => format!("Ø{}mm", fmt_mm(d)),
            (None, Some(l), Some(w)) => format!("{}mm × {}mm", fmt_mm(l), fmt_mm(w)),
            _ => "Cut-out".to_string(),
        };
        lines.push(format!(
            "Cut-out: {dims}, {}mm from center, {}mm from back",
            fmt_mm(p.from_center_mm),
            fmt_mm(p.from_back_mm)
        ));
    }

    lines
}

pub fn report(store: &FeatureStore) -> String {
    report_lines(store).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BasinSpec, CenterOverride, ClockPosition, Cutout, CutoutOverrides, CutoutShape,
        TapOrientation,
    };

    #[test]
    fn mm_formatting() {
        assert_eq!(fmt_mm(35.0), "35");
        assert_eq!(fmt_mm(232.5), "232.5");
        assert_eq!(fmt_mm(-0.0), "0");
        assert_eq!(fmt_mm(1.0 / 3.0), "0.333");
    }

    #[test]
    fn right_side_hole() {
        let mut s = FeatureStore::default();
        s.set_hole(HoleSlot::Tap2, Some(150.0), Some(60.0));
        assert_eq!(
            report(&s),
            "Tap 2 Hole: 150mm RIGHT of benchtop center, 60mm from back. Diameter 35mm."
        );
    }

    #[test]
    fn legacy_slots_are_not_reported() {
        let mut s = FeatureStore::default();
        s.set_hole(HoleSlot::Tap, Some(0.0), Some(60.0));
        s.set_hole(HoleSlot::Waste, Some(0.0), Some(160.0));
        assert!(report_lines(&s).is_empty());
    }

    #[test]
    fn basin_with_corner_radius() {
        let mut s = FeatureStore::default();
        s.set_basin(BasinSpec {
            shape: BasinShape::Rect {
                width: Some(400.0),
                height: Some(300.0),
            },
            offset_x: Some(-50.0),
            offset_y: None,
        });
        s.set_corner_radius(25.4);
        assert_eq!(
            report(&s),
            "Basin (rect): 50mm left of center, 232.5mm from back. \
             Size 400mm × 300mm rectangle. Corner radius: 25mm."
        );
    }

    #[test]
    fn circle_basin_ignores_radius() {
        let mut s = FeatureStore::default();
        s.set_basin(BasinSpec {
            shape: BasinShape::Circle { diameter: Some(380.0) },
            offset_x: Some(0.0),
            offset_y: Some(200.0),
        });
        s.set_corner_radius(30.0);
        assert_eq!(
            report(&s),
            "Basin (circle): 0mm right of center, 200mm from back. Size Ø380mm."
        );
    }

    #[test]
    fn basin_without_sizes_omits_size() {
        let mut s = FeatureStore::default();
        s.set_basin(BasinSpec {
            shape: BasinShape::Rect {
                width: Some(400.0),
                height: None,
            },
            offset_x: Some(-0.0),
            offset_y: Some(120.0),
        });
        assert_eq!(report(&s), "Basin (rect): 0mm right of center, 120mm from back.");
    }

    #[test]
    fn cutout_follows_orientation() {
        let mut s = FeatureStore::default();
        s.set_cutout(Cutout {
            shape: CutoutShape::Rect,
            length: Some(420.0),
            width: Some(340.0),
            offset_x: 0.0,
            offset_y: 230.0,
            overrides: CutoutOverrides {
                twelve: CenterOverride::new(Some(-60.0), Some(250.0)),
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(
            report(&s),
            "Cut-out: 420mm × 340mm, 0mm from center, 230mm from back"
        );
        s.set_orientation(Some(TapOrientation::Clock(ClockPosition::Twelve)));
        assert_eq!(
            report(&s),
            "Cut-out: 420mm × 340mm, -60mm from center, 250mm from back"
        );
    }
}
