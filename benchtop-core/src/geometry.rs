//! Pure placement geometry shared by the renderer and the report.
//!
//! Everything here is a function of store values and the board frame; nothing
//! is cached between redraws.

use crate::model::{Basin, BasinShape, ClockPosition, Cutout, CutoutShape, Hole, TapOrientation};
use crate::units::{BoardFrame, Point, mm_to_px, px_to_mm};

/// Closed outline in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outline {
    Circle {
        center: Point,
        radius: f64,
    },
    /// Axis-aligned rectangle given by its top-left corner, optionally rounded.
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
    },
}

impl Outline {
    fn centered_rect(center: Point, w: f64, h: f64, radius: f64) -> Self {
        Outline::Rect {
            x: center.x - w / 2.0,
            y: center.y - h / 2.0,
            w,
            h,
            radius: radius.max(0.0).min(w / 2.0).min(h / 2.0),
        }
    }
}

/// Which coordinates decided the cutout center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementSource {
    Override(ClockPosition),
    Generic,
}

/// Resolved cutout position and dimensions for the active orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CutoutPlacement {
    pub orientation: Option<TapOrientation>,
    pub source: PlacementSource,
    pub center_px: Point,
    /// Signed mm from the board centerline.
    pub from_center_mm: f64,
    pub from_back_mm: f64,
    pub width_mm: Option<f64>,
    pub length_mm: Option<f64>,
    pub diameter_mm: Option<f64>,
    pub corner_radius_mm: Option<f64>,
}

pub fn hole_center(frame: &BoardFrame, hole: &Hole) -> Point {
    frame.to_screen(hole.offset())
}

pub fn hole_radius_px(diameter_mm: f64) -> f64 {
    mm_to_px(diameter_mm / 2.0)
}

/// Outline of the basin, or `None` while its sizes are incomplete.
pub fn basin_outline(basin: &Basin, corner_radius_mm: f64, frame: &BoardFrame) -> Option<Outline> {
    let c = frame.to_screen(basin.offset());
    let r = mm_to_px(corner_radius_mm);
    match basin.shape {
        BasinShape::Circle { diameter: Some(d) } => Some(Outline::Circle {
            center: c,
            radius: mm_to_px(d) / 2.0,
        }),
        BasinShape::Square { side: Some(s) } => {
            let side = mm_to_px(s);
            Some(Outline::centered_rect(c, side, side, r))
        }
        BasinShape::Rect {
            width: Some(w),
            height: Some(h),
        } => Some(Outline::centered_rect(c, mm_to_px(w), mm_to_px(h), r)),
        _ => None,
    }
}

/// Resolve where the cutout sits for `orientation`. An orientation override is
/// used only when both of its coordinates exist; otherwise the generic offsets
/// apply.
pub fn cutout_placement(
    cutout: &Cutout,
    orientation: Option<TapOrientation>,
    frame: &BoardFrame,
) -> CutoutPlacement {
    let overridden = orientation
        .and_then(TapOrientation::clock)
        .and_then(|pos| cutout.overrides.get(pos).resolved().map(|p| (pos, p)));
    let (source, offset) = match overridden {
        Some((pos, p)) => (PlacementSource::Override(pos), p),
        None => (
            PlacementSource::Generic,
            Point::new(cutout.offset_x, cutout.offset_y),
        ),
    };
    let center_px = frame.to_screen(offset);
    let origin = frame.origin();
    let placement = CutoutPlacement {
        orientation,
        source,
        center_px,
        from_center_mm: px_to_mm(center_px.x - origin.x),
        from_back_mm: px_to_mm(center_px.y - origin.y),
        width_mm: cutout.width,
        length_mm: cutout.length,
        diameter_mm: match cutout.shape {
            CutoutShape::Circle => cutout.length,
            _ => None,
        },
        corner_radius_mm: Some(cutout.corner_radius).filter(|r| *r > 0.0),
    };
    log::debug!("cutout placement: {placement:?}");
    placement
}

/// Outline of the cutout at its resolved placement. Circles use the length as
/// their diameter; squares and rectangles span width x length.
pub fn cutout_outline(cutout: &Cutout, placement: &CutoutPlacement) -> Option<Outline> {
    let c = placement.center_px;
    match cutout.shape {
        CutoutShape::Circle => cutout.length.map(|l| Outline::Circle {
            center: c,
            radius: mm_to_px(l) / 2.0,
        }),
        CutoutShape::Square | CutoutShape::Rect => match (cutout.width, cutout.length) {
            (Some(w), Some(l)) => Some(Outline::centered_rect(
                c,
                mm_to_px(w),
                mm_to_px(l),
                mm_to_px(cutout.corner_radius),
            )),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CenterOverride, CutoutOverrides};

    fn cutout() -> Cutout {
        Cutout {
            shape: CutoutShape::Rect,
            length: Some(400.0),
            width: Some(300.0),
            offset_x: 10.0,
            offset_y: 200.0,
            overrides: CutoutOverrides {
                ten: CenterOverride::new(Some(-120.0), Some(240.0)),
                two: CenterOverride::new(Some(120.0), None),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn override_applies_for_matching_orientation() {
        let f = BoardFrame::new(1000.0, 1200.0);
        let p = cutout_placement(
            &cutout(),
            Some(TapOrientation::Clock(ClockPosition::Ten)),
            &f,
        );
        assert_eq!(p.source, PlacementSource::Override(ClockPosition::Ten));
        assert_eq!(p.from_center_mm, -120.0);
        assert_eq!(p.from_back_mm, 240.0);
        assert_eq!(p.center_px, Point::new(440.0, 140.0));
    }

    #[test]
    fn incomplete_override_falls_back() {
        let f = BoardFrame::new(1000.0, 1200.0);
        let p = cutout_placement(
            &cutout(),
            Some(TapOrientation::Clock(ClockPosition::Two)),
            &f,
        );
        assert_eq!(p.source, PlacementSource::Generic);
        assert_eq!(p.from_center_mm, 10.0);
        let p = cutout_placement(&cutout(), None, &f);
        assert_eq!(p.from_back_mm, 200.0);
    }

    #[test]
    fn rounded_rect_radius_is_limited() {
        let f = BoardFrame::new(1000.0, 600.0);
        let basin = Basin {
            shape: BasinShape::Square { side: Some(100.0) },
            offset_x: 0.0,
            offset_y: 100.0,
        };
        match basin_outline(&basin, 500.0, &f) {
            Some(Outline::Rect { w, h, radius, .. }) => {
                assert_eq!((w, h), (50.0, 50.0));
                assert_eq!(radius, 25.0);
            }
            other => panic!("unexpected outline {other:?}"),
        }
    }

    #[test]
    fn incomplete_basin_has_no_outline() {
        let f = BoardFrame::new(1000.0, 600.0);
        let basin = Basin {
            shape: BasinShape::Rect {
                width: Some(100.0),
                height: None,
            },
            offset_x: 0.0,
            offset_y: 100.0,
        };
        assert!(basin_outline(&basin, 0.0, &f).is_none());
    }
}
