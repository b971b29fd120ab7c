//! Turning a catalog selection into store contents.

use crate::catalog::{Axis, CatalogRow, FieldPosition, field_for};
use crate::constants::DOUBLE_WIDTHS_MM;
use crate::model::{ClockPosition, HoleKind, HoleSlot, TapOrientation};
use crate::store::FeatureStore;
use crate::units::Point;

/// One entry of the tap position selector.
#[derive(Clone, Debug, PartialEq)]
pub struct TapOption {
    pub orientation: TapOrientation,
    pub label: String,
    pub tap1: Option<Point>,
    pub tap2: Option<Point>,
}

/// Whether the double layout applies to this row on this board.
pub fn double_applies(row: &CatalogRow, width: u32, double: bool) -> bool {
    double && row.supports_double() && DOUBLE_WIDTHS_MM.contains(&width)
}

fn hole_at(
    row: &CatalogRow,
    size: Option<u32>,
    position: FieldPosition,
    kind: HoleKind,
    secondary: bool,
) -> Option<Point> {
    row.point(
        &field_for(size, position, kind, Axis::X, secondary),
        &field_for(size, position, kind, Axis::Y, secondary),
    )
    .map(Point::from)
}

/// Single layout: size-prefixed columns win, plain columns are the fallback.
fn single_hole(row: &CatalogRow, width: u32, pos: ClockPosition, kind: HoleKind) -> Option<Point> {
    let position = FieldPosition::Clock(pos);
    hole_at(row, Some(width), position, kind, false)
        .or_else(|| hole_at(row, None, position, kind, false))
}

/// Hole offsets for Tap1, Waste1, Tap2 and Waste2 under a selection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResolvedHoles {
    pub tap1: Option<Point>,
    pub waste1: Option<Point>,
    pub tap2: Option<Point>,
    pub waste2: Option<Point>,
}

/// Resolve catalog columns for `orientation`. The split layout reads the
/// first pair from the 10-left columns and the second pair from the 2-right
/// columns; every other double orientation reads both pairs from one clock
/// position.
pub fn resolve_holes(
    row: &CatalogRow,
    width: u32,
    orientation: TapOrientation,
    double: bool,
) -> ResolvedHoles {
    let nth_waste = || hole_at(row, None, FieldPosition::NoTap, HoleKind::Waste, false);
    if double_applies(row, width, double) {
        let size = Some(width);
        match orientation {
            TapOrientation::Split => ResolvedHoles {
                tap1: hole_at(row, size, FieldPosition::TenLeft, HoleKind::Tap, false),
                waste1: hole_at(row, size, FieldPosition::TenLeft, HoleKind::Waste, false),
                tap2: hole_at(row, size, FieldPosition::TwoRight, HoleKind::Tap, true),
                waste2: hole_at(row, size, FieldPosition::TwoRight, HoleKind::Waste, true),
            },
            TapOrientation::Clock(pos) => {
                let p = FieldPosition::Clock(pos);
                ResolvedHoles {
                    tap1: hole_at(row, size, p, HoleKind::Tap, false),
                    waste1: hole_at(row, size, p, HoleKind::Waste, false),
                    tap2: hole_at(row, size, p, HoleKind::Tap, true),
                    waste2: hole_at(row, size, p, HoleKind::Waste, true),
                }
            }
            TapOrientation::NoTap => ResolvedHoles {
                waste1: nth_waste(),
                ..Default::default()
            },
        }
    } else {
        match orientation {
            TapOrientation::Clock(pos) => ResolvedHoles {
                tap1: single_hole(row, width, pos, HoleKind::Tap),
                waste1: single_hole(row, width, pos, HoleKind::Waste),
                ..Default::default()
            },
            TapOrientation::NoTap => ResolvedHoles {
                waste1: nth_waste(),
                ..Default::default()
            },
            TapOrientation::Split => {
                log::warn!("split layout needs double mode on a double-capable board");
                ResolvedHoles::default()
            }
        }
    }
}

/// Orientation choices for a row: "No tap hole" first, then each clock
/// position whose tap coordinates are complete, then the split layout when
/// double mode applies and all four split coordinates exist.
pub fn tap_position_options(row: &CatalogRow, width: u32, double: bool) -> Vec<TapOption> {
    let double = double_applies(row, width, double);
    let mode = if double { "Double" } else { "Single" };
    let mut out = vec![TapOption {
        orientation: TapOrientation::NoTap,
        label: format!("{mode} — No tap hole"),
        tap1: None,
        tap2: None,
    }];

    for pos in ClockPosition::ALL {
        let label = format!("{mode} — {} o’clock", pos.as_str());
        let orientation = TapOrientation::Clock(pos);
        if double {
            let p = FieldPosition::Clock(pos);
            let t1 = hole_at(row, Some(width), p, HoleKind::Tap, false);
            let t2 = hole_at(row, Some(width), p, HoleKind::Tap, true);
            if let (Some(t1), Some(t2)) = (t1, t2) {
                out.push(TapOption {
                    orientation,
                    label,
                    tap1: Some(t1),
                    tap2: Some(t2),
                });
            }
        } else if let Some(t1) = single_hole(row, width, pos, HoleKind::Tap) {
            out.push(TapOption {
                orientation,
                label,
                tap1: Some(t1),
                tap2: None,
            });
        }
    }

    if double {
        let t1 = hole_at(row, Some(width), FieldPosition::TenLeft, HoleKind::Tap, false);
        let t2 = hole_at(row, Some(width), FieldPosition::TwoRight, HoleKind::Tap, true);
        if let (Some(t1), Some(t2)) = (t1, t2) {
            out.push(TapOption {
                orientation: TapOrientation::Split,
                label: "Double — 2 & 10 o’clock split".to_string(),
                tap1: Some(t1),
                tap2: Some(t2),
            });
        }
    }
    out
}

/// Replace the store's holes and cut-out with what the catalog row specifies
/// for the selected orientation. Cut-out rows place only the cut-out, keyed
/// to the orientation; other rows place whichever holes have both
/// coordinates.
pub fn apply_selection(
    store: &mut FeatureStore,
    row: &CatalogRow,
    orientation: TapOrientation,
    double: bool,
) {
    let width = store.board_width();
    store.batch(|s| {
        for slot in HoleSlot::ALL {
            s.clear_hole(slot);
        }
        s.clear_cutout();
        s.set_orientation(Some(orientation));

        if let Some(cutout) = row.cutout() {
            log::info!(
                "placing cut-out for {} at {orientation}",
                row.item_code().unwrap_or_default()
            );
            s.set_cutout(cutout);
            return;
        }

        let holes = resolve_holes(row, width, orientation, double);
        log::info!(
            "placing holes for {} at {orientation}: {holes:?}",
            row.item_code().unwrap_or_default()
        );
        let pairs = [
            (HoleSlot::Tap1, holes.tap1),
            (HoleSlot::Waste1, holes.waste1),
            (HoleSlot::Tap2, holes.tap2),
            (HoleSlot::Waste2, holes.waste2),
        ];
        for (slot, at) in pairs {
            if let Some(p) = at {
                s.set_hole(slot, Some(p.x), Some(p.y));
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row() -> CatalogRow {
        serde_json::from_value(json!({
            "Item Code": "FZ-500",
            "Description": "Double undermount",
            "double": "Y",
            "10_t_x": -150, "10_t_y": 60,
            "10_w_x": -150, "10_w_y": 200,
            "1200_12_t_x": 0, "1200_12_t_y": 50,
            "1200_12_w_x": 0, "1200_12_w_y": 210,
            "1200_12_t2_x": 300, "1200_12_t2_y": 50,
            "1200_12_w2_x": 300, "1200_12_w2_y": "NA",
            "1200_10l_t_x": -320, "1200_10l_t_y": 60,
            "1200_10l_w_x": -280, "1200_10l_w_y": 220,
            "1200_2r_t2_x": 320, "1200_2r_t2_y": 60,
            "1200_2r_w2_x": 280, "1200_2r_w2_y": 220,
            "nth_w_x": 0, "nth_w_y": 230
        }))
        .unwrap()
    }

    #[test]
    fn single_prefers_sized_columns() {
        let r = row();
        let opts = tap_position_options(&r, 1200, false);
        let labels: Vec<_> = opts.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Single — No tap hole", "Single — 10 o’clock", "Single — 12 o’clock"]
        );
        assert_eq!(opts[1].tap1, Some(Point::new(-150.0, 60.0)));
    }

    #[test]
    fn double_lists_split() {
        let opts = tap_position_options(&row(), 1200, true);
        let orientations: Vec<_> = opts.iter().map(|o| o.orientation).collect();
        assert_eq!(
            orientations,
            [
                TapOrientation::NoTap,
                TapOrientation::Clock(ClockPosition::Twelve),
                TapOrientation::Split
            ]
        );
    }

    #[test]
    fn double_needs_wide_board() {
        let opts = tap_position_options(&row(), 900, true);
        assert_eq!(opts[0].label, "Single — No tap hole");
    }

    #[test]
    fn split_uses_left_and_right_columns() {
        let mut s = FeatureStore::default();
        s.set_board_width(1200).unwrap();
        s.set_double_mode(true);
        apply_selection(&mut s, &row(), TapOrientation::Split, true);
        assert_eq!(s.hole(HoleSlot::Tap1).map(|h| h.offset()), Some(Point::new(-320.0, 60.0)));
        assert_eq!(s.hole(HoleSlot::Waste2).map(|h| h.offset()), Some(Point::new(280.0, 220.0)));
        assert_eq!(s.orientation(), Some(TapOrientation::Split));
    }

    #[test]
    fn incomplete_pairs_are_skipped() {
        let mut s = FeatureStore::default();
        s.set_board_width(1200).unwrap();
        s.set_hole(HoleSlot::Waste2, Some(1.0), Some(1.0));
        apply_selection(&mut s, &row(), TapOrientation::Clock(ClockPosition::Twelve), true);
        assert!(s.has_hole(HoleSlot::Tap2));
        assert!(!s.has_hole(HoleSlot::Waste2));
    }

    #[test]
    fn no_tap_places_waste_only() {
        let mut s = FeatureStore::default();
        apply_selection(&mut s, &row(), TapOrientation::NoTap, false);
        assert!(!s.has_hole(HoleSlot::Tap1));
        assert_eq!(s.hole(HoleSlot::Waste1).map(|h| h.offset()), Some(Point::new(0.0, 230.0)));
    }

    #[test]
    fn cutout_rows_place_no_holes() {
        let r: CatalogRow = serde_json::from_value(json!({
            "Item Code": "CO-9",
            "cut_out": "Y",
            "setCutout": "rect",
            "c_l": 450, "c_w": 350, "c_x": 0, "c_y": 240,
            "12_t_x": 0, "12_t_y": 40
        }))
        .unwrap();
        let mut s = FeatureStore::default();
        s.set_hole(HoleSlot::Tap1, Some(0.0), Some(10.0));
        apply_selection(&mut s, &r, TapOrientation::Clock(ClockPosition::Twelve), false);
        assert!(!s.any_hole());
        assert!(s.has_cutout());
    }
}
