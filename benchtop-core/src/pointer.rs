//! Pointer handling: drag state machine and click placement.
//!
//! Coordinates are canvas pixels (backing-store space, not CSS pixels).

use crate::constants::{BASIN_CAPTURE_RADIUS_MM, HIT_TOLERANCE_PX};
use crate::geometry::hole_radius_px;
use crate::model::{Hole, HoleSlot};
use crate::store::FeatureStore;
use crate::units::{Point, mm_to_px};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTarget {
    Hole(HoleSlot),
    Basin,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerState {
    #[default]
    Idle,
    Dragging(DragTarget),
}

#[derive(Clone, Debug)]
pub struct PointerHandler {
    canvas_w: f64,
    state: PointerState,
    placement: Option<HoleSlot>,
}

impl PointerHandler {
    pub fn new(canvas_w: f64) -> Self {
        PointerHandler {
            canvas_w,
            state: PointerState::Idle,
            placement: None,
        }
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Slot the next click will place, if any.
    pub fn placement(&self) -> Option<HoleSlot> {
        self.placement
    }

    /// First feature under `(x, y)` in priority order: holes in slot order,
    /// then the basin center.
    pub fn hit_test(&self, store: &FeatureStore, x: f64, y: f64) -> Option<DragTarget> {
        let frame = store.frame(self.canvas_w);
        let p = Point::new(x, y);
        let holes = store.holes().map(|(slot, hole)| {
            (
                DragTarget::Hole(slot),
                hole.offset(),
                hole_radius_px(store.hole_diameter(slot)),
            )
        });
        let basin = store
            .basin()
            .map(|b| (DragTarget::Basin, b.offset(), mm_to_px(BASIN_CAPTURE_RADIUS_MM)));
        holes
            .chain(basin)
            .find(|(_, offset, r)| frame.to_screen(*offset).distance(p) < r + HIT_TOLERANCE_PX)
            .map(|(target, _, _)| target)
    }

    /// Start a drag if the pointer lands on a feature. Any previous drag ends.
    pub fn pointer_down(&mut self, store: &FeatureStore, x: f64, y: f64) -> Option<DragTarget> {
        let hit = self.hit_test(store, x, y);
        self.state = match hit {
            Some(target) => PointerState::Dragging(target),
            None => PointerState::Idle,
        };
        hit
    }

    /// Move the dragged feature to the pointer, snapped to whole millimeters
    /// and kept at or below the back edge.
    /// With the lock engaged a dragged hole carries every other hole along by
    /// the same delta; the basin never joins the group. Returns whether the
    /// store was touched.
    pub fn pointer_move(&mut self, store: &mut FeatureStore, x: f64, y: f64) -> bool {
        let PointerState::Dragging(target) = self.state else {
            return false;
        };
        let next = store.frame(self.canvas_w).snap_from_screen(x, y);
        match target {
            DragTarget::Hole(slot) => {
                let Some(prev) = store.hole(slot) else {
                    self.state = PointerState::Idle;
                    return false;
                };
                let (dx, mut dy) = (next.x - prev.offset_x, next.y - prev.offset_y);
                if store.is_locked() {
                    // the group stops as a whole at the back edge
                    let top = store
                        .holes()
                        .map(|(_, h)| h.offset_y)
                        .fold(f64::INFINITY, f64::min);
                    dy = dy.max(-top.max(0.0));
                }
                store.batch(|s| {
                    s.place_hole(slot, Hole::new(next.x, prev.offset_y + dy));
                    if s.is_locked() {
                        s.translate_holes(dx, dy, Some(slot));
                    }
                });
            }
            DragTarget::Basin => {
                if !store.has_basin() {
                    self.state = PointerState::Idle;
                    return false;
                }
                store.move_basin(next.x, next.y);
            }
        }
        true
    }

    pub fn pointer_up(&mut self) {
        self.state = PointerState::Idle;
    }

    /// Arm (or with `None`, disarm) click placement for one hole slot.
    pub fn arm_placement(&mut self, slot: Option<HoleSlot>) {
        self.placement = slot;
    }

    /// Place the armed hole at the clicked position and disarm. Without an
    /// armed slot the click is ignored.
    pub fn click(&mut self, store: &mut FeatureStore, x: f64, y: f64) -> Option<HoleSlot> {
        let slot = self.placement.take()?;
        let at = store.frame(self.canvas_w).snap_from_screen(x, y);
        store.place_hole(slot, Hole::new(at.x, at.y));
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CANVAS_WIDTH_PX;
    use crate::model::{BasinShape, BasinSpec};

    fn store() -> FeatureStore {
        let mut s = FeatureStore::default();
        s.set_board_width(1200).unwrap();
        s
    }

    #[test]
    fn priority_prefers_holes_over_basin() {
        let mut s = store();
        s.set_basin(BasinSpec {
            shape: BasinShape::Circle { diameter: Some(400.0) },
            offset_x: Some(0.0),
            offset_y: Some(200.0),
        });
        s.set_hole(HoleSlot::Waste1, Some(0.0), Some(200.0));
        s.set_hole(HoleSlot::Tap, Some(10.0), Some(200.0));
        let p = PointerHandler::new(CANVAS_WIDTH_PX);
        // board origin is (500, 20); (0, 200) mm lands at (500, 120)
        assert_eq!(
            p.hit_test(&s, 500.0, 120.0),
            Some(DragTarget::Hole(HoleSlot::Tap))
        );
        s.clear_hole(HoleSlot::Tap);
        s.clear_hole(HoleSlot::Waste1);
        assert_eq!(p.hit_test(&s, 500.0, 120.0), Some(DragTarget::Basin));
    }

    #[test]
    fn tolerance_extends_hit_radius() {
        let mut s = store();
        s.set_hole(HoleSlot::Tap1, Some(0.0), Some(100.0));
        let p = PointerHandler::new(CANVAS_WIDTH_PX);
        // radius 8.75 px plus 10 px slack
        assert!(p.hit_test(&s, 518.0, 70.0).is_some());
        assert!(p.hit_test(&s, 519.0, 70.0).is_none());
    }

    #[test]
    fn drag_snaps_to_whole_mm() {
        let mut s = store();
        s.set_hole(HoleSlot::Tap1, Some(0.0), Some(100.0));
        let mut p = PointerHandler::new(CANVAS_WIDTH_PX);
        assert!(p.pointer_down(&s, 500.0, 70.0).is_some());
        assert!(p.pointer_move(&mut s, 450.3, 80.2));
        assert_eq!(s.hole(HoleSlot::Tap1), Some(Hole::new(-99.0, 120.0)));
        p.pointer_up();
        assert_eq!(p.state(), PointerState::Idle);
        assert!(!p.pointer_move(&mut s, 0.0, 0.0));
    }

    #[test]
    fn unlocked_drag_moves_one_hole() {
        let mut s = store();
        s.set_hole(HoleSlot::Tap1, Some(0.0), Some(100.0));
        s.set_hole(HoleSlot::Waste1, Some(0.0), Some(300.0));
        let mut p = PointerHandler::new(CANVAS_WIDTH_PX);
        p.pointer_down(&s, 500.0, 70.0);
        p.pointer_move(&mut s, 520.0, 70.0);
        assert_eq!(s.hole(HoleSlot::Waste1), Some(Hole::new(0.0, 300.0)));
    }

    #[test]
    fn basin_drag_leaves_locked_holes() {
        let mut s = store();
        s.set_locked(true);
        s.set_basin(BasinSpec {
            shape: BasinShape::Square { side: Some(300.0) },
            offset_x: Some(200.0),
            offset_y: Some(200.0),
        });
        s.set_hole(HoleSlot::Tap1, Some(-200.0), Some(50.0));
        let mut p = PointerHandler::new(CANVAS_WIDTH_PX);
        assert_eq!(p.pointer_down(&s, 600.0, 120.0), Some(DragTarget::Basin));
        p.pointer_move(&mut s, 610.0, 130.0);
        let b = s.basin().unwrap();
        assert_eq!((b.offset_x, b.offset_y), (220.0, 220.0));
        assert_eq!(s.hole(HoleSlot::Tap1), Some(Hole::new(-200.0, 50.0)));
    }

    #[test]
    fn drag_stops_at_back_edge() {
        let mut s = store();
        s.set_hole(HoleSlot::Tap1, Some(0.0), Some(100.0));
        let mut p = PointerHandler::new(CANVAS_WIDTH_PX);
        p.pointer_down(&s, 500.0, 70.0);
        // 5 px above the board is -10 mm
        p.pointer_move(&mut s, 500.0, 15.0);
        assert_eq!(s.hole(HoleSlot::Tap1), Some(Hole::new(0.0, 0.0)));
    }

    #[test]
    fn locked_group_stops_at_back_edge() {
        let mut s = store();
        s.set_locked(true);
        s.set_hole(HoleSlot::Tap1, Some(0.0), Some(100.0));
        s.set_hole(HoleSlot::Waste1, Some(50.0), Some(40.0));
        let mut p = PointerHandler::new(CANVAS_WIDTH_PX);
        p.pointer_down(&s, 500.0, 70.0);
        p.pointer_move(&mut s, 500.0, 20.0);
        assert_eq!(s.hole(HoleSlot::Tap1), Some(Hole::new(0.0, 60.0)));
        assert_eq!(s.hole(HoleSlot::Waste1), Some(Hole::new(50.0, 0.0)));
    }

    #[test]
    fn click_places_armed_slot_once() {
        let mut s = store();
        let mut p = PointerHandler::new(CANVAS_WIDTH_PX);
        assert_eq!(p.click(&mut s, 500.0, 70.0), None);
        p.arm_placement(Some(HoleSlot::Waste2));
        assert_eq!(p.click(&mut s, 400.0, 120.0), Some(HoleSlot::Waste2));
        assert_eq!(s.hole(HoleSlot::Waste2), Some(Hole::new(-200.0, 200.0)));
        assert_eq!(p.placement(), None);
        assert_eq!(p.click(&mut s, 500.0, 70.0), None);
    }
}
