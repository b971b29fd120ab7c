use std::fmt;

use crate::constants::{
    BOARD_WIDTHS_MM, DEFAULT_BOARD_WIDTH_MM, DEFAULT_OFFSET_Y_MM, DEFAULT_WASTE_DIAMETER_MM,
    DOUBLE_WIDTHS_MM, TAP_DIAMETER_MM,
};
use crate::error::{BenchtopError, Result};
use crate::model::{Basin, BasinSpec, Cutout, Hole, HoleKind, HoleSlot, TapOrientation, finite};
use crate::units::BoardFrame;

/// Hooks the host supplies at construction time.
///
/// `changed` runs after every completed mutation (or once at the end of a
/// [`FeatureStore::batch`]), with the store already consistent.
pub trait StoreObserver {
    /// Current waste hole diameter, usually read from the size selector.
    fn waste_diameter(&self) -> f64 {
        DEFAULT_WASTE_DIAMETER_MM
    }

    fn changed(&self, _store: &FeatureStore) {}
}

/// Observer with a fixed waste size and no change reactions.
#[derive(Clone, Copy, Debug)]
pub struct FixedWaste(pub f64);

impl Default for FixedWaste {
    fn default() -> Self {
        FixedWaste(DEFAULT_WASTE_DIAMETER_MM)
    }
}

impl StoreObserver for FixedWaste {
    fn waste_diameter(&self) -> f64 {
        self.0
    }
}

/// Single source of truth for everything drawn on the benchtop.
pub struct FeatureStore {
    board_width: u32,
    holes: [Option<Hole>; 6],
    basin: Option<Basin>,
    cutout: Option<Cutout>,
    corner_radius: f64,
    orientation: Option<TapOrientation>,
    locked: bool,
    double_mode: bool,
    show_measurements: bool,
    observer: Box<dyn StoreObserver>,
    batch_depth: u32,
    pending: bool,
}

impl Default for FeatureStore {
    fn default() -> Self {
        FeatureStore::new(Box::new(FixedWaste::default()))
    }
}

impl fmt::Debug for FeatureStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureStore")
            .field("board_width", &self.board_width)
            .field("holes", &self.holes)
            .field("basin", &self.basin)
            .field("cutout", &self.cutout)
            .field("corner_radius", &self.corner_radius)
            .field("orientation", &self.orientation)
            .field("locked", &self.locked)
            .field("double_mode", &self.double_mode)
            .field("show_measurements", &self.show_measurements)
            .finish_non_exhaustive()
    }
}

impl FeatureStore {
    pub fn new(observer: Box<dyn StoreObserver>) -> Self {
        FeatureStore {
            board_width: DEFAULT_BOARD_WIDTH_MM,
            holes: [None; 6],
            basin: None,
            cutout: None,
            corner_radius: 0.0,
            orientation: None,
            locked: false,
            double_mode: false,
            show_measurements: false,
            observer,
            batch_depth: 0,
            pending: false,
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn StoreObserver>) {
        self.observer = observer;
    }

    /// Run several mutations and notify the observer once at the end.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.batch_depth += 1;
        let out = f(self);
        self.batch_depth -= 1;
        if self.batch_depth == 0 && self.pending {
            self.pending = false;
            self.observer.changed(self);
        }
        out
    }

    fn notify(&mut self) {
        if self.batch_depth > 0 {
            self.pending = true;
        } else {
            self.observer.changed(self);
        }
    }

    // ----- board -----

    pub fn board_width(&self) -> u32 {
        self.board_width
    }

    /// Select one of the enumerated benchtop widths. Narrow widths drop out of
    /// double mode.
    pub fn set_board_width(&mut self, width_mm: u32) -> Result<()> {
        if !BOARD_WIDTHS_MM.contains(&width_mm) {
            return Err(BenchtopError::UnsupportedWidth(width_mm));
        }
        self.batch(|s| {
            s.board_width = width_mm;
            if !s.double_available() {
                s.set_double_mode(false);
            }
            s.notify();
        });
        Ok(())
    }

    pub fn frame(&self, canvas_w: f64) -> BoardFrame {
        BoardFrame::new(canvas_w, self.board_width as f64)
    }

    // ----- holes -----

    pub fn waste_diameter(&self) -> f64 {
        self.observer.waste_diameter()
    }

    pub fn hole_diameter(&self, slot: HoleSlot) -> f64 {
        match slot.kind() {
            HoleKind::Tap => TAP_DIAMETER_MM,
            HoleKind::Waste => self.waste_diameter(),
        }
    }

    /// Replace a hole. The hole exists only when both offsets are finite;
    /// otherwise the slot is cleared. Returns whether the hole is present.
    pub fn set_hole(
        &mut self,
        slot: HoleSlot,
        offset_x: Option<f64>,
        offset_y: Option<f64>,
    ) -> bool {
        let hole = match (finite(offset_x), finite(offset_y)) {
            (Some(x), Some(y)) => Some(Hole::new(x, y)),
            _ => None,
        };
        self.holes[slot.index()] = hole;
        self.notify();
        hole.is_some()
    }

    pub fn place_hole(&mut self, slot: HoleSlot, hole: Hole) -> bool {
        self.set_hole(slot, Some(hole.offset_x), Some(hole.offset_y))
    }

    pub fn clear_hole(&mut self, slot: HoleSlot) {
        self.holes[slot.index()] = None;
        self.notify();
    }

    pub fn has_hole(&self, slot: HoleSlot) -> bool {
        self.holes[slot.index()].is_some()
    }

    pub fn hole(&self, slot: HoleSlot) -> Option<Hole> {
        self.holes[slot.index()]
    }

    /// Present holes in hit-test priority order.
    pub fn holes(&self) -> impl Iterator<Item = (HoleSlot, Hole)> + '_ {
        HoleSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.hole(slot).map(|h| (slot, h)))
    }

    pub fn any_hole(&self) -> bool {
        self.holes.iter().any(Option::is_some)
    }

    /// Shift every present hole except `except` by the same mm delta.
    pub fn translate_holes(&mut self, dx: f64, dy: f64, except: Option<HoleSlot>) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        for slot in HoleSlot::ALL {
            if Some(slot) == except {
                continue;
            }
            if let Some(h) = self.holes[slot.index()].as_mut() {
                h.offset_x += dx;
                h.offset_y += dy;
            }
        }
        self.notify();
    }

    // ----- basin -----

    /// Replace the basin. Missing offsets default to the centerline and the
    /// board mid-depth.
    pub fn set_basin(&mut self, spec: BasinSpec) {
        self.basin = Some(Basin {
            shape: spec.shape.sanitized(),
            offset_x: finite(spec.offset_x).unwrap_or(0.0),
            offset_y: finite(spec.offset_y).unwrap_or(DEFAULT_OFFSET_Y_MM),
        });
        self.notify();
    }

    pub fn move_basin(&mut self, offset_x: f64, offset_y: f64) {
        if !offset_x.is_finite() || !offset_y.is_finite() {
            return;
        }
        if let Some(b) = self.basin.as_mut() {
            b.offset_x = offset_x;
            b.offset_y = offset_y;
            self.notify();
        }
    }

    pub fn clear_basin(&mut self) {
        self.basin = None;
        self.notify();
    }

    pub fn has_basin(&self) -> bool {
        self.basin.is_some()
    }

    pub fn basin(&self) -> Option<&Basin> {
        self.basin.as_ref()
    }

    /// Largest radius the current basin accepts.
    pub fn max_corner_radius(&self) -> f64 {
        self.basin
            .map(|b| b.shape.max_corner_radius())
            .unwrap_or(f64::INFINITY)
    }

    /// Store a corner radius clamped to `[0, max_corner_radius()]` and return
    /// the value actually stored. Callers resync their inputs from it.
    pub fn set_corner_radius(&mut self, radius: f64) -> f64 {
        let requested = if radius.is_finite() { radius } else { 0.0 };
        let clamped = requested.max(0.0).min(self.max_corner_radius());
        if clamped != requested {
            log::debug!("corner radius {requested} clamped to {clamped}");
        }
        self.corner_radius = clamped;
        self.notify();
        clamped
    }

    pub fn clear_corner_radius(&mut self) -> f64 {
        self.corner_radius = 0.0;
        self.notify();
        self.corner_radius
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Radius as drawn: the stored value limited by the current basin, zero
    /// for circles or without a basin.
    pub fn effective_corner_radius(&self) -> f64 {
        match self.basin {
            Some(b) if b.shape.takes_corner_radius() => {
                self.corner_radius.min(b.shape.max_corner_radius()).max(0.0)
            }
            _ => 0.0,
        }
    }

    // ----- cutout -----

    pub fn set_cutout(&mut self, cutout: Cutout) {
        self.cutout = Some(cutout.sanitized());
        self.notify();
    }

    pub fn clear_cutout(&mut self) {
        self.cutout = None;
        self.notify();
    }

    pub fn has_cutout(&self) -> bool {
        self.cutout.is_some()
    }

    pub fn cutout(&self) -> Option<&Cutout> {
        self.cutout.as_ref()
    }

    // ----- modes -----

    pub fn set_orientation(&mut self, orientation: Option<TapOrientation>) {
        self.orientation = orientation;
        self.notify();
    }

    pub fn orientation(&self) -> Option<TapOrientation> {
        self.orientation
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        self.notify();
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn double_available(&self) -> bool {
        DOUBLE_WIDTHS_MM.contains(&self.board_width)
    }

    /// Enable or disable the double layout. Enabling is refused on narrow
    /// boards; disabling clears the second tap and waste. Returns the mode in
    /// effect afterwards.
    pub fn set_double_mode(&mut self, enabled: bool) -> bool {
        let enabled = enabled && self.double_available();
        self.double_mode = enabled;
        if !enabled {
            self.holes[HoleSlot::Tap2.index()] = None;
            self.holes[HoleSlot::Waste2.index()] = None;
        }
        self.notify();
        enabled
    }

    pub fn is_double_mode(&self) -> bool {
        self.double_mode
    }

    pub fn set_show_measurements(&mut self, show: bool) {
        self.show_measurements = show;
        self.notify();
    }

    pub fn show_measurements(&self) -> bool {
        self.show_measurements
    }

    /// Remove every hole, the basin and the cutout.
    pub fn clear_all(&mut self) {
        self.holes = [None; 6];
        self.basin = None;
        self.cutout = None;
        self.notify();
    }
}
