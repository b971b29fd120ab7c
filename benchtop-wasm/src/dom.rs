//! Store observer and the DOM views it keeps in sync.

use benchtop_core::constants::{CANVAS_HEIGHT_PX, CANVAS_WIDTH_PX, DEFAULT_WASTE_DIAMETER_MM};
use benchtop_core::report::fmt_mm;
use benchtop_core::units::round_mm;
use benchtop_core::{BasinShape, FeatureStore, HoleSlot, StoreObserver, render, report};
use web_sys::{CanvasRenderingContext2d, Document};

use crate::canvas::CanvasSurface;
use crate::form::{field_number, has_focus, input, select, set_display};

/// Ids of the manual X/Y inputs for a slot, e.g. `tap1X` / `tap1Y`.
pub fn manual_ids(slot: HoleSlot) -> (String, String) {
    (format!("{}X", slot.as_str()), format!("{}Y", slot.as_str()))
}

/// Observer handed to the store. It owns clones of the DOM handles it needs
/// so it never touches the global state while the store is borrowed.
pub struct DomObserver {
    document: Document,
    ctx: CanvasRenderingContext2d,
}

impl DomObserver {
    pub fn new(document: Document, ctx: CanvasRenderingContext2d) -> Self {
        DomObserver { document, ctx }
    }
}

impl StoreObserver for DomObserver {
    fn waste_diameter(&self) -> f64 {
        field_number(&self.document, "wasteSize")
            .filter(|d| *d > 0.0)
            .unwrap_or(DEFAULT_WASTE_DIAMETER_MM)
    }

    fn changed(&self, store: &FeatureStore) {
        refresh(&self.document, &self.ctx, store);
    }
}

/// Redraw the canvas and bring every derived view up to date.
pub fn refresh(document: &Document, ctx: &CanvasRenderingContext2d, store: &FeatureStore) {
    render(
        store,
        CANVAS_WIDTH_PX,
        CANVAS_HEIGHT_PX,
        &mut CanvasSurface::new(ctx),
    );
    if let Some(el) = document.get_element_by_id("report") {
        el.set_text_content(Some(&report(store)));
    }
    sync_manual_inputs(document, store);
    sync_controls(document, store);
}

fn set_unless_focused(document: &Document, id: &str, value: &str) {
    if has_focus(document, id) {
        return;
    }
    if let Some(i) = input(document, id)
        && i.value() != value
    {
        i.set_value(value);
    }
}

fn sync_manual_inputs(document: &Document, store: &FeatureStore) {
    for slot in HoleSlot::REPORT_ORDER {
        let (xid, yid) = manual_ids(slot);
        let (x, y) = match store.hole(slot) {
            Some(h) => (fmt_mm(round_mm(h.offset_x)), fmt_mm(round_mm(h.offset_y))),
            None => (String::new(), String::new()),
        };
        set_unless_focused(document, &xid, &x);
        set_unless_focused(document, &yid, &y);
    }
    let (bx, by) = match store.basin() {
        Some(b) => (fmt_mm(round_mm(b.offset_x)), fmt_mm(round_mm(b.offset_y))),
        None => (String::new(), String::new()),
    };
    set_unless_focused(document, "basinX", &bx);
    set_unless_focused(document, "basinY", &by);
}

fn sync_controls(document: &Document, store: &FeatureStore) {
    if let Some(btn) = document.get_element_by_id("lockBtn") {
        btn.set_text_content(Some(if store.is_locked() { "Unlock holes" } else { "Lock holes" }));
        let _ = btn
            .class_list()
            .toggle_with_force("active", store.is_locked());
    }

    if let Some(cb) = input(document, "doubleMode") {
        cb.set_checked(store.is_double_mode());
        cb.set_disabled(!store.double_available());
    }
    set_display(document, "doubleFields", store.is_double_mode());

    if let Some(cb) = input(document, "showMeasurements") {
        cb.set_checked(store.show_measurements());
    }

    if let Some(sel) = select(document, "sizeSelect") {
        let w = store.board_width().to_string();
        if sel.value() != w {
            sel.set_value(&w);
        }
    }

    let shape = store.basin().map(|b| b.shape);
    let takes_radius = shape.is_some_and(|s| s.takes_corner_radius());
    set_display(document, "cornerRadiusFields", takes_radius);
    set_unless_focused(document, "cornerRadius", &fmt_mm(store.corner_radius()));
    if let Some(el) = document.get_element_by_id("cornerRadiusValue") {
        el.set_text_content(Some(&format!("{}mm", fmt_mm(store.effective_corner_radius()))));
    }
    if let Some(shape) = shape {
        show_basin_fields(document, Some(shape.name()));
        if let Some(sel) = select(document, "basinShape")
            && sel.value() != shape.name()
        {
            sel.set_value(shape.name());
        }
        let (d, side, w, h) = match shape {
            BasinShape::Circle { diameter } => (diameter, None, None, None),
            BasinShape::Square { side } => (None, side, None, None),
            BasinShape::Rect { width, height } => (None, None, width, height),
        };
        for (id, v) in [
            ("basinDiameter", d),
            ("basinSide", side),
            ("basinWidth", w),
            ("basinHeight", h),
        ] {
            if let Some(v) = v {
                set_unless_focused(document, id, &fmt_mm(v));
            }
        }
    }
}

/// Show only the size fields that belong to the chosen basin shape.
pub fn show_basin_fields(document: &Document, shape: Option<&str>) {
    set_display(document, "basinCircleFields", shape == Some("circle"));
    set_display(document, "basinSquareFields", shape == Some("square"));
    set_display(document, "basinRectFields", shape == Some("rect"));
}

/// Highlight the armed placement button.
pub fn sync_placement_buttons(document: &Document, armed: Option<HoleSlot>) {
    for slot in HoleSlot::REPORT_ORDER {
        if let Some(btn) = document.get_element_by_id(&format!("place-{}", slot.as_str())) {
            let _ = btn
                .class_list()
                .toggle_with_force("active", armed == Some(slot));
        }
    }
}
