//! Browser front-end: binds the benchtop store to a canvas and the form
//! controls around it.

mod canvas;
mod config;
mod dom;
mod export;
mod form;
mod logger;
mod selection;
mod state;

use std::cell::RefCell;
use std::rc::Rc;

use benchtop_core::constants::{
    BOARD_WIDTHS_MM, CANVAS_HEIGHT_PX, CANVAS_WIDTH_PX, DEFAULT_WASTE_DIAMETER_MM,
    WASTE_DIAMETERS_MM,
};
use benchtop_core::units::parse_whole_mm;
use benchtop_core::{BasinShape, BasinSpec, FeatureStore, HoleSlot, PointerHandler, report};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, MouseEvent};

use config::PageConfig;
use dom::{DomObserver, manual_ids, refresh, show_basin_fields, sync_placement_buttons};
use export::{ExportFormat, export_canvas};
use logger::ConsoleLogger;
use form::{field_number, field_value, input, is_checked, select};
use selection::{
    CATALOG_SELECT, TAP_POSITION_SELECT, apply_current_selection, load_catalog,
    populate_tap_positions, refresh_selection, replace_options,
};
use state::{STATE, State, with_state};

/// Attach `f` to `event` on the element with `id`, if the page has one.
fn on(doc: &Document, id: &str, event: &str, f: impl FnMut() + 'static) -> Result<(), JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        let cb = Closure::<dyn FnMut()>::wrap(Box::new(f));
        el.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

/// Attach a pointer handler to the canvas. `f` receives the position in
/// canvas backing-store pixels, which is the space the store's board frame
/// maps from, even when CSS scales the element.
fn on_pointer(
    canvas: &HtmlCanvasElement,
    event: &str,
    mut f: impl FnMut(f64, f64) + 'static,
) -> Result<(), JsValue> {
    let cv = canvas.clone();
    let cb = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
        let rect = cv.get_bounding_client_rect();
        let x = (e.client_x() as f64 - rect.left()) * cv.width() as f64 / rect.width().max(1.0);
        let y = (e.client_y() as f64 - rect.top()) * cv.height() as f64 / rect.height().max(1.0);
        f(x, y);
    }));
    canvas.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn apply_basin_fields(s: &mut State) {
    let doc = &s.document;
    let kind = field_value(doc, "basinShape").unwrap_or_default();
    let kind = kind.trim();
    show_basin_fields(doc, Some(kind).filter(|k| !k.is_empty()));
    if kind.is_empty() {
        s.store.clear_basin();
        return;
    }
    let shape = BasinShape::from_fields(
        kind,
        field_number(doc, "basinDiameter"),
        field_number(doc, "basinSide"),
        field_number(doc, "basinWidth"),
        field_number(doc, "basinHeight"),
    );
    match shape {
        Ok(shape) => {
            let offset = s.store.basin().map(|b| (b.offset_x, b.offset_y));
            s.store.set_basin(BasinSpec {
                shape,
                offset_x: offset.map(|o| o.0),
                offset_y: offset.map(|o| o.1),
            });
        }
        Err(e) => log::warn!("{e}"),
    }
}

/// Manual X/Y entry: a hole moves only once both fields hold whole numbers.
fn apply_manual_hole(s: &mut State, slot: HoleSlot) {
    let (xid, yid) = manual_ids(slot);
    let x = field_value(&s.document, &xid).and_then(|v| parse_whole_mm(&v));
    let y = field_value(&s.document, &yid).and_then(|v| parse_whole_mm(&v));
    if let (Some(x), Some(y)) = (x, y) {
        s.store.set_hole(slot, Some(x), Some(y));
    }
}

fn apply_manual_basin(s: &mut State) {
    let x = field_value(&s.document, "basinX").and_then(|v| parse_whole_mm(&v));
    let y = field_value(&s.document, "basinY").and_then(|v| parse_whole_mm(&v));
    if let (Some(x), Some(y)) = (x, y) {
        s.store.move_basin(x, y);
    }
}

fn toggle_placement(s: &mut State, slot: HoleSlot) {
    let next = if s.pointer.placement() == Some(slot) {
        None
    } else {
        Some(slot)
    };
    s.pointer.arm_placement(next);
    sync_placement_buttons(&s.document, next);
}

fn reset_catalog_selection(s: &mut State) {
    if let Some(sel) = select(&s.document, CATALOG_SELECT) {
        sel.set_value("");
    }
}

fn run_export(s: &State, format: ExportFormat) {
    if let Err(e) = export_canvas(s, format) {
        log::error!("{} export failed: {e:?}", format.file_name());
    }
}

fn populate_fixed_selects(doc: &Document) -> Result<(), JsValue> {
    if let Some(sel) = select(doc, "sizeSelect") {
        let widths: Vec<(String, String)> = BOARD_WIDTHS_MM
            .iter()
            .map(|w| (w.to_string(), format!("{w} mm")))
            .collect();
        replace_options(&sel, &widths)?;
    }
    if let Some(sel) = select(doc, "wasteSize") {
        let sizes: Vec<(String, String)> = WASTE_DIAMETERS_MM
            .iter()
            .map(|d| (d.to_string(), format!("{d} mm")))
            .collect();
        let previous = sel.value();
        replace_options(&sel, &sizes)?;
        if !sizes.iter().any(|(v, _)| *v == previous) {
            sel.set_value(&DEFAULT_WASTE_DIAMETER_MM.to_string());
        }
    }
    Ok(())
}

fn attach_ui(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();

    // Board width
    {
        let st = state.clone();
        on(&doc, "sizeSelect", "change", move || {
            let s = &mut *st.borrow_mut();
            let Some(w) = field_value(&s.document, "sizeSelect")
                .and_then(|v| v.trim().parse::<u32>().ok())
            else {
                return;
            };
            if let Err(e) = s.store.set_board_width(w) {
                log::warn!("{e}");
                return;
            }
            refresh_selection(s);
        })?;
    }

    // Waste size only changes how holes are drawn
    {
        let st = state.clone();
        on(&doc, "wasteSize", "change", move || {
            let s = st.borrow();
            refresh(&s.document, &s.ctx, &s.store);
        })?;
    }

    // Double layout starts from an empty board
    {
        let st = state.clone();
        on(&doc, "doubleMode", "change", move || {
            let s = &mut *st.borrow_mut();
            let want = is_checked(&s.document, "doubleMode");
            s.store.batch(|store| {
                store.clear_all();
                if store.set_double_mode(want) != want {
                    log::warn!("double layout needs one of the wide boards");
                }
            });
            reset_catalog_selection(s);
            refresh_selection(s);
        })?;
    }

    // Basin shape and sizes
    for id in ["basinShape", "basinDiameter", "basinSide", "basinWidth", "basinHeight"] {
        let st = state.clone();
        on(&doc, id, "input", move || apply_basin_fields(&mut st.borrow_mut()))?;
    }
    for id in ["basinX", "basinY"] {
        let st = state.clone();
        on(&doc, id, "input", move || apply_manual_basin(&mut st.borrow_mut()))?;
    }
    {
        let st = state.clone();
        on(&doc, "clearBasin", "click", move || {
            let s = &mut *st.borrow_mut();
            if let Some(sel) = select(&s.document, "basinShape") {
                sel.set_value("");
            }
            show_basin_fields(&s.document, None);
            s.store.clear_basin();
        })?;
    }

    // Corner radius: clamp while typing, show the stored value once committed
    {
        let st = state.clone();
        on(&doc, "cornerRadius", "input", move || {
            let s = &mut *st.borrow_mut();
            let r = field_number(&s.document, "cornerRadius").unwrap_or(0.0);
            s.store.set_corner_radius(r);
        })?;
        let st = state.clone();
        on(&doc, "cornerRadius", "change", move || {
            let s = st.borrow();
            if let Some(i) = input(&s.document, "cornerRadius") {
                i.set_value(&benchtop_core::report::fmt_mm(s.store.corner_radius()));
            }
        })?;
        let st = state.clone();
        on(&doc, "clearCornerRadius", "click", move || {
            st.borrow_mut().store.clear_corner_radius();
        })?;
    }

    // Lock and measurement overlay
    {
        let st = state.clone();
        on(&doc, "lockBtn", "click", move || {
            let s = &mut *st.borrow_mut();
            let locked = !s.store.is_locked();
            s.store.set_locked(locked);
        })?;
        let st = state.clone();
        on(&doc, "showMeasurements", "change", move || {
            let s = &mut *st.borrow_mut();
            let show = is_checked(&s.document, "showMeasurements");
            s.store.set_show_measurements(show);
        })?;
    }

    // Catalog selection
    {
        let st = state.clone();
        on(&doc, CATALOG_SELECT, "change", move || {
            let s = &mut *st.borrow_mut();
            if let Err(e) = populate_tap_positions(s) {
                log::error!("tap positions: {e:?}");
            }
            apply_current_selection(s);
        })?;
        let st = state.clone();
        on(&doc, TAP_POSITION_SELECT, "change", move || {
            apply_current_selection(&mut st.borrow_mut());
        })?;
    }

    // Per-hole manual entry, click placement and clearing
    for slot in HoleSlot::REPORT_ORDER {
        let (xid, yid) = manual_ids(slot);
        for id in [xid, yid] {
            let st = state.clone();
            on(&doc, &id, "input", move || apply_manual_hole(&mut st.borrow_mut(), slot))?;
        }
        let st = state.clone();
        on(&doc, &format!("place-{}", slot.as_str()), "click", move || {
            toggle_placement(&mut st.borrow_mut(), slot);
        })?;
        let st = state.clone();
        on(&doc, &format!("clear-{}", slot.as_str()), "click", move || {
            st.borrow_mut().store.clear_hole(slot);
        })?;
    }

    // Clear everything
    {
        let st = state.clone();
        on(&doc, "clearAll", "click", move || {
            let s = &mut *st.borrow_mut();
            s.pointer.arm_placement(None);
            sync_placement_buttons(&s.document, None);
            s.store.clear_all();
            reset_catalog_selection(s);
            if let Err(e) = populate_tap_positions(s) {
                log::error!("tap positions: {e:?}");
            }
        })?;
    }

    // Export
    {
        let st = state.clone();
        on(&doc, "exportPng", "click", move || run_export(&st.borrow(), ExportFormat::Png))?;
        let st = state.clone();
        on(&doc, "exportPdf", "click", move || run_export(&st.borrow(), ExportFormat::Pdf))?;
    }

    // Mouse events
    let canvas = state.borrow().canvas.clone();
    {
        let st = state.clone();
        on_pointer(&canvas, "mousedown", move |x, y| {
            let s = &mut *st.borrow_mut();
            s.dragged = false;
            if s.pointer.placement().is_some() {
                return;
            }
            if let Some(target) = s.pointer.pointer_down(&s.store, x, y) {
                log::debug!("drag start: {target:?}");
            }
        })?;
    }
    {
        let st = state.clone();
        on_pointer(&canvas, "mousemove", move |x, y| {
            let s = &mut *st.borrow_mut();
            if s.pointer.pointer_move(&mut s.store, x, y) {
                s.dragged = true;
            }
        })?;
    }
    for event in ["mouseup", "mouseleave"] {
        let st = state.clone();
        on_pointer(&canvas, event, move |_, _| {
            st.borrow_mut().pointer.pointer_up();
        })?;
    }
    {
        let st = state.clone();
        on_pointer(&canvas, "click", move |x, y| {
            let s = &mut *st.borrow_mut();
            if std::mem::take(&mut s.dragged) {
                return;
            }
            if let Some(slot) = s.pointer.click(&mut s.store, x, y) {
                log::info!("placed {} by click", slot.report_name());
                sync_placement_buttons(&s.document, None);
            }
        })?;
    }
    Ok(())
}

fn init_canvas(
    document: &Document,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let cv = document
        .get_element_by_id("cv")
        .ok_or_else(|| JsValue::from_str("canvas #cv not found"))?
        .dyn_into::<HtmlCanvasElement>()?;
    cv.set_width(CANVAS_WIDTH_PX as u32);
    cv.set_height(CANVAS_HEIGHT_PX as u32);
    let ctx = cv
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok((cv, ctx))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let config = PageConfig::from_query(&window.location().search().unwrap_or_default());
    ConsoleLogger::init(config.log_level);
    for value in &config.ignored {
        log::warn!("ignoring {value}");
    }

    let (canvas, ctx) = init_canvas(&document)?;
    populate_fixed_selects(&document)?;
    if let Some(waste) = &config.waste
        && let Some(sel) = select(&document, "wasteSize")
    {
        sel.set_value(waste);
    }

    let mut store = FeatureStore::new(Box::new(DomObserver::new(document.clone(), ctx.clone())));
    if let Some(w) = config.board_width
        && let Err(e) = store.set_board_width(w)
    {
        log::warn!("{e}");
    }

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        canvas,
        ctx,
        store,
        pointer: PointerHandler::new(CANVAS_WIDTH_PX),
        catalog: None,
        loads: Default::default(),
        dragged: false,
    }));
    STATE.with(|st| st.replace(Some(state.clone())));

    attach_ui(state.clone())?;
    {
        let s = state.borrow();
        refresh(&s.document, &s.ctx, &s.store);
    }
    load_catalog(state, config.catalog);
    Ok(())
}

/// Arm click placement for a slot name such as `"tap1"`; an empty or unknown
/// name disarms.
#[wasm_bindgen]
pub fn arm_placement(slot: &str) {
    let slot = slot.parse::<HoleSlot>().ok();
    with_state(|s| {
        s.pointer.arm_placement(slot);
        sync_placement_buttons(&s.document, slot);
    });
}

/// Current report text.
#[wasm_bindgen]
pub fn report_text() -> String {
    with_state(|s| report(&s.store)).unwrap_or_default()
}

/// Load another catalog; an in-flight load is superseded.
#[wasm_bindgen]
pub fn reload_catalog(path: String) {
    let state = STATE.with(|st| st.borrow().as_ref().cloned());
    if let Some(state) = state {
        load_catalog(state, path);
    }
}
