//! Typed access to the page's form controls by element id.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement, HtmlSelectElement};

pub fn input(doc: &Document, id: &str) -> Option<HtmlInputElement> {
    doc.get_element_by_id(id)?.dyn_into::<HtmlInputElement>().ok()
}

pub fn select(doc: &Document, id: &str) -> Option<HtmlSelectElement> {
    doc.get_element_by_id(id)?.dyn_into::<HtmlSelectElement>().ok()
}

/// Value of an input or select element.
pub fn field_value(doc: &Document, id: &str) -> Option<String> {
    if let Some(i) = input(doc, id) {
        return Some(i.value());
    }
    select(doc, id).map(|s| s.value())
}

/// Numeric value of a field; blank or unparsable is absent.
pub fn field_number(doc: &Document, id: &str) -> Option<f64> {
    field_value(doc, id)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

pub fn is_checked(doc: &Document, id: &str) -> bool {
    input(doc, id).map(|i| i.checked()).unwrap_or(false)
}

pub fn set_display(doc: &Document, id: &str, visible: bool) {
    if let Some(el) = doc.get_element_by_id(id)
        && let Ok(el) = el.dyn_into::<HtmlElement>()
    {
        let _ = el
            .style()
            .set_property("display", if visible { "" } else { "none" });
    }
}

/// Whether the element with `id` currently holds keyboard focus.
pub fn has_focus(doc: &Document, id: &str) -> bool {
    doc.active_element()
        .map(|el| el.id() == id)
        .unwrap_or(false)
}
