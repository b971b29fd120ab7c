//! Catalog drop-downs and asynchronous catalog loading.

use std::cell::RefCell;
use std::rc::Rc;

use benchtop_core::catalog::entry_label;
use benchtop_core::placement::{apply_selection, tap_position_options};
use benchtop_core::{Catalog, TapOrientation};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlOptionElement, HtmlSelectElement, Response, Window};

use crate::state::State;
use crate::form::select;

pub const CATALOG_SELECT: &str = "catalogSelect";
pub const TAP_POSITION_SELECT: &str = "tapPosition";
pub const DEFAULT_CATALOG: &str = "assets/basins.json";

pub(crate) fn replace_options(
    sel: &HtmlSelectElement,
    options: &[(String, String)],
) -> Result<(), JsValue> {
    let previous = sel.value();
    sel.set_inner_html("");
    for (value, label) in options {
        let opt = HtmlOptionElement::new_with_text_and_value(label, value)?;
        sel.append_child(&opt)?;
    }
    if options.iter().any(|(v, _)| *v == previous) {
        sel.set_value(&previous);
    }
    Ok(())
}

/// Fill the item drop-down, listing only double-capable basins in double mode.
pub fn populate_catalog_select(s: &State) -> Result<(), JsValue> {
    let Some(sel) = select(&s.document, CATALOG_SELECT) else {
        return Ok(());
    };
    let mut options = vec![(String::new(), "Select a basin".to_string())];
    if let Some(catalog) = s.catalog.as_ref() {
        options.extend(
            catalog
                .entries(s.store.is_double_mode())
                .filter_map(|row| Some((row.item_code()?, entry_label(row)))),
        );
    }
    replace_options(&sel, &options)
}

/// Fill the tap position drop-down for the selected item.
pub fn populate_tap_positions(s: &State) -> Result<(), JsValue> {
    let Some(sel) = select(&s.document, TAP_POSITION_SELECT) else {
        return Ok(());
    };
    let row = select(&s.document, CATALOG_SELECT)
        .map(|c| c.value())
        .filter(|code| !code.is_empty())
        .and_then(|code| s.catalog.as_ref()?.find(&code).ok());
    let options: Vec<(String, String)> = match row {
        Some(row) => tap_position_options(row, s.store.board_width(), s.store.is_double_mode())
            .into_iter()
            .map(|o| (o.orientation.as_str().to_string(), o.label))
            .collect(),
        None => Vec::new(),
    };
    replace_options(&sel, &options)
}

/// Place the selected item's holes or cut-out for the selected orientation.
/// Without a selected item nothing changes.
pub fn apply_current_selection(s: &mut State) {
    let Some(code) = select(&s.document, CATALOG_SELECT)
        .map(|c| c.value())
        .filter(|code| !code.is_empty())
    else {
        return;
    };
    let orientation = select(&s.document, TAP_POSITION_SELECT)
        .map(|t| t.value())
        .unwrap_or_default();
    let orientation = match orientation.parse::<TapOrientation>() {
        Ok(o) => o,
        Err(e) => {
            log::warn!("{e}");
            return;
        }
    };
    let State { catalog, store, .. } = s;
    let Some(catalog) = catalog.as_ref() else {
        return;
    };
    match catalog.find(&code) {
        Ok(row) => {
            let double = store.is_double_mode();
            apply_selection(store, row, orientation, double);
        }
        Err(e) => log::warn!("{e}"),
    }
}

/// Rebuild both drop-downs and re-place the current selection.
pub fn refresh_selection(s: &mut State) {
    if let Err(e) = populate_catalog_select(s).and_then(|_| populate_tap_positions(s)) {
        log::error!("catalog controls: {e:?}");
        return;
    }
    apply_current_selection(s);
}

/// Fetch and install the catalog. A load that finishes after a newer one has
/// started is discarded.
pub fn load_catalog(state: Rc<RefCell<State>>, path: String) {
    let (window, generation) = {
        let mut s = state.borrow_mut();
        (s.window.clone(), s.loads.begin())
    };
    wasm_bindgen_futures::spawn_local(async move {
        let Some(text) = fetch_catalog(&window, &path).await else {
            log::error!("could not fetch catalog from {path}");
            return;
        };
        let catalog = match Catalog::from_json(&text) {
            Ok(c) => c,
            Err(e) => {
                log::error!("catalog {path}: {e}");
                return;
            }
        };
        let mut s = state.borrow_mut();
        if !s.loads.is_current(generation) {
            log::debug!("discarding stale catalog load {generation}");
            return;
        }
        s.catalog = Some(catalog);
        refresh_selection(&mut s);
    });
}

/// Where to look for the catalog: under the host page's `window.__BASE_URL`
/// first, then the path exactly as given. Absolute URLs are used as is.
fn catalog_urls(base: Option<&str>, path: &str) -> Vec<String> {
    let path = path.trim();
    if ["http://", "https://", "data:"].iter().any(|p| path.starts_with(p)) {
        return vec![path.to_string()];
    }
    let base = base.unwrap_or("/").trim_end_matches('/');
    let resolved = format!("{base}/{}", path.trim_start_matches('/'));
    if resolved == path {
        vec![resolved]
    } else {
        vec![resolved, path.to_string()]
    }
}

async fn fetch_catalog(window: &Window, path: &str) -> Option<String> {
    let base = js_sys::Reflect::get(window, &JsValue::from_str("__BASE_URL"))
        .ok()
        .and_then(|v| v.as_string());
    for url in catalog_urls(base.as_deref(), path) {
        let Some(resp) = JsFuture::from(window.fetch_with_str(&url))
            .await
            .ok()
            .and_then(|v| v.dyn_into::<Response>().ok())
        else {
            log::debug!("fetch failed for {url}");
            continue;
        };
        if !resp.ok() {
            log::debug!("{url} answered {}", resp.status());
            continue;
        }
        if let Ok(text) = resp.text()
            && let Ok(text) = JsFuture::from(text).await
            && let Some(text) = text.as_string()
        {
            log::debug!("catalog fetched from {url}");
            return Some(text);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_urls_try_base_then_path() {
        assert_eq!(
            catalog_urls(Some("/app/"), "assets/basins.json"),
            ["/app/assets/basins.json", "assets/basins.json"]
        );
        assert_eq!(catalog_urls(None, "/assets/basins.json"), ["/assets/basins.json"]);
        assert_eq!(
            catalog_urls(Some("/app"), "https://cdn.example.com/basins.json"),
            ["https://cdn.example.com/basins.json"]
        );
    }
}
