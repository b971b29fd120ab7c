use benchtop_export::{encode_pdf, encode_png};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Url};

use crate::state::State;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Pdf,
}

impl ExportFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Png => "benchtop.png",
            ExportFormat::Pdf => "benchtop.pdf",
        }
    }
}

/// Snapshot the live canvas and offer it as a download.
pub fn export_canvas(state: &State, format: ExportFormat) -> Result<(), JsValue> {
    let (w, h) = (state.canvas.width(), state.canvas.height());
    let image = state.ctx.get_image_data(0.0, 0.0, w as f64, h as f64)?;
    let rgba = image.data().0;
    let bytes = match format {
        ExportFormat::Png => encode_png(w, h, &rgba),
        ExportFormat::Pdf => encode_pdf(w, h, &rgba),
    }
    .map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::info!("exporting {} ({} bytes)", format.file_name(), bytes.len());
    offer_download(&state.document, format.file_name(), &bytes)
}

/// Hand the encoded snapshot to the browser through a temporary object URL.
fn offer_download(document: &Document, file_name: &str, bytes: &[u8]) -> Result<(), JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let blob = web_sys::Blob::new_with_u8_array_sequence(&parts)?;
    let url = Url::create_object_url_with_blob(&blob)?;
    let link = document.create_element("a")?.dyn_into::<HtmlElement>()?;
    link.set_attribute("href", &url)?;
    link.set_attribute("download", file_name)?;
    link.click();
    Url::revoke_object_url(&url)
}
