//! Export of the benchtop drawing: SVG documents, PNG snapshots and a
//! single-page PDF fitted to A4 landscape.

pub mod error;
pub mod pdf;
pub mod raster;
pub mod svg;

use benchtop_core::{FeatureStore, render};

pub use error::{ExportError, Result};
pub use pdf::{PageFit, encode_pdf, fit_to_page};
pub use raster::{encode_png, flatten_on_white};
pub use svg::SvgSurface;

/// Draw the store into a standalone SVG document.
pub fn render_svg(store: &FeatureStore, width: f64, height: f64) -> String {
    let mut surface = SvgSurface::new(width, height);
    render(store, width, height, &mut surface);
    surface.finish()
}
