use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref};

use crate::error::{Result, check_rgba};
use crate::raster::flatten_on_white;

/// A4 in landscape orientation, in millimeters.
pub const A4_LANDSCAPE_MM: (f32, f32) = (297.0, 210.0);
/// Nominal snapshot resolution used to size the image on the page.
pub const SNAPSHOT_DPI: f32 = 96.0;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

/// Image placement on the page, in points with a bottom-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageFit {
    pub page_w: f32,
    pub page_h: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

/// Fit a `width x height` pixel image onto the page at the top-left corner.
/// The image is only ever shrunk, and keeps its aspect ratio.
pub fn fit_to_page(width: u32, height: u32, page_mm: (f32, f32)) -> PageFit {
    let page_w = mm_to_pt(page_mm.0);
    let page_h = mm_to_pt(page_mm.1);
    let natural_w = width as f32 * 72.0 / SNAPSHOT_DPI;
    let natural_h = height as f32 * 72.0 / SNAPSHOT_DPI;
    let scale = (page_w / natural_w).min(page_h / natural_h).min(1.0);
    let (w, h) = (natural_w * scale, natural_h * scale);
    PageFit {
        page_w,
        page_h,
        x: 0.0,
        y: page_h - h,
        width: w,
        height: h,
        scale,
    }
}

/// Single-page A4 landscape PDF holding the RGBA snapshot.
pub fn encode_pdf(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>> {
    check_rgba(width, height, rgba)?;
    let fit = fit_to_page(width, height, A4_LANDSCAPE_MM);

    let catalog_id = Ref::new(1);
    let tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let content_id = Ref::new(5);
    let image_name = Name(b"Im1");

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, fit.page_w, fit.page_h));
    page.parent(tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(image_name, image_id);
    page.finish();

    let rgb = flatten_on_white(rgba);
    let mut image = pdf.image_xobject(image_id, &rgb);
    image.width(width as i32);
    image.height(height as i32);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    image.finish();

    let mut content = Content::new();
    content.save_state();
    content.transform([fit.width, 0.0, 0.0, fit.height, fit.x, fit.y]);
    content.x_object(image_name);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    log::debug!("PDF page fit: {fit:?}");
    Ok(pdf.finish())
}
