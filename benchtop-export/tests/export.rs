use benchtop_core::constants::{CANVAS_HEIGHT_PX, CANVAS_WIDTH_PX};
use benchtop_core::*;
use benchtop_export::*;

#[test]
fn test_svg_contains_features() {
    let mut s = FeatureStore::default();
    s.set_board_width(1200).unwrap();
    s.set_hole(HoleSlot::Tap1, Some(0.0), Some(60.0));
    s.set_basin(BasinSpec {
        shape: BasinShape::Rect {
            width: Some(400.0),
            height: Some(300.0),
        },
        offset_x: None,
        offset_y: None,
    });
    s.set_show_measurements(true);
    let svg = render_svg(&s, CANVAS_WIDTH_PX, CANVAS_HEIGHT_PX);
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("width=\"1000\" height=\"360\""));
    assert!(svg.contains(">Taphole 1 = Blue</text>"));
    assert!(svg.contains(">60 mm (back edge)</text>"));
    assert!(svg.contains("fill=\"rgba(128,128,128,0.3)\""));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_pdf_has_single_page() {
    let rgba = vec![255u8; 40 * 20 * 4];
    let pdf = encode_pdf(40, 20, &rgba).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/Count 1"));
    assert!(text.contains("/Im1"));
}

#[test]
fn test_snapshot_size_is_checked() {
    assert!(matches!(
        encode_png(4, 4, &[0; 10]),
        Err(ExportError::SizeMismatch { expected: 64, actual: 10 })
    ));
    assert!(matches!(
        encode_pdf(0, 4, &[]),
        Err(ExportError::Empty { .. })
    ));
}
