/// Application-wide numeric constants.
/// Values are expressed in millimeters unless noted otherwise.
pub const MM2PX: f64 = 0.5;
/// Fixed benchtop depth (front to back).
pub const BOARD_DEPTH_MM: f64 = 465.0;
/// Distance from the top of the canvas to the back edge of the benchtop (px).
pub const BOARD_TOP_PX: f64 = 20.0;
/// Canvas backing store size (px).
pub const CANVAS_WIDTH_PX: f64 = 1000.0;
pub const CANVAS_HEIGHT_PX: f64 = 360.0;
/// Default offset from the back edge for newly placed features (board mid-depth).
pub const DEFAULT_OFFSET_Y_MM: f64 = 232.5;
/// Tap hole diameter.
pub const TAP_DIAMETER_MM: f64 = 35.0;
/// Waste hole diameter used until the host supplies another one.
pub const DEFAULT_WASTE_DIAMETER_MM: f64 = 70.0;
/// Waste hole sizes offered by the size selector.
pub const WASTE_DIAMETERS_MM: [f64; 3] = [50.0, 70.0, 90.0];
/// Extra pointer slack around a hole when starting a drag (px).
pub const HIT_TOLERANCE_PX: f64 = 10.0;
/// Capture radius around the basin center when starting a drag.
pub const BASIN_CAPTURE_RADIUS_MM: f64 = 60.0;
/// Benchtop widths available in the width selector.
pub const BOARD_WIDTHS_MM: [u32; 7] = [600, 750, 900, 1050, 1200, 1500, 1800];
/// Widths wide enough for a double basin layout.
pub const DOUBLE_WIDTHS_MM: [u32; 3] = [1200, 1500, 1800];
/// Width selected when the host does not ask for another one.
pub const DEFAULT_BOARD_WIDTH_MM: u32 = 600;
/// Arrowhead length for measurement overlays (px).
pub const ARROW_HEAD_PX: f64 = 10.0;
