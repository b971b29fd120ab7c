use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_DEPTH_MM, BOARD_TOP_PX, MM2PX};

/// Basic two dimensional point. Units depend on context (mm offsets or canvas px).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

pub fn mm_to_px(mm: f64) -> f64 {
    mm * MM2PX
}

pub fn px_to_mm(px: f64) -> f64 {
    px / MM2PX
}

/// Round half-way values towards positive infinity, so drags to the left and
/// to the right of the centerline snap symmetrically in screen space.
pub fn round_mm(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Parse a manually typed offset. Only whole numbers with an optional leading
/// minus are accepted; anything else (including the partial input `-`) is
/// absent.
pub fn parse_whole_mm(s: &str) -> Option<f64> {
    let t = s.trim();
    let digits = t.strip_prefix('-').unwrap_or(t);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    t.parse::<i64>().ok().map(|v| v as f64)
}

/// Placement of the benchtop on the canvas. Offsets are measured from the
/// board centerline (x) and from the back edge (y), which is the top edge of
/// the drawn rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardFrame {
    pub x0: f64,
    pub y0: f64,
    pub width_px: f64,
    pub height_px: f64,
}

impl BoardFrame {
    /// Center the board horizontally on a canvas of `canvas_w` pixels.
    pub fn new(canvas_w: f64, board_width_mm: f64) -> Self {
        let width_px = mm_to_px(board_width_mm);
        BoardFrame {
            x0: (canvas_w - width_px) / 2.0,
            y0: BOARD_TOP_PX,
            width_px,
            height_px: mm_to_px(BOARD_DEPTH_MM),
        }
    }

    /// Canvas position of the zero offset: centerline on the back edge.
    pub fn origin(&self) -> Point {
        Point {
            x: self.x0 + self.width_px / 2.0,
            y: self.y0,
        }
    }

    /// Convert a mm offset into canvas coordinates.
    pub fn to_screen(&self, offset: Point) -> Point {
        let o = self.origin();
        Point {
            x: o.x + mm_to_px(offset.x),
            y: o.y + mm_to_px(offset.y),
        }
    }

    /// Convert canvas coordinates back into a mm offset, unrounded.
    pub fn from_screen(&self, x: f64, y: f64) -> Point {
        let o = self.origin();
        Point {
            x: px_to_mm(x - o.x),
            y: px_to_mm(y - o.y),
        }
    }

    /// Convert canvas coordinates into a whole-millimeter offset. Positions
    /// above the back edge snap onto it.
    pub fn snap_from_screen(&self, x: f64, y: f64) -> Point {
        let p = self.from_screen(x, y);
        Point {
            x: round_mm(p.x),
            y: round_mm(p.y).max(0.0),
        }
    }

    /// Board center marker in canvas coordinates.
    pub fn center(&self) -> Point {
        Point {
            x: self.x0 + self.width_px / 2.0,
            y: self.y0 + self.height_px / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_is_centered() {
        let f = BoardFrame::new(1000.0, 1200.0);
        assert_eq!(f.width_px, 600.0);
        assert_eq!(f.x0, 200.0);
        assert_eq!(f.origin(), Point::new(500.0, 20.0));
        assert_eq!(f.height_px, 232.5);
    }

    #[test]
    fn integer_offsets_survive_round_trip() {
        let f = BoardFrame::new(1000.0, 900.0);
        for x in -450..=450 {
            for y in [0, 1, 99, 232, 465] {
                let p = Point::new(x as f64, y as f64);
                let s = f.to_screen(p);
                assert_eq!(f.snap_from_screen(s.x, s.y), p);
            }
        }
    }

    #[test]
    fn half_values_round_up() {
        assert_eq!(round_mm(2.5), 3.0);
        assert_eq!(round_mm(-2.5), -2.0);
        assert_eq!(round_mm(-2.6), -3.0);
    }

    #[test]
    fn manual_input_is_integer_only() {
        assert_eq!(parse_whole_mm("-120"), Some(-120.0));
        assert_eq!(parse_whole_mm(" 45 "), Some(45.0));
        assert_eq!(parse_whole_mm("-"), None);
        assert_eq!(parse_whole_mm(""), None);
        assert_eq!(parse_whole_mm("12.5"), None);
        assert_eq!(parse_whole_mm("+3"), None);
    }
}
