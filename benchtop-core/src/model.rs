use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BenchtopError;
use crate::units::Point;

/// Plumbing penetration class. Tap holes have a fixed diameter, waste holes
/// take theirs from the waste size selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoleKind {
    Tap,
    Waste,
}

/// One of the six independent hole slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoleSlot {
    Tap,
    Waste,
    Tap1,
    Tap2,
    Waste1,
    Waste2,
}

impl HoleSlot {
    /// Hit-test priority order; also the draw order.
    pub const ALL: [HoleSlot; 6] = [
        HoleSlot::Tap,
        HoleSlot::Waste,
        HoleSlot::Tap1,
        HoleSlot::Tap2,
        HoleSlot::Waste1,
        HoleSlot::Waste2,
    ];

    /// Order in which holes appear in the legend and the report.
    pub const REPORT_ORDER: [HoleSlot; 4] = [
        HoleSlot::Tap1,
        HoleSlot::Waste1,
        HoleSlot::Tap2,
        HoleSlot::Waste2,
    ];

    pub fn kind(self) -> HoleKind {
        match self {
            HoleSlot::Tap | HoleSlot::Tap1 | HoleSlot::Tap2 => HoleKind::Tap,
            HoleSlot::Waste | HoleSlot::Waste1 | HoleSlot::Waste2 => HoleKind::Waste,
        }
    }

    /// Second tap/waste pair of a double layout.
    pub fn is_secondary(self) -> bool {
        matches!(self, HoleSlot::Tap2 | HoleSlot::Waste2)
    }

    pub fn color(self) -> &'static str {
        match self {
            HoleSlot::Tap | HoleSlot::Tap1 => "blue",
            HoleSlot::Tap2 => "red",
            HoleSlot::Waste | HoleSlot::Waste1 => "green",
            HoleSlot::Waste2 => "orange",
        }
    }

    /// Short canvas label drawn next to the hole.
    pub fn label(self) -> &'static str {
        match self {
            HoleSlot::Tap => "T",
            HoleSlot::Waste => "W",
            HoleSlot::Tap1 => "T1",
            HoleSlot::Tap2 => "T2",
            HoleSlot::Waste1 => "W1",
            HoleSlot::Waste2 => "W2",
        }
    }

    pub fn legend(self) -> &'static str {
        match self {
            HoleSlot::Tap => "Taphole = Blue",
            HoleSlot::Waste => "Waste hole = Green",
            HoleSlot::Tap1 => "Taphole 1 = Blue",
            HoleSlot::Tap2 => "Taphole 2 = Red",
            HoleSlot::Waste1 => "Waste hole 1 = Green",
            HoleSlot::Waste2 => "Waste hole 2 = Orange",
        }
    }

    pub fn report_name(self) -> &'static str {
        match self {
            HoleSlot::Tap => "Tap",
            HoleSlot::Waste => "Waste",
            HoleSlot::Tap1 => "Tap 1",
            HoleSlot::Tap2 => "Tap 2",
            HoleSlot::Waste1 => "Waste 1",
            HoleSlot::Waste2 => "Waste 2",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HoleSlot::Tap => "tap",
            HoleSlot::Waste => "waste",
            HoleSlot::Tap1 => "tap1",
            HoleSlot::Tap2 => "tap2",
            HoleSlot::Waste1 => "waste1",
            HoleSlot::Waste2 => "waste2",
        }
    }
}

impl FromStr for HoleSlot {
    type Err = BenchtopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HoleSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BenchtopError::UnknownSlot(s.to_string()))
    }
}

/// A placed hole. Offsets are mm from the board centerline and the back edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Hole {
    pub fn new(offset_x: f64, offset_y: f64) -> Self {
        Hole { offset_x, offset_y }
    }

    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }
}

/// Basin outline with shape-specific sizes. Missing sizes leave the basin
/// present but undrawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BasinShape {
    Circle { diameter: Option<f64> },
    Square { side: Option<f64> },
    Rect { width: Option<f64>, height: Option<f64> },
}

impl BasinShape {
    /// Build a shape from loosely typed form fields.
    pub fn from_fields(
        kind: &str,
        diameter: Option<f64>,
        side: Option<f64>,
        width: Option<f64>,
        height: Option<f64>,
    ) -> crate::Result<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(BasinShape::Circle { diameter }),
            "square" => Ok(BasinShape::Square { side }),
            "rect" | "rectangle" => Ok(BasinShape::Rect { width, height }),
            _ => Err(BenchtopError::UnknownShape(kind.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BasinShape::Circle { .. } => "circle",
            BasinShape::Square { .. } => "square",
            BasinShape::Rect { .. } => "rect",
        }
    }

    /// Largest corner radius this shape accepts; circles take no radius limit.
    pub fn max_corner_radius(&self) -> f64 {
        match *self {
            BasinShape::Circle { .. } => f64::INFINITY,
            BasinShape::Square { side } => side.unwrap_or(0.0) / 2.0,
            BasinShape::Rect { width, height } => {
                (width.unwrap_or(0.0) / 2.0).min(height.unwrap_or(0.0) / 2.0)
            }
        }
    }

    pub fn takes_corner_radius(&self) -> bool {
        !matches!(self, BasinShape::Circle { .. })
    }

    pub(crate) fn sanitized(self) -> Self {
        match self {
            BasinShape::Circle { diameter } => BasinShape::Circle {
                diameter: finite(diameter),
            },
            BasinShape::Square { side } => BasinShape::Square { side: finite(side) },
            BasinShape::Rect { width, height } => BasinShape::Rect {
                width: finite(width),
                height: finite(height),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Basin {
    pub shape: BasinShape,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Basin {
    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }
}

/// Setter input for the basin; absent offsets are backfilled by the store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BasinSpec {
    pub shape: BasinShape,
    pub offset_x: Option<f64>,
    pub offset_y: Option<f64>,
}

/// Clock position of the tap relative to the basin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockPosition {
    #[serde(rename = "12")]
    Twelve,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "2")]
    Two,
}

impl ClockPosition {
    pub const ALL: [ClockPosition; 3] =
        [ClockPosition::Ten, ClockPosition::Twelve, ClockPosition::Two];

    pub fn as_str(self) -> &'static str {
        match self {
            ClockPosition::Twelve => "12",
            ClockPosition::Ten => "10",
            ClockPosition::Two => "2",
        }
    }
}

/// Orientation chosen in the tap position selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TapOrientation {
    Clock(ClockPosition),
    /// Double layout with the first tap at 10 o'clock and the second at 2.
    Split,
    /// No tap hole; only the waste is placed.
    NoTap,
}

impl TapOrientation {
    pub fn clock(self) -> Option<ClockPosition> {
        match self {
            TapOrientation::Clock(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TapOrientation::Clock(c) => c.as_str(),
            TapOrientation::Split => "split",
            TapOrientation::NoTap => "nth",
        }
    }
}

impl FromStr for TapOrientation {
    type Err = BenchtopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase();
        match t.as_str() {
            "nth" | "" => Ok(TapOrientation::NoTap),
            "split" | "double_split_2_10" => Ok(TapOrientation::Split),
            _ if t.starts_with("12") => Ok(TapOrientation::Clock(ClockPosition::Twelve)),
            _ if t.starts_with("10") => Ok(TapOrientation::Clock(ClockPosition::Ten)),
            _ if t.starts_with('2') => Ok(TapOrientation::Clock(ClockPosition::Two)),
            _ => Err(BenchtopError::UnknownOrientation(s.to_string())),
        }
    }
}

impl fmt::Display for TapOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutoutShape {
    Circle,
    Square,
    #[default]
    Rect,
}

impl FromStr for CutoutShape {
    type Err = BenchtopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(CutoutShape::Circle),
            "square" => Ok(CutoutShape::Square),
            "rect" | "rectangle" | "" => Ok(CutoutShape::Rect),
            _ => Err(BenchtopError::UnknownShape(s.to_string())),
        }
    }
}

/// Orientation-specific center for a cutout. Only used when both coordinates
/// are present.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CenterOverride {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl CenterOverride {
    pub fn new(x: Option<f64>, y: Option<f64>) -> Self {
        CenterOverride {
            x: finite(x),
            y: finite(y),
        }
    }

    pub fn resolved(&self) -> Option<Point> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Point::new(x, y)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CutoutOverrides {
    pub twelve: CenterOverride,
    pub ten: CenterOverride,
    pub two: CenterOverride,
}

impl CutoutOverrides {
    pub fn get(&self, pos: ClockPosition) -> &CenterOverride {
        match pos {
            ClockPosition::Twelve => &self.twelve,
            ClockPosition::Ten => &self.ten,
            ClockPosition::Two => &self.two,
        }
    }

    pub fn get_mut(&mut self, pos: ClockPosition) -> &mut CenterOverride {
        match pos {
            ClockPosition::Twelve => &mut self.twelve,
            ClockPosition::Ten => &mut self.ten,
            ClockPosition::Two => &mut self.two,
        }
    }
}

/// Secondary cavity. Circles use `length` as their diameter when drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cutout {
    pub shape: CutoutShape,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub diameter: Option<f64>,
    pub corner_radius: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub overrides: CutoutOverrides,
}

impl Cutout {
    pub(crate) fn sanitized(self) -> Self {
        let nonzero = |v: Option<f64>| finite(v).filter(|n| *n != 0.0);
        Cutout {
            shape: self.shape,
            length: nonzero(self.length),
            width: nonzero(self.width),
            diameter: nonzero(self.diameter),
            corner_radius: finite(Some(self.corner_radius)).unwrap_or(0.0),
            offset_x: finite(Some(self.offset_x)).unwrap_or(0.0),
            offset_y: finite(Some(self.offset_y)).unwrap_or(0.0),
            overrides: CutoutOverrides {
                twelve: CenterOverride::new(self.overrides.twelve.x, self.overrides.twelve.y),
                ten: CenterOverride::new(self.overrides.ten.x, self.overrides.ten.y),
                two: CenterOverride::new(self.overrides.two.x, self.overrides.two.y),
            },
        }
    }
}

/// Drop non-finite numbers.
pub fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_tokens() {
        assert_eq!(
            "10".parse::<TapOrientation>().unwrap(),
            TapOrientation::Clock(ClockPosition::Ten)
        );
        assert_eq!(
            "12l".parse::<TapOrientation>().unwrap(),
            TapOrientation::Clock(ClockPosition::Twelve)
        );
        assert_eq!("split".parse::<TapOrientation>().unwrap(), TapOrientation::Split);
        assert_eq!("nth".parse::<TapOrientation>().unwrap(), TapOrientation::NoTap);
        assert!("9".parse::<TapOrientation>().is_err());
    }

    #[test]
    fn corner_limit_per_shape() {
        let sq = BasinShape::Square { side: Some(300.0) };
        assert_eq!(sq.max_corner_radius(), 150.0);
        let rect = BasinShape::Rect {
            width: Some(300.0),
            height: Some(200.0),
        };
        assert_eq!(rect.max_corner_radius(), 100.0);
        assert!(BasinShape::Circle { diameter: None }.max_corner_radius().is_infinite());
    }

    #[test]
    fn partial_override_is_unresolved() {
        assert_eq!(CenterOverride::new(Some(1.0), None).resolved(), None);
        assert_eq!(
            CenterOverride::new(Some(1.0), Some(f64::NAN)).resolved(),
            None
        );
        assert_eq!(
            CenterOverride::new(Some(1.0), Some(2.0)).resolved(),
            Some(Point::new(1.0, 2.0))
        );
    }

    #[test]
    fn slot_names_parse() {
        assert_eq!("Waste2".parse::<HoleSlot>().unwrap(), HoleSlot::Waste2);
        assert!("basin".parse::<HoleSlot>().is_err());
    }
}
