//! Basin catalog rows and typed field names.
//!
//! Rows are flat maps of column name to cell. Column names encode the board
//! size, tap clock position, hole kind and axis, e.g. `1200_10_t2_x` is the
//! second tap's X offset on a 1200mm board at 10 o'clock.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BenchtopError, Result};
use crate::model::{CenterOverride, ClockPosition, Cutout, CutoutOverrides, CutoutShape, HoleKind};

/// Numeric value of a cell. Blank, `NA`, `-` and non-numeric text are absent.
pub fn parse_cell(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() || t.eq_ignore_ascii_case("NA") || t == "-" {
                return None;
            }
            t.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

fn is_yes(v: Option<&Value>) -> bool {
    match v {
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("Y"),
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}

/// Position component of a hole field name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldPosition {
    Clock(ClockPosition),
    /// First pair of the split double layout (10 o'clock, left basin).
    TenLeft,
    /// Second pair of the split double layout (2 o'clock, right basin).
    TwoRight,
    /// Waste-only placement when no tap hole is wanted.
    NoTap,
}

impl FieldPosition {
    fn token(self) -> &'static str {
        match self {
            FieldPosition::Clock(c) => c.as_str(),
            FieldPosition::TenLeft => "10l",
            FieldPosition::TwoRight => "2r",
            FieldPosition::NoTap => "nth",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    fn token(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

/// Validated catalog column name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldName(String);

impl FieldName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build a hole offset column name:
/// `[{size}_]{position}_{t|w}[2]_{x|y}`.
pub fn field_for(
    size: Option<u32>,
    position: FieldPosition,
    kind: HoleKind,
    axis: Axis,
    secondary: bool,
) -> FieldName {
    let kind = match kind {
        HoleKind::Tap => "t",
        HoleKind::Waste => "w",
    };
    let second = if secondary { "2" } else { "" };
    let tail = format!("{}_{kind}{second}_{}", position.token(), axis.token());
    FieldName(match size {
        Some(size) => format!("{size}_{tail}"),
        None => tail,
    })
}

/// Cut-out geometry columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CutoutField {
    Shape,
    Radius,
    Length,
    Width,
    Axis(Axis),
    Override(ClockPosition, Axis),
}

impl CutoutField {
    pub fn name(self) -> FieldName {
        FieldName(match self {
            CutoutField::Shape => "setCutout".to_string(),
            CutoutField::Radius => "c_radius".to_string(),
            CutoutField::Length => "c_l".to_string(),
            CutoutField::Width => "c_w".to_string(),
            CutoutField::Axis(a) => format!("c_{}", a.token()),
            CutoutField::Override(pos, a) => format!("{}_c_{}", pos.as_str(), a.token()),
        })
    }
}

/// One catalog entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogRow {
    fields: HashMap<String, Value>,
}

impl CatalogRow {
    pub fn new(fields: HashMap<String, Value>) -> Self {
        CatalogRow { fields }
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Cell as trimmed text; numbers are rendered the way they were parsed.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn number(&self, field: &FieldName) -> Option<f64> {
        self.fields.get(field.as_str()).and_then(parse_cell)
    }

    /// Both coordinates of a hole, or `None` when either is absent.
    pub fn point(&self, x: &FieldName, y: &FieldName) -> Option<(f64, f64)> {
        Some((self.number(x)?, self.number(y)?))
    }

    pub fn item_code(&self) -> Option<String> {
        self.text("Item Code")
    }

    pub fn description(&self) -> Option<String> {
        self.text("Description")
    }

    pub fn supports_double(&self) -> bool {
        is_yes(self.fields.get("double"))
    }

    pub fn is_cutout(&self) -> bool {
        is_yes(self.fields.get("cut_out"))
    }

    fn cutout_number(&self, field: CutoutField) -> Option<f64> {
        self.number(&field.name())
    }

    /// Cut-out described by this row. Circles take their diameter from the
    /// mean of length and width, or whichever of the two is present.
    pub fn cutout(&self) -> Option<Cutout> {
        if !self.is_cutout() {
            return None;
        }
        let shape = self
            .text(CutoutField::Shape.name().as_str())
            .and_then(|s| s.parse::<CutoutShape>().ok())
            .unwrap_or_default();
        let length = self.cutout_number(CutoutField::Length);
        let width = self.cutout_number(CutoutField::Width);
        let diameter = match (shape, length, width) {
            (CutoutShape::Circle, Some(l), Some(w)) => Some((l + w) / 2.0),
            (CutoutShape::Circle, l, w) => l.or(w),
            _ => None,
        };
        let mut overrides = CutoutOverrides::default();
        for pos in ClockPosition::ALL {
            *overrides.get_mut(pos) = CenterOverride::new(
                self.cutout_number(CutoutField::Override(pos, Axis::X)),
                self.cutout_number(CutoutField::Override(pos, Axis::Y)),
            );
        }
        Some(Cutout {
            shape,
            length,
            width,
            diameter,
            corner_radius: self.cutout_number(CutoutField::Radius).unwrap_or(0.0),
            offset_x: self.cutout_number(CutoutField::Axis(Axis::X)).unwrap_or(0.0),
            offset_y: self.cutout_number(CutoutField::Axis(Axis::Y)).unwrap_or(0.0),
            overrides,
        })
    }
}

/// The full basin catalog.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    rows: Vec<CatalogRow>,
}

impl Catalog {
    pub fn new(rows: Vec<CatalogRow>) -> Self {
        Catalog { rows }
    }

    /// Parse a JSON array of row objects.
    pub fn from_json(text: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(text)?;
        log::info!("catalog loaded: {} rows", catalog.rows.len());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn find(&self, code: &str) -> Result<&CatalogRow> {
        let code = code.trim();
        self.rows
            .iter()
            .find(|r| r.item_code().as_deref() == Some(code))
            .ok_or_else(|| BenchtopError::UnknownItem(code.to_string()))
    }

    /// Selectable rows (those with a code and description), restricted to
    /// double-capable basins when `only_double` is set.
    pub fn entries(&self, only_double: bool) -> impl Iterator<Item = &CatalogRow> {
        self.rows.iter().filter(move |r| {
            r.item_code().is_some()
                && r.description().is_some()
                && (!only_double || r.supports_double())
        })
    }
}

/// Drop-down label for a row: `{code} — {description}`.
pub fn entry_label(row: &CatalogRow) -> String {
    format!(
        "{} — {}",
        row.item_code().unwrap_or_default(),
        row.description().unwrap_or_default()
    )
}

/// Generation counter for asynchronous catalog loads. Only the most recently
/// started load may install its result.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadTracker {
    generation: u64,
}

impl LoadTracker {
    /// Start a load and return its generation.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}
