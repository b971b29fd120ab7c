//! Benchtop feature model: holes, basin and cut-out positioned in millimeters,
//! with the drawing routine, pointer handling and text report built on top.

pub mod catalog;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod model;
pub mod placement;
pub mod pointer;
pub mod render;
pub mod report;
pub mod store;
pub mod units;

pub use catalog::{Catalog, CatalogRow, FieldName, LoadTracker, field_for};
pub use error::{BenchtopError, Result};
pub use geometry::{CutoutPlacement, cutout_placement};
pub use model::{
    Basin, BasinShape, BasinSpec, ClockPosition, Cutout, CutoutShape, Hole, HoleKind, HoleSlot,
    TapOrientation,
};
pub use pointer::{DragTarget, PointerHandler, PointerState};
pub use render::{DrawList, Surface, render};
pub use report::{report, report_lines};
pub use store::{FeatureStore, FixedWaste, StoreObserver};
pub use units::{BoardFrame, Point};
