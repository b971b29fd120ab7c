//! Scene files: a JSON description of one benchtop layout.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use benchtop_core::constants::{DEFAULT_BOARD_WIDTH_MM, DEFAULT_WASTE_DIAMETER_MM};
use benchtop_core::placement::apply_selection;
use benchtop_core::model::CenterOverride;
use benchtop_core::{
    BasinShape, BasinSpec, Catalog, Cutout, CutoutShape, FeatureStore, FixedWaste, HoleSlot,
    TapOrientation,
};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
pub struct Offset {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct BasinScene {
    pub shape: String,
    pub diameter: Option<f64>,
    pub side: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct CutoutScene {
    #[serde(default)]
    pub shape: String,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub diameter: Option<f64>,
    #[serde(default)]
    pub corner_radius: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// Centers keyed by clock position ("12", "10", "2").
    #[serde(default)]
    pub overrides: BTreeMap<String, Offset>,
}

/// Catalog item to place before any explicit features.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Selection {
    pub catalog: PathBuf,
    pub item: String,
    #[serde(default)]
    pub orientation: String,
}

/// Every field is optional; absent fields keep the store defaults.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Scene {
    pub width: Option<u32>,
    pub waste: Option<f64>,
    pub double: bool,
    pub locked: bool,
    pub show_measurements: bool,
    pub selection: Option<Selection>,
    pub holes: BTreeMap<String, Offset>,
    pub basin: Option<BasinScene>,
    pub corner_radius: Option<f64>,
    pub cutout: Option<CutoutScene>,
    pub orientation: Option<String>,
}

impl Scene {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scene {}", path.display()))
    }

    /// Build a store holding this scene. Relative catalog paths resolve
    /// against `base`.
    pub fn build(&self, base: &Path) -> Result<FeatureStore> {
        let waste = self.waste.unwrap_or(DEFAULT_WASTE_DIAMETER_MM);
        let mut store = FeatureStore::new(Box::new(FixedWaste(waste)));
        store.set_board_width(self.width.unwrap_or(DEFAULT_BOARD_WIDTH_MM))?;
        if self.double && !store.set_double_mode(true) {
            log::warn!(
                "double layout ignored on a {} mm board",
                store.board_width()
            );
        }

        if let Some(sel) = &self.selection {
            let path = base.join(&sel.catalog);
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading catalog {}", path.display()))?;
            let catalog = Catalog::from_json(&text)?;
            let row = catalog.find(&sel.item)?;
            let orientation: TapOrientation = sel.orientation.parse()?;
            let double = store.is_double_mode();
            apply_selection(&mut store, row, orientation, double);
        }

        for (name, at) in &self.holes {
            let slot: HoleSlot = name.parse()?;
            if !store.set_hole(slot, at.x, at.y) {
                log::warn!("hole {name} needs both x and y");
            }
        }

        if let Some(b) = &self.basin {
            let shape = BasinShape::from_fields(&b.shape, b.diameter, b.side, b.width, b.height)?;
            store.set_basin(BasinSpec {
                shape,
                offset_x: b.x,
                offset_y: b.y,
            });
        }
        if let Some(r) = self.corner_radius {
            let stored = store.set_corner_radius(r);
            if stored != r {
                log::info!("corner radius {r} mm stored as {stored} mm");
            }
        }

        if let Some(c) = &self.cutout {
            store.set_cutout(c.to_cutout()?);
        }
        if let Some(o) = &self.orientation {
            store.set_orientation(Some(o.parse()?));
        }
        store.set_locked(self.locked);
        store.set_show_measurements(self.show_measurements);
        Ok(store)
    }
}

impl CutoutScene {
    fn to_cutout(&self) -> Result<Cutout> {
        let mut cutout = Cutout {
            shape: self.shape.parse::<CutoutShape>()?,
            length: self.length,
            width: self.width,
            diameter: self.diameter,
            corner_radius: self.corner_radius,
            offset_x: self.x,
            offset_y: self.y,
            ..Default::default()
        };
        for (pos, at) in &self.overrides {
            let pos = match pos.parse::<TapOrientation>()?.clock() {
                Some(pos) => pos,
                None => anyhow::bail!("cut-out override {pos:?} is not a clock position"),
            };
            *cutout.overrides.get_mut(pos) = CenterOverride::new(at.x, at.y);
        }
        Ok(cutout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchtop_core::report;

    #[test]
    fn empty_scene_uses_defaults() {
        let scene: Scene = serde_json::from_str("{}").unwrap();
        let store = scene.build(Path::new(".")).unwrap();
        assert_eq!(store.board_width(), DEFAULT_BOARD_WIDTH_MM);
        assert!(!store.any_hole());
        assert_eq!(report(&store), "");
    }

    #[test]
    fn explicit_features_are_placed() {
        let scene: Scene = serde_json::from_str(
            r#"{
                "width": 1200,
                "waste": 90,
                "double": true,
                "holes": { "tap1": { "x": 0, "y": 60 }, "waste2": { "x": 300 } },
                "basin": { "shape": "rect", "width": 400, "height": 300 },
                "corner_radius": 500
            }"#,
        )
        .unwrap();
        let store = scene.build(Path::new(".")).unwrap();
        assert!(store.is_double_mode());
        assert!(store.has_hole(HoleSlot::Tap1));
        assert!(!store.has_hole(HoleSlot::Waste2));
        assert_eq!(store.waste_diameter(), 90.0);
        assert_eq!(store.corner_radius(), 150.0);
    }

    #[test]
    fn cutout_overrides_need_clock_positions() {
        let scene: Scene = serde_json::from_str(
            r#"{ "cutout": { "shape": "rect", "length": 200, "width": 100,
                 "overrides": { "split": { "x": 1, "y": 2 } } } }"#,
        )
        .unwrap();
        assert!(scene.build(Path::new(".")).is_err());
    }

    #[test]
    fn demo_scene_places_split_layout() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos");
        let scene = Scene::from_path(&dir.join("scene.json")).unwrap();
        let store = scene.build(&dir).unwrap();
        let tap2 = store.hole(HoleSlot::Tap2).unwrap();
        assert_eq!((tap2.offset_x, tap2.offset_y), (420.0, 60.0));
        let waste1 = store.hole(HoleSlot::Waste1).unwrap();
        assert_eq!((waste1.offset_x, waste1.offset_y), (-300.0, 232.5));
        assert_eq!(store.orientation(), Some(TapOrientation::Split));
        assert!(store.is_locked());
        assert_eq!(report(&store).lines().count(), 5);
    }

    #[test]
    fn unknown_slots_are_rejected() {
        let scene: Scene =
            serde_json::from_str(r#"{ "holes": { "tap9": { "x": 0, "y": 0 } } }"#).unwrap();
        assert!(scene.build(Path::new(".")).is_err());
    }
}
