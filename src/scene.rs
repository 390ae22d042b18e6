use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    config::{ButtonConfig, ButtonKind, SceneConfig},
    geodesy::{GeoCircle, GeoPoint},
    map::SceneMap,
    overlay::{Overlay, OverlayHandle, OverlayRegistry},
};


/// The state behind the buttons: a cursor that drifts east on every press and the overlays placed so far.
#[derive(Debug)]
pub struct Scene {
    cursor: GeoPoint,
    step: f64,
    resolution: f64,
    registry: OverlayRegistry,
    map: SceneMap,
}

impl Scene {
    pub fn new(center: GeoPoint, step: f64, resolution: f64) -> Self {
        Self {
            cursor: center,
            step,
            resolution,
            registry: OverlayRegistry::new(),
            map: SceneMap::new(),
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.center, config.step, config.resolution)
    }

    pub fn cursor(&self) -> GeoPoint {
        self.cursor
    }

    pub fn map(&self) -> &SceneMap {
        &self.map
    }

    pub fn registry(&self) -> &OverlayRegistry {
        &self.registry
    }

    pub fn press(&mut self, button: &ButtonConfig) -> Result<OverlayHandle> {
        self.cursor = self.cursor.shift_longitude(self.step);
        info!("{} pressed at {:.6}, {:.6}", button.label, self.cursor.latitude, self.cursor.longitude);

        let overlay = match &button.kind {
            ButtonKind::Circle { radius, closed, decoration } => {
                let ring = GeoCircle::new(self.cursor, *radius).polygonize_with_resolution(self.resolution);
                debug!("Ring of {} m with {} points", radius, ring.len());

                Overlay::Polyline {
                    ring,
                    closed: *closed,
                    decoration: decoration.clone(),
                }
            },
            ButtonKind::Marker { decoration } => Overlay::Marker {
                position: self.cursor,
                decoration: decoration.clone(),
            },
        };

        self.registry.replace(&mut self.map, &button.slot, overlay)
    }

    /// Press the configured buttons in order, calling `after_press` with the press index after each one.
    pub fn replay(&mut self, config: &SceneConfig, mut after_press: impl FnMut(usize, &Scene) -> Result<()>) -> Result<()> {
        for (i, label) in config.presses.iter().enumerate() {
            let button = config.button(label).with_context(|| format!("Unknown button {label:?}"))?;
            self.press(button)?;
            after_press(i, self)?;
        }
        Ok(())
    }
}
