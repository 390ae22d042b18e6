use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::overlay::{MapLayer, Overlay, OverlayHandle};


/// Colors and opacity the map uses for every shape.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShapeStyle {
    pub fill: String,
    pub stroke: String,
    pub alpha: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: "yellow".to_string(),
            stroke: "blue".to_string(),
            alpha: 0.7,
        }
    }
}

impl ShapeStyle {
    /// Only closed polylines are filled.
    pub fn fill_for(&self, overlay: &Overlay) -> &str {
        match overlay {
            Overlay::Polyline { closed: true, .. } => &self.fill,
            Overlay::Polyline { .. } => "none",
            Overlay::Marker { .. } => &self.stroke,
        }
    }

    pub fn stroke_for<'a>(&'a self, overlay: &'a Overlay) -> &'a str {
        overlay.decoration().stroke_color.as_deref().unwrap_or(&self.stroke)
    }

    pub fn alpha_for(&self, overlay: &Overlay) -> f64 {
        self.alpha * overlay.decoration().opacity
    }
}


/// An in-memory map holding overlays by handle.
#[derive(Debug, Default)]
pub struct SceneMap {
    overlays: BTreeMap<OverlayHandle, Overlay>,
    next_id: u64,
}

impl SceneMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: OverlayHandle) -> Option<&Overlay> {
        self.overlays.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Overlays in drawing order: by z-index, then by insertion.
    pub fn overlays(&self) -> impl Iterator<Item = (OverlayHandle, &Overlay)> {
        let mut sorted: Vec<_> = self.overlays.iter().map(|(h, o)| (*h, o)).collect();
        sorted.sort_by_key(|(h, o)| (o.decoration().z_index, *h));
        sorted.into_iter()
    }
}

impl MapLayer for SceneMap {
    fn add(&mut self, overlay: Overlay) -> OverlayHandle {
        let handle = OverlayHandle::new(self.next_id);
        self.next_id += 1;
        self.overlays.insert(handle, overlay);
        handle
    }

    fn remove(&mut self, handle: OverlayHandle) -> Result<Overlay> {
        self.overlays.remove(&handle).with_context(|| format!("Overlay #{} is not on the map", handle.id()))
    }
}
