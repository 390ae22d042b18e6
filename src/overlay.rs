use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;

use crate::geodesy::{GeoPoint, GeoRing};


/// Extra rendering data attached to an overlay.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Decoration {
    pub user_data: Option<String>,
    pub selected: bool,
    pub icon: Option<PathBuf>,
    pub opacity: f64,
    /// Stacking order, lower first.
    pub z_index: i32,
    pub stroke_width: f64,
    pub stroke_color: Option<String>,
}

impl Default for Decoration {
    fn default() -> Self {
        Self {
            user_data: None,
            selected: false,
            icon: None,
            opacity: 1.0,
            z_index: 0,
            stroke_width: 1.0,
            stroke_color: None,
        }
    }
}


#[derive(Clone, Debug)]
pub enum Overlay {
    Polyline {
        ring: GeoRing,
        /// Render as a filled polygon instead of an open line.
        closed: bool,
        decoration: Decoration,
    },
    Marker {
        position: GeoPoint,
        decoration: Decoration,
    },
}

impl Overlay {
    pub fn decoration(&self) -> &Decoration {
        match self {
            Overlay::Polyline { decoration, .. } => decoration,
            Overlay::Marker { decoration, .. } => decoration,
        }
    }
}


#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayHandle(u64);

impl OverlayHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}


/// Something that displays overlays and hands out handles for them.
pub trait MapLayer {
    fn add(&mut self, overlay: Overlay) -> OverlayHandle;

    fn remove(&mut self, handle: OverlayHandle) -> Result<Overlay>;
}


/// Remembers which overlay currently occupies each named slot.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    slots: HashMap<String, OverlayHandle>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: &str) -> Option<OverlayHandle> {
        self.slots.get(slot).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Put `overlay` in `slot`, removing the overlay that was there before from `layer`.
    pub fn replace(&mut self, layer: &mut impl MapLayer, slot: &str, overlay: Overlay) -> Result<OverlayHandle> {
        if let Some(old) = self.slots.remove(slot) {
            layer.remove(old).with_context(|| format!("Could not remove the previous overlay of slot {slot:?}"))?;
            debug!("Slot {slot:?}: removed overlay #{}", old.id());
        }

        let handle = layer.add(overlay);
        debug!("Slot {slot:?}: added overlay #{}", handle.id());

        self.slots.insert(slot.to_string(), handle);
        Ok(handle)
    }

    /// Remove whatever occupies `slot`, if anything.
    pub fn clear(&mut self, layer: &mut impl MapLayer, slot: &str) -> Result<Option<Overlay>> {
        match self.slots.remove(slot) {
            Some(handle) => Ok(Some(layer.remove(handle)?)),
            None => Ok(None),
        }
    }
}
