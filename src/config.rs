use std::{collections::HashSet, path::PathBuf};

use anyhow::{ensure, Result};
use serde::Deserialize;

use crate::{geodesy::{is_valid_resolution, GeoPoint, DEGREES_BETWEEN_POINTS, MAX_RING_POINTS}, map::ShapeStyle, overlay::Decoration};

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub enum ButtonKind {
    Circle {
        radius: f64,
        #[serde(default)]
        closed: bool,
        #[serde(default)]
        decoration: Decoration,
    },
    Marker {
        #[serde(default)]
        decoration: Decoration,
    },
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ButtonConfig {
    pub label: String,
    /// Pressing a button replaces the overlay previously placed in the same slot.
    pub slot: String,
    pub kind: ButtonKind,
}

impl ButtonConfig {
    pub fn new(label: &str, slot: &str, kind: ButtonKind) -> Self {
        Self {
            label: label.to_string(),
            slot: slot.to_string(),
            kind,
        }
    }
}

pub fn default_buttons() -> Vec<ButtonConfig> {
    let extended = || Decoration {
        stroke_width: 3.0,
        ..Decoration::default()
    };

    vec![
        ButtonConfig::new("OrigPoly", "orig-polyline", ButtonKind::Circle {
            radius: 2500.0,
            closed: false,
            decoration: Decoration::default(),
        }),
        ButtonConfig::new("ExtendedPoly", "extended-polyline", ButtonKind::Circle {
            radius: 5000.0,
            closed: false,
            decoration: extended(),
        }),
        ButtonConfig::new("OrigMarker", "orig-marker", ButtonKind::Marker {
            decoration: Decoration::default(),
        }),
        ButtonConfig::new("ExtendedMarker", "extended-marker", ButtonKind::Marker {
            decoration: extended(),
        }),
    ]
}

fn default_center() -> GeoPoint {
    GeoPoint::new(59.31, 18.06)
}

fn default_step() -> f64 {
    0.01
}

fn default_resolution() -> f64 {
    DEGREES_BETWEEN_POINTS
}

fn default_marker_radius() -> f64 {
    0.002
}

pub fn check_resolution(resolution: f64) -> Result<()> {
    ensure!(is_valid_resolution(resolution), "Resolution {resolution} should be in (0, 360] and give at most {MAX_RING_POINTS} points");
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct SceneConfig {
    pub name: String,
    pub outdir: PathBuf,
    #[serde(default = "default_center")]
    pub center: GeoPoint,
    /// Longitude added to the cursor on every press, in degrees.
    #[serde(default = "default_step")]
    pub step: f64,
    /// Bearing between ring points, in degrees.
    #[serde(default = "default_resolution")]
    pub resolution: f64,
    /// Marker radius in the preview, in degrees.
    #[serde(default = "default_marker_radius")]
    pub marker_radius: f64,
    #[serde(default)]
    pub style: ShapeStyle,
    #[serde(default = "default_buttons")]
    pub buttons: Vec<ButtonConfig>,
    #[serde(default)]
    pub presses: Vec<String>,
}

impl SceneConfig {
    pub fn validate(&self) -> Result<()> {
        check_resolution(self.resolution)?;
        ensure!(self.step.is_finite(), "Step {} should be finite", self.step);
        ensure!(self.marker_radius > 0.0, "Marker radius {} should be positive", self.marker_radius);

        let alpha = self.style.alpha;
        ensure!((0.0..=1.0).contains(&alpha), "Alpha {alpha} should be in [0, 1]");

        let mut labels = HashSet::new();
        for button in &self.buttons {
            ensure!(labels.insert(button.label.as_str()), "Button {:?} is defined more than once", button.label);
        }

        for press in &self.presses {
            ensure!(labels.contains(press.as_str()), "Press of an unknown button {press:?}");
        }

        Ok(())
    }

    pub fn button(&self, label: &str) -> Option<&ButtonConfig> {
        self.buttons.iter().find(|b| b.label == label)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() -> Result<()> {
        let config: SceneConfig = serde_norway::from_str("name: demo\noutdir: tmp/demo\n")?;
        config.validate()?;

        assert_eq!(config.center, GeoPoint::new(59.31, 18.06));
        assert_eq!(config.step, 0.01);
        assert_eq!(config.resolution, 8.0);
        assert_eq!(config.style, ShapeStyle::default());
        assert_eq!(config.buttons, default_buttons());
        assert!(config.presses.is_empty());

        Ok(())
    }

    #[test]
    fn custom_buttons() -> Result<()> {
        let yaml = r#"
name: custom
outdir: tmp/custom
center: { latitude: 0.0, longitude: 0.0 }
buttons:
  - label: Big
    slot: big
    kind: !Circle
      radius: 10000.0
      closed: true
      decoration:
        user_data: hello
        z_index: 2
  - label: Pin
    slot: pin
    kind: !Marker {}
presses: [Big, Pin, Big]
"#;
        let config: SceneConfig = serde_norway::from_str(yaml)?;
        config.validate()?;

        let big = config.button("Big").unwrap();
        match &big.kind {
            ButtonKind::Circle { radius, closed, decoration } => {
                assert_eq!(*radius, 10000.0);
                assert!(*closed);
                assert_eq!(decoration.user_data.as_deref(), Some("hello"));
                assert_eq!(decoration.z_index, 2);
                assert_eq!(decoration.opacity, 1.0);
            },
            kind => panic!("Unexpected kind {kind:?}"),
        }

        assert_eq!(config.presses.len(), 3);

        Ok(())
    }

    #[test]
    fn unknown_press_is_rejected() -> Result<()> {
        let config: SceneConfig = serde_norway::from_str("name: x\noutdir: tmp/x\npresses: [Nope]\n")?;
        assert!(config.validate().is_err());
        Ok(())
    }

    #[test]
    fn bad_resolution_is_rejected() -> Result<()> {
        for resolution in ["0.0", "-8.0", "400.0", ".nan", "1.0e-300", "0.0001"] {
            let yaml = format!("name: x\noutdir: tmp/x\nresolution: {resolution}\n");
            let config: SceneConfig = serde_norway::from_str(&yaml)?;
            assert!(config.validate().is_err(), "resolution {resolution} was accepted");
        }
        Ok(())
    }

    #[test]
    fn tiny_resolution_is_an_error() {
        let err = check_resolution(1e-300).unwrap_err();
        assert!(err.to_string().contains("at most"), "{err}");

        assert!(check_resolution(0.001).is_ok());
        assert!(check_resolution(0.0001).is_err());
    }

    #[test]
    fn duplicate_labels_are_rejected() -> Result<()> {
        let yaml = r#"
name: x
outdir: tmp/x
buttons:
  - { label: A, slot: a, kind: !Marker {} }
  - { label: A, slot: b, kind: !Marker {} }
"#;
        let config: SceneConfig = serde_norway::from_str(yaml)?;
        assert!(config.validate().is_err());
        Ok(())
    }
}
