//! JSON configuration, event scripts and the persisted marker payload.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use compass_overlay_core::{
    DatasetError, GridTopology, HeatmapDataset, Marker, Viewport, DEFAULT_SCALE,
};
use compass_overlay_render::{BackgroundImage, RenderInputs, RenderStyle};
use serde::{Deserialize, Serialize};

use crate::engine::OverlayEngine;
use crate::event::ScriptStep;

/// Current version of [`MarkerPayload`].
pub const MARKER_PAYLOAD_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum OverlayIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    #[error(
        "unsupported marker payload version {found} (expected {expected})",
        expected = MARKER_PAYLOAD_VERSION
    )]
    UnsupportedVersion { found: u32 },
    #[error("marker {index} ({label:?}) has a non-finite position")]
    NonFinite { index: usize, label: String },
}

/// Versioned marker list exchanged with downstream consumers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerPayload {
    pub version: u32,
    pub markers: Vec<Marker>,
}

impl MarkerPayload {
    pub fn new(markers: &[Marker]) -> Self {
        Self {
            version: MARKER_PAYLOAD_VERSION,
            markers: markers.to_vec(),
        }
    }

    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.version != MARKER_PAYLOAD_VERSION {
            return Err(PayloadError::UnsupportedVersion {
                found: self.version,
            });
        }
        if let Some((index, m)) = self
            .markers
            .iter()
            .enumerate()
            .find(|(_, m)| !m.x.is_finite() || !m.y.is_finite())
        {
            return Err(PayloadError::NonFinite {
                index,
                label: m.label.clone(),
            });
        }
        Ok(())
    }

    /// Parse and validate a payload.
    pub fn from_json(raw: &str) -> Result<Self, OverlayIoError> {
        let payload: Self = serde_json::from_str(raw)?;
        payload.validate()?;
        Ok(payload)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, OverlayIoError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), OverlayIoError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Heatmap input either as a canonical 3x3 matrix or as direction labels
/// (`{"N": 0.8, "se": 0.3, "Center": 1}`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeatmapSource {
    Rows(Vec<Vec<f64>>),
    Directions(HashMap<String, f64>),
}

impl HeatmapSource {
    pub fn to_dataset(&self) -> Result<HeatmapDataset, DatasetError> {
        match self {
            Self::Rows(rows) => HeatmapDataset::from_rows(rows),
            Self::Directions(map) => {
                HeatmapDataset::from_labels(map.iter().map(|(label, v)| (label, *v)))
            }
        }
    }
}

fn default_scale() -> f64 {
    DEFAULT_SCALE
}

fn default_opacity() -> f64 {
    1.0
}

fn default_facing() -> f64 {
    180.0
}

/// Session configuration for headless runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default = "default_scale")]
    pub default_scale: f64,
    #[serde(default)]
    pub topology: GridTopology,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_facing")]
    pub facing_angle_deg: f64,
    #[serde(default)]
    pub heatmap: Option<HeatmapSource>,
    #[serde(default)]
    pub background: Option<BackgroundImage>,
    #[serde(default)]
    pub markers: Vec<Marker>,
    #[serde(default)]
    pub style: RenderStyle,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            default_scale: DEFAULT_SCALE,
            topology: GridTopology::default(),
            opacity: 1.0,
            facing_angle_deg: 180.0,
            heatmap: None,
            background: None,
            markers: Vec::new(),
            style: RenderStyle::default(),
        }
    }
}

impl OverlayConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, OverlayIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Validated heatmap, if one is configured.
    pub fn heatmap_dataset(&self) -> Result<Option<HeatmapDataset>, DatasetError> {
        self.heatmap.as_ref().map(HeatmapSource::to_dataset).transpose()
    }

    /// Build an engine seeded from this config.
    pub fn build_engine(&self) -> OverlayEngine {
        let mut engine = OverlayEngine::with_default_scale(self.viewport, self.default_scale)
            .with_style(self.style.clone())
            .with_markers(self.markers.clone());
        engine.set_topology(self.topology);
        engine.set_opacity(self.opacity);
        engine
    }

    /// Render inputs referencing this config's background and `heatmap`.
    pub fn render_inputs<'a>(&'a self, heatmap: Option<&'a HeatmapDataset>) -> RenderInputs<'a> {
        RenderInputs {
            facing_angle_deg: self.facing_angle_deg,
            heatmap,
            background: self.background.as_ref(),
        }
    }
}

/// Ordered input events and commands for headless replay.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventScript {
    pub steps: Vec<ScriptStep>,
}

impl EventScript {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, OverlayIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Apply every step in order.
    pub fn replay(&self, engine: &mut OverlayEngine) {
        for step in &self.steps {
            engine.apply_step(step);
        }
        log::debug!("replayed {} steps", self.steps.len());
    }
}
