use serde::{Deserialize, Serialize};

use crate::primitive::{Rgba, Stroke};

/// Heatmap opacity curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapParams {
    /// Multiplier from intensity to alpha.
    pub gain: f64,
    /// Upper bound on the per-region alpha.
    pub max_alpha: f64,
    /// Regions with `intensity <= cutoff` emit no fill at all.
    pub cutoff: f64,
    pub color: Rgba,
}

impl Default for HeatmapParams {
    fn default() -> Self {
        Self {
            gain: 0.8,
            max_alpha: 0.8,
            cutoff: 0.1,
            color: Rgba::new(255, 0, 0, 1.0),
        }
    }
}

impl HeatmapParams {
    /// Alpha for a region before the global opacity multiplier, or `None`
    /// when the region is below the cutoff.
    pub fn alpha_for(&self, intensity: f64) -> Option<f64> {
        if intensity <= self.cutoff {
            return None;
        }
        Some((intensity * self.gain).clamp(0.0, self.max_alpha))
    }
}

/// Colors and sizes for every layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub heatmap: HeatmapParams,
    pub grid_stroke: Stroke,
    pub marker_color: Rgba,
    pub active_marker_color: Rgba,
    /// Marker dot radius in screen pixels (does not zoom).
    pub marker_radius: f64,
    pub label_size: f64,
    pub label_color: Rgba,
    pub facing_stroke: Stroke,
    pub reference_stroke: Stroke,
    /// Compass arrow length as a fraction of the grid side.
    pub arrow_length_frac: f64,
    pub placeholder_text: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            heatmap: HeatmapParams::default(),
            grid_stroke: Stroke {
                color: Rgba::new(0, 0, 0, 0.8),
                width: 2.0,
            },
            marker_color: Rgba::new(0, 90, 200, 1.0),
            active_marker_color: Rgba::new(255, 140, 0, 1.0),
            marker_radius: 8.0,
            label_size: 12.0,
            label_color: Rgba::new(0, 0, 0, 1.0),
            facing_stroke: Stroke {
                color: Rgba::new(200, 0, 0, 1.0),
                width: 3.0,
            },
            reference_stroke: Stroke {
                color: Rgba::new(0, 0, 200, 1.0),
                width: 3.0,
            },
            arrow_length_frac: 0.45,
            placeholder_text: "Load a background image to align the grid".to_string(),
        }
    }
}
