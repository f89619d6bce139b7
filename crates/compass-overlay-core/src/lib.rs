//! Core types for the compass grid overlay.
//!
//! This crate is purely geometric: transform state, the three coordinate
//! frames and the forward/inverse maps between them, plus the validated
//! value types (heatmap matrix, markers) that cross the input boundary.
//! It does not draw anything.

mod affine;
mod grid;
mod heatmap;
mod logger;
mod mapper;
mod marker;
mod transform;

pub use affine::Affine2;
pub use grid::{CellIndex, Direction, GridTopology};
pub use heatmap::{DatasetError, HeatmapDataset};
pub use mapper::{CoordinateMapper, FacingRotation};
pub use marker::Marker;
pub use transform::{TransformState, Viewport, DEFAULT_SCALE, GRID_DIM, SCALE_EPSILON};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_for_verbosity, level_from_env, LOG_ENV};

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}
