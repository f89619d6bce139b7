//! Intensity overlay in either topology.
//!
//! The dataset is laid out in canonical orientation. Every region is first
//! rotated by the facing angle around the grid-local origin, then carried
//! to screen by the manual grid transform:
//!
//! `canonical -> facing-rotated -> grid-local (identity) -> screen`.

use std::f64::consts::PI;

use compass_overlay_core::{
    Affine2, CellIndex, CoordinateMapper, FacingRotation, GridTopology, HeatmapDataset,
    TransformState, GRID_DIM,
};
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::primitive::{Primitive, Rgba, Shape};
use crate::style::HeatmapParams;

/// Angular sector of the radial topology, in canonical local radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sector {
    pub cell: CellIndex,
    pub start: f64,
    pub end: f64,
}

const SECTOR_WIDTH: f64 = PI / 4.0;
const SECTOR0_START: f64 = -PI / 2.0 - PI / 8.0;

const fn sector(index: usize, row: usize, col: usize) -> Sector {
    Sector {
        cell: CellIndex { row, col },
        start: SECTOR0_START + index as f64 * SECTOR_WIDTH,
        end: SECTOR0_START + (index + 1) as f64 * SECTOR_WIDTH,
    }
}

/// Perimeter cells of the canonical matrix, clockwise from the top-middle
/// cell. Sector `i` spans `[-112.5° + 45°·i, -67.5° + 45°·i]`.
pub const SECTOR_TABLE: [Sector; 8] = [
    sector(0, 0, 1),
    sector(1, 0, 2),
    sector(2, 1, 2),
    sector(3, 2, 2),
    sector(4, 2, 1),
    sector(5, 2, 0),
    sector(6, 1, 0),
    sector(7, 0, 0),
];

/// Renders the heatmap as translucent fills.
#[derive(Clone, Copy, Debug)]
pub struct HeatmapOverlay {
    pub params: HeatmapParams,
}

impl HeatmapOverlay {
    pub fn new(params: HeatmapParams) -> Self {
        Self { params }
    }

    /// Fills for every region above the cutoff. `opacity` is the global
    /// overlay multiplier in `[0, 1]`.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "trace", skip(self, state, data))
    )]
    pub fn render(
        &self,
        state: &TransformState,
        topology: GridTopology,
        data: &HeatmapDataset,
        facing_deg: f64,
        opacity: f64,
    ) -> Vec<Primitive> {
        let mapper = CoordinateMapper::new(state);
        let facing = FacingRotation::from_degrees(facing_deg);
        let to_screen = mapper.canonical_to_screen_affine(facing);
        let opacity = opacity.clamp(0.0, 1.0);

        let mut out = Vec::new();
        match topology {
            GridTopology::Rectangular => {
                for cell in CellIndex::all() {
                    if let Some(p) = self.cell_fill(state, &to_screen, data, cell, opacity) {
                        out.push(p);
                    }
                }
            }
            GridTopology::Radial => {
                // turn of the canonical frame on screen: facing first, manual second
                let turn = facing.radians() + state.rotation;
                let center = to_screen.apply(Point2::origin());
                let outer = state.scale * 0.5;
                let inner = outer / GRID_DIM as f64;
                if let Some(color) = self.color(data.get(CellIndex::CENTER), opacity) {
                    out.push(Primitive::Fill {
                        shape: Shape::Disc {
                            center,
                            radius: inner,
                        },
                        color,
                        region: Some(CellIndex::CENTER),
                    });
                }
                for s in &SECTOR_TABLE {
                    if let Some(color) = self.color(data.get(s.cell), opacity) {
                        out.push(Primitive::Fill {
                            shape: Shape::Wedge {
                                center,
                                inner_radius: inner,
                                outer_radius: outer,
                                start_angle: s.start + turn,
                                end_angle: s.end + turn,
                            },
                            color,
                            region: Some(s.cell),
                        });
                    }
                }
            }
        }
        log::trace!("heatmap: {} fills", out.len());
        out
    }

    fn color(&self, intensity: f64, opacity: f64) -> Option<Rgba> {
        let alpha = self.params.alpha_for(intensity)?;
        Some(self.params.color.with_alpha(alpha * opacity))
    }

    fn cell_fill(
        &self,
        state: &TransformState,
        to_screen: &Affine2,
        data: &HeatmapDataset,
        cell: CellIndex,
        opacity: f64,
    ) -> Option<Primitive> {
        let color = self.color(data.get(cell), opacity)?;
        let half = state.scale * 0.5;
        let step = state.cell_size();
        let x0 = -half + cell.col as f64 * step;
        let y0 = -half + cell.row as f64 * step;
        let points = [
            Point2::new(x0, y0),
            Point2::new(x0 + step, y0),
            Point2::new(x0 + step, y0 + step),
            Point2::new(x0, y0 + step),
        ]
        .iter()
        .map(|&p| to_screen.apply(p))
        .collect();
        Some(Primitive::Fill {
            shape: Shape::Polygon { points },
            color,
            region: Some(cell),
        })
    }
}
