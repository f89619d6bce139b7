//! Grid lines for both topologies.

use std::f64::consts::PI;

use compass_overlay_core::{CoordinateMapper, GridTopology, TransformState, GRID_DIM};
use nalgebra::Point2;

use crate::primitive::{Primitive, Stroke};

/// Number of spokes in the radial topology.
pub const SPOKE_COUNT: usize = 8;

/// Local angle of spoke 0. Spokes sit on sector boundaries, so sector 0
/// (centered straight up, local −y) lies between spoke 0 and spoke 1.
pub const FIRST_SPOKE_ANGLE: f64 = -PI / 2.0 - PI / SPOKE_COUNT as f64;

/// Draws the analysis grid at the current transform. Never mutates it.
#[derive(Clone, Copy, Debug)]
pub struct GridRenderer {
    pub stroke: Stroke,
}

impl GridRenderer {
    pub fn new(stroke: Stroke) -> Self {
        Self { stroke }
    }

    pub fn render(&self, state: &TransformState, topology: GridTopology) -> Vec<Primitive> {
        match topology {
            GridTopology::Rectangular => self.rectangular(state),
            GridTopology::Radial => self.radial(state),
        }
    }

    /// `N+1` lines per axis spanning a square of side `scale`.
    fn rectangular(&self, state: &TransformState) -> Vec<Primitive> {
        let mapper = CoordinateMapper::new(state);
        let half = state.scale * 0.5;
        let step = state.cell_size();
        let mut out = Vec::with_capacity(2 * (GRID_DIM + 1));
        for i in 0..=GRID_DIM {
            let offset = -half + i as f64 * step;
            // vertical
            out.push(Primitive::Line {
                from: mapper.local_to_screen(Point2::new(offset, -half)),
                to: mapper.local_to_screen(Point2::new(offset, half)),
                stroke: self.stroke,
            });
            // horizontal
            out.push(Primitive::Line {
                from: mapper.local_to_screen(Point2::new(-half, offset)),
                to: mapper.local_to_screen(Point2::new(half, offset)),
                stroke: self.stroke,
            });
        }
        out
    }

    /// Bounding circle of radius `scale/2` plus [`SPOKE_COUNT`] spokes.
    fn radial(&self, state: &TransformState) -> Vec<Primitive> {
        let mapper = CoordinateMapper::new(state);
        let radius = state.scale * 0.5;
        let center = mapper.local_to_screen(Point2::origin());
        let mut out = Vec::with_capacity(1 + SPOKE_COUNT);
        out.push(Primitive::Circle {
            center,
            radius,
            stroke: self.stroke,
        });
        for k in 0..SPOKE_COUNT {
            let a = FIRST_SPOKE_ANGLE + k as f64 * 2.0 * PI / SPOKE_COUNT as f64;
            let rim = Point2::new(radius * a.cos(), radius * a.sin());
            out.push(Primitive::Line {
                from: center,
                to: mapper.local_to_screen(rim),
                stroke: self.stroke,
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Rgba;
    use approx::assert_relative_eq;

    fn renderer() -> GridRenderer {
        GridRenderer::new(Stroke {
            color: Rgba::new(0, 0, 0, 1.0),
            width: 1.0,
        })
    }

    fn lines(prims: &[Primitive]) -> Vec<(Point2<f64>, Point2<f64>)> {
        prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn rectangular_grid_has_four_lines_per_axis() {
        let state = TransformState::default();
        let prims = renderer().render(&state, GridTopology::Rectangular);
        assert_eq!(prims.len(), 8);
        let ls = lines(&prims);
        // first vertical line is the left edge of the 200px square at (300,300)
        assert_relative_eq!(ls[0].0.x, 200.0, epsilon = 1e-9);
        assert_relative_eq!(ls[0].0.y, 200.0, epsilon = 1e-9);
        assert_relative_eq!(ls[0].1.y, 400.0, epsilon = 1e-9);
        // second vertical line one cell to the right
        assert_relative_eq!(ls[2].0.x, 200.0 + 200.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn rectangular_lines_follow_rotation() {
        let state = TransformState {
            rotation: std::f64::consts::FRAC_PI_2,
            ..TransformState::default()
        };
        let ls = lines(&renderer().render(&state, GridTopology::Rectangular));
        // after a quarter turn the first "vertical" line is horizontal
        assert_relative_eq!(ls[0].0.y, ls[0].1.y, epsilon = 1e-9);
        assert_relative_eq!((ls[0].0.x - ls[0].1.x).abs(), 200.0, epsilon = 1e-9);
    }

    #[test]
    fn radial_grid_is_circle_plus_eight_spokes() {
        let state = TransformState::default();
        let prims = renderer().render(&state, GridTopology::Radial);
        assert_eq!(prims.len(), 1 + SPOKE_COUNT);
        match &prims[0] {
            Primitive::Circle { center, radius, .. } => {
                assert_eq!(*center, Point2::new(300.0, 300.0));
                assert_relative_eq!(*radius, 100.0);
            }
            other => panic!("expected circle, got {other:?}"),
        }
        for (from, to) in lines(&prims) {
            assert_eq!(from, Point2::new(300.0, 300.0));
            assert_relative_eq!((to - from).norm(), 100.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn topology_switch_leaves_state_untouched() {
        let state = TransformState::default();
        let before = state;
        let _ = renderer().render(&state, GridTopology::Radial);
        let _ = renderer().render(&state, GridTopology::Rectangular);
        assert_eq!(state, before);
    }
}
