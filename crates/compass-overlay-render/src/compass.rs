//! Facing and reference arrows drawn at the grid origin.
//!
//! The facing arrow is the local "up" vector turned by the manual rotation
//! only. The reference arrow is the local "down" vector turned by
//! `facing − 180°` and then by the manual rotation, so relative to the grid
//! it always encodes the facing angle.

use compass_overlay_core::{normalize_degrees, CoordinateMapper, TransformState};
use nalgebra::{Point2, Rotation2, Vector2};

use crate::primitive::{ArrowRole, Primitive, Stroke};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompassArrows {
    /// Screen direction of the facing arrow, degrees in `[0, 360)`.
    pub facing_deg: f64,
    /// Screen direction of the reference arrow, degrees in `[0, 360)`.
    pub reference_deg: f64,
}

impl CompassArrows {
    pub fn compute(facing_angle_deg: f64, rotation: f64) -> Self {
        let rot_deg = rotation.to_degrees();
        let local_reference = facing_angle_deg - 180.0;
        Self {
            facing_deg: normalize_degrees(rot_deg),
            // the reference base vector already points 180° away from "up"
            reference_deg: normalize_degrees(rot_deg + local_reference + 180.0),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CompassIndicator {
    pub facing_stroke: Stroke,
    pub reference_stroke: Stroke,
    /// Arrow length as a fraction of the grid side.
    pub length_frac: f64,
}

impl CompassIndicator {
    pub fn render(&self, state: &TransformState, facing_angle_deg: f64) -> Vec<Primitive> {
        let mapper = CoordinateMapper::new(state);
        let arrows = CompassArrows::compute(facing_angle_deg, state.rotation);
        let len = self.length_frac * state.scale;
        let origin = mapper.local_to_screen(Point2::origin());

        let up = Vector2::new(0.0, -len);
        let down = Vector2::new(0.0, len);
        let reference_local =
            Rotation2::new((facing_angle_deg - 180.0).to_radians()) * down;

        vec![
            Primitive::Arrow {
                role: ArrowRole::Facing,
                tail: origin,
                tip: origin + mapper.local_vector_to_screen(up),
                angle_deg: arrows.facing_deg,
                stroke: self.facing_stroke,
            },
            Primitive::Arrow {
                role: ArrowRole::Reference,
                tail: origin,
                tip: origin + mapper.local_vector_to_screen(reference_local),
                angle_deg: arrows.reference_deg,
                stroke: self.reference_stroke,
            },
        ]
    }
}
