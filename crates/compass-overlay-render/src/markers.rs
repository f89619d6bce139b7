use compass_overlay_core::{CoordinateMapper, Marker, TransformState};
use nalgebra::Vector2;

use crate::primitive::{Primitive, Rgba, Shape};

/// Draws markers as fixed-size dots with their label beside them.
#[derive(Clone, Copy, Debug)]
pub struct MarkerRenderer {
    pub color: Rgba,
    pub active_color: Rgba,
    pub radius: f64,
    pub label_color: Rgba,
    pub label_size: f64,
}

impl MarkerRenderer {
    /// `active` is the index of the marker being dragged, if any.
    pub fn render(
        &self,
        state: &TransformState,
        markers: &[Marker],
        active: Option<usize>,
    ) -> Vec<Primitive> {
        let mapper = CoordinateMapper::new(state);
        let label_offset = Vector2::new(self.radius + 4.0, -self.radius);
        let mut out = Vec::with_capacity(markers.len() * 2);
        for (idx, m) in markers.iter().enumerate() {
            let center = mapper.forward_point(m.position());
            let color = if active == Some(idx) {
                self.active_color
            } else {
                self.color
            };
            out.push(Primitive::Fill {
                shape: Shape::Disc {
                    center,
                    radius: self.radius,
                },
                color,
                region: None,
            });
            out.push(Primitive::Label {
                position: center + label_offset,
                text: m.label.clone(),
                color: self.label_color,
                size: self.label_size,
            });
        }
        out
    }
}
