use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::transform::GRID_DIM;

/// A labelled annotation positioned in normalized cell space.
///
/// The meaningful range is `[0, N]` per axis but positions are not clamped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

impl Marker {
    pub fn new(label: impl Into<String>, position: Point2<f64>) -> Self {
        Self {
            label: label.into(),
            x: position.x,
            y: position.y,
        }
    }

    /// Marker at the grid center `(N/2, N/2)`.
    pub fn centered(label: impl Into<String>) -> Self {
        let half = GRID_DIM as f64 * 0.5;
        Self::new(label, Point2::new(half, half))
    }

    #[inline]
    pub fn position(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn set_position(&mut self, p: Point2<f64>) {
        self.x = p.x;
        self.y = p.y;
    }

    /// Whether the marker lies inside the `[0, N]²` grid square.
    pub fn is_inside_grid(&self) -> bool {
        let n = GRID_DIM as f64;
        (0.0..=n).contains(&self.x) && (0.0..=n).contains(&self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_marker_sits_at_half_grid() {
        let m = Marker::centered("Mirror");
        assert_eq!(m.position(), Point2::new(1.5, 1.5));
        assert!(m.is_inside_grid());
    }

    #[test]
    fn positions_outside_grid_are_kept() {
        let mut m = Marker::centered("Plant");
        m.set_position(Point2::new(-0.5, 4.0));
        assert_eq!((m.x, m.y), (-0.5, 4.0));
        assert!(!m.is_inside_grid());
    }

    #[test]
    fn serializes_as_flat_label_x_y() {
        let m = Marker::new("Fire", Point2::new(1.0, 2.5));
        let json = serde_json::to_string(&m).expect("serialize");
        assert_eq!(json, r#"{"label":"Fire","x":1.0,"y":2.5}"#);
    }
}
