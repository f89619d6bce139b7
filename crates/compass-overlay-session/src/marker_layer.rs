use compass_overlay_core::{CoordinateMapper, Marker, TransformState};
use nalgebra::Point2;

/// Squared cell-space distance below which a pointer hits a marker
/// (hit radius ≈ 0.316 cell units).
pub const HIT_RADIUS_SQ: f64 = 0.1;

/// Ordered collection of draggable markers in normalized cell space.
///
/// Every screen-space query takes the transform by reference and inverts
/// it on the spot, so no stale inverse survives across events.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_markers(markers: Vec<Marker>) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn get(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Append a marker at the grid center. Returns its index.
    pub fn add(&mut self, label: impl Into<String>) -> usize {
        self.push(Marker::centered(label))
    }

    /// Append a marker where `screen` lands in cell space. Returns its index.
    pub fn add_at_screen_point(
        &mut self,
        label: impl Into<String>,
        state: &TransformState,
        screen: Point2<f64>,
    ) -> usize {
        let cell = CoordinateMapper::new(state).inverse_point(screen);
        self.push(Marker::new(label, cell))
    }

    /// Nearest marker within [`HIT_RADIUS_SQ`] of `screen`, if any.
    ///
    /// Equal distances resolve to the earliest inserted marker.
    pub fn hit_test(&self, state: &TransformState, screen: Point2<f64>) -> Option<usize> {
        let cell = CoordinateMapper::new(state).inverse_point(screen);
        let mut best: Option<(usize, f64)> = None;
        for (idx, m) in self.markers.iter().enumerate() {
            let d2 = (m.position() - cell).norm_squared();
            if d2.is_nan() || d2 >= HIT_RADIUS_SQ {
                continue;
            }
            // strict comparison keeps the first of equal candidates
            if best.is_none_or(|(_, b)| d2 < b) {
                best = Some((idx, d2));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Move marker `index` under `screen`. Only the active drag target may
    /// be relocated; the interaction controller is the sole caller.
    /// Returns `false` if the index is out of range.
    pub fn relocate(&mut self, index: usize, state: &TransformState, screen: Point2<f64>) -> bool {
        let cell = CoordinateMapper::new(state).inverse_point(screen);
        match self.markers.get_mut(index) {
            Some(m) => {
                m.set_position(cell);
                true
            }
            None => false,
        }
    }

    fn push(&mut self, marker: Marker) -> usize {
        log::debug!(
            "marker {:?} added at ({:.3}, {:.3})",
            marker.label,
            marker.x,
            marker.y
        );
        self.markers.push(marker);
        self.markers.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn add_places_marker_at_grid_center() {
        let mut layer = MarkerLayer::new();
        let idx = layer.add("Mirror");
        assert_eq!(idx, 0);
        assert_eq!(layer.markers()[0].position(), Point2::new(1.5, 1.5));
    }

    #[test]
    fn drop_at_viewport_center_lands_on_grid_center() {
        let mut layer = MarkerLayer::new();
        let state = TransformState::default();
        layer.add_at_screen_point("Fire", &state, Point2::new(300.0, 300.0));
        let m = &layer.markers()[0];
        assert_eq!(m.label, "Fire");
        assert_relative_eq!(m.x, 1.5, epsilon = 1e-9);
        assert_relative_eq!(m.y, 1.5, epsilon = 1e-9);
    }

    #[test]
    fn empty_layer_never_hits() {
        let layer = MarkerLayer::new();
        assert_eq!(
            layer.hit_test(&TransformState::default(), Point2::new(300.0, 300.0)),
            None
        );
    }

    #[test]
    fn hit_test_respects_radius() {
        let state = TransformState::default();
        let layer = MarkerLayer::from_markers(vec![Marker::centered("A")]);
        // one cell is 200/3 px; 0.3 cells is inside, 0.32 is outside
        let cell_px = state.cell_size();
        assert_eq!(
            layer.hit_test(&state, Point2::new(300.0 + 0.3 * cell_px, 300.0)),
            Some(0)
        );
        assert_eq!(
            layer.hit_test(&state, Point2::new(300.0 + 0.32 * cell_px, 300.0)),
            None
        );
    }

    #[test]
    fn separated_markers_hit_themselves() {
        let state = TransformState {
            translation_x: 250.0,
            translation_y: 330.0,
            scale: 310.0,
            rotation: 0.8,
        };
        let a = Marker::new("A", Point2::new(0.7, 1.1));
        let b = Marker::new("B", Point2::new(1.5, 1.4));
        // 2 x hit radius is ~0.632 cells
        assert!((a.position() - b.position()).norm() > 2.0 * HIT_RADIUS_SQ.sqrt());
        let layer = MarkerLayer::from_markers(vec![a.clone(), b.clone()]);
        let mapper = CoordinateMapper::new(&state);
        assert_eq!(layer.hit_test(&state, mapper.forward_point(a.position())), Some(0));
        assert_eq!(layer.hit_test(&state, mapper.forward_point(b.position())), Some(1));
    }

    #[test]
    fn nearest_wins_and_ties_go_to_first_inserted() {
        let state = TransformState::default();
        let mapper = CoordinateMapper::new(&state);
        let layer = MarkerLayer::from_markers(vec![
            Marker::new("far", Point2::new(1.7, 1.5)),
            Marker::new("near", Point2::new(1.55, 1.5)),
        ]);
        let query = mapper.forward_point(Point2::new(1.5, 1.5));
        assert_eq!(layer.hit_test(&state, query), Some(1));

        let tied = MarkerLayer::from_markers(vec![Marker::centered("first"), Marker::centered("second")]);
        assert_eq!(tied.hit_test(&state, query), Some(0));
    }

    #[test]
    fn marker_with_nan_position_is_never_hit() {
        let state = TransformState::default();
        let layer = MarkerLayer::from_markers(vec![
            Marker::new("bad", Point2::new(f64::NAN, 0.0)),
            Marker::centered("good"),
        ]);
        assert_eq!(layer.hit_test(&state, Point2::new(10.0, 10.0)), None);
        assert_eq!(layer.hit_test(&state, Point2::new(300.0, 300.0)), Some(1));
    }

    #[test]
    fn relocate_uses_current_transform() {
        let mut state = TransformState::default();
        let mut layer = MarkerLayer::new();
        layer.add("A");
        state.translate_by(100.0, 0.0);
        assert!(layer.relocate(0, &state, Point2::new(400.0, 300.0)));
        let m = &layer.markers()[0];
        assert_relative_eq!(m.x, 1.5, epsilon = 1e-9);
        assert_relative_eq!(m.y, 1.5, epsilon = 1e-9);
        assert!(!layer.relocate(5, &state, Point2::origin()));
    }
}
