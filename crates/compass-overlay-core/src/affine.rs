use nalgebra::{Matrix3, Point2, Rotation2, Vector3};

/// 2D affine transform stored as a homogeneous 3×3 matrix.
///
/// The bottom row is always `[0, 0, 1]`, so `apply` never divides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix3<f64>,
}

impl Affine2 {
    pub fn new(m: Matrix3<f64>) -> Self {
        Self { m }
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(Matrix3::new(
            1.0, 0.0, tx, //
            0.0, 1.0, ty, //
            0.0, 0.0, 1.0,
        ))
    }

    /// Rotation by `theta` radians using `R(θ) = [[cos, -sin], [sin, cos]]`.
    pub fn rotation(theta: f64) -> Self {
        let r = Rotation2::new(theta);
        let r = r.matrix();
        Self::new(Matrix3::new(
            r[(0, 0)],
            r[(0, 1)],
            0.0, //
            r[(1, 0)],
            r[(1, 1)],
            0.0, //
            0.0,
            0.0,
            1.0,
        ))
    }

    /// `self.then(next)` applies `self` first, then `next`.
    #[inline]
    pub fn then(&self, next: &Affine2) -> Affine2 {
        Affine2::new(next.m * self.m)
    }

    #[inline]
    pub fn apply(&self, p: Point2<f64>) -> Point2<f64> {
        let v = self.m * Vector3::new(p.x, p.y, 1.0);
        Point2::new(v[0], v[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn assert_close(a: Point2<f64>, b: Point2<f64>, tol: f64) {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        assert!(
            dx < tol && dy < tol,
            "expected ({:.6},{:.6}) ~ ({:.6},{:.6}) within {}",
            a.x,
            a.y,
            b.x,
            b.y,
            tol
        );
    }

    #[test]
    fn quarter_turn_maps_x_axis_onto_y_axis() {
        let r = Affine2::rotation(FRAC_PI_2);
        assert_close(r.apply(Point2::new(1.0, 0.0)), Point2::new(0.0, 1.0), 1e-12);
        assert_close(r.apply(Point2::new(0.0, 1.0)), Point2::new(-1.0, 0.0), 1e-12);
    }

    #[test]
    fn then_applies_left_to_right() {
        let t = Affine2::translation(10.0, 0.0);
        let r = Affine2::rotation(FRAC_PI_2);
        // rotate first, then translate
        let rt = r.then(&t);
        assert_close(rt.apply(Point2::new(1.0, 0.0)), Point2::new(10.0, 1.0), 1e-12);
        // translate first, then rotate
        let tr = t.then(&r);
        assert_close(tr.apply(Point2::new(1.0, 0.0)), Point2::new(0.0, 11.0), 1e-12);
    }
}
