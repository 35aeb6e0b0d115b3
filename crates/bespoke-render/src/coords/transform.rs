use super::Vec2;

/// 2D affine transform stored as `[a, b, c, d, e, f]`.
///
/// Maps a point as
///
/// ```text
/// x' = a*x + c*y + e
/// y' = b*x + d*y + f
/// ```
///
/// `translate`/`rotate`/`scale` compose onto the existing matrix (the new
/// operation is applied first to incoming points), so nested save/transform/
/// restore blocks behave like the HTML canvas API.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform(pub [f32; 6]);

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    #[inline]
    pub fn apply(&self, p: Vec2) -> Vec2 {
        let [a, b, c, d, e, f] = self.0;
        Vec2::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// `self · other`: `other` is applied to points first.
    pub fn then_apply(&self, other: &Transform) -> Transform {
        let [a, b, c, d, e, f] = self.0;
        let [oa, ob, oc, od, oe, of] = other.0;
        Transform([
            a * oa + c * ob,
            b * oa + d * ob,
            a * oc + c * od,
            b * oc + d * od,
            a * oe + c * of + e,
            b * oe + d * of + f,
        ])
    }

    pub fn translate(&mut self, tx: f32, ty: f32) {
        *self = self.then_apply(&Transform([1.0, 0.0, 0.0, 1.0, tx, ty]));
    }

    pub fn rotate(&mut self, angle: f32) {
        let (sn, cs) = angle.sin_cos();
        *self = self.then_apply(&Transform([cs, sn, -sn, cs, 0.0, 0.0]));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        *self = self.then_apply(&Transform([sx, 0.0, 0.0, sy, 0.0, 0.0]));
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        let [a, b, c, d, _, _] = self.0;
        a * d - b * c
    }

    /// Uniform scale estimate used to size tessellation in device pixels.
    #[inline]
    pub fn average_scale(&self) -> f32 {
        self.determinant().abs().sqrt()
    }

    pub fn inverse(&self) -> Option<Transform> {
        let det = self.determinant();
        if det.abs() < 1e-12 || !det.is_finite() {
            return None;
        }
        let [a, b, c, d, e, f] = self.0;
        let inv = 1.0 / det;
        Some(Transform([
            d * inv,
            -b * inv,
            -c * inv,
            a * inv,
            (c * f - d * e) * inv,
            (b * e - a * f) * inv,
        ]))
    }

    pub fn approx_eq(&self, other: &Transform, eps: f32) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(x, y)| (x - y).abs() <= eps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn translate_then_inverse_translate_is_identity() {
        let mut t = Transform::IDENTITY;
        t.rotate(0.7);
        t.scale(2.0, 0.5);
        let before = t;
        t.translate(13.5, -4.25);
        t.translate(-13.5, 4.25);
        assert!(t.approx_eq(&before, 1e-5));
    }

    #[test]
    fn translate_composes_through_scale() {
        let mut t = Transform::IDENTITY;
        t.scale(2.0, 3.0);
        t.translate(10.0, 10.0);
        assert!(close(t.apply(Vec2::zero()), Vec2::new(20.0, 30.0)));
    }

    #[test]
    fn rotate_quarter_turn_maps_x_axis_to_y_axis() {
        let mut t = Transform::IDENTITY;
        t.rotate(FRAC_PI_2);
        assert!(close(t.apply(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn nested_translate_rotate_applies_innermost_first() {
        let mut t = Transform::IDENTITY;
        t.translate(100.0, 0.0);
        t.rotate(FRAC_PI_2);
        // (10, 0) rotates to (0, 10) then shifts by 100.
        assert!(close(t.apply(Vec2::new(10.0, 0.0)), Vec2::new(100.0, 10.0)));
    }

    #[test]
    fn inverse_round_trips_points() {
        let mut t = Transform::IDENTITY;
        t.translate(5.0, -7.0);
        t.rotate(1.1);
        t.scale(3.0, 0.25);
        let inv = t.inverse().unwrap();
        let p = Vec2::new(12.0, 34.0);
        assert!(close(inv.apply(t.apply(p)), p));
    }

    #[test]
    fn degenerate_scale_has_no_inverse() {
        let mut t = Transform::IDENTITY;
        t.scale(0.0, 1.0);
        assert!(t.inverse().is_none());
    }
}
