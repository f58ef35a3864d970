use glam::{Mat4, Vec3, Vec4};
use thiserror::Error;

/// Errors raised while constructing curve data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// A closed Catmull-Rom segment needs two neighbors on each side.
    #[error("closed curve needs at least 4 control points, got {0}")]
    DegenerateCurve(usize),
}

/// Position and (unnormalized) first derivative of a curve at some time.
///
/// Transient value, recomputed every tick.
#[derive(Debug, Clone, Copy)]
pub struct CurvePose {
    pub position: Vec3,
    pub tangent: Vec3,
}

/// Generalized Catmull-Rom basis, scaled by a factor of 2.
///
/// The caller-side evaluation multiplies by 0.5, so for `tension = 0.5` the
/// weights reduce to the standard Catmull-Rom blend.
pub fn basis_matrix(tension: f32) -> Mat4 {
    let s = tension;
    2.0 * Mat4::from_cols(
        Vec4::new(-s, 2.0 * s, -s, 0.0),
        Vec4::new(2.0 - s, s - 3.0, 0.0, 1.0),
        Vec4::new(s - 2.0, 3.0 - 2.0 * s, s, 0.0),
        Vec4::new(s, -s, 0.0, 0.0),
    )
}

/// Position on one curve segment for local parameter `u` in [0, 1).
pub fn eval_segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, basis: &Mat4, u: f32) -> Vec3 {
    let weights = basis.transpose() * Vec4::new(u * u * u, u * u, u, 1.0);
    0.5 * (weights.x * p0 + weights.y * p1 + weights.z * p2 + weights.w * p3)
}

/// First derivative on one curve segment for local parameter `u` in [0, 1).
pub fn eval_segment_derivative(
    p0: Vec3,
    p1: Vec3,
    p2: Vec3,
    p3: Vec3,
    basis: &Mat4,
    u: f32,
) -> Vec3 {
    let weights = basis.transpose() * Vec4::new(3.0 * u * u, 2.0 * u, 1.0, 0.0);
    0.5 * (weights.x * p0 + weights.y * p1 + weights.z * p2 + weights.w * p3)
}

/// Placement matrix that orients an object so its forward axis tracks
/// `direction`, with columns `[x, y, z, position]`.
///
/// A zero direction falls back to +Z, and a direction parallel to world up
/// falls back to +X for the side axis, so the frame is always orthonormal.
pub fn align_object(position: Vec3, direction: Vec3) -> Mat4 {
    let z = -direction.normalize_or_zero();
    let z = if z == Vec3::ZERO { Vec3::Z } else { z };

    let x = Vec3::Y.cross(z).normalize_or_zero();
    let x = if x == Vec3::ZERO { Vec3::X } else { x };

    let y = z.cross(x);

    Mat4::from_cols(x.extend(0.0), y.extend(0.0), z.extend(0.0), position.extend(1.0))
}

/// A closed loop of control points with a fixed basis and playback speed.
///
/// Evaluation wraps modulo the point count at both ends, so the curve has no
/// clamped boundary segments. Immutable after construction.
#[derive(Debug, Clone)]
pub struct ControlPath {
    points: Vec<Vec3>,
    basis: Mat4,
    speed: f32,
}

impl ControlPath {
    pub fn new(points: Vec<Vec3>, tension: f32, speed: f32) -> Result<Self, PathError> {
        if points.len() < 4 {
            return Err(PathError::DegenerateCurve(points.len()));
        }
        Ok(Self {
            basis: basis_matrix(tension),
            points,
            speed,
        })
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Position on the loop at unbounded time `t` (period = point count).
    pub fn sample(&self, t: f32) -> Vec3 {
        let (i, u) = self.locate(t);
        let (p0, p1, p2, p3) = self.segment_points(i);
        eval_segment(p0, p1, p2, p3, &self.basis, u)
    }

    /// First derivative on the loop at unbounded time `t`.
    pub fn sample_derivative(&self, t: f32) -> Vec3 {
        let (i, u) = self.locate(t);
        let (p0, p1, p2, p3) = self.segment_points(i);
        eval_segment_derivative(p0, p1, p2, p3, &self.basis, u)
    }

    /// Position and derivative in one call.
    pub fn pose(&self, t: f32) -> CurvePose {
        CurvePose {
            position: self.sample(t),
            tangent: self.sample_derivative(t),
        }
    }

    /// Fold `t` into segment index and local fraction.
    fn locate(&self, t: f32) -> (usize, f32) {
        let n = self.points.len();
        let folded = t.rem_euclid(n as f32);
        // rem_euclid of a tiny negative can round up to exactly n.
        let i = (folded as usize).min(n - 1);
        (i, folded - i as f32)
    }

    fn segment_points(&self, i: usize) -> (Vec3, Vec3, Vec3, Vec3) {
        let n = self.points.len();
        (
            self.points[(i + n - 1) % n],
            self.points[i],
            self.points[(i + 1) % n],
            self.points[(i + 2) % n],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_loop() -> ControlPath {
        ControlPath::new(
            vec![
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(-1.0, 0.0, 0.0),
            ],
            0.5,
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_standard_basis_weights_interpolate_control_points() {
        let path = square_loop();
        // At integer t the curve passes through the control point itself.
        for (i, expected) in [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, 0.0),
        ]
        .iter()
        .enumerate()
        {
            let p = path.sample(i as f32);
            assert!((p - *expected).length() < 1e-5, "t={}: {:?} vs {:?}", i, p, expected);
        }
    }

    #[test]
    fn test_too_few_points_fails_fast() {
        let err = ControlPath::new(vec![Vec3::ZERO; 3], 0.5, 1.0).unwrap_err();
        assert_eq!(err, PathError::DegenerateCurve(3));
    }

    #[test]
    fn test_periodicity() {
        let path = square_loop();
        for k in [-2.0f32, -1.0, 1.0, 3.0] {
            let a = path.sample(0.37);
            let b = path.sample(0.37 + k * 4.0);
            assert!((a - b).length() < 1e-4, "offset {}: {:?} vs {:?}", k, a, b);
        }
    }

    #[test]
    fn test_align_object_zero_direction_fallback() {
        let m = align_object(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        let cols: Vec<Vec3> = (0..3).map(|i| m.col(i).truncate()).collect();
        for c in &cols {
            assert!(c.is_finite());
            assert!((c.length() - 1.0).abs() < 1e-6);
        }
        assert_eq!(cols[2], Vec3::Z);
        assert_eq!(m.col(3).truncate(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_align_object_vertical_direction_fallback() {
        // Direction parallel to world up: the side axis falls back to +X.
        let m = align_object(Vec3::ZERO, Vec3::Y);
        assert_eq!(m.col(0).truncate(), Vec3::X);
        assert!(m.is_finite());
    }
}
