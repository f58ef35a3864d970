use glam::Vec3;

use dunes::curve::{align_object, ControlPath, PathError};

fn hill_loop() -> Vec<Vec3> {
    vec![
        Vec3::new(-17.0, 7.9, 21.4),
        Vec3::new(-7.8, 3.7, -6.3),
        Vec3::new(14.4, 5.0, -15.4),
        Vec3::new(0.8, 1.9, 9.2),
        Vec3::new(-15.5, 2.7, -10.9),
        Vec3::new(-23.5, 2.4, 7.0),
    ]
}

/// The classic Catmull-Rom blend, written out longhand as a reference.
fn classic_catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

#[cfg(test)]
mod curve_tests {
    use super::*;

    #[test]
    fn test_closed_loop_periodicity() {
        let path = ControlPath::new(hill_loop(), 0.5, 1.0).unwrap();
        let n = path.len() as f32;

        for t in [0.0f32, 0.25, 1.9, 3.5, 5.999] {
            let base = path.sample(t);
            for k in [-2.0f32, -1.0, 1.0, 4.0] {
                let shifted = path.sample(t + k * n);
                assert!(
                    (base - shifted).length() < 1e-3,
                    "t={} k={}: {:?} vs {:?}",
                    t,
                    k,
                    base,
                    shifted
                );
            }
        }
    }

    #[test]
    fn test_segment_boundaries_are_continuous() {
        let path = ControlPath::new(hill_loop(), 0.5, 1.0).unwrap();

        for i in 0..path.len() {
            let end = path.sample((i + 1) as f32 - 1e-4);
            let start = path.sample((i + 1) as f32);
            assert!(
                (end - start).length() < 1e-2,
                "discontinuity after segment {}: {:?} vs {:?}",
                i,
                end,
                start
            );
        }
    }

    #[test]
    fn test_standard_tension_matches_classic_formula() {
        let points = hill_loop();
        let path = ControlPath::new(points.clone(), 0.5, 1.0).unwrap();
        let n = points.len();

        for (i, u) in [(0usize, 0.3f32), (2, 0.75), (5, 0.5)] {
            let expected = classic_catmull_rom(
                points[(i + n - 1) % n],
                points[i],
                points[(i + 1) % n],
                points[(i + 2) % n],
                u,
            );
            let actual = path.sample(i as f32 + u);
            assert!(
                (expected - actual).length() < 1e-4,
                "segment {} u {}: {:?} vs {:?}",
                i,
                u,
                expected,
                actual
            );
        }
    }

    #[test]
    fn test_derivative_at_control_point_is_scaled_chord() {
        // For the generalized basis the tangent at a control point is
        // tension * (next - previous).
        let points = hill_loop();
        for tension in [0.25f32, 0.5, 1.0] {
            let path = ControlPath::new(points.clone(), tension, 1.0).unwrap();
            let tangent = path.sample_derivative(1.0);
            let expected = tension * (points[2] - points[0]);
            assert!(
                (tangent - expected).length() < 1e-3,
                "tension {}: {:?} vs {:?}",
                tension,
                tangent,
                expected
            );
        }
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let path = ControlPath::new(hill_loop(), 0.5, 1.0).unwrap();

        for t in [0.4f32, 1.5, 4.2] {
            let h = 1e-3;
            let numeric = (path.sample(t + h) - path.sample(t - h)) / (2.0 * h);
            let analytic = path.sample_derivative(t);
            assert!(
                (numeric - analytic).length() < 0.05,
                "t {}: numeric {:?} vs analytic {:?}",
                t,
                numeric,
                analytic
            );
        }
    }

    #[test]
    fn test_three_points_is_degenerate() {
        let points = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        assert_eq!(
            ControlPath::new(points, 0.5, 1.0).unwrap_err(),
            PathError::DegenerateCurve(3)
        );
    }
}

#[cfg(test)]
mod align_tests {
    use super::*;

    fn assert_orthonormal(m: glam::Mat4) {
        let x = m.col(0).truncate();
        let y = m.col(1).truncate();
        let z = m.col(2).truncate();

        for axis in [x, y, z] {
            assert!(axis.is_finite());
            assert!((axis.length() - 1.0).abs() < 1e-5, "{:?}", axis);
        }
        assert!(x.dot(y).abs() < 1e-5);
        assert!(y.dot(z).abs() < 1e-5);
        assert!(z.dot(x).abs() < 1e-5);
        // Right-handed.
        assert!((x.cross(y) - z).length() < 1e-5);
    }

    #[test]
    fn test_align_builds_orthonormal_frames() {
        let directions = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-3.0, 0.2, 7.0),
            Vec3::new(0.01, -0.99, 0.01),
            Vec3::new(5.0, 5.0, 5.0),
        ];
        for direction in directions {
            assert_orthonormal(align_object(Vec3::ZERO, direction));
        }
    }

    #[test]
    fn test_align_forward_axis_opposes_direction() {
        let direction = Vec3::new(2.0, 0.0, 1.0);
        let m = align_object(Vec3::ZERO, direction);
        let z = m.col(2).truncate();
        assert!((z + direction.normalize()).length() < 1e-5);
    }

    #[test]
    fn test_align_zero_direction_uses_fallback_frame() {
        let m = align_object(Vec3::new(4.0, 5.0, 6.0), Vec3::ZERO);
        assert_orthonormal(m);
        assert_eq!(m.col(2).truncate(), Vec3::Z);
        assert_eq!(m.col(3).truncate(), Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_align_up_direction_uses_side_fallback() {
        let m = align_object(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0));
        assert_orthonormal(m);
        assert_eq!(m.col(0).truncate(), Vec3::X);
    }

    #[test]
    fn test_align_translation_lands_in_last_column() {
        let position = Vec3::new(-18.0, 0.2, 2.0);
        let m = align_object(position, Vec3::X);
        assert_eq!(m.col(3).truncate(), position);
        assert_eq!(m.col(3).w, 1.0);
    }
}
