use glam::{Mat4, Vec3};

use dunes::camera::{Camera, Movement, DEFAULT_PITCH, MOVE_SPEED, PITCH_BOUND};

fn assert_orthonormal_basis(camera: &Camera) {
    for axis in [camera.front(), camera.right(), camera.up()] {
        assert!(axis.is_finite());
        assert!((axis.length() - 1.0).abs() < 1e-5, "{:?}", axis);
    }
    assert!(camera.front().dot(camera.right()).abs() < 1e-5);
    assert!(camera.front().dot(camera.up()).abs() < 1e-5);
    assert!(camera.right().dot(camera.up()).abs() < 1e-5);
}

#[cfg(test)]
mod camera_tests {
    use super::*;

    #[test]
    fn test_pitch_never_reaches_the_pole() {
        let mut camera = Camera::new(Vec3::ZERO);

        // Drag the view up hard, many times over.
        for _ in 0..500 {
            camera.process_movement(0.0, 50.0);
        }
        assert!(camera.pitch() < PITCH_BOUND);
        assert_orthonormal_basis(&camera);

        for _ in 0..1000 {
            camera.process_movement(0.0, -50.0);
        }
        assert!(camera.pitch() > -PITCH_BOUND);
        assert_orthonormal_basis(&camera);
    }

    #[test]
    fn test_basis_survives_arbitrary_look_sequences() {
        let mut camera = Camera::with_angles(Vec3::new(0.0, 1.0, 3.0), -386.5, 9.5);
        let deltas = [
            (3.0, 1.0),
            (-80.0, 12.0),
            (15.5, -30.0),
            (720.0, 0.0),
            (-1.0, 88.0),
            (0.25, -0.25),
        ];
        for (dx, dy) in deltas {
            camera.process_movement(dx, dy);
            assert_orthonormal_basis(&camera);
        }
    }

    #[test]
    fn test_movement_directions_are_camera_relative() {
        let mut camera = Camera::new(Vec3::ZERO);
        let front = camera.front();
        let right = camera.right();

        camera.process_position(Movement::Forward, 1.0);
        assert!((camera.position() - front * MOVE_SPEED).length() < 1e-5);

        let before = camera.position();
        camera.process_position(Movement::Right, 0.5);
        assert!((camera.position() - before - right * MOVE_SPEED * 0.5).length() < 1e-5);
    }

    #[test]
    fn test_vertical_movement_ignores_pitch() {
        let mut camera = Camera::with_angles(Vec3::ZERO, -90.0, 45.0);
        camera.process_position(Movement::Upward, 1.0);
        // Straight up in world space, not along the tilted camera up.
        assert!((camera.position() - Vec3::Y * MOVE_SPEED).length() < 1e-5);
    }

    #[test]
    fn test_constructor_rejects_polar_pitch() {
        assert_eq!(Camera::with_angles(Vec3::ZERO, 0.0, 90.0).pitch(), DEFAULT_PITCH);
        assert_eq!(Camera::with_angles(Vec3::ZERO, 0.0, -90.0).pitch(), DEFAULT_PITCH);
        assert_eq!(Camera::with_angles(Vec3::ZERO, 0.0, 89.0).pitch(), 89.0);
    }

    #[test]
    fn test_injected_pose_drives_view_matrix() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.set_position(Vec3::new(-18.0, 0.33, 2.0));
        camera.set_direction(Vec3::new(0.0, 0.0, -4.0));

        assert_orthonormal_basis(&camera);
        assert!((camera.front() - Vec3::NEG_Z).length() < 1e-6);

        let expected = Mat4::look_at_rh(
            Vec3::new(-18.0, 0.33, 2.0),
            Vec3::new(-18.0, 0.33, 1.0),
            Vec3::Y,
        );
        let view = camera.view_matrix();
        assert!((view.to_cols_array()
            .iter()
            .zip(expected.to_cols_array().iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max))
            < 1e-5);
    }

    #[test]
    fn test_view_matrix_has_no_side_effects() {
        let camera = Camera::with_angles(Vec3::new(1.0, 2.0, 3.0), -45.0, 10.0);
        let first = camera.view_matrix();
        let second = camera.view_matrix();
        assert_eq!(first, second);
    }
}
