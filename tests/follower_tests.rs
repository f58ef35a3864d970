use glam::Vec3;

use dunes::curve::ControlPath;
use dunes::entity::{DriveBounds, PatrolCar, PlayerCar};
use dunes::follower::PathFollower;

fn patrol_loop() -> ControlPath {
    ControlPath::new(
        vec![
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, 0.0),
        ],
        15.0,
        0.3,
    )
    .unwrap()
}

fn open_bounds() -> DriveBounds {
    DriveBounds {
        min: Vec3::new(-13.0, -0.029, -9.5),
        max: Vec3::new(25.0, 0.029, 9.0),
        obstacle: Vec3::new(14.0, 0.0, 0.0),
        obstacle_radius: 3.65,
    }
}

#[cfg(test)]
mod follower_tests {
    use super::*;

    #[test]
    fn test_two_runs_are_bit_identical() {
        let ticks: Vec<f32> = (0..200).map(|i| i as f32 * 0.033).collect();

        let mut first = PathFollower::new(patrol_loop(), Vec3::new(-18.0, 0.2, 2.0));
        let mut second = PathFollower::new(patrol_loop(), Vec3::new(-18.0, 0.2, 2.0));

        for &t in &ticks {
            let a = first.advance(t);
            let b = second.advance(t);
            assert_eq!(a.position, b.position, "t = {}", t);
            assert_eq!(a.tangent, b.tangent, "t = {}", t);
        }
    }

    #[test]
    fn test_pose_is_origin_plus_curve_sample() {
        let origin = Vec3::new(-18.0, 0.2, 2.0);
        let path = patrol_loop();
        let mut follower = PathFollower::new(patrol_loop(), origin);

        let pose = follower.advance(3.7);
        let t = 3.7 * path.speed();
        assert_eq!(pose.position, origin + path.sample(t));
        assert!((pose.tangent.length() - 1.0).abs() < 1e-5);
        assert_eq!(follower.last_mark(), 3.7);
    }

    #[test]
    fn test_sampling_uses_absolute_time_not_deltas() {
        // Two followers fed different tick patterns that end at the same
        // elapsed time must agree exactly.
        let mut coarse = PathFollower::new(patrol_loop(), Vec3::ZERO);
        let mut fine = PathFollower::new(patrol_loop(), Vec3::ZERO);

        let end_coarse = coarse.advance(6.0);

        let mut end_fine = fine.advance(0.0);
        for i in 1..=60 {
            end_fine = fine.advance(i as f32 * 0.1);
        }

        assert!((end_coarse.position - end_fine.position).length() < 1e-4);
    }
}

#[cfg(test)]
mod patrol_tests {
    use super::*;

    #[test]
    fn test_patrol_camera_stays_locked_to_the_car() {
        let mut patrol = PatrolCar::new(patrol_loop(), Vec3::new(-18.0, 0.2, 2.0), Vec3::splat(0.5));

        for i in 0..50 {
            patrol.update(i as f32 * 0.1);
            let offset = patrol.camera.position() - patrol.position;
            assert!((offset - Vec3::new(0.0, 0.132, 0.0)).length() < 1e-5);
            assert!((patrol.camera.front() - patrol.direction).length() < 1e-4);
        }
    }

    #[test]
    fn test_patrol_model_matrix_is_finite_everywhere() {
        let mut patrol = PatrolCar::new(patrol_loop(), Vec3::ZERO, Vec3::splat(0.5));
        for i in 0..100 {
            patrol.update(i as f32 * 0.25);
            assert!(patrol.model_matrix().is_finite());
        }
    }
}

#[cfg(test)]
mod player_tests {
    use super::*;

    #[test]
    fn test_speed_clamps_and_drag_brings_the_car_to_rest() {
        let mut car = PlayerCar::new(Vec3::ZERO, Vec3::splat(0.5), open_bounds());

        for _ in 0..100 {
            car.accelerate();
        }
        assert!(car.speed <= 4.8);

        // With no further input the drag bleeds speed off and the dead-band
        // snaps it to exactly zero.
        let mut elapsed = 0.0;
        for _ in 0..200 {
            elapsed += 0.001;
            car.update(elapsed);
        }
        assert_eq!(car.speed, 0.0);
    }

    #[test]
    fn test_reverse_speed_is_limited() {
        let mut car = PlayerCar::new(Vec3::ZERO, Vec3::splat(0.5), open_bounds());
        for _ in 0..100 {
            car.decelerate();
        }
        assert!(car.speed >= -1.3);
    }

    #[test]
    fn test_parked_car_does_not_steer() {
        let mut car = PlayerCar::new(Vec3::ZERO, Vec3::splat(0.5), open_bounds());
        assert_eq!(car.speed, 0.0);

        car.steer_left();
        car.steer_right();
        assert_eq!(car.yaw, 0.0);
    }

    #[test]
    fn test_yaw_wraps_into_one_turn() {
        let mut car = PlayerCar::new(Vec3::ZERO, Vec3::splat(0.5), open_bounds());
        car.accelerate();

        for _ in 0..200 {
            car.steer_right();
        }
        assert!((0.0..=360.0).contains(&car.yaw));
    }

    #[test]
    fn test_leaving_the_bounds_rejects_the_move() {
        let mut car = PlayerCar::new(Vec3::new(24.5, 0.0, 5.0), Vec3::splat(0.5), open_bounds());

        // Flooring it straight at the +x fence.
        let mut elapsed = 0.0;
        for _ in 0..300 {
            car.accelerate();
            elapsed += 0.033;
            car.update(elapsed);
        }
        assert!(car.position.x <= 25.0);
    }

    #[test]
    fn test_hitting_the_obstacle_stops_the_car() {
        let bounds = open_bounds();
        let mut car = PlayerCar::new(Vec3::new(9.0, 0.0, 0.0), Vec3::splat(0.5), bounds);

        let mut elapsed = 0.0;
        for _ in 0..600 {
            car.accelerate();
            elapsed += 0.033;
            car.update(elapsed);
        }
        // Parked outside the stone pyramid's keep-out radius.
        assert!(car.position.distance(bounds.obstacle) > bounds.obstacle_radius);
    }

    #[test]
    fn test_driver_camera_follows_the_car() {
        let mut car = PlayerCar::new(Vec3::ZERO, Vec3::splat(0.5), open_bounds());
        car.accelerate();
        car.update(0.5);

        let offset = car.camera.position() - car.position;
        assert!((offset - Vec3::new(0.0, 0.375, 0.0)).length() < 1e-5);
        assert!((car.camera.front() - car.direction).length() < 1e-4);
    }
}
