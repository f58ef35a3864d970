use glam::{Mat4, Vec3};

use crate::camera::Camera;
use crate::curve::{align_object, ControlPath};
use crate::follower::PathFollower;

/// Per-press speed increment of the drivable car.
pub const CAR_SPEED_STEP: f32 = 0.1;
/// Per-press steering increment in degrees.
pub const CAR_STEER_STEP: f32 = 2.5;

const CAR_TOP_SPEED: f32 = 4.8;
const CAR_REVERSE_LIMIT: f32 = -1.3;
const CAR_DRAG: f32 = 0.06;
const CAR_STOP_EPSILON: f32 = 0.03;

/// Driver's-eye offset above the player car body.
const PLAYER_EYE_OFFSET: Vec3 = Vec3::new(0.0, 0.375, 0.0);
/// Dash-camera offset above the patrol car body.
const PATROL_EYE_OFFSET: Vec3 = Vec3::new(0.0, 0.132, 0.0);

/// Axis-aligned driving area plus one round obstacle.
#[derive(Debug, Clone, Copy)]
pub struct DriveBounds {
    pub min: Vec3,
    pub max: Vec3,
    pub obstacle: Vec3,
    pub obstacle_radius: f32,
}

impl DriveBounds {
    pub fn allows(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
            && p.distance(self.obstacle) > self.obstacle_radius
    }
}

/// The drivable car. Steered with discrete per-tick inputs; its camera is
/// locked to the car pose every update and is not independently steerable.
pub struct PlayerCar {
    pub position: Vec3,
    pub direction: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub scale: Vec3,
    pub camera: Camera,
    bounds: DriveBounds,
    current_time: f32,
}

impl PlayerCar {
    pub fn new(position: Vec3, scale: Vec3, bounds: DriveBounds) -> Self {
        Self {
            position,
            direction: Vec3::X,
            yaw: 0.0,
            pitch: 0.0,
            speed: 0.0,
            scale,
            camera: Camera::new(Vec3::ZERO),
            bounds,
            current_time: 0.0,
        }
    }

    pub fn accelerate(&mut self) {
        self.speed = (self.speed + 1.5 * CAR_SPEED_STEP).min(CAR_TOP_SPEED);
    }

    pub fn decelerate(&mut self) {
        self.speed = (self.speed - CAR_SPEED_STEP).max(CAR_REVERSE_LIMIT);
    }

    /// Steering flips with the gear so reversing feels like a real car; a
    /// parked car does not steer at all.
    pub fn steer_left(&mut self) {
        if self.speed == 0.0 {
            return;
        }
        if self.speed < 0.0 {
            self.turn(CAR_STEER_STEP);
        } else {
            self.turn(-CAR_STEER_STEP);
        }
    }

    pub fn steer_right(&mut self) {
        if self.speed == 0.0 {
            return;
        }
        if self.speed < 0.0 {
            self.turn(-CAR_STEER_STEP);
        } else {
            self.turn(CAR_STEER_STEP);
        }
    }

    /// Advance the car to `elapsed` seconds: integrate position, refresh the
    /// heading from yaw/pitch, apply drag, and sync the attached camera.
    pub fn update(&mut self, elapsed: f32) {
        self.integrate(elapsed);

        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.direction = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();

        if self.speed != 0.0 {
            self.speed += if self.speed > 0.0 { -CAR_DRAG } else { CAR_DRAG };
            if self.speed.abs() < CAR_STOP_EPSILON {
                self.speed = 0.0;
            }
        }

        self.camera.set_position(PLAYER_EYE_OFFSET + self.position);
        self.camera.set_direction(self.direction);
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(
            self.position + Vec3::new(0.0, -0.05 + self.scale.y / 2.0, 0.0),
        ) * Mat4::from_rotation_y((-self.yaw - 180.0).to_radians())
            * Mat4::from_scale(self.scale)
    }

    fn integrate(&mut self, elapsed: f32) {
        let previous = self.position;
        let dt = elapsed - self.current_time;
        self.current_time = elapsed;

        self.position += dt * self.speed * self.direction;

        if !self.bounds.allows(self.position) {
            self.position = previous;
            self.speed = 0.0;
        }
    }

    fn turn(&mut self, degrees: f32) {
        self.yaw += degrees;
        if self.yaw > 360.0 {
            self.yaw -= 360.0;
        }
        if self.yaw < 0.0 {
            self.yaw += 360.0;
        }
    }
}

/// The patrol car circling the dunes on a closed spline loop.
pub struct PatrolCar {
    pub position: Vec3,
    pub direction: Vec3,
    pub scale: Vec3,
    pub camera: Camera,
    follower: PathFollower,
}

impl PatrolCar {
    pub fn new(path: ControlPath, origin: Vec3, scale: Vec3) -> Self {
        Self {
            position: origin,
            direction: Vec3::X,
            scale,
            camera: Camera::new(Vec3::ZERO),
            follower: PathFollower::new(path, origin),
        }
    }

    pub fn update(&mut self, elapsed: f32) {
        let pose = self.follower.advance(elapsed);
        self.position = pose.position;
        self.direction = pose.tangent;

        self.camera.set_position(PATROL_EYE_OFFSET + self.position);
        self.camera.set_direction(self.direction);
    }

    /// The mesh points down its local -X, so the aligned frame is spun a
    /// quarter turn before scaling.
    pub fn model_matrix(&self) -> Mat4 {
        align_object(self.position, self.direction)
            * Mat4::from_rotation_y((-90.0f32).to_radians())
            * Mat4::from_scale(self.scale)
    }
}
