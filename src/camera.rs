use glam::{Mat4, Vec3};

pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const MOVE_SPEED: f32 = 5.0;
pub const LOOK_SENSITIVITY: f32 = 0.05;
pub const PITCH_BOUND: f32 = 90.0;

/// Discrete camera translation directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Upward,
    Downward,
}

/// First-person camera: position plus yaw/pitch in degrees, with cached basis
/// vectors.
///
/// The basis is recomputed whenever yaw or pitch change. Pose can also be
/// injected directly with [`Camera::set_position`] / [`Camera::set_direction`]
/// for cameras driven by a moving entity; those bypass the yaw/pitch
/// bookkeeping, and such cameras never receive [`Camera::process_movement`].
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    /// World up, fixed for the camera's lifetime.
    vertical: Vec3,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self::with_angles(position, DEFAULT_YAW, DEFAULT_PITCH)
    }

    pub fn with_angles(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let pitch = if pitch.abs() >= PITCH_BOUND { DEFAULT_PITCH } else { pitch };
        let mut camera = Self {
            position,
            yaw,
            pitch,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            vertical: Vec3::Y,
        };
        camera.refresh_basis();
        camera
    }

    /// Translate along the camera's own axes by `MOVE_SPEED * dt`.
    ///
    /// No clamping here; boundary enforcement is the caller's business.
    pub fn process_position(&mut self, direction: Movement, dt: f32) {
        let step = MOVE_SPEED * dt;
        match direction {
            Movement::Forward => self.position += self.front * step,
            Movement::Backward => self.position -= self.front * step,
            Movement::Left => self.position -= self.right * step,
            Movement::Right => self.position += self.right * step,
            Movement::Upward => self.position += self.vertical * step,
            Movement::Downward => self.position -= self.vertical * step,
        }
    }

    /// Apply a look delta in pointer units.
    ///
    /// Pitch updates are dropped whenever they would leave (-90, 90) degrees.
    pub fn process_movement(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * LOOK_SENSITIVITY;

        if (self.pitch + dy * LOOK_SENSITIVITY).abs() < PITCH_BOUND {
            self.pitch += dy * LOOK_SENSITIVITY;
        }

        self.refresh_basis();
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Inject a view direction directly, recomputing right/up from the world
    /// vertical. Yaw and pitch are left stale on purpose.
    pub fn set_direction(&mut self, direction: Vec3) {
        self.front = direction.normalize();
        self.right = self.front.cross(self.vertical).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    fn refresh_basis(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.vertical).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}
