use glam::Vec3;

use crate::curve::{ControlPath, CurvePose};

/// Drives an entity (or a scripted camera) along a closed control path.
///
/// Sampling uses the absolute elapsed time scaled by the path speed, not an
/// integrated arc length, so the traversal is constant-speed in parameter
/// space. Segments of different lengths therefore play back at different
/// world-space speeds; that is the intended look.
pub struct PathFollower {
    path: ControlPath,
    origin: Vec3,
    last_mark: f32,
}

impl PathFollower {
    pub fn new(path: ControlPath, origin: Vec3) -> Self {
        Self {
            path,
            origin,
            last_mark: 0.0,
        }
    }

    /// Sample the path at `elapsed` seconds, updating the follower's clock
    /// mark. The returned pose is already offset by the follower's origin and
    /// carries a unit tangent.
    pub fn advance(&mut self, elapsed: f32) -> CurvePose {
        self.last_mark = elapsed;

        let t = elapsed * self.path.speed();
        CurvePose {
            position: self.origin + self.path.sample(t),
            tangent: self.path.sample_derivative(t).normalize(),
        }
    }

    pub fn last_mark(&self) -> f32 {
        self.last_mark
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn path(&self) -> &ControlPath {
        &self.path
    }
}
