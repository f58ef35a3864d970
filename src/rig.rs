use crate::camera::Camera;

/// Identifies which camera the rig is currently presenting.
///
/// `Fixed` indexes the rig-owned static viewpoints; the other variants point
/// at cameras owned elsewhere (the cars own theirs, the rig owns spectate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraHandle {
    Fixed(usize),
    Player,
    Patrol,
    Spectate,
}

/// Mode controller for the scene's cameras.
///
/// Three families of modes: a cycle of fixed viewpoints (optionally with
/// free-look/free-move enabled), car-attached cameras, and the scripted
/// spectate camera. The capability flags are mutually exclusive with the
/// attached modes: `can_move`/`can_look` can only be on while `is_static`,
/// and attaching to an entity clears all three.
pub struct CameraRig {
    /// Canonical fixed-camera poses, kept for resets.
    presets: Vec<Camera>,
    /// Live fixed cameras; free-fly excursions mutate these.
    cameras: Vec<Camera>,
    spectate: Camera,
    active: CameraHandle,
    index: usize,
    can_look: bool,
    can_move: bool,
    is_static: bool,
    current_time: f32,
}

impl CameraRig {
    pub fn new(presets: Vec<Camera>, spectate: Camera) -> Self {
        assert!(!presets.is_empty(), "rig needs at least one fixed camera");
        let cameras = presets.clone();
        Self {
            presets,
            cameras,
            spectate,
            active: CameraHandle::Fixed(0),
            index: 0,
            can_look: false,
            can_move: false,
            is_static: true,
            current_time: 0.0,
        }
    }

    pub fn active(&self) -> CameraHandle {
        self.active
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn can_look(&self) -> bool {
        self.can_look
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn fixed_count(&self) -> usize {
        self.cameras.len()
    }

    pub fn fixed(&self, index: usize) -> &Camera {
        &self.cameras[index]
    }

    pub fn spectate(&self) -> &Camera {
        &self.spectate
    }

    pub fn spectate_mut(&mut self) -> &mut Camera {
        &mut self.spectate
    }

    /// The camera free-fly input is routed to, if any.
    ///
    /// Only fixed viewpoints are steerable; attached cameras follow their
    /// entity and ignore input.
    pub fn steerable(&mut self) -> Option<&mut Camera> {
        match self.active {
            CameraHandle::Fixed(i) if self.is_static => Some(&mut self.cameras[i]),
            _ => None,
        }
    }

    /// Step through the fixed viewpoints, wrapping in both directions.
    ///
    /// Every cycle resets the fixed cameras to their canonical poses, so an
    /// abandoned free-fly excursion cannot leave a viewpoint drifted.
    pub fn cycle(&mut self, offset: i32) {
        let n = self.cameras.len() as i32;
        self.index = (self.index as i32 + offset).rem_euclid(n) as usize;
        self.reset_fixed();
        self.active = CameraHandle::Fixed(self.index);
        self.is_static = true;
    }

    /// Jump straight to fixed viewpoint `index`. Out-of-range requests are
    /// ignored, matching the permissive toggle-key input surface.
    pub fn select(&mut self, index: usize) {
        if index >= self.cameras.len() {
            return;
        }
        self.index = index;
        self.reset_fixed();
        self.active = CameraHandle::Fixed(index);
        self.is_static = true;
    }

    /// Hand the view to an entity-driven or scripted camera.
    ///
    /// Unconditional; clears the free-fly capabilities since those cameras
    /// are not steerable. Fixed handles are routed through [`Self::select`].
    pub fn attach(&mut self, handle: CameraHandle) {
        if let CameraHandle::Fixed(i) = handle {
            self.select(i);
            return;
        }
        self.reset_fixed();
        self.active = handle;
        self.can_look = false;
        self.can_move = false;
        self.is_static = false;
    }

    /// Toggle free movement; a no-op unless a fixed viewpoint is active.
    pub fn toggle_free_move(&mut self) {
        self.can_move = self.is_static && !self.can_move;
    }

    /// Toggle free look; a no-op unless a fixed viewpoint is active.
    pub fn toggle_free_look(&mut self) {
        self.can_look = self.is_static && !self.can_look;
    }

    /// Difference the rig's clock mark against the new elapsed time.
    ///
    /// Each consumer of the shared elapsed clock keeps its own mark, so
    /// consumers that started observing at different times stay consistent.
    pub fn tick_delta(&mut self, elapsed: f32) -> f32 {
        let dt = elapsed - self.current_time;
        self.current_time = elapsed;
        dt
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    fn reset_fixed(&mut self) {
        self.cameras.clone_from(&self.presets);
    }
}
