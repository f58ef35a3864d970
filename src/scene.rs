use anyhow::Result;
use glam::{Mat4, Vec3};

use crate::camera::{Camera, Movement};
use crate::config::SceneConfig;
use crate::entity::{PatrolCar, PlayerCar};
use crate::follower::PathFollower;
use crate::loaders;
use crate::pyramid;
use crate::renderer::{Renderer, Visual};
use crate::rig::{CameraHandle, CameraRig};
use crate::types::{Material, Vertex};

/// Held-key snapshot for the four directional inputs, routed either to the
/// free-fly camera or to the player car depending on the rig mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct DriveKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// A static drawable with a fixed placement.
struct Prop {
    visual: Visual,
    model: Mat4,
}

/// The whole desert: camera rig, the two cars, the scripted flythrough and
/// the static props.
pub struct Scene {
    pub rig: CameraRig,
    pub player: PlayerCar,
    pub patrol: PatrolCar,
    spectate: PathFollower,
    props: Vec<Prop>,
    player_visual: Option<Visual>,
    patrol_visual: Option<Visual>,
}

impl Scene {
    pub fn new(config: &SceneConfig, renderer: &Renderer) -> Result<Self> {
        anyhow::ensure!(
            !config.fixed_cameras.is_empty(),
            "scene config needs at least one fixed camera"
        );

        let presets: Vec<Camera> = config.fixed_cameras.iter().map(|p| p.camera()).collect();
        let rig = CameraRig::new(presets, Camera::new(Vec3::new(0.0, 1.0, 3.0)));

        let spectate = PathFollower::new(
            config.spectate.control_path()?,
            config.spectate.origin(),
        );

        let patrol = PatrolCar::new(
            config.patrol.control_path()?,
            config.patrol.origin(),
            Vec3::splat(0.5),
        );

        let player = PlayerCar::new(
            Vec3::from_array(config.player.start),
            Vec3::splat(config.player.scale),
            config.player.bounds(),
        );

        let props = build_props(config, renderer);

        let player_visual = car_visual(renderer, config.assets.player_car.as_deref(), PLAYER_PAINT);
        let patrol_visual = car_visual(renderer, config.assets.patrol_car.as_deref(), PATROL_PAINT);

        Ok(Self {
            rig,
            player,
            patrol,
            spectate,
            props,
            player_visual,
            patrol_visual,
        })
    }

    /// Advance the whole scene to `elapsed` seconds.
    ///
    /// Directional keys go to the free camera while free-move is on, to the
    /// player car while a car mode is active, and nowhere otherwise.
    pub fn update(&mut self, elapsed: f32, keys: &DriveKeys) {
        let dt = self.rig.tick_delta(elapsed);

        if self.rig.can_move() {
            if let Some(camera) = self.rig.steerable() {
                if keys.left {
                    camera.process_position(Movement::Left, dt);
                }
                if keys.right {
                    camera.process_position(Movement::Right, dt);
                }
                if keys.up {
                    camera.process_position(Movement::Forward, dt);
                }
                if keys.down {
                    camera.process_position(Movement::Backward, dt);
                }
            }
        } else if !self.rig.is_static() {
            if keys.left {
                self.player.steer_left();
            }
            if keys.right {
                self.player.steer_right();
            }
            if keys.up {
                self.player.accelerate();
            }
            if keys.down {
                self.player.decelerate();
            }
        }

        self.player.update(elapsed);
        self.patrol.update(elapsed);

        let pose = self.spectate.advance(elapsed);
        self.rig.spectate_mut().set_position(pose.position);
        self.rig.spectate_mut().set_direction(pose.tangent);
    }

    /// Pointer delta against the re-centered cursor; only listened to while
    /// free-look is on.
    pub fn look(&mut self, dx: f32, dy: f32) {
        if !self.rig.can_look() {
            return;
        }
        if let Some(camera) = self.rig.steerable() {
            camera.process_movement(dx, dy);
        }
    }

    /// Button-drag strafe/advance, one axis per button, sign from the side
    /// of the screen center the pointer drifted to.
    pub fn drag_move(&mut self, dx: f32, dy: f32, left_button: bool, right_button: bool, elapsed: f32) {
        if !self.rig.can_look() {
            return;
        }
        let dt = self.rig.tick_delta(elapsed);
        if let Some(camera) = self.rig.steerable() {
            if left_button {
                let direction = if dx < 0.0 { Movement::Left } else { Movement::Right };
                camera.process_position(direction, dt);
            }
            if right_button {
                let direction = if dy < 0.0 { Movement::Forward } else { Movement::Backward };
                camera.process_position(direction, dt);
            }
        }
    }

    /// Wheel notches move the free camera vertically at triple speed.
    pub fn wheel_move(&mut self, upward: bool, elapsed: f32) {
        if !self.rig.can_move() {
            return;
        }
        let dt = self.rig.tick_delta(elapsed);
        if let Some(camera) = self.rig.steerable() {
            let direction = if upward { Movement::Upward } else { Movement::Downward };
            camera.process_position(direction, dt * 3.0);
        }
    }

    /// The camera the renderer should project through this frame.
    pub fn active_camera(&self) -> &Camera {
        match self.rig.active() {
            CameraHandle::Fixed(i) => self.rig.fixed(i),
            CameraHandle::Player => &self.player.camera,
            CameraHandle::Patrol => &self.patrol.camera,
            CameraHandle::Spectate => self.rig.spectate(),
        }
    }

    pub fn mode_label(&self) -> String {
        match self.rig.active() {
            CameraHandle::Fixed(i) => {
                let mut label = format!("camera {}", i + 1);
                if self.rig.can_look() {
                    label.push_str(" +look");
                }
                if self.rig.can_move() {
                    label.push_str(" +move");
                }
                label
            }
            CameraHandle::Player => "player car".to_string(),
            CameraHandle::Patrol => "patrol car".to_string(),
            CameraHandle::Spectate => "spectate".to_string(),
        }
    }

    /// Draw list for the frame: static props plus the two cars.
    pub fn draws(&self) -> Vec<(&Visual, Mat4)> {
        let mut draws: Vec<(&Visual, Mat4)> =
            self.props.iter().map(|p| (&p.visual, p.model)).collect();

        if let Some(visual) = &self.player_visual {
            draws.push((visual, self.player.model_matrix()));
        }
        if let Some(visual) = &self.patrol_visual {
            draws.push((visual, self.patrol.model_matrix()));
        }

        draws
    }
}

const PLAYER_PAINT: Material = Material::new(
    Vec3::new(0.70, 0.12, 0.10),
    Vec3::new(0.18, 0.03, 0.03),
    Vec3::new(0.65, 0.65, 0.65),
    51.2,
);

const PATROL_PAINT: Material = Material::new(
    Vec3::new(0.16, 0.25, 0.70),
    Vec3::new(0.04, 0.06, 0.18),
    Vec3::new(0.65, 0.65, 0.65),
    51.2,
);

const SAND: Material = Material::new(
    Vec3::new(0.86, 0.66, 0.41),
    Vec3::new(0.22, 0.17, 0.10),
    Vec3::new(0.05, 0.05, 0.05),
    2.0,
);

const AMBER: Material = Material::new(
    Vec3::new(1.0, 0.55, 0.172),
    Vec3::new(0.251208, 0.251208, 0.251208),
    Vec3::new(0.700483, 0.700483, 0.700483),
    3.82,
);

const QUARTZ: Material = Material::new(
    Vec3::new(1.0, 0.829, 0.829),
    Vec3::new(0.25, 0.20725, 0.20725),
    Vec3::new(0.296648, 0.296648, 0.296648),
    11.264,
);

const STONE: Material = Material::new(
    Vec3::new(0.8, 0.8, 0.8),
    Vec3::new(0.215, 0.2345, 0.215),
    Vec3::new(0.633, 0.727811, 0.633),
    76.8,
);

fn build_props(config: &SceneConfig, renderer: &Renderer) -> Vec<Prop> {
    let mut props = Vec::new();

    // Desert floor: the configured mesh when present, a flat plane otherwise.
    match config.assets.desert.as_deref().map(loaders::load_mesh) {
        Some(Ok(mesh)) => props.push(Prop {
            visual: renderer.create_visual(&mesh.vertices, &mesh.indices, &mesh.material),
            model: Mat4::from_translation(Vec3::new(0.0, 3.0, 0.0))
                * Mat4::from_scale(Vec3::splat(30.0)),
        }),
        other => {
            if let Some(Err(e)) = other {
                log::warn!("desert mesh failed to load: {:#}; using flat ground", e);
            }
            let (vertices, indices) = ground_plane(30.0);
            props.push(Prop {
                visual: renderer.create_visual(&vertices, &indices, &SAND),
                model: Mat4::IDENTITY,
            });
        }
    }

    // The three pyramids are all generated; only layer counts and placement
    // differ.
    let placements = [
        (config.pyramid_layers, Vec3::new(0.0, 0.0, -15.0), Vec3::splat(5.0), AMBER),
        (80, Vec3::new(-2.0, 0.0, 17.0), Vec3::splat(7.0), QUARTZ),
        (6, Vec3::new(14.0, 0.0, 0.0), Vec3::new(3.0, 2.0, 3.0), STONE),
    ];
    for (layers, position, scale, material) in placements {
        let mesh = pyramid::generate(layers);
        props.push(Prop {
            visual: renderer.create_visual(&mesh.vertices, &mesh.indices, &material),
            model: Mat4::from_translation(position + Vec3::new(0.0, scale.y, 0.0))
                * Mat4::from_scale(scale),
        });
    }

    props
}

/// Load a car mesh, falling back to a painted unit box so the scene (and the
/// path logic driving it) looks the same with or without assets on disk.
fn car_visual(
    renderer: &Renderer,
    path: Option<&std::path::Path>,
    paint: Material,
) -> Option<Visual> {
    match path.map(loaders::load_mesh) {
        Some(Ok(mesh)) => {
            Some(renderer.create_visual(&mesh.vertices, &mesh.indices, &mesh.material))
        }
        Some(Err(e)) => {
            log::warn!("car mesh failed to load: {:#}; using placeholder", e);
            let (vertices, indices) = box_mesh();
            Some(renderer.create_visual(&vertices, &indices, &paint))
        }
        None => {
            let (vertices, indices) = box_mesh();
            Some(renderer.create_visual(&vertices, &indices, &paint))
        }
    }
}

/// Flat square on the XZ plane, facing up.
fn ground_plane(half: f32) -> (Vec<Vertex>, Vec<u32>) {
    let up = [0.0, 1.0, 0.0];
    let vertices = vec![
        Vertex::new([-half, 0.0, -half], up, [0.0, 0.0]),
        Vertex::new([-half, 0.0, half], up, [0.0, 1.0]),
        Vertex::new([half, 0.0, half], up, [1.0, 1.0]),
        Vertex::new([half, 0.0, -half], up, [1.0, 0.0]),
    ];
    (vertices, vec![0, 1, 2, 0, 2, 3])
}

/// Unit cube centered on the origin with hard face normals.
fn box_mesh() -> (Vec<Vertex>, Vec<u32>) {
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        (
            [0.0, 0.0, 1.0],
            [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]],
        ),
        (
            [0.0, 0.0, -1.0],
            [[0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5]],
        ),
        (
            [1.0, 0.0, 0.0],
            [[0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]],
        ),
        (
            [-1.0, 0.0, 0.0],
            [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5]],
        ),
        (
            [0.0, 1.0, 0.0],
            [[-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]],
        ),
        (
            [0.0, -1.0, 0.0],
            [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]],
        ),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, corners) in faces {
        let base = vertices.len() as u32;
        for (corner, uv) in corners.iter().zip([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]) {
            vertices.push(Vertex::new(*corner, normal, uv));
        }
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}
