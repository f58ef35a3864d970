pub mod camera;
pub mod cli;
pub mod config;
pub mod curve;
pub mod entity;
pub mod follower;
pub mod frame;
pub mod loaders;
pub mod pyramid;
pub mod renderer;
pub mod rig;
pub mod scene;
pub mod types;

pub use camera::{Camera, Movement};
pub use curve::{align_object, ControlPath, CurvePose, PathError};
pub use follower::PathFollower;
pub use rig::{CameraHandle, CameraRig};
pub use scene::Scene;
