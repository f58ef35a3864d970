use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::curve::{ControlPath, PathError};
use crate::entity::DriveBounds;

/// Scene layout loaded from JSON, with the built-in desert as the default.
///
/// Everything positional is data here so a config file can reshape the scene
/// without touching code; lighting stays baked into the shader globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub fixed_cameras: Vec<CameraPreset>,
    pub spectate: SplineConfig,
    pub patrol: SplineConfig,
    pub player: PlayerConfig,
    pub assets: AssetPaths,
    pub pyramid_layers: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraPreset {
    pub position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraPreset {
    pub fn camera(&self) -> Camera {
        Camera::with_angles(Vec3::from_array(self.position), self.yaw, self.pitch)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplineConfig {
    pub points: Vec<[f32; 3]>,
    pub tension: f32,
    pub speed: f32,
    pub origin: [f32; 3],
}

impl SplineConfig {
    pub fn control_path(&self) -> Result<ControlPath, PathError> {
        let points = self.points.iter().copied().map(Vec3::from_array).collect();
        ControlPath::new(points, self.tension, self.speed)
    }

    pub fn origin(&self) -> Vec3 {
        Vec3::from_array(self.origin)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub start: [f32; 3],
    pub scale: f32,
    pub bounds_min: [f32; 3],
    pub bounds_max: [f32; 3],
    pub obstacle: [f32; 3],
    pub obstacle_radius: f32,
}

impl PlayerConfig {
    pub fn bounds(&self) -> DriveBounds {
        DriveBounds {
            min: Vec3::from_array(self.bounds_min),
            max: Vec3::from_array(self.bounds_max),
            obstacle: Vec3::from_array(self.obstacle),
            obstacle_radius: self.obstacle_radius,
        }
    }
}

/// Optional glTF meshes; empty paths mean "use the built-in placeholder".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetPaths {
    pub player_car: Option<PathBuf>,
    pub patrol_car: Option<PathBuf>,
    pub desert: Option<PathBuf>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window_title: "dunes".to_string(),
            window_width: 800,
            window_height: 600,
            fixed_cameras: vec![
                CameraPreset { position: [0.0, 1.0, 3.0], yaw: -90.0, pitch: 0.0 },
                CameraPreset { position: [-26.8, 0.25, 6.9], yaw: -386.5, pitch: 9.5 },
                CameraPreset { position: [-6.9, 9.27, -19.3], yaw: -303.2, pitch: -22.75 },
            ],
            spectate: SplineConfig {
                points: vec![
                    [-17.0634, 7.93374, 21.4099],
                    [-7.88448, 3.76922, -6.36621],
                    [14.4472, 5.01844, -15.4603],
                    [0.850481, 1.97363, 9.23971],
                    [-15.5271, 2.7943, -10.9226],
                    [-23.5874, 2.42587, 7.02977],
                ],
                tension: 0.5,
                speed: 0.3,
                origin: [0.0, 0.0, 0.0],
            },
            patrol: SplineConfig {
                points: vec![
                    [0.0, 0.0, -1.0],
                    [1.0, 0.0, 0.0],
                    [0.0, 0.0, 1.0],
                    [-1.0, 0.0, 0.0],
                ],
                tension: 15.0,
                speed: 0.3,
                origin: [-18.0, 0.2, 2.0],
            },
            player: PlayerConfig {
                start: [0.0, 0.0, 0.0],
                scale: 0.5,
                bounds_min: [-13.0, -0.029, -9.5],
                bounds_max: [25.0, 0.029, 9.0],
                obstacle: [14.0, 0.0, 0.0],
                obstacle_radius: 3.65,
            },
            assets: AssetPaths::default(),
            pyramid_layers: 30,
        }
    }
}

impl SceneConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene config {:?}", path))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse scene config {:?}", path))
    }

    /// Load from `path` when given, falling back to the built-in scene on
    /// any error so a bad config never takes the viewer down.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => match Self::load(path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("{:#}; using built-in scene", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_valid_paths() {
        let config = SceneConfig::default();
        assert_eq!(config.spectate.control_path().unwrap().len(), 6);
        assert_eq!(config.patrol.control_path().unwrap().len(), 4);
        assert_eq!(config.fixed_cameras.len(), 3);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = SceneConfig::default();
        let text = serde_json::to_string(&config).unwrap();
        let back: SceneConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back.patrol.points, config.patrol.points);
        assert_eq!(back.window_title, config.window_title);
    }

    #[test]
    fn test_partial_config_fills_in_defaults() {
        let config: SceneConfig = serde_json::from_str(r#"{"pyramid_layers": 5}"#).unwrap();
        assert_eq!(config.pyramid_layers, 5);
        assert_eq!(config.fixed_cameras.len(), 3);
    }
}
