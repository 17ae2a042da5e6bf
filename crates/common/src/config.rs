use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::{Color, Player};

/// Errors from loading or validating an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("render resolution must be non-zero, got {width}x{height}")]
    ZeroResolution { width: usize, height: usize },
    #[error("field of view must be in (0, 360) degrees, got {0}")]
    FovOutOfRange(f32),
    #[error("ray step size must be positive and finite, got {0}")]
    InvalidStep(f32),
    #[error("max ray distance must exceed the step size ({step}), got {max}")]
    InvalidMaxDistance { max: f32, step: f32 },
    #[error("tick rate must be positive and finite, got {0}")]
    InvalidTickRate(f64),
    #[error("display scale must be positive, got {0}")]
    InvalidScale(f32),
}

/// Engine tunables. Every field has a default, so a config file only needs
/// the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window title.
    pub title: String,
    /// Framebuffer width in pixels; one ray is cast per column.
    pub render_width: usize,
    /// Framebuffer height in pixels.
    pub render_height: usize,
    /// Display scale from render resolution to window size.
    pub scale: f32,
    /// Horizontal field of view in degrees.
    pub fov_degrees: f32,
    /// Fixed ray-marching step, in map cells.
    pub step_size: f32,
    /// Rays give up after travelling this far.
    pub max_distance: f32,
    /// Simulation updates per second.
    pub tick_rate: f64,
    pub wall_color: Color,
    pub background_color: Color,
    /// Stop the player at wall cells instead of letting them walk through.
    pub collide_with_walls: bool,
    /// Starting pose.
    pub spawn: Player,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Wolfcast".into(),
            render_width: 320,
            render_height: 160,
            scale: 4.0,
            fov_degrees: 75.0,
            step_size: 0.001,
            max_distance: 64.0,
            tick_rate: 60.0,
            wall_color: Color::WHITE,
            background_color: Color::DARK_GREY,
            collide_with_walls: false,
            spawn: Player::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render_width == 0 || self.render_height == 0 {
            return Err(ConfigError::ZeroResolution {
                width: self.render_width,
                height: self.render_height,
            });
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 360.0) {
            return Err(ConfigError::FovOutOfRange(self.fov_degrees));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(ConfigError::InvalidStep(self.step_size));
        }
        if !(self.max_distance.is_finite() && self.max_distance > self.step_size) {
            return Err(ConfigError::InvalidMaxDistance {
                max: self.max_distance,
                step: self.step_size,
            });
        }
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(ConfigError::InvalidTickRate(self.tick_rate));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        Ok(())
    }

    /// Field of view in radians.
    pub fn fov(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    /// Length of one fixed simulation step, in seconds.
    pub fn frame_cap(&self) -> f64 {
        1.0 / self.tick_rate
    }

    /// Window size in physical pixels.
    pub fn window_size(&self) -> (u32, u32) {
        (
            (self.render_width as f32 * self.scale) as u32,
            (self.render_height as f32 * self.scale) as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        config.validate().unwrap();
        assert_eq!(config.frame_cap(), 1.0 / 60.0);
        assert_eq!(config.window_size(), (1280, 640));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "fov_degrees": 90.0 }"#).unwrap();
        assert_eq!(config.fov_degrees, 90.0);
        assert_eq!(config.render_width, 320);
        assert_eq!(config.step_size, 0.001);
    }

    #[test]
    fn colors_and_spawn_deserialize() {
        let json = r#"{
            "wall_color": 4294901760,
            "spawn": { "position": [2.5, 1.5], "angle": 1.0 }
        }"#;
        let config = EngineConfig::from_json_str(json).unwrap();
        assert_eq!(config.wall_color, Color(0xffff_0000));
        assert_eq!(config.spawn, Player::new(2.5, 1.5, 1.0));
    }

    #[test]
    fn rejects_zero_resolution() {
        let err = EngineConfig::from_json_str(r#"{ "render_height": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroResolution { height: 0, .. }));
    }

    #[test]
    fn rejects_bad_step_and_fov() {
        let err = EngineConfig::from_json_str(r#"{ "step_size": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStep(_)));

        let err = EngineConfig::from_json_str(r#"{ "fov_degrees": 400.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::FovOutOfRange(_)));
    }

    #[test]
    fn rejects_max_distance_below_step() {
        let err = EngineConfig::from_json_str(r#"{ "max_distance": 0.0005 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMaxDistance { .. }));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = EngineConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tick_rate": 30.0, "collide_with_walls": true }}"#).unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.frame_cap(), 1.0 / 30.0);
        assert!(config.collide_with_walls);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
