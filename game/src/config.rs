//! Startup parameters.
//!
//! Everything has a built-in default; a TOML file can override any subset.

use std::path::Path;

use engine::EngineConfig;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "home_base.toml";
pub const CONFIG_PATH_ENV: &str = "HOME_BASE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("zoom bounds [{min}, {max}] are empty")]
    ZoomBounds { min: f32, max: f32 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub model: String,
    pub scale: f32,
    /// Units per second.
    pub speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            model: "assets/sphere.glb".to_string(),
            scale: 1.0,
            speed: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub height: f32,
    pub distance: f32,
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians per second.
    pub orbit_rate: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            height: 15.0,
            distance: 25.0,
            zoom_step: 1.0,
            min_distance: 5.0,
            max_distance: 60.0,
            orbit_rate: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    pub model: String,
    pub count: usize,
    pub radius: f32,
    pub model_scale: f32,
    /// Fixed gap slot; picked at random when unset.
    pub gap_index: Option<usize>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            model: "assets/cube.glb".to_string(),
            count: 20,
            radius: 8.0,
            model_scale: 0.5,
            gap_index: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HomeBaseConfig {
    pub window: EngineConfig,
    pub player: PlayerConfig,
    pub camera: CameraConfig,
    pub ring: RingConfig,
}

impl Default for HomeBaseConfig {
    fn default() -> Self {
        Self {
            window: EngineConfig {
                title: "Home Base".to_string(),
                ..EngineConfig::default()
            },
            player: PlayerConfig::default(),
            camera: CameraConfig::default(),
            ring: RingConfig::default(),
        }
    }
}

impl HomeBaseConfig {
    pub fn from_toml(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, falling back to defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        if !path.exists() {
            log::info!("No config at {origin}; using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: origin.clone(),
            source,
        })?;
        let config = Self::from_toml(&text, &origin)?;
        log::info!("Loaded config from {origin}");
        Ok(config)
    }

    /// Loads from `$HOME_BASE_CONFIG`, or `home_base.toml` in the working
    /// directory.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let cam = &self.camera;
        // negated so NaN bounds are rejected too
        if !(cam.min_distance <= cam.max_distance) {
            return Err(ConfigError::ZoomBounds {
                min: cam.min_distance,
                max: cam.max_distance,
            });
        }
        for (field, value) in [
            ("camera.zoom_step", cam.zoom_step),
            ("player.speed", self.player.speed),
            ("ring.radius", self.ring.radius),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(cam.min_distance..=cam.max_distance).contains(&cam.distance) {
            log::warn!(
                "camera.distance {} is outside [{}, {}]; it will be clamped",
                cam.distance,
                cam.min_distance,
                cam.max_distance
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo() {
        let cfg = HomeBaseConfig::default();
        assert_eq!(cfg.ring.count, 20);
        assert_eq!(cfg.ring.radius, 8.0);
        assert_eq!(cfg.ring.gap_index, None);
        assert_eq!(cfg.player.speed, 10.0);
        assert_eq!(cfg.camera.height, 15.0);
        assert_eq!(cfg.camera.distance, 25.0);
        assert_eq!(cfg.camera.zoom_step, 1.0);
        assert_eq!((cfg.camera.min_distance, cfg.camera.max_distance), (5.0, 60.0));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let text = r#"
            [ring]
            count = 12
            gap_index = 3

            [window]
            width = 800
        "#;
        let cfg = HomeBaseConfig::from_toml(text, "inline").unwrap();
        assert_eq!(cfg.ring.count, 12);
        assert_eq!(cfg.ring.gap_index, Some(3));
        assert_eq!(cfg.ring.radius, 8.0);
        assert_eq!(cfg.window.width, 800);
        assert_eq!(cfg.camera, CameraConfig::default());
    }

    #[test]
    fn rejects_inverted_zoom_bounds() {
        let text = "[camera]\nmin_distance = 70.0\n";
        let err = HomeBaseConfig::from_toml(text, "inline").unwrap_err();
        assert!(matches!(err, ConfigError::ZoomBounds { .. }));
    }

    #[test]
    fn rejects_non_positive_speed() {
        let err = HomeBaseConfig::from_toml("[player]\nspeed = 0.0\n", "inline").unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { field: "player.speed", .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = HomeBaseConfig::from_toml("[ring\ncount = ", "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = HomeBaseConfig::load("definitely/not/here.toml").unwrap();
        assert_eq!(cfg, HomeBaseConfig::default());
    }
}
