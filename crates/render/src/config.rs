use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Camera start-up parameters. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: Vec3,
    /// Degrees; -90 looks down -Z.
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Degrees per second.
    pub roll_speed: f32,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            yaw: -90.0,
            pitch: 0.0,
            roll: 0.0,
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            roll_speed: 50.0,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

impl CameraSettings {
    pub fn aspect_ratio(&self) -> f32 {
        if self.viewport_height == 0 {
            return 1.0;
        }
        self.viewport_width as f32 / self.viewport_height as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("yaw", self.yaw),
            ("pitch", self.pitch),
            ("roll", self.roll),
            ("fov", self.fov),
            ("movement_speed", self.movement_speed),
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("roll_speed", self.roll_speed),
        ];
        if let Some((name, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("camera.{name} must be finite")));
        }
        if !self.position.is_finite() {
            return Err(ConfigError::Invalid("camera.position must be finite".into()));
        }
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "clip planes must satisfy 0 < near < far (near={}, far={})",
                self.near, self.far
            )));
        }
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(ConfigError::Invalid("viewport size must be non-zero".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// RGBA clear color.
    pub clear_color: [f32; 4],
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_color: [0.1, 0.2, 0.3, 1.0],
        }
    }
}

/// Top-level engine configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub camera: CameraSettings,
    pub renderer: RenderSettings,
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.camera.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
