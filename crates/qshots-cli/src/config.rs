//! Render configuration for the `render` command.
//!
//! Supports loading configuration from:
//! 1. A YAML file (`~/.qshots/config.yaml` unless another path is given)
//! 2. Environment variables (with `QSHOTS_` prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values
//!
//! Command-line flags are applied by the caller on top of the loaded value.

use std::path::{Path, PathBuf};

use qshots_render::style::{MAX_INTENSITY, MIN_INTENSITY, PulseColor};
use qshots_render::{AnimationOptions, DEFAULT_GLOW, ShotOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Animation defaults shared by every render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Frames per second
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Pulse color name
    #[serde(default = "default_color")]
    pub color: String,

    /// Pulse opacity weight in [0.1, 1.0]
    #[serde(default = "default_intensity")]
    pub intensity: f32,

    /// Label resonators (x-ray backdrops only)
    #[serde(default)]
    pub labeled: bool,

    /// Seed for the shot shuffle; unseeded when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Scale counts down to at most this many frames
    #[serde(default)]
    pub max_frames: Option<u64>,

    /// Directory holding backdrop PNGs
    #[serde(default)]
    pub resources: Option<PathBuf>,

    /// Halo width around each pulse, in pixels
    #[serde(default = "default_glow")]
    pub glow: f32,

    /// Render frames on the rayon thread pool
    #[serde(default = "default_true")]
    pub parallel: bool,
}

fn default_fps() -> u32 {
    3
}

fn default_color() -> String {
    "white".to_string()
}

fn default_intensity() -> f32 {
    0.5
}

fn default_glow() -> f32 {
    DEFAULT_GLOW
}

fn default_true() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            fps: default_fps(),
            color: default_color(),
            intensity: default_intensity(),
            labeled: false,
            seed: None,
            max_frames: None,
            resources: None,
            glow: default_glow(),
            parallel: true,
        }
    }
}

impl RenderConfig {
    /// `~/.qshots/config.yaml`, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".qshots").join("config.yaml"))
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;

        let config: RenderConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. `config_file` if given, else the default path if that file exists
    /// 2. Environment variable overrides
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    debug!("Using configuration file {}", path.display());
                    Self::from_file(path)?
                }
                None => RenderConfig::default(),
            },
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    ///
    /// Only variables that are set override the current values. Values that
    /// fail to parse are ignored with a warning.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: std::str::FromStr>(key: &str, value: String) -> Option<T> {
            let parsed = value.trim().parse().ok();
            if parsed.is_none() {
                warn!("Ignoring {}={:?}: not a valid value", key, value);
            }
            parsed
        }

        if let Some(v) = var("QSHOTS_FPS") {
            if let Some(val) = parsed("QSHOTS_FPS", v) {
                self.fps = val;
            }
        }
        if let Some(v) = var("QSHOTS_COLOR") {
            self.color = v;
        }
        if let Some(v) = var("QSHOTS_INTENSITY") {
            if let Some(val) = parsed("QSHOTS_INTENSITY", v) {
                self.intensity = val;
            }
        }
        if let Some(v) = var("QSHOTS_SEED") {
            if let Some(val) = parsed("QSHOTS_SEED", v) {
                self.seed = Some(val);
            }
        }
        if let Some(v) = var("QSHOTS_MAX_FRAMES") {
            if let Some(val) = parsed("QSHOTS_MAX_FRAMES", v) {
                self.max_frames = Some(val);
            }
        }
        if let Some(v) = var("QSHOTS_RESOURCES") {
            self.resources = Some(PathBuf::from(v));
        }
        if let Some(v) = var("QSHOTS_GLOW") {
            if let Some(val) = parsed("QSHOTS_GLOW", v) {
                self.glow = val;
            }
        }

        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ValidationError(
                "fps must be greater than 0".to_string(),
            ));
        }

        if let Err(e) = self.color.parse::<PulseColor>() {
            return Err(ConfigError::ValidationError(e.to_string()));
        }

        if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&self.intensity) {
            return Err(ConfigError::ValidationError(format!(
                "intensity {} is outside [{MIN_INTENSITY}, {MAX_INTENSITY}]",
                self.intensity
            )));
        }

        if self.max_frames == Some(0) {
            return Err(ConfigError::ValidationError(
                "max_frames must be greater than 0; omit it to keep every shot".to_string(),
            ));
        }

        if !(self.glow.is_finite() && self.glow >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "glow must be a non-negative width, got {}",
                self.glow
            )));
        }

        Ok(())
    }

    /// Animation options carried by this configuration.
    pub fn to_options(&self) -> AnimationOptions {
        AnimationOptions {
            labeled: self.labeled,
            color: self.color.clone(),
            intensity: self.intensity,
            order: ShotOrder::Shuffled { seed: self.seed },
            max_frames: self.max_frames,
            glow: self.glow,
            parallel: self.parallel,
            ..AnimationOptions::default()
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.fps, 3);
        assert_eq!(config.color, "white");
        assert_eq!(config.intensity, 0.5);
        assert!(!config.labeled);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "fps: 10\ncolor: cyan\nseed: 7\n").unwrap();

        let config = RenderConfig::from_file(&path).unwrap();
        assert_eq!(config.fps, 10);
        assert_eq!(config.color, "cyan");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.intensity, 0.5);
        assert!(config.parallel);
    }

    #[test]
    fn test_from_file_rejects_unknown_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "frames_per_second: 10\n").unwrap();

        let err = RenderConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = RenderConfig::from_file(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let config = RenderConfig {
            fps: 10,
            color: "cyan".into(),
            ..RenderConfig::default()
        }
        .merge_vars(vars(&[
            ("QSHOTS_FPS", "24"),
            ("QSHOTS_INTENSITY", "0.9"),
            ("QSHOTS_RESOURCES", "/opt/qshots"),
        ]));

        assert_eq!(config.fps, 24);
        assert_eq!(config.color, "cyan");
        assert_eq!(config.intensity, 0.9);
        assert_eq!(config.resources, Some(PathBuf::from("/opt/qshots")));
    }

    #[test]
    fn test_env_ignores_unparsable_values() {
        let config = RenderConfig::default().merge_vars(vars(&[
            ("QSHOTS_FPS", "fast"),
            ("QSHOTS_SEED", "42"),
        ]));
        assert_eq!(config.fps, 3);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = RenderConfig::default();
        config.fps = 0;
        assert!(config.validate().is_err());

        let mut config = RenderConfig::default();
        config.color = "ultraviolet".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ultraviolet"));

        let mut config = RenderConfig::default();
        config.intensity = 1.5;
        assert!(config.validate().is_err());

        let mut config = RenderConfig::default();
        config.max_frames = Some(0);
        assert!(config.validate().is_err());

        let mut config = RenderConfig::default();
        config.glow = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_options() {
        let config = RenderConfig {
            seed: Some(9),
            color: "gold".into(),
            glow: 2.5,
            parallel: false,
            ..RenderConfig::default()
        };
        let options = config.to_options();
        assert_eq!(options.order, ShotOrder::Shuffled { seed: Some(9) });
        assert_eq!(options.color, "gold");
        assert_eq!(options.glow, 2.5);
        assert!(!options.parallel);
    }

    #[test]
    fn test_glow_from_file_and_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "glow: 10.0\n").unwrap();

        let config = RenderConfig::from_file(&path).unwrap();
        assert_eq!(config.glow, 10.0);
        let config = config.merge_vars(vars(&[("QSHOTS_GLOW", "3")]));
        assert_eq!(config.glow, 3.0);
        assert_eq!(RenderConfig::default().glow, DEFAULT_GLOW);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = RenderConfig {
            labeled: true,
            max_frames: Some(100),
            ..RenderConfig::default()
        };
        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        let back: RenderConfig = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }
}
