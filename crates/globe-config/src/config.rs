//! Configuration structs with sensible defaults and RON persistence.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::generation::GenerationConfig;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Globe generation parameters.
    pub globe: GenerationConfig,
    /// Where generated artifacts are written.
    pub export: ExportConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Output locations for generated artifacts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// PNG file receiving the biome texture.
    pub texture_path: PathBuf,
    /// Wavefront OBJ file receiving the displaced mesh. `None` skips mesh export.
    pub mesh_path: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for JSON log files in debug builds.
    pub log_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            texture_path: PathBuf::from("globe_texture.png"),
            mesh_path: Some(PathBuf::from("globe_mesh.obj")),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

impl Config {
    /// Path of the config file inside `config_dir`.
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE)
    }

    /// Read `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist yet.
    ///
    /// Settings missing from the file take their default values. The globe
    /// parameters are not validated here.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path_in(config_dir);
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
                log::info!("Loaded globe settings from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let config = Self::default();
                config.save(config_dir)?;
                log::info!("Wrote default globe settings to {}", path.display());
                Ok(config)
            }
            Err(e) => Err(ConfigError::ReadError(e)),
        }
    }

    /// Write the settings to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;
        let pretty = PrettyConfig::new().depth_limit(2).struct_names(false);
        let text = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;
        fs::write(Self::path_in(config_dir), text).map_err(ConfigError::WriteError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagonalMode;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("latitude_samples: 256"));
        assert!(ron_str.contains("ice_cap_latitude: 0.75"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.globe.diagonal = DiagonalMode::Seeded;
        config.export.mesh_path = None;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let ron_str = "(globe: (noise_seed: 7))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.globe.noise_seed, 7);
        assert_eq!(config.globe.radius, 1.0);
        assert_eq!(config.debug, DebugConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        let result: Result<Config, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.globe.noise_seed = 42;
        config.globe.texture_width = 512;
        config.export.texture_path = PathBuf::from("out/planet.png");

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_load_or_create_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(Config::path_in(dir.path()), "(globe: (radius: 6.5))").unwrap();

        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config.globe.radius, 6.5);
        assert_eq!(config.globe.latitude_samples, 256);
        let on_disk = std::fs::read_to_string(Config::path_in(dir.path())).unwrap();
        assert_eq!(on_disk, "(globe: (radius: 6.5))");
    }

    #[test]
    fn test_save_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        Config::default().save(&nested).unwrap();
        assert!(nested.join(CONFIG_FILE).is_file());
    }

    #[test]
    fn test_unreadable_config_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(Config::path_in(dir.path())).unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
