//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use relief_terrain::{LodPolicy, RecenterReference, TerrainParams};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Chunk grid settings.
    pub terrain: TerrainConfig,
    /// Level-of-detail settings.
    pub lod: LodConfig,
    /// Map data settings.
    pub map: MapConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Chunk grid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Geometry density per chunk at full resolution (vertices per edge of
    /// the densest pre-built mesh level).
    pub chunk_detail: u32,
    /// Metric edge length of one chunk.
    pub chunk_size: f32,
    /// Chunks per side; even counts round up to the next odd.
    pub grid_dimension: u32,
    /// Clip circle radius, meters.
    pub clip_radius: f32,
    /// What the chunk grid keeps itself centered on.
    pub recenter: RecenterReference,
}

/// Level-of-detail configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LodConfig {
    /// How per-chunk resolution levels are chosen.
    pub policy: LodPolicy,
    /// Number of pre-built mesh resolution levels, halving in density per
    /// step.
    pub levels: u32,
}

/// Map data configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// Meters of map per meter of table: the factor shrinking geographic
    /// distances into the local scene.
    pub scale: f32,
    /// Selectable location presets.
    pub locations: Vec<LocationConfig>,
}

/// One selectable map location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationConfig {
    /// Display name.
    pub name: String,
    /// Center latitude, degrees.
    pub latitude: f64,
    /// Center longitude, degrees.
    pub longitude: f64,
    /// Radius of the queried region, meters.
    pub radius_m: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log every draw call at trace level.
    pub trace_draw_calls: bool,
}

// --- Default implementations ---

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            chunk_detail: 64,
            chunk_size: 0.6,
            grid_dimension: 3,
            clip_radius: 0.3,
            recenter: RecenterReference::default(),
        }
    }
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            policy: LodPolicy::default(),
            levels: 4,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            scale: 0.00004,
            locations: vec![
                LocationConfig {
                    name: "Kauai".to_string(),
                    latitude: 22.0,
                    longitude: -159.5,
                    radius_m: 20_000.0,
                },
                LocationConfig {
                    name: "Grand Canyon".to_string(),
                    latitude: 36.3,
                    longitude: -112.75,
                    radius_m: 10_000.0,
                },
                LocationConfig {
                    name: "Mt. Everest".to_string(),
                    latitude: 27.98,
                    longitude: 86.92,
                    radius_m: 10_000.0,
                },
                LocationConfig {
                    name: "Machu Picchu".to_string(),
                    latitude: -13.16,
                    longitude: -72.54,
                    radius_m: 10_000.0,
                },
            ],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            trace_draw_calls: false,
        }
    }
}

impl Config {
    /// Terrain construction parameters assembled from the terrain and lod
    /// sections.
    pub fn terrain_params(&self) -> TerrainParams {
        TerrainParams {
            chunk_size: self.terrain.chunk_size,
            grid_dimension: self.terrain.grid_dimension as usize,
            clip_radius: self.terrain.clip_radius,
            recenter: self.terrain.recenter,
            lod_policy: self.lod.policy,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(!ron_str.is_empty());
        assert!(ron_str.contains("chunk_detail: 64"));
        assert!(ron_str.contains("Kauai"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        // Config missing the `map` section entirely
        let ron_str = "(terrain: (), lod: (), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.map, MapConfig::default());
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
        config.terrain.grid_dimension = 5;
        config.map.scale = 0.00005;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.lod.policy = LodPolicy::HeadRelative;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_some());
        assert_eq!(result.unwrap().lod.policy, LodPolicy::HeadRelative);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_terrain_params_mirror_config() {
        let mut config = Config::default();
        config.terrain.grid_dimension = 4;
        config.lod.policy = LodPolicy::Constant;

        let params = config.terrain_params();
        assert_eq!(params.grid_dimension, 4);
        assert_eq!(params.lod_policy, LodPolicy::Constant);
        assert_eq!(params.chunk_size, config.terrain.chunk_size);
    }
}
