//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Shared command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
pub struct CliArgs {
    /// Chunks per side of the terrain grid.
    #[arg(long)]
    pub grid_dimension: Option<u32>,

    /// Metric edge length of one chunk.
    #[arg(long)]
    pub chunk_size: Option<f32>,

    /// Clip circle radius in meters.
    #[arg(long)]
    pub clip_radius: Option<f32>,

    /// Map scale (meters of table per meter of terrain).
    #[arg(long)]
    pub scale: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(dim) = args.grid_dimension {
            self.terrain.grid_dimension = dim;
        }
        if let Some(size) = args.chunk_size {
            self.terrain.chunk_size = size;
        }
        if let Some(radius) = args.clip_radius {
            self.terrain.clip_radius = radius;
        }
        if let Some(scale) = args.scale {
            self.map.scale = scale;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            grid_dimension: Some(5),
            scale: Some(0.00005),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.terrain.grid_dimension, 5);
        assert_eq!(config.map.scale, 0.00005);
        // Non-overridden fields retain defaults
        assert_eq!(config.terrain.chunk_detail, 64);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }
}
