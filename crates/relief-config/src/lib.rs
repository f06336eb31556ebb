//! Configuration for the relief terrain system.
//!
//! Runtime-configurable settings that persist to disk as RON files, with
//! CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, LocationConfig, LodConfig, MapConfig, TerrainConfig};
pub use error::ConfigError;
