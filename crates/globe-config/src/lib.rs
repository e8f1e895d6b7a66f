//! Configuration for the globe generator.
//!
//! Holds the generation parameters and their validation, persists settings to
//! disk as RON files, and applies CLI overrides parsed with clap.

mod cli;
mod config;
mod error;
mod generation;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE, Config, DebugConfig, ExportConfig};
pub use error::ConfigError;
pub use generation::{DiagonalMode, GenerationConfig};
