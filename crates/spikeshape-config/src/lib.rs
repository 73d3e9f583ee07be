// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Spikeshape Configuration System
//!
//! TOML-backed configuration for the shaping demo and tools, with layered
//! overrides applied in a fixed order:
//!
//! 1. Built-in defaults (every field has one)
//! 2. `spikeshape_configuration.toml` (discovered or explicit path)
//! 3. Environment variables (`SPIKESHAPE_*`)
//! 4. CLI overrides
//!
//! Later layers win. [`validate_config`] runs after all layers so the
//! effective configuration is checked, not the file as written.

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No configuration file was found along the search path
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    /// Reading the configuration file failed
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file exists but is not valid TOML for [`ShapingConfig`]
    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    /// The effective configuration failed validation
    #[error("{0}")]
    ValidationError(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
