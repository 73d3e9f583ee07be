// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, ShapingConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Find the shaping configuration file
///
/// Search order:
/// 1. `SPIKESHAPE_CONFIG_PATH` environment variable
/// 2. Current working directory: `./spikeshape_configuration.toml`
/// 3. Up to five parent directories (covers running from a workspace member)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    // 1. Check environment variable first
    if let Ok(env_path) = env::var("SPIKESHAPE_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by SPIKESHAPE_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    // 2. Search the working directory, then walk upward
    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join("spikeshape_configuration.toml"));

        let mut current = cwd;
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join("spikeshape_configuration.toml"));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Shaping configuration file 'spikeshape_configuration.toml' not found in any of these locations:\n{}\n\nSet SPIKESHAPE_CONFIG_PATH environment variable to specify custom location.",
        search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Returns
///
/// Complete `ShapingConfig` with all overrides applied
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML.
/// Validation is the caller's responsibility, after all layers are applied.
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<ShapingConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: ShapingConfig = toml::from_str(&content)?;

    // Apply overrides in order
    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `SPIKESHAPE_TIMESTEP_MS` -> `simulation.timestep_ms`
/// - `SPIKESHAPE_STEPS` -> `simulation.steps`
/// - `SPIKESHAPE_NEURON_COUNT` -> `population.neuron_count`
/// - `SPIKESHAPE_TRACE_INPUTS` -> `diagnostics.trace_inputs`
/// - `SPIKESHAPE_TRACE_NEURON` -> `diagnostics.trace_neuron`
///
/// The two trace variables are the same ones the runtime's per-event trace
/// gate reads, so either entry point sees one consistent setting.
///
/// Values that fail to parse are ignored and the previous value kept.
pub fn apply_environment_overrides(config: &mut ShapingConfig) {
    if let Ok(value) = env::var("SPIKESHAPE_TIMESTEP_MS") {
        if let Ok(timestep) = value.parse::<f64>() {
            config.simulation.timestep_ms = timestep;
        }
    }
    if let Ok(value) = env::var("SPIKESHAPE_STEPS") {
        if let Ok(steps) = value.parse::<u64>() {
            config.simulation.steps = steps;
        }
    }
    if let Ok(value) = env::var("SPIKESHAPE_NEURON_COUNT") {
        if let Ok(count) = value.parse::<usize>() {
            config.population.neuron_count = count;
        }
    }
    if let Ok(value) = env::var("SPIKESHAPE_TRACE_INPUTS") {
        config.diagnostics.trace_inputs =
            value.to_lowercase() == "true" || value == "1" || value.to_lowercase() == "yes";
    }
    if let Ok(value) = env::var("SPIKESHAPE_TRACE_NEURON") {
        if let Ok(neuron) = value.parse::<u32>() {
            config.diagnostics.trace_neuron = Some(neuron);
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"steps": "500", "neuron_count": "32"}`)
pub fn apply_cli_overrides(config: &mut ShapingConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("timestep_ms") {
        if let Ok(timestep) = value.parse::<f64>() {
            config.simulation.timestep_ms = timestep;
        }
    }
    if let Some(value) = cli_args.get("steps") {
        if let Ok(steps) = value.parse::<u64>() {
            config.simulation.steps = steps;
        }
    }
    if let Some(value) = cli_args.get("neuron_count") {
        if let Ok(count) = value.parse::<usize>() {
            config.population.neuron_count = count;
        }
    }
    if let Some(value) = cli_args.get("trace_inputs") {
        config.diagnostics.trace_inputs = value.to_lowercase() == "true" || value == "1";
    }
    if let Some(value) = cli_args.get("trace_neuron") {
        if let Ok(neuron) = value.parse::<u32>() {
            config.diagnostics.trace_neuron = Some(neuron);
        }
    }
}
