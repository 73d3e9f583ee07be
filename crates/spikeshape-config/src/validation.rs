// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Validation runs over the effective configuration (after environment and
//! CLI overrides) and reports every problem at once rather than stopping at
//! the first, so a broken file can be fixed in one pass.

use std::fmt;

use crate::{ConfigError, ConfigResult, PopulationConfig, ShapingConfig, SimulationConfig};

/// Largest magnitude a membrane quantity can take once converted to the
/// s16.15 fixed-point representation used by the update loop.
const FIXED_POINT_LIMIT: f64 = 65536.0;

/// Individual validation failures
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    /// A time constant or timestep that must be strictly positive is not
    NonPositive {
        /// Dotted path of the offending field
        field: &'static str,
        /// Value as configured
        value: f64,
    },
    /// A count that must be at least 1 is zero
    ZeroCount {
        /// Dotted path of the offending field
        field: &'static str,
    },
    /// A voltage or weight falls outside the representable fixed-point range
    OutOfRange {
        /// Dotted path of the offending field
        field: &'static str,
        /// Value as configured
        value: f64,
    },
    /// A value is individually plausible but inconsistent with another field
    InvalidValue {
        /// Dotted path of the offending field
        field: &'static str,
        /// Human-readable explanation
        reason: String,
    },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValidationError::NonPositive { field, value } => {
                write!(f, "{} must be positive and finite, got {}", field, value)
            }
            ConfigValidationError::ZeroCount { field } => {
                write!(f, "{} must be at least 1", field)
            }
            ConfigValidationError::OutOfRange { field, value } => {
                write!(
                    f,
                    "{} = {} is outside the representable range (magnitude below {})",
                    field, value, FIXED_POINT_LIMIT
                )
            }
            ConfigValidationError::InvalidValue { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
        }
    }
}

/// Validates the complete configuration, accumulating all failures.
pub fn validate_config(config: &ShapingConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_simulation(&config.simulation, &mut errors);
    validate_population(&config.population, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        let details: Vec<String> = errors.iter().map(|e| format!("  - {}", e)).collect();
        Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            details.join("\n")
        )))
    }
}

fn validate_simulation(sim: &SimulationConfig, errors: &mut Vec<ConfigValidationError>) {
    check_positive("simulation.timestep_ms", sim.timestep_ms, errors);
    if sim.steps == 0 {
        errors.push(ConfigValidationError::ZeroCount {
            field: "simulation.steps",
        });
    }
}

fn validate_population(pop: &PopulationConfig, errors: &mut Vec<ConfigValidationError>) {
    if pop.neuron_count == 0 {
        errors.push(ConfigValidationError::ZeroCount {
            field: "population.neuron_count",
        });
    }

    check_positive("population.tau_syn_exc_ms", pop.tau_syn_exc_ms, errors);
    check_positive("population.tau_syn_inh_ms", pop.tau_syn_inh_ms, errors);
    check_positive("population.tau_m_ms", pop.tau_m_ms, errors);

    check_representable("population.v_rest_mv", pop.v_rest_mv, errors);
    check_representable("population.v_reset_mv", pop.v_reset_mv, errors);
    check_representable("population.v_thresh_mv", pop.v_thresh_mv, errors);
    check_representable("population.spike_weight", pop.spike_weight, errors);

    if pop.spike_weight.is_finite() && pop.spike_weight < 0.0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "population.spike_weight",
            reason: format!("weight {} must be non-negative", pop.spike_weight),
        });
    }

    // Threshold ordering only makes sense once the individual values are sane.
    if pop.v_thresh_mv.is_finite() && pop.v_reset_mv.is_finite() && pop.v_rest_mv.is_finite() {
        if pop.v_thresh_mv <= pop.v_reset_mv {
            errors.push(ConfigValidationError::InvalidValue {
                field: "population.v_thresh_mv",
                reason: format!(
                    "threshold {} must sit above the reset potential {}",
                    pop.v_thresh_mv, pop.v_reset_mv
                ),
            });
        }
        if pop.v_thresh_mv <= pop.v_rest_mv {
            errors.push(ConfigValidationError::InvalidValue {
                field: "population.v_thresh_mv",
                reason: format!(
                    "threshold {} must sit above the resting potential {}, \
                     or the population fires with no input",
                    pop.v_thresh_mv, pop.v_rest_mv
                ),
            });
        }
    }
}

fn check_positive(field: &'static str, value: f64, errors: &mut Vec<ConfigValidationError>) {
    // The negated comparison also rejects NaN.
    if !(value > 0.0) || !value.is_finite() {
        errors.push(ConfigValidationError::NonPositive { field, value });
    }
}

fn check_representable(field: &'static str, value: f64, errors: &mut Vec<ConfigValidationError>) {
    if !value.is_finite() || value.abs() >= FIXED_POINT_LIMIT {
        errors.push(ConfigValidationError::OutOfRange { field, value });
    }
}
