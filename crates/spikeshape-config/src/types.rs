// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Every struct here maps to a section of `spikeshape_configuration.toml`.
//! All fields carry defaults so a partial (or absent) file still yields a
//! runnable configuration.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ShapingConfig {
    /// Simulation scheduling
    pub simulation: SimulationConfig,
    /// Population and membrane parameters
    pub population: PopulationConfig,
    /// Diagnostics and tracing
    pub diagnostics: DiagnosticsConfig,
}

/// Simulation scheduling configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Timestep in milliseconds. Shaping constants are derived against this
    /// value, so it must match whatever drives the update loop.
    pub timestep_ms: f64,
    /// Number of timesteps a demo run executes
    pub steps: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep_ms: 1.0,
            steps: 100,
        }
    }
}

/// Population and membrane configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Number of neurons in the population
    pub neuron_count: usize,
    /// Excitatory synaptic time constant (ms)
    pub tau_syn_exc_ms: f64,
    /// Inhibitory synaptic time constant (ms)
    pub tau_syn_inh_ms: f64,
    /// Resting membrane potential (mV)
    pub v_rest_mv: f64,
    /// Post-spike reset potential (mV)
    pub v_reset_mv: f64,
    /// Firing threshold (mV)
    pub v_thresh_mv: f64,
    /// Membrane time constant (ms)
    pub tau_m_ms: f64,
    /// Timesteps spent clamped at reset after a spike
    pub refractory_steps: u16,
    /// Synaptic weight delivered per presynaptic spike
    pub spike_weight: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            neuron_count: 10,
            tau_syn_exc_ms: 5.0,
            tau_syn_inh_ms: 5.0,
            v_rest_mv: -65.0,
            v_reset_mv: -65.0,
            v_thresh_mv: -50.0,
            tau_m_ms: 20.0,
            refractory_steps: 2,
            spike_weight: 6.5,
        }
    }
}

/// Diagnostics configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Emit a trace line for every shaped input
    pub trace_inputs: bool,
    /// Restrict input traces to a single neuron index
    pub trace_neuron: Option<u32>,
}
