// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Runtime-gated tracing for the shaping stage
//!
//! Two layers on top of `tracing`:
//! - Per-event traces inside [`crate::shaper::InputShaper`], gated by a
//!   process-wide [`TraceConfig`] read once from the environment.
//! - On-demand population dumps ([`trace_parameters`], [`trace_state`])
//!   that take an explicit [`TraceConfig`], so callers decide verbosity
//!   instead of the library guessing.

use std::sync::OnceLock;

use tracing::debug;

use spikeshape_neural::ExponentialModel;

use crate::shaper::InputShaper;

/// Verbosity capability for shaping traces.
/// Environment controls:
/// - SPIKESHAPE_TRACE_INPUTS=1 (master switch)
/// - SPIKESHAPE_TRACE_NEURON=<u32 neuron index> (single neuron)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceConfig {
    /// Master switch
    pub enabled: bool,
    /// Restrict traces to a single neuron index
    pub neuron_filter: Option<u32>,
}

impl TraceConfig {
    /// Nothing traces
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            neuron_filter: None,
        }
    }

    /// Every neuron traces
    pub const fn all() -> Self {
        Self {
            enabled: true,
            neuron_filter: None,
        }
    }

    /// Only the given neuron traces
    pub const fn neuron(index: u32) -> Self {
        Self {
            enabled: true,
            neuron_filter: Some(index),
        }
    }

    /// Read the trace configuration from the environment
    pub fn from_env() -> Self {
        let enabled = std::env::var("SPIKESHAPE_TRACE_INPUTS")
            .ok()
            .as_deref()
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let neuron_filter = std::env::var("SPIKESHAPE_TRACE_NEURON")
            .ok()
            .and_then(|v| v.parse().ok());

        Self {
            enabled,
            neuron_filter,
        }
    }

    /// Whether traces for `neuron_index` pass this configuration
    #[inline]
    pub fn allows(&self, neuron_index: usize) -> bool {
        self.enabled
            && self
                .neuron_filter
                .map(|filter| filter as usize == neuron_index)
                .unwrap_or(true)
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Process-wide trace configuration, read from the environment once
pub(crate) fn env_trace_cfg() -> &'static TraceConfig {
    static CFG: OnceLock<TraceConfig> = OnceLock::new();
    CFG.get_or_init(TraceConfig::from_env)
}

/// Log the derived constants of every allowed neuron, one line each
pub fn trace_parameters(shaper: &InputShaper<ExponentialModel>, trace: TraceConfig) {
    for (index, record) in shaper.records().iter().enumerate() {
        if trace.allows(index) {
            debug!(
                target: "spikeshape-trace",
                "[SHAPE] neuron={} {}",
                index,
                record.display_constants()
            );
        }
    }
}

/// Log the accumulator state of every allowed neuron, one line each:
/// shaped excitatory charge, then inhibitory
pub fn trace_state(shaper: &InputShaper<ExponentialModel>, trace: TraceConfig) {
    for (index, record) in shaper.records().iter().enumerate() {
        if trace.allows(index) {
            debug!(
                target: "spikeshape-trace",
                "[SHAPE] neuron={} state {}",
                index,
                record.display_state()
            );
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
