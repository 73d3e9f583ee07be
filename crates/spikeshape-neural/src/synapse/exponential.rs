// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Exponential Synapse Shaping Model
//!
//! The exponential model is the default input shaping stage: each arriving
//! spike contributes a step of charge that then decays geometrically, which
//! approximates a first-order low-pass synapse.
//!
//! ## Model Dynamics
//!
//! ```text
//! Per-timestep decay (each accumulating channel):
//!     input(t+1) = decay × input(t)
//!
//!     Where:
//!     - input = s16.15 accumulated charge
//!     - decay = u0.32 coefficient, exp(-Δt/τ) derived host-side
//!
//! Input arrival (excitatory or inhibitory channel):
//!     input += init × weight        (saturating add)
//!
//!     Where:
//!     - init = u0.32 scaled initial-value factor, (τ/Δt)(1 - decay)
//!     - weight = s16.15 synaptic weight of the arriving spike
//!
//! Neuron drive (read once per timestep by the neuron model):
//!     I_syn = excitatory_input - inhibitory_input
//! ```
//!
//! Supervision channels (reward, punishment) share the delivery path but
//! have no accumulator: their inputs are accepted and dropped here, and
//! only plasticity rules observe them upstream.

use core::fmt;

use super::traits::{SynapseModel, SynapseParameters};
use crate::types::{Accum, Channel, Decay, NeuralError, Result};

/// Exponential synapse shaping model
///
/// Stateless; all per-neuron state lives in [`ExponentialParameters`]
/// records owned by the caller.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialModel;

impl ExponentialModel {
    /// Create a new exponential model instance
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExponentialModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SynapseModel for ExponentialModel {
    type Parameters = ExponentialParameters;

    fn model_name(&self) -> &'static str {
        "Exponential synaptic shaping"
    }

    #[inline(always)]
    fn decay(&self, params: &mut ExponentialParameters) {
        params.exc_input = params.exc_decay.apply(params.exc_input);
        params.inh_input = params.inh_decay.apply(params.inh_input);
    }

    #[inline(always)]
    fn add_input(&self, channel: Channel, input: Accum, params: &mut ExponentialParameters) {
        match channel {
            Channel::Excitatory => {
                params.exc_input = params.exc_input.saturating_add(params.exc_init.apply(input));
            }
            Channel::Inhibitory => {
                params.inh_input = params.inh_input.saturating_add(params.inh_init.apply(input));
            }
            // No supervision accumulators; inputs on these channels are
            // accepted and dropped so the delivery path stays total
            Channel::Reward | Channel::Punishment => {}
        }
    }

    #[inline(always)]
    fn excitatory_input(&self, params: &ExponentialParameters) -> Accum {
        params.exc_input
    }

    #[inline(always)]
    fn inhibitory_input(&self, params: &ExponentialParameters) -> Accum {
        params.inh_input
    }
}

/// Per-neuron record for the exponential model
///
/// Four derived constants and two live accumulators. The constants are
/// computed host-side from (τ, Δt) pairs; the accumulators carry the shaped
/// charge between timesteps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExponentialParameters {
    /// Per-timestep excitatory decay factor, exp(-Δt/τ_exc)
    pub exc_decay: Decay,
    /// Excitatory initial-value factor, (τ_exc/Δt)(1 - exc_decay)
    pub exc_init: Decay,
    /// Per-timestep inhibitory decay factor, exp(-Δt/τ_inh)
    pub inh_decay: Decay,
    /// Inhibitory initial-value factor, (τ_inh/Δt)(1 - inh_decay)
    pub inh_init: Decay,
    /// Accumulated excitatory charge
    pub exc_input: Accum,
    /// Accumulated inhibitory charge
    pub inh_input: Accum,
}

impl ExponentialParameters {
    /// Create a record with default constants and empty accumulators
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record with the given constants and empty accumulators
    pub fn with_constants(
        exc_decay: Decay,
        exc_init: Decay,
        inh_decay: Decay,
        inh_init: Decay,
    ) -> Self {
        Self {
            exc_decay,
            exc_init,
            inh_decay,
            inh_init,
            exc_input: Accum::ZERO,
            inh_input: Accum::ZERO,
        }
    }

    /// Constants line for diagnostics, one `name = value` pair per constant
    pub fn display_constants(&self) -> ConstantsDisplay<'_> {
        ConstantsDisplay(self)
    }

    /// Accumulator line for diagnostics, excitatory then inhibitory
    pub fn display_state(&self) -> StateDisplay<'_> {
        StateDisplay(self)
    }
}

impl Default for ExponentialParameters {
    /// Zero constants: all charge clears every timestep, nothing carries
    /// over. Real constants come from the host-side loader.
    fn default() -> Self {
        Self::with_constants(Decay::ZERO, Decay::ZERO, Decay::ZERO, Decay::ZERO)
    }
}

impl SynapseParameters for ExponentialParameters {
    const WORD_COUNT: usize = 6;

    fn from_words(words: &[u32]) -> Result<Self> {
        if words.len() != Self::WORD_COUNT {
            return Err(NeuralError::ParameterWordMismatch {
                expected: Self::WORD_COUNT,
                actual: words.len(),
            });
        }
        Ok(Self {
            exc_decay: Decay::from_raw(words[0]),
            exc_init: Decay::from_raw(words[1]),
            inh_decay: Decay::from_raw(words[2]),
            inh_init: Decay::from_raw(words[3]),
            exc_input: Accum::from_raw(words[4] as i32),
            inh_input: Accum::from_raw(words[5] as i32),
        })
    }

    fn write_words(&self, words: &mut [u32]) -> Result<()> {
        if words.len() != Self::WORD_COUNT {
            return Err(NeuralError::ParameterWordMismatch {
                expected: Self::WORD_COUNT,
                actual: words.len(),
            });
        }
        words[0] = self.exc_decay.to_raw();
        words[1] = self.exc_init.to_raw();
        words[2] = self.inh_decay.to_raw();
        words[3] = self.inh_init.to_raw();
        words[4] = self.exc_input.to_raw() as u32;
        words[5] = self.inh_input.to_raw() as u32;
        Ok(())
    }
}

/// Display adapter over a record's four derived constants
pub struct ConstantsDisplay<'a>(&'a ExponentialParameters);

impl fmt::Display for ConstantsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "exc_decay = {}, exc_init = {}, inh_decay = {}, inh_init = {}",
            self.0.exc_decay, self.0.exc_init, self.0.inh_decay, self.0.inh_init
        )
    }
}

/// Display adapter over a record's two accumulators
pub struct StateDisplay<'a>(&'a ExponentialParameters);

impl fmt::Display for StateDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.0.exc_input, self.0.inh_input)
    }
}

// ============================================================================
// Tests
// ============================================================================
