// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Fixed-Point LIF (Leaky Integrate-and-Fire) Consumer
//!
//! A minimal membrane model that consumes the shaped drive, for end-to-end
//! runs and demos. It reuses the same fixed-point primitives as the shaping
//! stage, so a whole simulation step is integer-only.
//!
//! ## Model Dynamics
//!
//! ```text
//! Membrane Potential Update (per timestep):
//!     I_syn  = excitatory_input - inhibitory_input
//!     V(t+1) = V(t) + I_syn - leak × (V(t) - V_rest)
//!
//!     Where:
//!     - V = membrane potential (s16.15, millivolts)
//!     - leak = Δt/τ_m frozen into a u0.32 coefficient
//!
//! Firing Check:
//!     if refractory_countdown > 0:
//!         hold at V_reset, count down, no fire
//!     else if V(t+1) ≥ V_thresh:
//!         FIRE, reset to V_reset, start refractory countdown
//! ```

use spikeshape_neural::{Accum, Decay};

use crate::error::{Result, RuntimeError};

/// Fixed-point LIF constants, shared by every neuron in a population
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifParameters {
    /// Resting potential the membrane leaks toward
    pub v_rest: Accum,
    /// Potential the membrane resets to after a spike
    pub v_reset: Accum,
    /// Firing threshold
    pub v_thresh: Accum,
    /// Leak coefficient, Δt/τ_m
    pub leak: Decay,
    /// Timesteps spent clamped at reset after a spike
    pub refractory_steps: u16,
}

impl LifParameters {
    /// Freeze biophysical constants (millivolts, milliseconds) into a
    /// fixed-point parameter set.
    ///
    /// A membrane time constant shorter than the timestep saturates the
    /// leak coefficient at just under one, which drains the whole offset
    /// every step.
    pub fn from_biophysics(
        v_rest_mv: f64,
        v_reset_mv: f64,
        v_thresh_mv: f64,
        tau_m_ms: f64,
        timestep_ms: f64,
        refractory_steps: u16,
    ) -> Result<Self> {
        if !(tau_m_ms > 0.0) || !(timestep_ms > 0.0) || !tau_m_ms.is_finite() || !timestep_ms.is_finite() {
            return Err(RuntimeError::InvalidTimeConstant {
                tau_ms: tau_m_ms,
                timestep_ms,
            });
        }
        Ok(Self {
            v_rest: Accum::from_f64(v_rest_mv),
            v_reset: Accum::from_f64(v_reset_mv),
            v_thresh: Accum::from_f64(v_thresh_mv),
            leak: Decay::from_f64(timestep_ms / tau_m_ms),
            refractory_steps,
        })
    }
}

/// Mutable per-neuron LIF state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifState {
    /// Membrane potential
    pub v: Accum,
    /// Remaining refractory timesteps, zero when excitable
    pub refractory_countdown: u16,
}

impl LifState {
    /// A fresh neuron sitting at the resting potential
    pub fn resting(params: &LifParameters) -> Self {
        Self {
            v: params.v_rest,
            refractory_countdown: 0,
        }
    }
}

impl LifParameters {
    /// Advance one neuron by one timestep. Returns `true` if it fired.
    #[inline(always)]
    pub fn step(&self, state: &mut LifState, excitatory: Accum, inhibitory: Accum) -> bool {
        if state.refractory_countdown > 0 {
            state.refractory_countdown -= 1;
            state.v = self.v_reset;
            return false;
        }

        let drive = excitatory.saturating_sub(inhibitory);
        let leak_term = self.leak.apply(state.v.saturating_sub(self.v_rest));
        state.v = state.v.saturating_add(drive).saturating_sub(leak_term);

        if state.v >= self.v_thresh {
            state.v = self.v_reset;
            state.refractory_countdown = self.refractory_steps;
            return true;
        }
        false
    }
}

// ============================================================================
// Tests
// ============================================================================
