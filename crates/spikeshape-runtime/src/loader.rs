// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Host-side parameter derivation and population loading
//!
//! Shaping constants are derived from biophysical time constants in f64 on
//! the host, then frozen into fixed-point records. Nothing here runs on the
//! per-timestep path, so floating point is acceptable: determinism only
//! starts once the records exist.

use tracing::debug;

use spikeshape_neural::{Decay, ExponentialParameters, SynapseParameters};

use crate::error::{Result, RuntimeError};

/// Derive the per-timestep decay factor and initial-value factor for one
/// exponential channel.
///
/// For a membrane time constant `τ` and timestep `Δt`:
///
/// ```text
/// decay = exp(-Δt/τ)
/// init  = (τ/Δt) × (1 - decay)
/// ```
///
/// The init factor scales arriving charge so the area under the shaped
/// kernel stays independent of the timestep. Both results lie in [0, 1) and
/// freeze into u0.32 coefficients.
pub fn exponential_decay_and_init(tau_ms: f64, timestep_ms: f64) -> Result<(Decay, Decay)> {
    // The negated comparisons also reject NaN
    if !(tau_ms > 0.0) || !(timestep_ms > 0.0) || !tau_ms.is_finite() || !timestep_ms.is_finite() {
        return Err(RuntimeError::InvalidTimeConstant { tau_ms, timestep_ms });
    }
    let ratio = timestep_ms / tau_ms;
    let decay = (-ratio).exp();
    let init = (1.0 - decay) / ratio;
    Ok((Decay::from_f64(decay), Decay::from_f64(init)))
}

/// Build one exponential record from excitatory and inhibitory time
/// constants, with empty accumulators.
pub fn exponential_record(
    tau_exc_ms: f64,
    tau_inh_ms: f64,
    timestep_ms: f64,
) -> Result<ExponentialParameters> {
    let (exc_decay, exc_init) = exponential_decay_and_init(tau_exc_ms, timestep_ms)?;
    let (inh_decay, inh_init) = exponential_decay_and_init(tau_inh_ms, timestep_ms)?;
    Ok(ExponentialParameters::with_constants(
        exc_decay, exc_init, inh_decay, inh_init,
    ))
}

/// Build a homogeneous population of exponential records.
///
/// Every neuron shares the same derived constants; accumulators start
/// empty. Heterogeneous populations load through [`records_from_words`]
/// instead.
pub fn build_population(
    neuron_count: usize,
    tau_exc_ms: f64,
    tau_inh_ms: f64,
    timestep_ms: f64,
) -> Result<Vec<ExponentialParameters>> {
    let record = exponential_record(tau_exc_ms, tau_inh_ms, timestep_ms)?;
    debug!(
        target: "spikeshape-trace",
        "[LOAD] built population of {} neurons: {}",
        neuron_count,
        record.display_constants()
    );
    Ok(vec![record; neuron_count])
}

/// Decode a packed `u32` word image into parameter records.
///
/// The image must be a whole number of records; each record occupies
/// `P::WORD_COUNT` consecutive words.
pub fn records_from_words<P: SynapseParameters>(words: &[u32]) -> Result<Vec<P>> {
    if words.len() % P::WORD_COUNT != 0 {
        return Err(RuntimeError::WordImageMismatch {
            record_words: P::WORD_COUNT,
            actual: words.len(),
        });
    }
    words
        .chunks_exact(P::WORD_COUNT)
        .map(|chunk| P::from_words(chunk).map_err(RuntimeError::from))
        .collect()
}

/// Encode parameter records into a packed `u32` word image, the inverse of
/// [`records_from_words`].
pub fn records_to_words<P: SynapseParameters>(records: &[P]) -> Result<Vec<u32>> {
    let mut words = vec![0u32; records.len() * P::WORD_COUNT];
    for (record, chunk) in records.iter().zip(words.chunks_exact_mut(P::WORD_COUNT)) {
        record.write_words(chunk)?;
    }
    Ok(words)
}

// ============================================================================
// Tests
// ============================================================================
