// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Trait seam between synapse shaping models and the code that drives them

use core::fmt;

use crate::types::{Accum, Channel, Result};

/// Per-neuron parameter record for a synapse shaping model
///
/// A record bundles the model's constants and its mutable accumulator state
/// for one neuron. Records are plain `Copy` data so populations can store
/// them contiguously, and they round-trip through a packed `u32` word image
/// for loading and snapshotting.
pub trait SynapseParameters: Copy + fmt::Debug {
    /// Number of `u32` words in the packed representation of one record
    const WORD_COUNT: usize;

    /// Decode one record from exactly [`Self::WORD_COUNT`] packed words
    fn from_words(words: &[u32]) -> Result<Self>
    where
        Self: Sized;

    /// Encode this record into exactly [`Self::WORD_COUNT`] packed words
    fn write_words(&self, words: &mut [u32]) -> Result<()>;
}

/// Synaptic input shaping model
///
/// Implementations turn discrete spike arrivals into the continuous drive a
/// neuron model reads each timestep. The model itself is stateless; all
/// per-neuron state lives in [`SynapseModel::Parameters`] records owned by
/// the caller.
///
/// # Ordering Contract
///
/// Within one timestep, for each neuron: [`SynapseModel::decay`] runs
/// exactly once, then zero or more [`SynapseModel::add_input`] calls land,
/// then the accessors are read. Callers own this sequencing; the model does
/// no synchronization of its own.
pub trait SynapseModel {
    /// Per-neuron record type for this model
    type Parameters: SynapseParameters;

    /// Human-readable model name for logs and diagnostics
    fn model_name(&self) -> &'static str;

    /// Advance the shaped input by one timestep of exponential decay.
    ///
    /// Applies to the charge carried over from earlier timesteps, so it
    /// must run before any of the current timestep's inputs are added.
    fn decay(&self, params: &mut Self::Parameters);

    /// Deliver one weighted input on `channel`.
    ///
    /// Accumulating channels scale the input by their initial-value factor
    /// and add it with saturation; supervision channels are accepted and
    /// leave the record untouched.
    fn add_input(&self, channel: Channel, input: Accum, params: &mut Self::Parameters);

    /// Shaped excitatory drive for the neuron model to read. Read-only.
    fn excitatory_input(&self, params: &Self::Parameters) -> Accum;

    /// Shaped inhibitory drive for the neuron model to read. Read-only.
    fn inhibitory_input(&self, params: &Self::Parameters) -> Accum;
}
