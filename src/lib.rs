// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Spikeshape - Fixed-Point Synaptic Input Shaping
//!
//! Spikeshape turns discrete synaptic events into the smooth per-timestep
//! drive a spiking neuron model consumes, using integer-only arithmetic so
//! the same update loop runs identically on a host and on embedded targets
//! without an FPU.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! spikeshape = "0.1"
//! ```
//!
//! ```rust
//! use spikeshape::prelude::*;
//!
//! // Four neurons, 10 ms synaptic time constants, 1 ms timestep
//! let records = build_population(4, 10.0, 10.0, 1.0)?;
//! let mut shaper = InputShaper::new(ExponentialModel::new(), records);
//!
//! // One timestep: decay carried-over drive, then fold in arrivals
//! shaper.decay_all();
//! shaper.deliver(0, 0, Accum::from_f64(2.5))?;
//!
//! let drive = shaper.excitatory_input(0)?;
//! assert!(drive.to_f64() > 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: spikeshape-neural (no_std)                 │
//! │  (Accum s16.15, Decay u0.32, channels, shaping models)  │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Host runtime: spikeshape-runtime                       │
//! │  (constant derivation, populations, delivery, tracing)  │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Applications: spikeshape-config + tools/               │
//! │  (TOML configuration, synfire chain demo)               │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Platform Support
//!
//! - Linux / macOS / Windows hosts (full workspace)
//! - `no_std` targets via `spikeshape-neural` with `default-features = false`
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use spikeshape_neural as neural;

// Re-export host runtime
pub use spikeshape_runtime as runtime;

// Re-export configuration
pub use spikeshape_config as config;

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::neural::{
        channel_label, Accum, Channel, Decay, ExponentialModel, ExponentialParameters,
        SynapseModel, SynapseParameters,
    };

    pub use crate::runtime::{
        build_population, exponential_record, records_from_words, records_to_words, InputShaper,
        LifParameters, LifState, RuntimeError, TraceConfig,
    };

    pub use crate::config::{load_config, validate_config, ShapingConfig};
}
