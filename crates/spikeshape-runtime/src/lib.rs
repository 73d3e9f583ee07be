// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Shaping Runtime
//!
//! Host-side runtime around the platform-agnostic shaping core.
//!
//! This crate provides:
//! - **Loader**: derives fixed-point shaping constants from biophysical
//!   time constants and packs populations through `u32` word images
//! - **Shaper**: [`InputShaper`], the arena that owns per-neuron records
//!   and sequences decay, delivery, and reads each timestep
//! - **LIF**: a fixed-point leaky integrate-and-fire consumer for
//!   end-to-end runs
//! - **Diagnostics**: `tracing`-based population dumps and per-event
//!   traces, gated by [`TraceConfig`]
//!
//! ## Usage
//!
//! ```rust
//! use spikeshape_neural::{Accum, Channel, ExponentialModel};
//! use spikeshape_runtime::{build_population, InputShaper};
//!
//! let records = build_population(16, 5.0, 5.0, 1.0).unwrap();
//! let mut shaper = InputShaper::new(ExponentialModel::new(), records);
//!
//! shaper.decay_all();
//! shaper.add_input(3, Channel::Excitatory, Accum::from_f32(1.0)).unwrap();
//! let drive = shaper.excitatory_input(3).unwrap();
//! assert!(drive > Accum::ZERO);
//! ```

#![warn(missing_docs)]

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod diagnostics;
pub mod error;
pub mod lif;
pub mod loader;
pub mod shaper;

// Re-export the working surface for convenience
pub use diagnostics::{trace_parameters, trace_state, TraceConfig};
pub use error::{Result, RuntimeError};
pub use lif::{LifParameters, LifState};
pub use loader::{
    build_population, exponential_decay_and_init, exponential_record, records_from_words,
    records_to_words,
};
pub use shaper::InputShaper;
