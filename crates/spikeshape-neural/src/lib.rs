// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Synaptic Input Shaping (Platform-Agnostic)
//!
//! The shaping stage between spike delivery and neuron dynamics:
//! - **Types**: Fixed-point numerics (Accum, Decay) and channel classification
//! - **Synapse**: Shaping models that turn spike arrivals into continuous drive
//!
//! All per-timestep arithmetic is integer-only and bit-exact across hosts,
//! so the same population state evolves identically on a workstation and on
//! a fixed-point embedded target.
//!
//! ## Target Platforms
//! - ✅ Desktop (Linux, macOS, Windows)
//! - ✅ Embedded (ESP32, ARM Cortex-M)
//! - ✅ RTOS (FreeRTOS, Zephyr)
//! - ✅ WASM (browser, Node.js)

#![cfg_attr(not(feature = "std"), no_std)]

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "std")]
extern crate std;

// Core type definitions
pub mod types;

// Synapse shaping models
pub mod synapse;

// Re-export types
pub use types::{channel_label, Accum, Channel, Decay, NeuralError, Result};

// Re-export synapse models
pub use synapse::{
    ConstantsDisplay, ExponentialModel, ExponentialParameters, StateDisplay, SynapseModel,
    SynapseParameters,
};
