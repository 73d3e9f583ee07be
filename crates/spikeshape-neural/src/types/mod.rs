// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Shaping Types Module
//!
//! Core type definitions for the synaptic input shaping stage.

pub mod channel;
pub mod error;
pub mod numeric;

// Re-export commonly used types
pub use channel::{channel_label, Channel};
pub use error::{NeuralError, Result};
pub use numeric::{Accum, Decay};
