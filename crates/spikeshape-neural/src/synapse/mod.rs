// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Synapse Shaping Model Architecture
//!
//! This module defines the trait-based synapse model system so the shaping
//! stage can support multiple input kernels (exponential, alpha, delta,
//! etc.) behind one seam.
//!
//! ## Adding a New Shaping Model
//!
//! 1. Create `src/synapse/your_model.rs`
//! 2. Implement `SynapseModel` and `SynapseParameters`
//! 3. Add tests
//! 4. Export in `mod.rs`

pub mod exponential;
pub mod traits;

// Re-export core types
pub use exponential::{ConstantsDisplay, ExponentialModel, ExponentialParameters, StateDisplay};
pub use traits::{SynapseModel, SynapseParameters};
