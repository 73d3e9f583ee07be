// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for synaptic shaping operations

use core::fmt;

#[cfg(feature = "std")]
extern crate std;

/// Error types for synaptic shaping operations
///
/// Every variant is plain data so the type stays available without `std`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeuralError {
    /// A parameter word slice had the wrong length for the model
    ParameterWordMismatch { expected: usize, actual: usize },
}

impl fmt::Display for NeuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NeuralError::ParameterWordMismatch { expected, actual } => {
                write!(
                    f,
                    "Parameter word mismatch: expected {} words, got {}",
                    expected, actual
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NeuralError {}

pub type Result<T> = core::result::Result<T, NeuralError>;

// ============================================================================
// Tests
// ============================================================================
