// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for runtime operations

use spikeshape_neural::NeuralError;

/// Runtime errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    /// A neuron index addressed a record outside the population
    #[error("Neuron index {index} out of range for population of {count}")]
    NeuronIndexOutOfRange { index: usize, count: usize },

    /// A time constant or timestep was unusable for parameter derivation
    #[error("Invalid time constant: tau = {tau_ms} ms with timestep = {timestep_ms} ms (both must be positive and finite)")]
    InvalidTimeConstant { tau_ms: f64, timestep_ms: f64 },

    /// A packed word image did not divide into whole parameter records
    #[error("Word image of {actual} words is not a whole number of {record_words}-word records")]
    WordImageMismatch { record_words: usize, actual: usize },

    /// A shaping model rejected a parameter record
    #[error("Shaping model error: {0}")]
    Model(#[from] NeuralError),
}

/// Result type for runtime operations
pub type Result<T> = core::result::Result<T, RuntimeError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RuntimeError::NeuronIndexOutOfRange { index: 7, count: 4 };
        assert_eq!(
            err.to_string(),
            "Neuron index 7 out of range for population of 4"
        );

        let err = RuntimeError::from(NeuralError::ParameterWordMismatch {
            expected: 6,
            actual: 2,
        });
        assert_eq!(
            err.to_string(),
            "Shaping model error: Parameter word mismatch: expected 6 words, got 2"
        );
    }
}
