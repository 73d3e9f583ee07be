// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Shaping Cycle Test Suite
//!
//! End-to-end validation of the shaping stage across whole timesteps:
//! decay ordering, fixed-point accuracy against a floating-point reference,
//! snapshot round-trips, delivery-boundary totality, and a LIF consumer.
//!
//! # Test Coverage Matrix
//!
//! ## Timestep Ordering
//! - Decay applies to carry-over charge only
//! - Same-timestep inputs land undecayed
//!
//! ## Numeric Accuracy
//! - Multi-timestep runs track an f64 reference within accumulated
//!   truncation error
//!
//! ## Snapshots
//! - Word-image round-trips resume bit-exact mid-run
//!
//! ## Delivery Boundary
//! - All four channels accepted, unknown indices dropped
//! - Supervision channels never alter drive
//!
//! ## Consumers
//! - Shaped drive pushes a fixed-point LIF neuron to threshold

use spikeshape_neural::{Accum, Channel, ExponentialModel, ExponentialParameters};
use spikeshape_runtime::{
    build_population, records_from_words, records_to_words, InputShaper, LifParameters, LifState,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Create a shaper over a homogeneous population for testing
fn create_test_shaper(neuron_count: usize, tau_exc_ms: f64, tau_inh_ms: f64) -> InputShaper<ExponentialModel> {
    let records = build_population(neuron_count, tau_exc_ms, tau_inh_ms, 1.0).unwrap();
    InputShaper::new(ExponentialModel::new(), records)
}

/// Floating-point reference for one exponential channel
struct FloatChannel {
    decay: f64,
    init: f64,
    value: f64,
}

impl FloatChannel {
    fn new(tau_ms: f64, timestep_ms: f64) -> Self {
        let decay = (-timestep_ms / tau_ms).exp();
        Self {
            decay,
            init: (tau_ms / timestep_ms) * (1.0 - decay),
            value: 0.0,
        }
    }

    fn decay_step(&mut self) {
        self.value *= self.decay;
    }

    fn add(&mut self, weight: f64) {
        self.value += self.init * weight;
    }
}

// ============================================================================
// SECTION 1: Timestep Ordering
// ============================================================================

#[test]
fn test_decay_applies_to_carry_over_only() {
    let mut shaper = create_test_shaper(1, 10.0, 10.0);
    let weight = Accum::from_f32(1.0);

    // Timestep 0: input lands undecayed
    shaper.decay_all();
    shaper.add_input(0, Channel::Excitatory, weight).unwrap();
    let after_first = shaper.excitatory_input(0).unwrap();
    assert!((after_first.to_f64() - 0.951_625_820).abs() < 1.0e-4);

    // Timestep 1: only the carried charge decays, then the new input adds
    shaper.decay_all();
    let decayed = shaper.excitatory_input(0).unwrap();
    assert!((decayed.to_f64() - 0.951_625_820 * 0.904_837_418).abs() < 1.0e-4);

    shaper.add_input(0, Channel::Excitatory, weight).unwrap();
    let stacked = shaper.excitatory_input(0).unwrap();
    assert!((stacked.to_f64() - (0.951_625_820 * 0.904_837_418 + 0.951_625_820)).abs() < 1.0e-4);
}

// ============================================================================
// SECTION 2: Numeric Accuracy Against Floating Reference
// ============================================================================

#[test]
fn test_multi_timestep_run_matches_float_reference() {
    let mut shaper = create_test_shaper(1, 5.0, 10.0);
    let mut reference_exc = FloatChannel::new(5.0, 1.0);
    let mut reference_inh = FloatChannel::new(10.0, 1.0);

    let exc_spikes = [2usize, 3, 5, 8, 13, 21, 34];
    let inh_spikes = [4usize, 10, 20, 40];

    for step in 0..50 {
        shaper.decay_all();
        reference_exc.decay_step();
        reference_inh.decay_step();

        if exc_spikes.contains(&step) {
            shaper.add_input(0, Channel::Excitatory, Accum::from_f64(1.2)).unwrap();
            reference_exc.add(1.2);
        }
        if inh_spikes.contains(&step) {
            shaper.add_input(0, Channel::Inhibitory, Accum::from_f64(0.7)).unwrap();
            reference_inh.add(0.7);
        }

        let exc = shaper.excitatory_input(0).unwrap().to_f64();
        let inh = shaper.inhibitory_input(0).unwrap().to_f64();
        assert!(
            (exc - reference_exc.value).abs() < 0.01,
            "step {}: exc {} drifted from reference {}",
            step,
            exc,
            reference_exc.value
        );
        assert!(
            (inh - reference_inh.value).abs() < 0.01,
            "step {}: inh {} drifted from reference {}",
            step,
            inh,
            reference_inh.value
        );
    }
}

// ============================================================================
// SECTION 3: Snapshot Round-Trips
// ============================================================================

#[test]
fn test_snapshot_resumes_bit_exact() {
    let mut shaper = create_test_shaper(4, 5.0, 5.0);

    // Put the population into a non-trivial state
    for step in 0..7 {
        shaper.decay_all();
        shaper
            .add_input(step % 4, Channel::Excitatory, Accum::from_f64(1.0))
            .unwrap();
        shaper
            .add_input((step + 1) % 4, Channel::Inhibitory, Accum::from_f64(0.5))
            .unwrap();
    }

    // Snapshot through the packed word image
    let words = records_to_words(shaper.records()).unwrap();
    let restored: Vec<ExponentialParameters> = records_from_words(&words).unwrap();
    let mut resumed = InputShaper::new(ExponentialModel::new(), restored);
    assert_eq!(resumed.records(), shaper.records());

    // Both populations must evolve identically from here
    for _ in 0..10 {
        shaper.decay_all();
        resumed.decay_all();
        shaper
            .add_input(2, Channel::Excitatory, Accum::from_f64(0.3))
            .unwrap();
        resumed
            .add_input(2, Channel::Excitatory, Accum::from_f64(0.3))
            .unwrap();
    }
    assert_eq!(resumed.records(), shaper.records());
}

// ============================================================================
// SECTION 4: Delivery Boundary
// ============================================================================

#[test]
fn test_delivery_boundary_is_total_over_channel_indices() {
    let mut shaper = create_test_shaper(2, 5.0, 5.0);

    for channel_index in 0..8u32 {
        shaper
            .deliver(0, channel_index, Accum::from_f64(1.0))
            .unwrap();
    }
    shaper.deliver(1, u32::MAX, Accum::from_f64(9.0)).unwrap();

    // Only the excitatory and inhibitory deliveries reached an accumulator
    assert!(shaper.excitatory_input(0).unwrap() > Accum::ZERO);
    assert!(shaper.inhibitory_input(0).unwrap() > Accum::ZERO);
    assert_eq!(shaper.excitatory_input(1).unwrap(), Accum::ZERO);
    assert_eq!(shaper.inhibitory_input(1).unwrap(), Accum::ZERO);
}

#[test]
fn test_supervision_channels_never_alter_drive() {
    let mut clean = create_test_shaper(1, 5.0, 5.0);
    let mut noisy = create_test_shaper(1, 5.0, 5.0);

    for step in 0..20 {
        clean.decay_all();
        noisy.decay_all();

        if step % 3 == 0 {
            clean.add_input(0, Channel::Excitatory, Accum::from_f64(1.0)).unwrap();
            noisy.add_input(0, Channel::Excitatory, Accum::from_f64(1.0)).unwrap();
        }
        // Supervision spam lands only on the noisy population
        noisy.add_input(0, Channel::Reward, Accum::from_f64(5.0)).unwrap();
        noisy.add_input(0, Channel::Punishment, Accum::from_f64(5.0)).unwrap();
    }

    assert_eq!(noisy.records(), clean.records());
}

// ============================================================================
// SECTION 5: LIF Consumer
// ============================================================================

#[test]
fn test_shaped_drive_pushes_lif_to_threshold() {
    let mut shaper = create_test_shaper(1, 5.0, 5.0);
    let params = LifParameters::from_biophysics(-65.0, -65.0, -50.0, 20.0, 1.0, 2).unwrap();
    let mut state = LifState::resting(&params);

    let mut fired_count = 0;
    for _ in 0..60 {
        shaper.decay_all();
        shaper
            .add_input(0, Channel::Excitatory, Accum::from_f64(4.5))
            .unwrap();

        let exc = shaper.excitatory_input(0).unwrap();
        let inh = shaper.inhibitory_input(0).unwrap();
        if params.step(&mut state, exc, inh) {
            fired_count += 1;
        }
    }

    assert!(
        (5..=30).contains(&fired_count),
        "sustained drive should fire regularly, got {} fires",
        fired_count
    );
}

#[test]
fn test_silent_population_never_fires() {
    let mut shaper = create_test_shaper(1, 5.0, 5.0);
    let params = LifParameters::from_biophysics(-65.0, -65.0, -50.0, 20.0, 1.0, 2).unwrap();
    let mut state = LifState::resting(&params);

    for _ in 0..60 {
        shaper.decay_all();
        let exc = shaper.excitatory_input(0).unwrap();
        let inh = shaper.inhibitory_input(0).unwrap();
        assert!(!params.step(&mut state, exc, inh));
    }
    assert_eq!(state.v, params.v_rest);
}
