// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synfire chain acceptance test.
//!
//! Exercises the whole stack end to end: configuration -> derived shaping
//! constants -> per-timestep {decay, deliver, membrane update} cycle, with
//! a single seed spike propagating down a feed-forward chain.
//!
//! Coverage:
//! - One seed spike reaches every neuron in chain order
//! - Hop latency is uniform (each link repeats the same physics)
//! - No neuron fires twice (refractory + decaying residue)
//! - A configuration file drives the same pipeline

use std::fs;

use spikeshape::prelude::*;

/// Runs the same {decay -> deliver -> update} cycle as the synfire_chain
/// tool and returns every fire as `(step, neuron)` in occurrence order.
fn run_chain(config: &ShapingConfig) -> Vec<(u64, usize)> {
    let pop = &config.population;
    let sim = &config.simulation;

    let records = build_population(
        pop.neuron_count,
        pop.tau_syn_exc_ms,
        pop.tau_syn_inh_ms,
        sim.timestep_ms,
    )
    .unwrap();
    let mut shaper = InputShaper::new(ExponentialModel::new(), records);
    let lif = LifParameters::from_biophysics(
        pop.v_rest_mv,
        pop.v_reset_mv,
        pop.v_thresh_mv,
        pop.tau_m_ms,
        sim.timestep_ms,
        pop.refractory_steps,
    )
    .unwrap();
    let mut states = vec![LifState::resting(&lif); pop.neuron_count];
    let weight = Accum::from_f64(pop.spike_weight);

    let mut pending: Vec<usize> = vec![0];
    let mut fires = Vec::new();

    for step in 0..sim.steps {
        shaper.decay_all();
        for target in pending.drain(..) {
            shaper.add_input(target, Channel::Excitatory, weight).unwrap();
        }

        let mut next_pending = Vec::new();
        for neuron in 0..pop.neuron_count {
            let exc = shaper.excitatory_input(neuron).unwrap();
            let inh = shaper.inhibitory_input(neuron).unwrap();
            if lif.step(&mut states[neuron], exc, inh) {
                fires.push((step, neuron));
                if neuron + 1 < pop.neuron_count {
                    next_pending.push(neuron + 1);
                }
            }
        }
        pending = next_pending;
    }

    fires
}

// ============================================================================
// Propagation
// ============================================================================

#[test]
fn test_seed_spike_propagates_down_the_chain() {
    let config = ShapingConfig::default();
    validate_config(&config).unwrap();

    let fires = run_chain(&config);

    // Every neuron fires exactly once, in chain order
    assert_eq!(fires.len(), config.population.neuron_count);
    for (position, (_, neuron)) in fires.iter().enumerate() {
        assert_eq!(*neuron, position);
    }

    // The wavefront moves strictly forward in time
    for window in fires.windows(2) {
        assert!(window[0].0 < window[1].0);
    }

    // The seed spike lifts neuron 0 past threshold within a few timesteps
    assert!(fires[0].0 < 10, "first fire too late: step {}", fires[0].0);
}

#[test]
fn test_hop_latency_is_uniform() {
    let config = ShapingConfig::default();
    let fires = run_chain(&config);
    assert!(fires.len() >= 3);

    // Every link repeats the same physics on a resting neuron, so the
    // step gap between consecutive fires must be identical.
    let hop = fires[1].0 - fires[0].0;
    assert!(hop >= 1);
    for window in fires.windows(2) {
        assert_eq!(window[1].0 - window[0].0, hop);
    }
}

#[test]
fn test_no_neuron_fires_twice() {
    let mut config = ShapingConfig::default();
    // Leave plenty of time after the wavefront has passed
    config.simulation.steps = 400;

    let fires = run_chain(&config);

    assert_eq!(fires.len(), config.population.neuron_count);
    let mut seen = vec![false; config.population.neuron_count];
    for (_, neuron) in fires {
        assert!(!seen[neuron], "neuron {} fired twice", neuron);
        seen[neuron] = true;
    }
}

#[test]
fn test_single_neuron_chain_fires_once() {
    let mut config = ShapingConfig::default();
    config.population.neuron_count = 1;

    let fires = run_chain(&config);
    assert_eq!(fires.len(), 1);
    assert_eq!(fires[0].1, 0);
}

// ============================================================================
// Configuration file end to end
// ============================================================================

#[test]
fn test_config_file_drives_the_chain() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spikeshape_configuration.toml");
    fs::write(
        &path,
        r#"
[simulation]
timestep_ms = 1.0
steps = 60

[population]
neuron_count = 3
"#,
    )
    .unwrap();

    let config = load_config(Some(&path), None).unwrap();
    validate_config(&config).unwrap();
    assert_eq!(config.population.neuron_count, 3);
    assert_eq!(config.simulation.steps, 60);

    let fires = run_chain(&config);
    assert_eq!(fires.len(), 3);
    assert_eq!(
        fires.iter().map(|(_, n)| *n).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}
