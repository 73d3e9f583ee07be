// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synfire chain demo.
//!
//! Builds a feed-forward chain of LIF neurons fed by the exponential input
//! shaper, injects a single seed spike into neuron 0 and lets the wavefront
//! propagate: each fire delivers one excitatory spike to the next neuron on
//! the following timestep.
//!
//! Run with: cargo run --bin synfire_chain -- [--config <path>] [--steps <n>]
//! [--neurons <n>] [--trace]

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::process;

use spikeshape::config::{apply_cli_overrides, apply_environment_overrides, ConfigError};
use spikeshape::prelude::*;
use spikeshape::runtime::{trace_parameters, trace_state};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: synfire_chain [--config <path>] [--steps <n>] [--neurons <n>] [--trace]\n\n\
         Without --config, searches for spikeshape_configuration.toml and falls\n\
         back to built-in defaults if none is found.\n"
    );
    process::exit(2);
}

fn parse_args() -> (Option<PathBuf>, HashMap<String, String>) {
    let mut config_path = None;
    let mut overrides = HashMap::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                config_path = Some(PathBuf::from(v));
            }
            "--steps" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                overrides.insert("steps".to_string(), v);
            }
            "--neurons" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                overrides.insert("neuron_count".to_string(), v);
            }
            "--trace" => {
                overrides.insert("trace_inputs".to_string(), "1".to_string());
            }
            "-h" | "--help" => usage_and_exit(),
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    (config_path, overrides)
}

fn effective_config(
    config_path: Option<&Path>,
    overrides: &HashMap<String, String>,
) -> Result<ShapingConfig, ConfigError> {
    match load_config(config_path, Some(overrides)) {
        Ok(config) => Ok(config),
        // A missing file is only fatal when it was requested explicitly.
        Err(ConfigError::FileNotFound(_)) if config_path.is_none() => {
            let mut config = ShapingConfig::default();
            apply_environment_overrides(&mut config);
            apply_cli_overrides(&mut config, overrides);
            Ok(config)
        }
        Err(e) => Err(e),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config_path, overrides) = parse_args();
    let config = effective_config(config_path.as_deref(), &overrides)?;

    // The runtime's per-event trace gate reads the environment once, so fold
    // the file/CLI setting in before the first delivery.
    if config.diagnostics.trace_inputs && env::var("SPIKESHAPE_TRACE_INPUTS").is_err() {
        env::set_var("SPIKESHAPE_TRACE_INPUTS", "1");
    }
    if let Some(neuron) = config.diagnostics.trace_neuron {
        if env::var("SPIKESHAPE_TRACE_NEURON").is_err() {
            env::set_var("SPIKESHAPE_TRACE_NEURON", neuron.to_string());
        }
    }

    let default_directives = if config.diagnostics.trace_inputs {
        "info,spikeshape-trace=trace"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    validate_config(&config)?;

    let pop = &config.population;
    let sim = &config.simulation;

    let records = build_population(
        pop.neuron_count,
        pop.tau_syn_exc_ms,
        pop.tau_syn_inh_ms,
        sim.timestep_ms,
    )?;
    let mut shaper = InputShaper::new(ExponentialModel::new(), records);
    let lif = LifParameters::from_biophysics(
        pop.v_rest_mv,
        pop.v_reset_mv,
        pop.v_thresh_mv,
        pop.tau_m_ms,
        sim.timestep_ms,
        pop.refractory_steps,
    )?;
    let mut states = vec![LifState::resting(&lif); pop.neuron_count];
    let weight = Accum::from_f64(pop.spike_weight);

    let trace = if config.diagnostics.trace_inputs {
        match config.diagnostics.trace_neuron {
            Some(neuron) => TraceConfig::neuron(neuron),
            None => TraceConfig::all(),
        }
    } else {
        TraceConfig::disabled()
    };
    trace_parameters(&shaper, trace);

    info!(
        "[CHAIN] {} neurons, {} steps, timestep {} ms, spike weight {}",
        pop.neuron_count, sim.steps, sim.timestep_ms, weight
    );

    // Spikes to deliver at the start of the current step. One seed spike
    // kicks off the wavefront.
    let mut pending: Vec<usize> = vec![0];
    let mut fire_counts = vec![0u64; pop.neuron_count];
    let mut total_fires = 0u64;

    for step in 0..sim.steps {
        shaper.decay_all();
        for target in pending.drain(..) {
            shaper.add_input(target, Channel::Excitatory, weight)?;
        }

        let mut next_pending = Vec::new();
        for neuron in 0..pop.neuron_count {
            let exc = shaper.excitatory_input(neuron)?;
            let inh = shaper.inhibitory_input(neuron)?;
            if lif.step(&mut states[neuron], exc, inh) {
                info!("[CHAIN] step={} neuron={} fired", step, neuron);
                fire_counts[neuron] += 1;
                total_fires += 1;
                if neuron + 1 < pop.neuron_count {
                    next_pending.push(neuron + 1);
                }
            }
        }
        pending = next_pending;
    }

    trace_state(&shaper, trace);

    println!("=== Synfire chain summary ===");
    println!("steps run:   {}", sim.steps);
    println!("total fires: {}", total_fires);
    for (neuron, count) in fire_counts.iter().enumerate() {
        println!("  neuron {:>3}: {} fire(s)", neuron, count);
    }

    Ok(())
}
