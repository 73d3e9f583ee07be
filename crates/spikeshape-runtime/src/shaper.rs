// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Population-level driver for synaptic input shaping
//!
//! Owns a contiguous arena of per-neuron parameter records and sequences
//! the shaping model over them. Exclusive `&mut self` access is the whole
//! synchronization story: one owner per population, decay before inputs,
//! inputs before reads.

use tracing::{debug, trace};

use spikeshape_neural::{channel_label, Accum, Channel, SynapseModel};

use crate::diagnostics;
use crate::error::{Result, RuntimeError};

/// Contiguous population of shaping records driven by one model
///
/// Records live in one flat arena indexed by neuron, so a timestep sweep is
/// a single sequential pass with no pointer chasing.
#[derive(Debug, Clone)]
pub struct InputShaper<M: SynapseModel> {
    model: M,
    records: Vec<M::Parameters>,
}

impl<M: SynapseModel> InputShaper<M> {
    /// Take ownership of a loaded population
    pub fn new(model: M, records: Vec<M::Parameters>) -> Self {
        Self { model, records }
    }

    /// Number of neurons in the population
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the population is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The shaping model driving this population
    pub fn model(&self) -> &M {
        &self.model
    }

    /// All records, indexed by neuron
    pub fn records(&self) -> &[M::Parameters] {
        &self.records
    }

    /// One record by neuron index
    pub fn record(&self, neuron_index: usize) -> Result<&M::Parameters> {
        self.records
            .get(neuron_index)
            .ok_or(RuntimeError::NeuronIndexOutOfRange {
                index: neuron_index,
                count: self.records.len(),
            })
    }

    /// Release the records, e.g. for snapshotting through a word image
    pub fn into_records(self) -> Vec<M::Parameters> {
        self.records
    }

    /// Advance every neuron by one timestep of decay.
    ///
    /// Runs exactly once per timestep, before any of the timestep's inputs
    /// are delivered.
    pub fn decay_all(&mut self) {
        for record in &mut self.records {
            self.model.decay(record);
        }
    }

    /// Deliver one weighted input on a classified channel.
    pub fn add_input(&mut self, neuron_index: usize, channel: Channel, input: Accum) -> Result<()> {
        let count = self.records.len();
        let record = self
            .records
            .get_mut(neuron_index)
            .ok_or(RuntimeError::NeuronIndexOutOfRange {
                index: neuron_index,
                count,
            })?;
        self.model.add_input(channel, input, record);

        let cfg = diagnostics::env_trace_cfg();
        if cfg.allows(neuron_index) {
            trace!(
                target: "spikeshape-trace",
                "[SHAPE] neuron={} channel={} input={} exc={} inh={}",
                neuron_index,
                channel,
                input,
                self.model.excitatory_input(record),
                self.model.inhibitory_input(record)
            );
        }
        Ok(())
    }

    /// Deliver one weighted input on a raw channel index.
    ///
    /// The delivery boundary is total over the index space: a recognized
    /// index routes to [`Self::add_input`], anything else is logged and
    /// dropped so a corrupt routing word cannot poison population state.
    pub fn deliver(&mut self, neuron_index: usize, channel_index: u32, input: Accum) -> Result<()> {
        match Channel::from_index(channel_index) {
            Some(channel) => self.add_input(neuron_index, channel, input),
            None => {
                debug!(
                    target: "spikeshape-trace",
                    "[SHAPE] neuron={} dropped input {} on unknown channel {} ({})",
                    neuron_index,
                    input,
                    channel_index,
                    channel_label(channel_index)
                );
                Ok(())
            }
        }
    }

    /// Shaped excitatory drive for one neuron
    pub fn excitatory_input(&self, neuron_index: usize) -> Result<Accum> {
        Ok(self.model.excitatory_input(self.record(neuron_index)?))
    }

    /// Shaped inhibitory drive for one neuron
    pub fn inhibitory_input(&self, neuron_index: usize) -> Result<Accum> {
        Ok(self.model.inhibitory_input(self.record(neuron_index)?))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::build_population;
    use spikeshape_neural::ExponentialModel;

    fn shaper_of(count: usize) -> InputShaper<ExponentialModel> {
        let records = build_population(count, 5.0, 5.0, 1.0).unwrap();
        InputShaper::new(ExponentialModel::new(), records)
    }

    #[test]
    fn test_population_accessors() {
        let shaper = shaper_of(3);
        assert_eq!(shaper.len(), 3);
        assert!(!shaper.is_empty());
        assert!(shaper.record(2).is_ok());
        assert_eq!(
            shaper.record(3),
            Err(RuntimeError::NeuronIndexOutOfRange { index: 3, count: 3 })
        );

        let empty = shaper_of(0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_inputs_route_by_neuron_index() {
        let mut shaper = shaper_of(3);
        shaper
            .add_input(1, Channel::Excitatory, Accum::from_f32(1.0))
            .unwrap();

        assert_eq!(shaper.excitatory_input(0).unwrap(), Accum::ZERO);
        assert!(shaper.excitatory_input(1).unwrap() > Accum::ZERO);
        assert_eq!(shaper.excitatory_input(2).unwrap(), Accum::ZERO);
        assert_eq!(shaper.inhibitory_input(1).unwrap(), Accum::ZERO);
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let mut shaper = shaper_of(2);
        assert_eq!(
            shaper.add_input(2, Channel::Excitatory, Accum::ONE),
            Err(RuntimeError::NeuronIndexOutOfRange { index: 2, count: 2 })
        );
        assert_eq!(
            shaper.excitatory_input(9),
            Err(RuntimeError::NeuronIndexOutOfRange { index: 9, count: 2 })
        );
    }

    #[test]
    fn test_decay_all_sweeps_every_neuron() {
        let mut shaper = shaper_of(2);
        shaper
            .add_input(0, Channel::Excitatory, Accum::from_f32(1.0))
            .unwrap();
        shaper
            .add_input(1, Channel::Inhibitory, Accum::from_f32(1.0))
            .unwrap();
        let exc_before = shaper.excitatory_input(0).unwrap();
        let inh_before = shaper.inhibitory_input(1).unwrap();

        shaper.decay_all();

        assert!(shaper.excitatory_input(0).unwrap() < exc_before);
        assert!(shaper.inhibitory_input(1).unwrap() < inh_before);
    }

    #[test]
    fn test_deliver_routes_known_channels_and_drops_unknown() {
        let mut shaper = shaper_of(2);
        shaper.deliver(0, 0, Accum::from_f32(1.0)).unwrap();
        shaper.deliver(0, 1, Accum::from_f32(0.5)).unwrap();
        let snapshot = shaper.records().to_vec();

        // Supervision channels are accepted but leave accumulators alone
        shaper.deliver(0, 2, Accum::from_f32(5.0)).unwrap();
        shaper.deliver(0, 3, Accum::from_f32(5.0)).unwrap();
        // Unknown channel indices are dropped entirely
        shaper.deliver(0, 4, Accum::from_f32(5.0)).unwrap();
        shaper.deliver(1, u32::MAX, Accum::from_f32(5.0)).unwrap();

        assert_eq!(shaper.records(), snapshot.as_slice());
        assert!(shaper.excitatory_input(0).unwrap() > Accum::ZERO);
        assert!(shaper.inhibitory_input(0).unwrap() > Accum::ZERO);
    }
}
