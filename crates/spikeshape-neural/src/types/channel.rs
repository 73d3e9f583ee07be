// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synaptic channel classification
//!
//! Every synapse delivers its input on exactly one channel. The first two
//! channels drive the per-neuron accumulators; the supervision channels
//! (reward and punishment) are routed through the same delivery path so
//! that plasticity rules can observe them, but carry no accumulator state.

use core::fmt;

/// Synaptic input channel
///
/// Discriminants are the on-wire channel indices and must stay dense from
/// zero: routing tables and buffer offsets are derived from them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    /// Excitatory input, accumulated toward firing
    Excitatory = 0,
    /// Inhibitory input, accumulated against firing
    Inhibitory = 1,
    /// Supervision reward signal (no accumulator)
    Reward = 2,
    /// Supervision punishment signal (no accumulator)
    Punishment = 3,
}

impl Channel {
    /// Bits needed to encode a channel index alongside a neuron index
    pub const BITS: u32 = 2;

    /// Total number of channels
    pub const COUNT: usize = 4;

    /// Number of channels that feed an accumulator
    pub const INPUT_COUNT: usize = 2;

    /// All channels in index order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Excitatory,
        Self::Inhibitory,
        Self::Reward,
        Self::Punishment,
    ];

    /// Decode a raw channel index; `None` for anything out of range
    #[inline]
    pub const fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::Excitatory),
            1 => Some(Self::Inhibitory),
            2 => Some(Self::Reward),
            3 => Some(Self::Punishment),
            _ => None,
        }
    }

    /// Raw channel index
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Single-character label for logs and traces
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excitatory => "X",
            Self::Inhibitory => "I",
            Self::Reward => "R",
            Self::Punishment => "P",
        }
    }

    /// Whether this channel feeds a per-neuron accumulator
    #[inline]
    pub const fn is_accumulating(self) -> bool {
        matches!(self, Self::Excitatory | Self::Inhibitory)
    }

    /// Flat slot of `(channel, neuron)` in a delivery buffer laid out as
    /// one bank per channel: the channel index occupies the bits above the
    /// neuron index.
    #[inline]
    pub const fn input_buffer_index(self, neuron_index: u32, neuron_index_bits: u32) -> usize {
        (((self as u32) << neuron_index_bits) | neuron_index) as usize
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label for a raw channel index, total over the whole index space.
///
/// Out-of-range indices map to `"?"` rather than an error so diagnostic
/// paths can print anything they are handed.
#[inline]
pub const fn channel_label(index: u32) -> &'static str {
    match Channel::from_index(index) {
        Some(channel) => channel.label(),
        None => "?",
    }
}

// ============================================================================
// Tests
// ============================================================================
