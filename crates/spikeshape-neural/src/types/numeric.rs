// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-point numeric types for deterministic synaptic arithmetic
//!
//! This module provides the two number formats used by the shaping stage:
//!
//! - [`Accum`]: signed s16.15 accumulator (15 fractional bits in an `i32`),
//!   used for synaptic charge and membrane potentials.
//! - [`Decay`]: unsigned u0.32 coefficient (32 fractional bits in a `u32`),
//!   used for per-timestep decay factors and scaled initial-value factors.
//!
//! # Design Principles
//!
//! 1. **Bit-exact everywhere**: All arithmetic is integer-only, so results
//!    are identical on hosts with and without an FPU.
//!
//! 2. **No config in hot path**: Scale factors are compile-time constants
//!    baked into the types, never passed to operations.
//!
//! 3. **Saturation over wrapping**: Additions clamp at the representable
//!    range instead of wrapping; decay multiplies cannot overflow because
//!    every [`Decay`] coefficient is below one.
//!
//! Float conversions exist for host-side parameter derivation and for
//! diagnostics only. Nothing on the per-timestep path touches a float.

use core::fmt;

// ============================================================================
// Accumulator (s16.15)
// ============================================================================

/// Signed fixed-point accumulator with 15 fractional bits.
///
/// Covers roughly -65536.0 to +65535.99997 with a resolution of 2^-15
/// (about 3.05e-5). This is the working type for synaptic input charge:
/// additions saturate, and decay multiplication is delegated to
/// [`Decay::apply`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Accum(pub i32);

impl Accum {
    /// Number of fractional bits
    pub const FRACTION_BITS: u32 = 15;

    /// Value of 1.0 in raw representation
    pub const SCALE: i32 = 1 << Self::FRACTION_BITS; // 32768

    /// Zero charge
    pub const ZERO: Self = Self(0);

    /// One unit of charge
    pub const ONE: Self = Self(Self::SCALE);

    /// Largest representable value (~65535.99997)
    pub const MAX: Self = Self(i32::MAX);

    /// Smallest representable value (~-65536.0)
    pub const MIN: Self = Self(i32::MIN);

    /// Create from raw bits (for testing, serialization, word I/O)
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Get raw bits (for testing, serialization, word I/O)
    #[inline]
    pub const fn to_raw(self) -> i32 {
        self.0
    }

    /// Convert from f64, rounding half away from zero and saturating at
    /// the representable range. Host-side only; never on the timestep path.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        let scaled = value * Self::SCALE as f64;
        // `as` casts of out-of-range floats saturate; NaN maps to zero
        let rounded = if scaled >= 0.0 { scaled + 0.5 } else { scaled - 0.5 };
        Self(rounded as i32)
    }

    /// Convert from f32 (see [`Accum::from_f64`])
    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Self::from_f64(value as f64)
    }

    /// Convert to f64 (for diagnostics and host-side checks)
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    /// Convert to f32 (for diagnostics and host-side checks)
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    /// Add with saturation at the representable range
    #[inline(always)]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtract with saturation at the representable range
    #[inline(always)]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Accum {
    /// Renders with six fractional digits using integer math only,
    /// e.g. `1.500000` or `-0.000031`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.0 as i64;
        let mag = raw.unsigned_abs();
        let mut int_part = mag >> Self::FRACTION_BITS;
        let frac_raw = mag & ((Self::SCALE as u64) - 1);
        // Rescale 2^-15 fraction to decimal micro-units, rounding to nearest
        let mut frac = (frac_raw * 1_000_000 + (1 << (Self::FRACTION_BITS - 1))) >> Self::FRACTION_BITS;
        if frac >= 1_000_000 {
            int_part += 1;
            frac -= 1_000_000;
        }
        let sign = if raw < 0 { "-" } else { "" };
        write!(f, "{}{}.{:06}", sign, int_part, frac)
    }
}

// ============================================================================
// Decay Coefficient (u0.32)
// ============================================================================

/// Unsigned fixed-point coefficient with 32 fractional bits.
///
/// Covers [0.0, 1.0) with a resolution of 2^-32; the value 1.0 itself is
/// not representable. Used both for per-timestep decay factors and for the
/// scaled initial-value factors applied to arriving input, so a single
/// multiply primitive serves both roles.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Decay(pub u32);

impl Decay {
    /// Number of fractional bits
    pub const FRACTION_BITS: u32 = 32;

    /// Coefficient of 0.0 (decays everything to zero in one step)
    pub const ZERO: Self = Self(0);

    /// Largest representable coefficient (1.0 - 2^-32)
    pub const MAX: Self = Self(u32::MAX);

    /// Create from raw bits (for testing, serialization, word I/O)
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get raw bits (for testing, serialization, word I/O)
    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    /// Convert from f64, rounding to nearest and saturating into [0.0, 1.0).
    /// Host-side only; never on the timestep path.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        // 2^32 scale; negative and NaN inputs map to zero, >= 1.0 saturates
        let scaled = value * 4_294_967_296.0 + 0.5;
        Self(scaled as u32)
    }

    /// Convert from f32 (see [`Decay::from_f64`])
    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Self::from_f64(value as f64)
    }

    /// Convert to f64 (for diagnostics and host-side checks)
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 4_294_967_296.0
    }

    /// Convert to f32 (for diagnostics and host-side checks)
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    /// Multiply an accumulator by this coefficient.
    ///
    /// The raw values are multiplied as a signed 64-bit product and
    /// arithmetic-shifted right by 32. The shift truncates toward negative
    /// infinity: positive charge reaches exactly zero, while negative
    /// charge settles at raw value -1 and never crosses zero. Because the
    /// coefficient is below one, the product always fits and the result
    /// magnitude never exceeds the input magnitude.
    #[inline(always)]
    pub const fn apply(self, value: Accum) -> Accum {
        Accum((((value.0 as i64) * (self.0 as i64)) >> Self::FRACTION_BITS) as i32)
    }
}

impl fmt::Display for Decay {
    /// Renders with nine fractional digits using integer math only,
    /// e.g. `0.904837418`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Rescale 2^-32 fraction to decimal nano-units, rounding to nearest
        let scaled = ((self.0 as u64) * 1_000_000_000 + (1u64 << 31)) >> Self::FRACTION_BITS;
        if scaled >= 1_000_000_000 {
            write!(f, "1.000000000")
        } else {
            write!(f, "0.{:09}", scaled)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
