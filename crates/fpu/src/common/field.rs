//! Narrow hardware register fields.
//!
//! Hardware registers narrower than a machine word are modelled as a
//! fixed-width unsigned integer plus an explicit mask. Construction either
//! checks the range or truncates the way a register write would.

use serde::Serialize;

/// A 4-bit register field (values `0..=15`).
///
/// Used for the busy countdown, so a latency can never exceed what the
/// counter register can hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct U4(u8);

impl U4 {
    /// Number of bits in the field.
    pub const WIDTH: u32 = 4;
    /// Field mask.
    pub const MASK: u8 = 0x0F;
    /// Largest representable value.
    pub const MAX: Self = Self(Self::MASK);
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Checked construction: `None` when `v` does not fit in four bits.
    #[inline]
    pub const fn new(v: u8) -> Option<Self> {
        if v <= Self::MASK { Some(Self(v)) } else { None }
    }

    /// Truncating construction, as a 4-bit register write would behave.
    #[inline]
    pub const fn truncate(v: u8) -> Self {
        Self(v & Self::MASK)
    }

    /// Raw value.
    #[inline(always)]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Decrements toward zero; saturates at zero.
    #[inline]
    pub const fn dec(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// Returns `true` if the field is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<U4> for u8 {
    fn from(v: U4) -> Self {
        v.0
    }
}

/// Shifts `value` right by `shift`, ORing every bit shifted out into bit 0.
///
/// This is the alignment shifter's sticky accumulation: the result differs
/// from the exact quotient only in its least significant bit, which is set
/// whenever any discarded bit was set.
#[inline]
pub const fn shift_right_sticky(value: u64, shift: u32) -> u64 {
    if shift == 0 {
        value
    } else if shift < u64::BITS {
        let lost = value & ((1u64 << shift) - 1);
        (value >> shift) | (lost != 0) as u64
    } else {
        (value != 0) as u64
    }
}
