//! IEEE 754 binary64 bit-pattern type.
//!
//! This module defines a strong type for 64-bit floating-point operands so the
//! datapath never confuses a raw register value with a decoded number. It provides:
//! 1. **Field Extraction:** Sign, biased exponent, and fraction fields with fixed masks.
//! 2. **Classification:** NaN (quiet/signaling), infinity, zero, and subnormal checks.
//! 3. **Significand Access:** The significand with the hidden bit restored and the
//!    effective exponent used by the alignment stage.

use serde::Serialize;

/// Bit mask for the sign bit (bit 63).
pub const SIGN_MASK: u64 = 0x8000_0000_0000_0000;

/// Bit mask for the 11-bit biased exponent field (bits 62..52).
pub const EXP_MASK: u64 = 0x7FF0_0000_0000_0000;

/// Bit mask for the 52-bit fraction field (bits 51..0).
pub const FRAC_MASK: u64 = 0x000F_FFFF_FFFF_FFFF;

/// Implied leading one of a normal significand (bit 52).
pub const HIDDEN_BIT: u64 = 1 << FRAC_BITS;

/// Quiet bit of a NaN (most significant fraction bit).
pub const QUIET_BIT: u64 = 0x0008_0000_0000_0000;

/// Width of the fraction field.
pub const FRAC_BITS: u32 = 52;

/// All-ones biased exponent used by infinities and NaNs.
pub const EXP_SPECIAL: u16 = 0x7FF;

/// Canonical quiet NaN (positive, quiet, zero payload).
pub const CANONICAL_NAN: u64 = 0x7FF8_0000_0000_0000;

/// Positive infinity.
pub const POS_INF: u64 = 0x7FF0_0000_0000_0000;

/// Largest finite positive value.
pub const MAX_FINITE: u64 = 0x7FEF_FFFF_FFFF_FFFF;

/// A binary64 operand held as its raw bit pattern.
///
/// Operands are latched as raw bits and stay immutable for the duration of an
/// operation; every accessor is a pure mask-and-shift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Binary64(pub u64);

impl Binary64 {
    /// Wraps a raw 64-bit pattern.
    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the raw 64-bit pattern.
    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Sign bit (`true` for negative).
    #[inline(always)]
    pub const fn sign(self) -> bool {
        self.0 & SIGN_MASK != 0
    }

    /// Biased 11-bit exponent field.
    #[inline(always)]
    pub const fn exponent(self) -> u16 {
        ((self.0 & EXP_MASK) >> FRAC_BITS) as u16
    }

    /// 52-bit fraction field.
    #[inline(always)]
    pub const fn fraction(self) -> u64 {
        self.0 & FRAC_MASK
    }

    /// Returns `true` for any NaN, quiet or signaling.
    #[inline]
    pub const fn is_nan(self) -> bool {
        self.exponent() == EXP_SPECIAL && self.fraction() != 0
    }

    /// Returns `true` for a signaling NaN (quiet bit clear, non-zero payload).
    #[inline]
    pub const fn is_snan(self) -> bool {
        self.is_nan() && self.0 & QUIET_BIT == 0
    }

    /// Returns `true` for ±infinity.
    #[inline]
    pub const fn is_infinite(self) -> bool {
        self.exponent() == EXP_SPECIAL && self.fraction() == 0
    }

    /// Returns `true` for ±0.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 & !SIGN_MASK == 0
    }

    /// Returns `true` for non-zero values with a zero exponent field.
    #[inline]
    pub const fn is_subnormal(self) -> bool {
        self.exponent() == 0 && self.fraction() != 0
    }

    /// Magnitude bits (everything but the sign).
    #[inline(always)]
    pub const fn magnitude(self) -> u64 {
        self.0 & !SIGN_MASK
    }

    /// Returns the same value with the sign bit inverted.
    #[inline(always)]
    pub const fn negate(self) -> Self {
        Self(self.0 ^ SIGN_MASK)
    }

    /// Significand with the hidden bit restored for normal numbers.
    ///
    /// Subnormals keep a clear bit 52 and are paired with an effective
    /// exponent of 1 by [`Self::effective_exponent`].
    #[inline]
    pub const fn significand(self) -> u64 {
        if self.exponent() == 0 {
            self.fraction()
        } else {
            self.fraction() | HIDDEN_BIT
        }
    }

    /// Exponent used for alignment: the biased exponent, or 1 for subnormals and zero.
    #[inline]
    pub const fn effective_exponent(self) -> u16 {
        let e = self.exponent();
        if e == 0 { 1 } else { e }
    }

    /// Assembles a pattern from its fields. Out-of-range bits are masked off.
    #[inline]
    pub const fn pack(sign: bool, exponent: u16, fraction: u64) -> Self {
        let s = if sign { SIGN_MASK } else { 0 };
        Self(s | (((exponent as u64) << FRAC_BITS) & EXP_MASK) | (fraction & FRAC_MASK))
    }

    /// Signed infinity.
    #[inline]
    pub const fn infinity(sign: bool) -> Self {
        Self::pack(sign, EXP_SPECIAL, 0)
    }

    /// Signed zero.
    #[inline]
    pub const fn zero(sign: bool) -> Self {
        Self::pack(sign, 0, 0)
    }

    /// The canonical quiet NaN.
    #[inline]
    pub const fn canonical_nan() -> Self {
        Self(CANONICAL_NAN)
    }

    /// Interprets the pattern as a host `f64`.
    #[inline]
    pub const fn to_f64(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl From<u64> for Binary64 {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl From<Binary64> for u64 {
    fn from(v: Binary64) -> Self {
        v.0
    }
}

impl From<f64> for Binary64 {
    fn from(f: f64) -> Self {
        Self(f.to_bits())
    }
}

impl std::fmt::Display for Binary64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
