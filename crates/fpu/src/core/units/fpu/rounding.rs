//! Round-to-nearest-even on the working significand.
//!
//! The add/sub datapath carries three extra bits below the binary64 LSB:
//!
//! | Bit | Name   | Meaning                                  |
//! |-----|--------|------------------------------------------|
//! |  2  | guard  | first bit below the result LSB           |
//! |  1  | round  | second bit below the result LSB          |
//! |  0  | sticky | OR of every bit shifted out below that   |
//!
//! Only RNE (RISC-V `frm` = 0b000) is implemented; the unit has no rounding
//! mode input.

/// Number of extra bits carried below the binary64 LSB.
pub const GRS_BITS: u32 = 3;

/// Mask of the guard/round/sticky field.
pub const GRS_MASK: u64 = (1 << GRS_BITS) - 1;

/// Guard/round/sticky value of an exact tie (`0b100`).
const HALF: u64 = 1 << (GRS_BITS - 1);

/// Result of rounding a working significand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rounded {
    /// Significand with the extra bits dropped and the increment applied.
    /// May carry into bit 53 when an all-ones significand rounds up.
    pub significand: u64,
    /// Any of guard/round/sticky was set.
    pub inexact: bool,
}

/// Rounds a working significand to nearest, ties to even.
///
/// # Arguments
///
/// * `working` - Significand with [`GRS_BITS`] extra low bits.
#[inline]
pub const fn round_nearest_even(working: u64) -> Rounded {
    let grs = working & GRS_MASK;
    let kept = working >> GRS_BITS;
    let round_up = grs > HALF || (grs == HALF && kept & 1 == 1);
    Rounded {
        significand: kept + round_up as u64,
        inexact: grs != 0,
    }
}
