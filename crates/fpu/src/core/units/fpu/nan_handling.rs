//! Canonical NaN propagation for the FPU.
//!
//! - **Canonicalization** ([`canonicalize`]): any NaN produced by the datapath is
//!   replaced with the canonical quiet NaN `0x7ff8000000000000`, discarding sign
//!   and payload (RISC-V unprivileged ISA, NaN generation and propagation).
//! - **Number selection** ([`select_number`]): the NaN rule shared by minimum and
//!   maximum, which prefer a number over a NaN.

use crate::common::binary64::Binary64;

/// Replaces any NaN with the canonical quiet NaN. Non-NaN values pass through.
#[inline]
pub const fn canonicalize(v: Binary64) -> Binary64 {
    if v.is_nan() { Binary64::canonical_nan() } else { v }
}

/// Applies the minimum/maximum NaN rule.
///
/// # Returns
///
/// * `Some(x)` - The result is already decided: the non-NaN operand when
///   exactly one input is NaN, or the canonical NaN when both are.
/// * `None` - Neither operand is NaN; the caller must order them.
#[inline]
pub const fn select_number(a: Binary64, b: Binary64) -> Option<Binary64> {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Some(Binary64::canonical_nan()),
        (true, false) => Some(b),
        (false, true) => Some(a),
        (false, false) => None,
    }
}
