//! Add/subtract datapath.
//!
//! The datapath is a chain of register stages, one per busy cycle:
//! 1. **Unpack** (accepting edge): special operands (NaN, ∞) resolve immediately;
//!    subtraction becomes addition with B's sign inverted.
//! 2. **Align:** the smaller-magnitude significand is shifted right by the
//!    exponent difference, jamming lost bits into the sticky position.
//! 3. **Add:** the aligned significands are added or subtracted per effective sign.
//! 4. **Normalize:** a carry shifts right once; otherwise leading zeros are
//!    shifted out, stopping at the minimum exponent (subnormal results).
//! 5. **Round:** round-to-nearest-even, then overflow saturates to ±∞.
//!
//! Working significands hold the hidden bit at bit 55 with guard/round/sticky
//! in bits 2..0. Because the larger magnitude is always the minuend, the
//! subtraction never goes negative.

use crate::common::binary64::{Binary64, EXP_SPECIAL, HIDDEN_BIT};
use crate::common::field::shift_right_sticky;
use crate::core::pipeline::signals::FpOp;

use super::exception_flags::ExceptionCause;
use super::rounding::{GRS_BITS, round_nearest_even};

/// Number of busy cycles the datapath needs after the accepting edge.
pub const STAGES: u8 = 4;

/// Hidden bit position in a working significand.
const WORK_HIDDEN: u64 = HIDDEN_BIT << GRS_BITS;

/// Carry-out position of an aligned sum.
const WORK_CARRY: u64 = WORK_HIDDEN << 1;

/// Leading zeros of a working significand whose hidden bit is set.
const WORK_LEADING: u32 = WORK_HIDDEN.leading_zeros();

/// Final value and raised causes of an add/sub.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddOutcome {
    /// binary64 result.
    pub result: Binary64,
    /// Causes raised by the datapath (NV, OF, NX).
    pub cause: ExceptionCause,
}

/// Pipeline register contents between add/sub stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdderStage {
    /// Finite operands latched; B already carries the effective sign.
    Unpacked {
        /// Operand A.
        a: Binary64,
        /// Operand B with subtraction folded into its sign.
        b: Binary64,
    },
    /// Significands aligned to the larger exponent.
    Aligned {
        /// Sign of the larger-magnitude operand.
        sign: bool,
        /// Shared exponent.
        exp: u16,
        /// Larger-magnitude working significand.
        big: u64,
        /// Smaller-magnitude working significand, shifted with sticky.
        small: u64,
        /// Effective operation is a subtraction.
        subtract: bool,
    },
    /// Raw sum before normalization.
    Summed {
        /// Result sign.
        sign: bool,
        /// Exponent of the sum.
        exp: u16,
        /// Working sum, possibly with a carry at bit 56.
        sum: u64,
    },
    /// Normalized working significand.
    Normalized {
        /// Result sign.
        sign: bool,
        /// Result exponent (1 for subnormal results, 0 for zero).
        exp: u16,
        /// Working significand with the hidden bit at bit 55 unless subnormal.
        sig: u64,
    },
    /// Final result.
    Done(AddOutcome),
}

impl AdderStage {
    /// Unpacks the operands on the accepting edge.
    ///
    /// NaN and infinity operands are resolved here, so the remaining stages
    /// only ever see finite values.
    pub fn unpack(op: FpOp, a: Binary64, b: Binary64) -> Self {
        let b = if op == FpOp::Sub { b.negate() } else { b };

        if a.is_nan() || b.is_nan() {
            return Self::Done(AddOutcome {
                result: Binary64::canonical_nan(),
                cause: ExceptionCause::NONE,
            });
        }

        match (a.is_infinite(), b.is_infinite()) {
            (true, true) if a.sign() != b.sign() => Self::Done(AddOutcome {
                result: Binary64::canonical_nan(),
                cause: ExceptionCause::NV,
            }),
            (true, _) => Self::done_exact(a),
            (false, true) => Self::done_exact(b),
            (false, false) => Self::Unpacked { a, b },
        }
    }

    const fn done_exact(result: Binary64) -> Self {
        Self::Done(AddOutcome {
            result,
            cause: ExceptionCause::NONE,
        })
    }

    /// Advances the stage by one clock. `Done` holds its value.
    pub fn advance(self) -> Self {
        match self {
            Self::Unpacked { a, b } => align(a, b),
            Self::Aligned {
                sign,
                exp,
                big,
                small,
                subtract,
            } => add(sign, exp, big, small, subtract),
            Self::Summed { sign, exp, sum } => normalize(sign, exp, sum),
            Self::Normalized { sign, exp, sig } => Self::Done(round(sign, exp, sig)),
            done @ Self::Done(_) => done,
        }
    }

    /// Final outcome, once the last stage has run.
    pub const fn outcome(&self) -> Option<AddOutcome> {
        match self {
            Self::Done(o) => Some(*o),
            _ => None,
        }
    }

    /// Short stage name for the debug hook.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unpacked { .. } => "unpacked",
            Self::Aligned { .. } => "aligned",
            Self::Summed { .. } => "summed",
            Self::Normalized { .. } => "normalized",
            Self::Done(_) => "done",
        }
    }
}

fn align(a: Binary64, b: Binary64) -> AdderStage {
    // Magnitude bits order finite values, so the larger one is the minuend.
    let (big, small) = if a.magnitude() >= b.magnitude() { (a, b) } else { (b, a) };
    let exp = big.effective_exponent();
    let diff = u32::from(exp - small.effective_exponent());

    AdderStage::Aligned {
        sign: big.sign(),
        exp,
        big: big.significand() << GRS_BITS,
        small: shift_right_sticky(small.significand() << GRS_BITS, diff),
        subtract: a.sign() != b.sign(),
    }
}

fn add(sign: bool, exp: u16, big: u64, small: u64, subtract: bool) -> AdderStage {
    let sum = if subtract { big - small } else { big + small };
    // An exact zero is +0 unless both addends were negative.
    let sign = if sum == 0 { sign && !subtract } else { sign };
    AdderStage::Summed { sign, exp, sum }
}

fn normalize(sign: bool, exp: u16, sum: u64) -> AdderStage {
    if sum == 0 {
        return AdderStage::Normalized { sign, exp: 0, sig: 0 };
    }
    if sum & WORK_CARRY != 0 {
        return AdderStage::Normalized {
            sign,
            exp: exp + 1,
            sig: shift_right_sticky(sum, 1),
        };
    }
    let lz = sum.leading_zeros() - WORK_LEADING;
    let shift = lz.min(u32::from(exp - 1));
    AdderStage::Normalized {
        sign,
        exp: exp - shift as u16,
        sig: sum << shift,
    }
}

fn round(sign: bool, exp: u16, sig: u64) -> AddOutcome {
    let rounded = round_nearest_even(sig);
    let mut mant = rounded.significand;
    let mut exp = exp;
    if mant & (HIDDEN_BIT << 1) != 0 {
        mant >>= 1;
        exp += 1;
    }

    let mut cause = if rounded.inexact { ExceptionCause::NX } else { ExceptionCause::NONE };
    if exp >= EXP_SPECIAL {
        cause |= ExceptionCause::OF | ExceptionCause::NX;
        return AddOutcome {
            result: Binary64::infinity(sign),
            cause,
        };
    }

    let exp_field = if mant & HIDDEN_BIT != 0 { exp } else { 0 };
    AddOutcome {
        result: Binary64::pack(sign, exp_field, mant),
        cause,
    }
}

/// Runs every stage back to back. Used where cycle timing does not matter.
pub fn evaluate(op: FpOp, a: Binary64, b: Binary64) -> AddOutcome {
    let mut stage = AdderStage::unpack(op, a, b);
    loop {
        if let Some(o) = stage.outcome() {
            return o;
        }
        stage = stage.advance();
    }
}
