//! Exception detection.
//!
//! The unit exposes a single exception bit, but the datapath records why it
//! fired so the debug hook can show the cause:
//!
//! | Bit | Cause  | Raised when                                       | Drives `exception` |
//! |-----|--------|---------------------------------------------------|--------------------|
//! |  4  | NAN_A  | operand A is a NaN                                | yes                |
//! |  3  | NAN_B  | operand B is a NaN                                | yes                |
//! |  2  | NV     | ∞ − ∞, or a signaling NaN operand                 | yes                |
//! |  1  | OF     | add/sub rounded to infinity from finite operands  | yes                |
//! |  0  | NX     | add/sub result was rounded                        | no                 |
//!
//! The flag is advisory: the result still follows the IEEE 754 special-value
//! rules whether or not it is raised.

use std::ops::{BitOr, BitOrAssign};

use serde::Serialize;

use crate::common::binary64::Binary64;

/// Set of exception causes latched alongside a result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ExceptionCause(u8);

impl ExceptionCause {
    /// No cause.
    pub const NONE: Self = Self(0);
    /// Operand A is a NaN.
    pub const NAN_A: Self = Self(1 << 4);
    /// Operand B is a NaN.
    pub const NAN_B: Self = Self(1 << 3);
    /// Invalid operation.
    pub const NV: Self = Self(1 << 2);
    /// Overflow.
    pub const OF: Self = Self(1 << 1);
    /// Inexact.
    pub const NX: Self = Self(1 << 0);

    /// Causes that assert the unit's exception output.
    const SIGNALLED: u8 = Self::NAN_A.0 | Self::NAN_B.0 | Self::NV.0 | Self::OF.0;

    /// Returns the raw cause bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if no cause is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every cause in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Value of the unit's exception output for this cause set.
    pub const fn signalled(self) -> bool {
        self.0 & Self::SIGNALLED != 0
    }
}

impl BitOr for ExceptionCause {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ExceptionCause {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Combines operand-level causes with the causes raised by the datapath.
///
/// Operand causes apply to every operation: a NaN on either input raises the
/// exception even for comparisons and min/max, and a signaling NaN also
/// counts as invalid.
///
/// # Arguments
///
/// * `a` - Latched operand A.
/// * `b` - Latched operand B (as presented, before any sign inversion).
/// * `datapath` - Causes raised while computing the result.
pub fn detect(a: Binary64, b: Binary64, datapath: ExceptionCause) -> ExceptionCause {
    let mut cause = datapath;
    if a.is_nan() {
        cause |= ExceptionCause::NAN_A;
    }
    if b.is_nan() {
        cause |= ExceptionCause::NAN_B;
    }
    if a.is_snan() || b.is_snan() {
        cause |= ExceptionCause::NV;
    }
    cause
}
