//! Compare and min/max datapath.
//!
//! Two register stages follow the accepting edge:
//! 1. **Order:** classify both operands and compute their signed-magnitude
//!    ordering, or "unordered" when either is a NaN.
//! 2. **Select:** turn the ordering into a predicate bit (eq/lt/le) or pick an
//!    operand (min/max).
//!
//! ±0 order as equal for predicates. Minimum and maximum order −0 below +0
//! so that both stay commutative on signed zeros.

use std::cmp::Ordering;

use crate::common::binary64::Binary64;
use crate::core::pipeline::signals::FpOp;

use super::nan_handling::select_number;

/// Number of busy cycles the datapath needs after the accepting edge.
pub const STAGES: u8 = 2;

/// Pipeline register contents between compare stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareStage {
    /// Operands latched.
    Unpacked {
        /// Selected operation.
        op: FpOp,
        /// Operand A.
        a: Binary64,
        /// Operand B.
        b: Binary64,
    },
    /// Ordering resolved.
    Ordered {
        /// Selected operation.
        op: FpOp,
        /// Operand A.
        a: Binary64,
        /// Operand B.
        b: Binary64,
        /// `None` when either operand is a NaN.
        order: Option<Ordering>,
    },
    /// Final result: predicate in bit 0, or the selected operand.
    Done(u64),
}

impl CompareStage {
    /// Latches the operands on the accepting edge.
    pub const fn unpack(op: FpOp, a: Binary64, b: Binary64) -> Self {
        Self::Unpacked { op, a, b }
    }

    /// Advances the stage by one clock. `Done` holds its value.
    pub fn advance(self) -> Self {
        match self {
            Self::Unpacked { op, a, b } => Self::Ordered {
                op,
                a,
                b,
                order: order(a, b),
            },
            Self::Ordered { op, a, b, order } => Self::Done(select(op, a, b, order)),
            done @ Self::Done(_) => done,
        }
    }

    /// Final result, once the last stage has run.
    pub const fn outcome(&self) -> Option<u64> {
        match self {
            Self::Done(r) => Some(*r),
            _ => None,
        }
    }

    /// Short stage name for the debug hook.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unpacked { .. } => "unpacked",
            Self::Ordered { .. } => "ordered",
            Self::Done(_) => "done",
        }
    }
}

/// Signed-magnitude ordering of two operands. ±0 compare equal; NaN is unordered.
pub fn order(a: Binary64, b: Binary64) -> Option<Ordering> {
    if a.is_nan() || b.is_nan() {
        return None;
    }
    if a.is_zero() && b.is_zero() {
        return Some(Ordering::Equal);
    }
    Some(match (a.sign(), b.sign()) {
        (false, false) => a.magnitude().cmp(&b.magnitude()),
        // Among negatives the larger magnitude orders lower.
        (true, true) => b.magnitude().cmp(&a.magnitude()),
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
    })
}

fn select(op: FpOp, a: Binary64, b: Binary64, order: Option<Ordering>) -> u64 {
    match op {
        FpOp::Eq => u64::from(order == Some(Ordering::Equal)),
        FpOp::Lt => u64::from(order == Some(Ordering::Less)),
        FpOp::Le => u64::from(matches!(order, Some(Ordering::Less | Ordering::Equal))),
        FpOp::Max => pick(a, b, order, true).bits(),
        FpOp::Min => pick(a, b, order, false).bits(),
        // Add/sub never reach this datapath.
        FpOp::Add | FpOp::Sub => 0,
    }
}

fn pick(a: Binary64, b: Binary64, order: Option<Ordering>, max: bool) -> Binary64 {
    if let Some(decided) = select_number(a, b) {
        return decided;
    }
    if a.is_zero() && b.is_zero() {
        // Signs differ or match; either way max prefers +0 and min prefers −0.
        return if a.sign() == max { b } else { a };
    }
    match (order, max) {
        (Some(Ordering::Less), true) | (Some(Ordering::Greater), false) => b,
        _ => a,
    }
}

/// Runs both stages back to back. Used where cycle timing does not matter.
pub fn evaluate(op: FpOp, a: Binary64, b: Binary64) -> u64 {
    CompareStage::unpack(op, a, b).advance().advance().outcome().unwrap_or(0)
}
