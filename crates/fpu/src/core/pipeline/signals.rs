//! Unit control signals and operation types.
//!
//! This module defines the signal boundary of the floating-point unit. It performs:
//! 1. **Operation Classification:** The seven operations and the two latency classes.
//! 2. **Operation Selection:** The one-hot selector as it arrives on the input wires.
//! 3. **Port Bundles:** Per-cycle input and output bundles sampled and driven at each edge.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Floating-point operation performed by the unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FpOp {
    /// Addition (`a + b`).
    #[default]
    Add,

    /// Subtraction (`a - b`).
    Sub,

    /// Equality (`a == b`), quiet.
    Eq,

    /// Less-than (`a < b`).
    Lt,

    /// Less-or-equal (`a <= b`).
    Le,

    /// Maximum.
    Max,

    /// Minimum.
    Min,
}

impl FpOp {
    /// Every operation, in selector bit order.
    pub const ALL: [Self; 7] = [
        Self::Add,
        Self::Sub,
        Self::Eq,
        Self::Lt,
        Self::Le,
        Self::Max,
        Self::Min,
    ];

    /// Latency class the operation belongs to.
    pub const fn class(self) -> OpClass {
        match self {
            Self::Add | Self::Sub => OpClass::AddSub,
            Self::Eq | Self::Lt | Self::Le | Self::Max | Self::Min => OpClass::Compare,
        }
    }

    /// Returns `true` for operations whose result is a single boolean bit.
    pub const fn is_predicate(self) -> bool {
        matches!(self, Self::Eq | Self::Lt | Self::Le)
    }
}

impl fmt::Display for FpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "fadd.d",
            Self::Sub => "fsub.d",
            Self::Eq => "feq.d",
            Self::Lt => "flt.d",
            Self::Le => "fle.d",
            Self::Max => "fmax.d",
            Self::Min => "fmin.d",
        };
        f.write_str(name)
    }
}

/// Latency class. All operations in a class share one fixed cycle count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpClass {
    /// Addition and subtraction.
    AddSub,
    /// Comparisons and min/max selection.
    Compare,
}

impl fmt::Display for OpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddSub => f.write_str("add/sub"),
            Self::Compare => f.write_str("compare"),
        }
    }
}

/// One-hot operation selector as driven on the unit's input wires.
///
/// Exactly one flag must be set alongside `enable`; the decoder rejects
/// anything else.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpSelect {
    /// `i_add`
    pub add: bool,
    /// `i_sub`
    pub sub: bool,
    /// `i_eq`
    pub eq: bool,
    /// `i_lt`
    pub lt: bool,
    /// `i_le`
    pub le: bool,
    /// `i_max`
    pub max: bool,
    /// `i_min`
    pub min: bool,
}

impl OpSelect {
    /// Selector with only the flag for `op` set.
    pub fn only(op: FpOp) -> Self {
        let mut sel = Self::default();
        *sel.flag_mut(op) = true;
        sel
    }

    /// Builds a selector from a 7-bit mask in [`FpOp::ALL`] order (bit 0 = add).
    pub fn from_mask(mask: u8) -> Self {
        let mut sel = Self::default();
        for (i, op) in FpOp::ALL.iter().enumerate() {
            *sel.flag_mut(*op) = (mask >> i) & 1 != 0;
        }
        sel
    }

    /// Packs the selector into a 7-bit mask in [`FpOp::ALL`] order.
    pub fn mask(&self) -> u8 {
        FpOp::ALL
            .iter()
            .enumerate()
            .fold(0, |m, (i, op)| m | (u8::from(self.flag(*op)) << i))
    }

    /// Returns the flag for `op`.
    pub const fn flag(&self, op: FpOp) -> bool {
        match op {
            FpOp::Add => self.add,
            FpOp::Sub => self.sub,
            FpOp::Eq => self.eq,
            FpOp::Lt => self.lt,
            FpOp::Le => self.le,
            FpOp::Max => self.max,
            FpOp::Min => self.min,
        }
    }

    fn flag_mut(&mut self, op: FpOp) -> &mut bool {
        match op {
            FpOp::Add => &mut self.add,
            FpOp::Sub => &mut self.sub,
            FpOp::Eq => &mut self.eq,
            FpOp::Lt => &mut self.lt,
            FpOp::Le => &mut self.le,
            FpOp::Max => &mut self.max,
            FpOp::Min => &mut self.min,
        }
    }
}

impl From<FpOp> for OpSelect {
    fn from(op: FpOp) -> Self {
        Self::only(op)
    }
}

/// Inputs sampled at a clock edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FpuInputs {
    /// Synchronous reset (active high).
    pub reset: bool,
    /// Start pulse.
    pub enable: bool,
    /// One-hot operation selector.
    pub select: OpSelect,
    /// Operand A.
    pub a: u64,
    /// Operand B.
    pub b: u64,
}

impl FpuInputs {
    /// No reset, no enable.
    pub fn idle() -> Self {
        Self::default()
    }

    /// An enable pulse for a single well-formed operation.
    pub fn issue(op: FpOp, a: u64, b: u64) -> Self {
        Self {
            reset: false,
            enable: true,
            select: OpSelect::only(op),
            a,
            b,
        }
    }

    /// A reset pulse.
    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Self::default()
        }
    }
}

/// Outputs driven after a clock edge.
///
/// `result` and `exception` are meaningful only while `valid` is high; in
/// every other cycle they read as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FpuOutputs {
    /// Result pattern; comparison results occupy bit 0.
    pub result: u64,
    /// Exception flag (NaN operand, overflow, or invalid operation).
    pub exception: bool,
    /// One-cycle result strobe.
    pub valid: bool,
    /// High while an operation is in flight.
    pub busy: bool,
}
