//! Error types for the floating-point unit.
//!
//! This module defines the failure modes of the unit and its surroundings. It provides:
//! 1. **Selector Errors:** Malformed one-hot operation selectors (caller contract violations).
//! 2. **Reference Mismatches:** Disagreement between the pipeline and the reference model.
//! 3. **Unit Errors:** Configuration, parsing, and driver timeouts, integrated with
//!    standard Rust error traits through `thiserror`.
//!
//! Arithmetic special cases (NaN, infinity, overflow) are not errors: they are
//! reported through the exception output and never leave this module as `Err`.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::binary64::Binary64;
use crate::core::pipeline::signals::{FpOp, OpClass};

/// A malformed operation selector presented with `enable`.
///
/// The unit treats these as no-ops; the error exists so the decoder can say why.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SelectError {
    /// `enable` was asserted with no operation flag set.
    #[error("enable asserted with no operation selected")]
    NoOperation,

    /// `enable` was asserted with more than one operation flag set.
    #[error("enable asserted with {0} operations selected")]
    MultipleOperations(u32),
}

/// A bit-level disagreement between the pipeline and the reference model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ReferenceMismatch {
    /// Operation that was checked.
    pub op: FpOp,
    /// Latched operand A.
    pub a: Binary64,
    /// Latched operand B.
    pub b: Binary64,
    /// Result produced by the pipeline.
    pub pipeline: u64,
    /// Result produced by the reference model.
    pub reference: u64,
}

impl fmt::Display for ReferenceMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, {}): pipeline={:#018x} reference={:#018x}",
            self.op, self.a, self.b, self.pipeline, self.reference
        )
    }
}

/// Errors surfaced by configuration, the verification wrapper, and the driver.
#[derive(Debug, Error)]
pub enum FpuError {
    /// The decoder rejected an operation selector.
    #[error("invalid operation selector: {0}")]
    Select(#[from] SelectError),

    /// A configured latency is outside what the datapath and counter allow.
    #[error("{class} latency {value} out of range ({min}..={max})")]
    InvalidLatency {
        /// Operation class the latency applies to.
        class: OpClass,
        /// Configured value.
        value: u8,
        /// Smallest legal value (the class's stage count).
        min: u8,
        /// Largest legal value (the counter width).
        max: u8,
    },

    /// Configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// The pipeline disagreed with the reference model.
    #[error("reference mismatch: {0}")]
    ReferenceMismatch(ReferenceMismatch),

    /// `valid` did not arrive within the driver's cycle bound.
    #[error("no valid pulse after {cycles} cycles")]
    Timeout {
        /// Cycles stepped before giving up.
        cycles: u64,
    },

    /// The driver tried to issue while the unit was busy.
    #[error("unit busy; operation not accepted")]
    Busy,
}
