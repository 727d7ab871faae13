//! Blocking driver for a clocked unit.
//!
//! The driver plays the part of the host pipeline's issue logic: it presents
//! one enable pulse, holds the inputs idle, and steps the unit until the
//! valid pulse arrives.

use crate::common::error::FpuError;
use crate::core::pipeline::signals::{FpOp, FpuInputs};
use crate::core::pipeline::traits::ClockedUnit;

/// Default bound on edges per operation; well above the 4-bit latency limit.
const DEFAULT_MAX_CYCLES: u64 = 64;

/// Result of one driven operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    /// Result bits on the valid cycle.
    pub result: u64,
    /// Exception output on the valid cycle.
    pub exception: bool,
    /// Edges stepped, from the accepting edge through the valid edge inclusive.
    pub cycles: u64,
}

/// Issues operations to a unit one at a time.
#[derive(Debug)]
pub struct Driver<U: ClockedUnit> {
    unit: U,
    max_cycles: u64,
}

impl<U: ClockedUnit> Driver<U> {
    /// Creates a driver around `unit`.
    pub const fn new(unit: U) -> Self {
        Self {
            unit,
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }

    /// Sets the per-operation edge bound.
    #[must_use]
    pub const fn with_max_cycles(mut self, max_cycles: u64) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    /// The driven unit.
    pub const fn unit(&self) -> &U {
        &self.unit
    }

    /// Mutable access to the driven unit.
    pub const fn unit_mut(&mut self) -> &mut U {
        &mut self.unit
    }

    /// Unwraps the driven unit.
    pub fn into_inner(self) -> U {
        self.unit
    }

    /// Issues `op` and steps until its valid pulse.
    ///
    /// # Errors
    ///
    /// * [`FpuError::Busy`] - The unit was busy, or dropped the enable.
    /// * [`FpuError::Timeout`] - No valid pulse within the edge bound.
    pub fn run(&mut self, op: FpOp, a: u64, b: u64) -> Result<Completion, FpuError> {
        if self.unit.is_busy() {
            return Err(FpuError::Busy);
        }

        let mut out = self.unit.step(&FpuInputs::issue(op, a, b));
        let mut cycles = 1;
        if !out.busy && !out.valid {
            return Err(FpuError::Busy);
        }

        while !out.valid {
            if cycles >= self.max_cycles {
                return Err(FpuError::Timeout { cycles });
            }
            out = self.unit.step(&FpuInputs::idle());
            cycles += 1;
        }

        Ok(Completion {
            result: out.result,
            exception: out.exception,
            cycles,
        })
    }

    /// Runs a sequence of operations back to back.
    ///
    /// # Errors
    ///
    /// The first error [`Self::run`] returns; earlier completions are discarded.
    pub fn run_all(&mut self, ops: &[(FpOp, u64, u64)]) -> Result<Vec<Completion>, FpuError> {
        ops.iter().map(|&(op, a, b)| self.run(op, a, b)).collect()
    }
}
