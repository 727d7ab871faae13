//! Verification wrapper.
//!
//! [`CheckedUnit`] composes a [`DoubleAdd`] with a [`ReferenceModel`]. On every
//! valid pulse it reads the completed operation through the unit's debug
//! hook, recomputes it with the reference, and compares bit for bit.
//! Mismatches go to the log and to an in-memory list; the outputs returned to
//! the caller are always the unit's own, on the unit's own schedule.

use tracing::error;

use crate::common::error::{FpuError, ReferenceMismatch};
use crate::config::{FpuConfig, ReferenceMode};
use crate::core::pipeline::signals::{FpuInputs, FpuOutputs};
use crate::core::pipeline::traits::ClockedUnit;

use super::DoubleAdd;
use super::reference::{HostReference, ReferenceModel};

/// A [`DoubleAdd`] cross-checked against a reference model.
#[derive(Debug)]
pub struct CheckedUnit<R: ReferenceModel = HostReference> {
    unit: DoubleAdd,
    reference: R,
    mode: ReferenceMode,
    checked: u64,
    mismatches: Vec<ReferenceMismatch>,
}

impl CheckedUnit<HostReference> {
    /// Wraps a unit built from `config`, checking against the host FPU.
    ///
    /// # Errors
    ///
    /// Any error [`DoubleAdd::new`] returns.
    pub fn new(config: &FpuConfig) -> Result<Self, FpuError> {
        Ok(Self::with_reference(
            DoubleAdd::new(config)?,
            HostReference,
            config.reference.mode,
        ))
    }
}

impl<R: ReferenceModel> CheckedUnit<R> {
    /// Wraps an existing unit with a custom reference model.
    pub const fn with_reference(unit: DoubleAdd, reference: R, mode: ReferenceMode) -> Self {
        Self {
            unit,
            reference,
            mode,
            checked: 0,
            mismatches: Vec::new(),
        }
    }

    /// The wrapped unit.
    pub const fn unit(&self) -> &DoubleAdd {
        &self.unit
    }

    /// Number of completions compared against the reference.
    pub const fn checked(&self) -> u64 {
        self.checked
    }

    /// Mismatches recorded so far.
    pub fn mismatches(&self) -> &[ReferenceMismatch] {
        &self.mismatches
    }

    /// Removes and returns the recorded mismatches.
    pub fn take_mismatches(&mut self) -> Vec<ReferenceMismatch> {
        std::mem::take(&mut self.mismatches)
    }

    /// Succeeds if no mismatch has been recorded.
    ///
    /// # Errors
    ///
    /// [`FpuError::ReferenceMismatch`] carrying the first recorded mismatch.
    pub fn verify(&self) -> Result<(), FpuError> {
        match self.mismatches.first() {
            Some(m) => Err(FpuError::ReferenceMismatch(*m)),
            None => Ok(()),
        }
    }

    /// Unwraps the inner unit.
    pub fn into_inner(self) -> DoubleAdd {
        self.unit
    }

    fn check(&mut self, out: &FpuOutputs) {
        let Some(latch) = self.unit.latched() else {
            return;
        };
        self.checked += 1;

        let reference = self.reference.compute(latch.op, latch.a, latch.b);
        if reference == out.result {
            return;
        }

        let mismatch = ReferenceMismatch {
            op: latch.op,
            a: latch.a,
            b: latch.b,
            pipeline: out.result,
            reference,
        };
        error!(%mismatch, "fpu reference mismatch");
        self.mismatches.push(mismatch);

        if self.mode == ReferenceMode::Fatal && cfg!(debug_assertions) {
            panic!("{}", FpuError::ReferenceMismatch(mismatch));
        }
    }
}

impl<R: ReferenceModel> ClockedUnit for CheckedUnit<R> {
    fn step(&mut self, inputs: &FpuInputs) -> FpuOutputs {
        let out = self.unit.step(inputs);
        if out.valid && self.mode != ReferenceMode::Off {
            self.check(&out);
        }
        out
    }

    fn reset(&mut self) {
        self.unit.reset();
    }

    fn outputs(&self) -> FpuOutputs {
        self.unit.outputs()
    }
}
