//! Clocked Unit Interface.
//!
//! This module defines the common trait for synchronous functional units. It provides:
//! 1. **Clock Edge:** `step` samples the inputs and advances the registers by one cycle.
//! 2. **Reset:** Returns the unit to its idle state without producing a result.
//! 3. **Combinational View:** Reading the outputs never changes state.

use super::signals::{FpuInputs, FpuOutputs};

/// A synchronous functional unit advanced one clock edge at a time.
///
/// The scheduler owns time: the unit never advances on its own, and each
/// instance keeps all of its state in `self` so any number of units can be
/// stepped side by side.
pub trait ClockedUnit {
    /// Executes one clock edge.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Input wires sampled at this edge.
    ///
    /// # Returns
    ///
    /// The outputs driven by the registers after the edge.
    fn step(&mut self, inputs: &FpuInputs) -> FpuOutputs;

    /// Forces the unit idle, cancelling any in-flight operation.
    fn reset(&mut self);

    /// Current outputs as a pure function of register state.
    fn outputs(&self) -> FpuOutputs;

    /// Returns `true` while an operation is in flight.
    fn is_busy(&self) -> bool {
        self.outputs().busy
    }
}
