//! Unit statistics collection and reporting.
//!
//! This module tracks activity counters for one unit instance. It provides:
//! 1. **Cycles and occupancy:** Total edges and edges spent busy.
//! 2. **Operation mix:** Accepted and completed operations per latency class.
//! 3. **Protocol violations:** Enables ignored while busy and malformed selectors.
//! 4. **Exceptions and cancellations:** Signalled exceptions and resets that
//!    discarded an in-flight operation.

use std::fmt::Write as _;

use serde::Serialize;

use crate::core::pipeline::signals::OpClass;

/// Activity counters for one unit instance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FpuStats {
    /// Clock edges stepped.
    pub cycles: u64,
    /// Edges on which `busy` was driven high.
    pub busy_cycles: u64,
    /// Operations accepted.
    pub accepted: u64,
    /// Add/sub operations that produced a valid pulse.
    pub completed_add_sub: u64,
    /// Compare and min/max operations that produced a valid pulse.
    pub completed_compare: u64,
    /// Completed operations with the exception output raised.
    pub exceptions: u64,
    /// Enables presented while busy (dropped).
    pub ignored_busy: u64,
    /// Enables with zero or several operation flags (dropped).
    pub rejected_select: u64,
    /// In-flight operations discarded by reset.
    pub cancelled: u64,
}

impl FpuStats {
    /// Records a completion for `class`.
    pub(crate) const fn record_completion(&mut self, class: OpClass, exception: bool) {
        match class {
            OpClass::AddSub => self.completed_add_sub += 1,
            OpClass::Compare => self.completed_compare += 1,
        }
        if exception {
            self.exceptions += 1;
        }
    }

    /// Total operations that produced a valid pulse.
    pub const fn completed(&self) -> u64 {
        self.completed_add_sub + self.completed_compare
    }

    /// Fraction of edges spent busy.
    pub fn utilization(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.busy_cycles as f64 / self.cycles as f64
        }
    }

    /// Formats the counters as a report table.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "FPU (binary64 add/compare) STATISTICS");
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "fpu_cycles               {}", self.cycles);
        let _ = writeln!(out, "fpu_busy_cycles          {}", self.busy_cycles);
        let _ = writeln!(out, "fpu_utilization          {:.2}%", self.utilization() * 100.0);
        let _ = writeln!(out, "----------------------------------------------------------");
        let _ = writeln!(out, "ops.accepted             {}", self.accepted);
        let _ = writeln!(out, "ops.completed.add_sub    {}", self.completed_add_sub);
        let _ = writeln!(out, "ops.completed.compare    {}", self.completed_compare);
        let _ = writeln!(out, "ops.exceptions           {}", self.exceptions);
        let _ = writeln!(out, "ops.cancelled            {}", self.cancelled);
        let _ = writeln!(out, "----------------------------------------------------------");
        let _ = writeln!(out, "protocol.ignored_busy    {}", self.ignored_busy);
        let _ = writeln!(out, "protocol.bad_select      {}", self.rejected_select);
        out
    }

    /// Prints [`Self::report`] to stdout.
    pub fn print(&self) {
        print!("{}", self.report());
    }
}
