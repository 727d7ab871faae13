//! Register snapshot for trace capture.
//!
//! A host tool can read [`DebugSnapshot`] every cycle and serialize it
//! (JSON, waveform adapters) without influencing the unit.

use serde::Serialize;

use super::exception_flags::ExceptionCause;
use super::{Latch, UnitState};

/// Read-only copy of the unit's registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DebugSnapshot {
    /// Handshake state, including the remaining busy cycles.
    pub state: UnitState,
    /// Latched operation and operands, if any.
    pub latch: Option<Latch>,
    /// Name of the datapath stage currently held in the pipeline registers.
    pub stage: Option<&'static str>,
    /// Result register (non-zero only in the valid cycle).
    pub result: u64,
    /// Exception causes (non-empty only in the valid cycle).
    pub cause: ExceptionCause,
}
