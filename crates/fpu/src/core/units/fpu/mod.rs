//! Double-precision add/compare unit.
//!
//! This module implements the multi-cycle binary64 unit used in the Execute
//! stage. It performs addition, subtraction, equality, less-than,
//! less-or-equal, minimum, and maximum behind a busy/valid handshake:
//!
//! ```text
//!            enable & one-hot op                 remaining > 1
//!   ┌──────┐ ───────────────────▶ ┌──────────┐ ◀───────────────┐
//!   │ Idle │                      │ Busy(k)  │ ────────────────┘
//!   └──────┘ ◀─────────────────── └──────────┘
//!      ▲         next edge             │ remaining == 1
//!      │                               ▼
//!      │                         ┌──────────┐
//!      └──────────────────────── │ Complete │  valid = 1, busy = 0
//!                                └──────────┘
//! ```
//!
//! Reset returns to `Idle` from any state without a valid pulse. `Complete`
//! is not busy, so an enable on that edge is accepted.
//!
//! Operations are organized into submodules:
//! - [`decode`]: one-hot selector decoding.
//! - [`adder`]: align/add/normalize/round datapath.
//! - [`compare`]: order/select datapath for predicates and min/max.
//! - [`rounding`]: round-to-nearest-even on guard/round/sticky bits.
//! - [`nan_handling`]: canonical NaN and the min/max NaN rule.
//! - [`exception_flags`]: exception causes and the exception detector.
//! - [`reference`]: the software reference model.
//! - [`checked`]: a verification wrapper comparing the unit against the reference.
//! - [`snapshot`]: read-only register snapshot for trace capture.

/// Add/subtract datapath stages.
pub mod adder;

/// Verification wrapper.
pub mod checked;

/// Compare and min/max datapath stages.
pub mod compare;

/// Operation selector decoder.
pub mod decode;

/// Exception causes and detection.
pub mod exception_flags;

/// Canonical NaN propagation.
pub mod nan_handling;

/// Software reference model.
pub mod reference;

/// Round-to-nearest-even.
pub mod rounding;

/// Debug register snapshot.
pub mod snapshot;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::common::binary64::Binary64;
use crate::common::error::FpuError;
use crate::common::field::U4;
use crate::config::FpuConfig;
use crate::core::pipeline::signals::{FpOp, FpuInputs, FpuOutputs, OpClass};
use crate::core::pipeline::traits::ClockedUnit;
use crate::stats::FpuStats;

use self::adder::AdderStage;
use self::compare::CompareStage;
use self::exception_flags::ExceptionCause;

pub use self::checked::CheckedUnit;
pub use self::reference::{HostReference, ReferenceModel};
pub use self::snapshot::DebugSnapshot;

/// Handshake state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitState {
    /// Ready to accept.
    #[default]
    Idle,
    /// Operation in flight; the value is the number of busy cycles left,
    /// counting the current one.
    Busy(U4),
    /// Result valid for exactly this cycle.
    Complete,
}

/// Operands and operation captured on the accepting edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Latch {
    /// Selected operation.
    pub op: FpOp,
    /// Operand A.
    pub a: Binary64,
    /// Operand B, as presented (subtraction is folded in by the adder).
    pub b: Binary64,
}

/// Datapath registers of the in-flight operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Datapath {
    /// Add/sub stages.
    AddSub(AdderStage),
    /// Compare and min/max stages.
    Compare(CompareStage),
}

impl Datapath {
    /// Unpacks the latched operands into the class's first stage.
    pub fn start(latch: &Latch) -> Self {
        match latch.op.class() {
            OpClass::AddSub => Self::AddSub(AdderStage::unpack(latch.op, latch.a, latch.b)),
            OpClass::Compare => Self::Compare(CompareStage::unpack(latch.op, latch.a, latch.b)),
        }
    }

    /// Advances one stage.
    pub fn advance(self) -> Self {
        match self {
            Self::AddSub(s) => Self::AddSub(s.advance()),
            Self::Compare(s) => Self::Compare(s.advance()),
        }
    }

    /// Result bits and datapath causes, once the last stage has run.
    pub const fn outcome(&self) -> Option<(u64, ExceptionCause)> {
        match self {
            Self::AddSub(s) => match s.outcome() {
                Some(o) => Some((o.result.bits(), o.cause)),
                None => None,
            },
            Self::Compare(s) => match s.outcome() {
                Some(r) => Some((r, ExceptionCause::NONE)),
                None => None,
            },
        }
    }

    /// Runs any remaining stages and returns the outcome.
    fn finish(mut self) -> (u64, ExceptionCause) {
        loop {
            if let Some(o) = self.outcome() {
                return o;
            }
            self = self.advance();
        }
    }

    /// Name of the current stage.
    pub const fn stage_name(&self) -> &'static str {
        match self {
            Self::AddSub(s) => s.name(),
            Self::Compare(s) => s.name(),
        }
    }
}

/// Multi-cycle binary64 add/compare unit.
///
/// One instance models one hardware unit: all registers live in the struct,
/// and the host scheduler advances it with [`ClockedUnit::step`].
///
/// # Examples
///
/// ```
/// use rvfpu_core::core::pipeline::{ClockedUnit, FpOp, FpuInputs};
/// use rvfpu_core::core::units::fpu::DoubleAdd;
///
/// let mut fpu = DoubleAdd::default();
/// let one = 1.0_f64.to_bits();
///
/// let out = fpu.step(&FpuInputs::issue(FpOp::Add, one, one));
/// assert!(out.busy);
///
/// let mut out = out;
/// while !out.valid {
///     out = fpu.step(&FpuInputs::idle());
/// }
/// assert_eq!(out.result, 2.0_f64.to_bits());
/// assert!(!out.exception);
/// ```
#[derive(Clone, Debug)]
pub struct DoubleAdd {
    add_sub_latency: U4,
    compare_latency: U4,
    trace: bool,

    state: UnitState,
    latch: Option<Latch>,
    datapath: Option<Datapath>,
    result: u64,
    cause: ExceptionCause,

    stats: FpuStats,
}

impl Default for DoubleAdd {
    fn default() -> Self {
        Self::with_latencies(
            U4::truncate(adder::STAGES),
            U4::truncate(compare::STAGES),
            false,
        )
    }
}

impl DoubleAdd {
    /// Creates a unit from a configuration.
    ///
    /// # Errors
    ///
    /// [`FpuError::InvalidLatency`] if a configured latency is out of range.
    pub fn new(config: &FpuConfig) -> Result<Self, FpuError> {
        Ok(Self::with_latencies(
            config.latency.cycles(OpClass::AddSub)?,
            config.latency.cycles(OpClass::Compare)?,
            config.trace,
        ))
    }

    const fn with_latencies(add_sub_latency: U4, compare_latency: U4, trace: bool) -> Self {
        Self {
            add_sub_latency,
            compare_latency,
            trace,
            state: UnitState::Idle,
            latch: None,
            datapath: None,
            result: 0,
            cause: ExceptionCause::NONE,
            stats: FpuStats {
                cycles: 0,
                busy_cycles: 0,
                accepted: 0,
                completed_add_sub: 0,
                completed_compare: 0,
                exceptions: 0,
                ignored_busy: 0,
                rejected_select: 0,
                cancelled: 0,
            },
        }
    }

    /// Busy latency of an operation class.
    pub const fn latency(&self, class: OpClass) -> U4 {
        match class {
            OpClass::AddSub => self.add_sub_latency,
            OpClass::Compare => self.compare_latency,
        }
    }

    /// Current handshake state.
    pub const fn state(&self) -> UnitState {
        self.state
    }

    /// Operands of the in-flight or just-completed operation.
    ///
    /// Available from the accepting edge through the valid cycle.
    pub const fn latched(&self) -> Option<Latch> {
        self.latch
    }

    /// Exception causes of the just-completed operation. Empty outside the valid cycle.
    pub const fn cause(&self) -> ExceptionCause {
        self.cause
    }

    /// Activity counters.
    pub const fn stats(&self) -> &FpuStats {
        &self.stats
    }

    /// Zeroes the activity counters.
    pub fn clear_stats(&mut self) {
        self.stats = FpuStats::default();
    }

    /// Read-only view of every register, for trace capture.
    pub fn snapshot(&self) -> DebugSnapshot {
        DebugSnapshot {
            state: self.state,
            latch: self.latch,
            stage: self.datapath.as_ref().map(Datapath::stage_name),
            result: self.result,
            cause: self.cause,
        }
    }

    fn try_accept(&mut self, inputs: &FpuInputs) {
        match decode::decode(&inputs.select) {
            Ok(op) => {
                let latch = Latch {
                    op,
                    a: Binary64(inputs.a),
                    b: Binary64(inputs.b),
                };
                let cycles = self.latency(op.class());
                debug!(%op, a = %latch.a, b = %latch.b, cycles = cycles.get(), "fpu accept");
                self.datapath = Some(Datapath::start(&latch));
                self.latch = Some(latch);
                self.state = UnitState::Busy(cycles);
                self.stats.accepted += 1;
            }
            Err(e) => {
                warn!(select = inputs.select.mask(), error = %e, "fpu enable dropped");
                self.stats.rejected_select += 1;
            }
        }
    }

    fn tick_busy(&mut self, remaining: U4) {
        self.datapath = self.datapath.map(Datapath::advance);
        if remaining.get() > 1 {
            self.state = UnitState::Busy(remaining.dec());
        } else {
            self.complete();
        }
    }

    fn complete(&mut self) {
        let (result, datapath_cause) = self
            .datapath
            .map_or((0, ExceptionCause::NONE), Datapath::finish);
        let cause = match self.latch {
            Some(l) => exception_flags::detect(l.a, l.b, datapath_cause),
            None => datapath_cause,
        };

        self.result = result;
        self.cause = cause;
        self.state = UnitState::Complete;

        if let Some(l) = self.latch {
            self.stats.record_completion(l.op.class(), cause.signalled());
            debug!(op = %l.op, result = format_args!("{result:#018x}"), cause = cause.bits(), "fpu complete");
        }
    }

    /// Drops the result registers after the valid cycle.
    fn retire(&mut self) {
        self.latch = None;
        self.datapath = None;
        self.result = 0;
        self.cause = ExceptionCause::NONE;
        self.state = UnitState::Idle;
    }
}

impl ClockedUnit for DoubleAdd {
    fn step(&mut self, inputs: &FpuInputs) -> FpuOutputs {
        self.stats.cycles += 1;

        if inputs.reset {
            self.reset();
        } else {
            match self.state {
                UnitState::Idle | UnitState::Complete => {
                    self.retire();
                    if inputs.enable {
                        self.try_accept(inputs);
                    }
                }
                UnitState::Busy(remaining) => {
                    if inputs.enable {
                        debug!(select = inputs.select.mask(), "fpu enable ignored while busy");
                        self.stats.ignored_busy += 1;
                    }
                    self.tick_busy(remaining);
                }
            }
        }

        let out = self.outputs();
        if out.busy {
            self.stats.busy_cycles += 1;
        }
        if self.trace || cfg!(feature = "always-trace") {
            trace!(snapshot = ?self.snapshot(), "fpu edge");
        }
        out
    }

    fn reset(&mut self) {
        if let UnitState::Busy(remaining) = self.state {
            debug!(remaining = remaining.get(), "fpu reset cancelled in-flight operation");
            self.stats.cancelled += 1;
        }
        self.retire();
    }

    fn outputs(&self) -> FpuOutputs {
        match self.state {
            UnitState::Idle => FpuOutputs::default(),
            UnitState::Busy(_) => FpuOutputs {
                busy: true,
                ..FpuOutputs::default()
            },
            UnitState::Complete => FpuOutputs {
                result: self.result,
                exception: self.cause.signalled(),
                valid: true,
                busy: false,
            },
        }
    }
}
