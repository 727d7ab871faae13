//! Multi-cycle binary64 floating-point unit for RISC-V pipeline models.
//!
//! This crate implements a cycle-accurate double-precision add/compare unit
//! with the following:
//! 1. **Core:** A busy/valid handshake state machine driving a staged
//!    align/add/normalize/round adder and an order/select comparator.
//! 2. **Verification:** A software reference model and a wrapper that checks
//!    every result bit for bit without touching the outputs.
//! 3. **Simulation:** Configuration, statistics, a debug snapshot hook, and a
//!    blocking driver for callers that do not model timing.
//!
//! The host scheduler owns time: each call to
//! [`ClockedUnit::step`](crate::core::pipeline::ClockedUnit::step) is one
//! clock edge.

/// Common types (binary64 operands, register fields, errors).
pub mod common;
/// Unit configuration (latencies, reference checking, tracing).
pub mod config;
/// Signal boundary and functional units.
pub mod core;
/// Drivers standing in for the host scheduler.
pub mod sim;
/// Activity counters and reporting.
pub mod stats;

/// Root configuration type; use `FpuConfig::default()` or parse JSON.
pub use crate::config::FpuConfig;
/// The double-precision add/compare unit.
pub use crate::core::DoubleAdd;
/// Clocked unit trait and port bundles.
pub use crate::core::pipeline::{ClockedUnit, FpOp, FpuInputs, FpuOutputs};
/// Reference-checked unit.
pub use crate::core::units::fpu::CheckedUnit;
