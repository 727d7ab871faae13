//! Execution units.
//!
//! This module contains the multi-cycle floating-point unit used in the
//! Execute stage of the host pipeline model.

/// Double-precision add/subtract/compare unit.
pub mod fpu;
