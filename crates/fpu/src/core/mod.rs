//! Functional unit core.
//!
//! 1. **Pipeline:** Port bundles and the clocked unit interface.
//! 2. **Units:** The double-precision add/compare unit and its verification wrapper.

/// Signal boundary and clocked unit trait.
pub mod pipeline;

/// Functional units.
pub mod units;

pub use units::fpu::DoubleAdd;
