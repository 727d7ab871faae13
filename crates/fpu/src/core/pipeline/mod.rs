//! Unit signal boundary.
//!
//! Defines the port bundles exchanged with the host pipeline each cycle and
//! the trait every clocked unit implements.

/// Operation types, one-hot selector, and port bundles.
pub mod signals;

/// Clocked unit trait.
pub mod traits;

pub use signals::{FpOp, FpuInputs, FpuOutputs, OpClass, OpSelect};
pub use traits::ClockedUnit;
