//! Common types shared across the unit.
//!
//! 1. **Operand Type:** A strong binary64 bit-pattern type with field accessors.
//! 2. **Register Fields:** Narrow fixed-width fields and the sticky shifter.
//! 3. **Error Handling:** Selector errors, reference mismatches, and unit errors.

/// IEEE 754 binary64 operand type and field constants.
pub mod binary64;

/// Error types.
pub mod error;

/// Narrow register fields and bit helpers.
pub mod field;

pub use binary64::Binary64;
pub use error::{FpuError, ReferenceMismatch, SelectError};
pub use field::U4;
