//! Operation decoder.
//!
//! Turns the one-hot selector sampled with `enable` into a single [`FpOp`].
//! Zero or several set flags are a caller contract violation; the unit
//! treats them as a no-op and the decoder reports why.

use crate::common::error::SelectError;
use crate::core::pipeline::signals::{FpOp, OpSelect};

/// Decodes a one-hot selector.
///
/// # Arguments
///
/// * `select` - Selector flags sampled alongside `enable`.
///
/// # Returns
///
/// The selected operation, or a [`SelectError`] when not exactly one flag is set.
pub fn decode(select: &OpSelect) -> Result<FpOp, SelectError> {
    let mask = select.mask();
    match mask.count_ones() {
        0 => Err(SelectError::NoOperation),
        1 => Ok(FpOp::ALL[mask.trailing_zeros() as usize]),
        n => Err(SelectError::MultipleOperations(n)),
    }
}
