//! Software reference model.
//!
//! The reference recomputes each operation with the host's IEEE 754 double
//! arithmetic, which rounds to nearest-even, and normalizes the result the
//! same way the unit does (canonical NaN, comparison bit in bit 0). It shares
//! no code with the datapath beyond NaN canonicalization.

use crate::common::binary64::Binary64;
use crate::core::pipeline::signals::FpOp;

use super::nan_handling::canonicalize;

/// A trusted model the verification wrapper compares the unit against.
pub trait ReferenceModel {
    /// Computes the expected result bits for `op` over the raw operands.
    fn compute(&self, op: FpOp, a: Binary64, b: Binary64) -> u64;
}

/// Reference model backed by the host FPU.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostReference;

impl ReferenceModel for HostReference {
    fn compute(&self, op: FpOp, a: Binary64, b: Binary64) -> u64 {
        let fa = a.to_f64();
        let fb = b.to_f64();

        match op {
            FpOp::Add => canonicalize(Binary64::from(fa + fb)).bits(),
            FpOp::Sub => canonicalize(Binary64::from(fa - fb)).bits(),
            FpOp::Eq => u64::from(fa == fb),
            FpOp::Lt => u64::from(fa < fb),
            FpOp::Le => u64::from(fa <= fb),
            FpOp::Max => fmax(fa, fb).to_bits(),
            FpOp::Min => fmin(fa, fb).to_bits(),
        }
    }
}

/// IEEE 754-2008 `maxNum` with −0 < +0 and canonical NaN (RISC-V FMAX.D).
fn fmax(a: f64, b: f64) -> f64 {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Binary64::canonical_nan().to_f64(),
        (true, false) => b,
        (false, true) => a,
        (false, false) => {
            if a == 0.0 && b == 0.0 {
                if a.is_sign_negative() { b } else { a }
            } else {
                a.max(b)
            }
        }
    }
}

/// IEEE 754-2008 `minNum` with −0 < +0 and canonical NaN (RISC-V FMIN.D).
fn fmin(a: f64, b: f64) -> f64 {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Binary64::canonical_nan().to_f64(),
        (true, false) => b,
        (false, true) => a,
        (false, false) => {
            if a == 0.0 && b == 0.0 {
                if a.is_sign_negative() { a } else { b }
            } else {
                a.min(b)
            }
        }
    }
}
