//! Error message tests.

use rvfpu_core::common::{Binary64, FpuError, ReferenceMismatch, SelectError};
use rvfpu_core::core::pipeline::{FpOp, OpClass};

#[test]
fn test_select_error_messages() {
    assert_eq!(
        SelectError::NoOperation.to_string(),
        "enable asserted with no operation selected"
    );
    assert_eq!(
        FpuError::from(SelectError::MultipleOperations(3)).to_string(),
        "invalid operation selector: enable asserted with 3 operations selected"
    );
}

#[test]
fn test_latency_error_message() {
    let err = FpuError::InvalidLatency {
        class: OpClass::AddSub,
        value: 2,
        min: 4,
        max: 15,
    };
    assert_eq!(err.to_string(), "add/sub latency 2 out of range (4..=15)");
}

#[test]
fn test_mismatch_message() {
    let m = ReferenceMismatch {
        op: FpOp::Sub,
        a: Binary64::from(1.0),
        b: Binary64::from(2.0),
        pipeline: 0,
        reference: 0xBFF0_0000_0000_0000,
    };
    assert_eq!(
        FpuError::ReferenceMismatch(m).to_string(),
        "reference mismatch: fsub.d(0x3ff0000000000000, 0x4000000000000000): \
         pipeline=0x0000000000000000 reference=0xbff0000000000000"
    );
}

#[test]
fn test_driver_error_messages() {
    assert_eq!(
        FpuError::Timeout { cycles: 64 }.to_string(),
        "no valid pulse after 64 cycles"
    );
    assert_eq!(FpuError::Busy.to_string(), "unit busy; operation not accepted");
}
