//! Reference checker tests.
//!
//! The wrapper must be invisible to the caller: same outputs, same timing.
//! It only reports when the unit and the reference model disagree.

use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use rvfpu_core::common::{Binary64, FpuError, ReferenceMismatch};
use rvfpu_core::config::{FpuConfig, ReferenceMode};
use rvfpu_core::core::pipeline::{FpOp, FpuInputs};
use rvfpu_core::core::units::fpu::{CheckedUnit, DoubleAdd, HostReference, ReferenceModel};
use rvfpu_core::sim::Driver;

use crate::common::harness::{TestBench, bits, init_tracing};
use crate::common::mocks::reference::MockReference;

const CANONICAL_NAN: u64 = 0x7FF8_0000_0000_0000;

fn mixed_workload() -> Vec<(FpOp, u64, u64)> {
    vec![
        (FpOp::Add, bits(1.0), bits(1.0)),
        (FpOp::Add, bits(f64::MAX), bits(f64::MAX)),
        (FpOp::Sub, bits(f64::INFINITY), bits(f64::INFINITY)),
        (FpOp::Sub, bits(0.3), bits(0.1)),
        (FpOp::Add, 0x0000_0000_0000_0001, 0x8000_0000_0000_0000),
        (FpOp::Eq, CANONICAL_NAN, bits(1.0)),
        (FpOp::Lt, bits(-0.0), bits(0.0)),
        (FpOp::Le, bits(2.0), bits(2.0)),
        (FpOp::Max, CANONICAL_NAN, bits(3.0)),
        (FpOp::Min, bits(-0.0), bits(0.0)),
        (FpOp::Max, 0x7FF0_0000_0000_0001, 0xFFF8_0000_0000_0002),
    ]
}

// ══════════════════════════════════════════════════════════
// 1. Host reference
// ══════════════════════════════════════════════════════════

#[test]
fn test_host_reference_agrees_on_mixed_workload() {
    init_tracing();
    let checked = CheckedUnit::new(&FpuConfig::default()).unwrap();
    let mut driver = Driver::new(checked);

    let results = driver.run_all(&mixed_workload()).unwrap();
    assert_eq!(results.len(), mixed_workload().len());

    let checked = driver.into_inner();
    assert_eq!(checked.checked(), mixed_workload().len() as u64);
    assert!(checked.mismatches().is_empty());
    assert!(checked.verify().is_ok());
}

#[test]
fn test_host_reference_values() {
    let r = HostReference;
    assert_eq!(r.compute(FpOp::Add, Binary64::from(1.0), Binary64::from(2.0)), bits(3.0));
    assert_eq!(
        r.compute(FpOp::Add, Binary64(0x7FF8_0000_DEAD_0000), Binary64::from(2.0)),
        CANONICAL_NAN
    );
    assert_eq!(r.compute(FpOp::Le, Binary64::from(-0.0), Binary64::from(0.0)), 1);
    assert_eq!(
        r.compute(FpOp::Min, Binary64::from(0.0), Binary64::from(-0.0)),
        bits(-0.0)
    );
    assert_eq!(
        r.compute(FpOp::Max, Binary64(CANONICAL_NAN), Binary64::from(-2.0)),
        bits(-2.0)
    );
}

#[test]
fn test_wrapper_preserves_outputs_and_timing() {
    let mut plain = TestBench::new();
    let mut checked = TestBench::with_unit(CheckedUnit::new(&FpuConfig::default()).unwrap());

    for (op, a, b) in mixed_workload() {
        let _ = plain.run(op, a, b);
        let _ = checked.run(op, a, b);
    }
    // Reset mid-flight and an ignored enable exercise the non-valid paths.
    let tail = [
        FpuInputs::issue(FpOp::Add, 1, 1),
        FpuInputs::issue(FpOp::Sub, 2, 2),
        FpuInputs::reset(),
    ];
    for inputs in tail {
        let _ = plain.step(inputs);
        let _ = checked.step(inputs);
    }

    assert_eq!(plain.trace, checked.trace);
    assert_eq!(checked.unit.unit().stats(), plain.unit.stats());
}

// ══════════════════════════════════════════════════════════
// 2. Mocked reference
// ══════════════════════════════════════════════════════════

#[test]
fn test_mismatch_is_recorded_without_changing_outputs() {
    init_tracing();
    let mut reference = MockReference::new();
    reference
        .expect_compute()
        .with(eq(FpOp::Add), eq(Binary64::from(1.0)), eq(Binary64::from(1.0)))
        .times(1)
        .returning(|_, _, _| 0xDEAD_BEEF);

    let unit = CheckedUnit::with_reference(DoubleAdd::default(), reference, ReferenceMode::Report);
    let mut driver = Driver::new(unit);

    let done = driver.run(FpOp::Add, bits(1.0), bits(1.0)).unwrap();
    assert_eq!(done.result, bits(2.0));
    assert_eq!(done.cycles, 5);

    let checked = driver.unit();
    assert_eq!(
        checked.mismatches(),
        &[ReferenceMismatch {
            op: FpOp::Add,
            a: Binary64::from(1.0),
            b: Binary64::from(1.0),
            pipeline: bits(2.0),
            reference: 0xDEAD_BEEF,
        }]
    );
    assert!(matches!(checked.verify(), Err(FpuError::ReferenceMismatch(m)) if m.reference == 0xDEAD_BEEF));
}

#[test]
fn test_reference_sees_raw_operands() {
    // Subtraction is checked against B as presented, not the inverted operand.
    let mut reference = MockReference::new();
    reference
        .expect_compute()
        .with(eq(FpOp::Sub), eq(Binary64::from(5.0)), eq(Binary64::from(3.0)))
        .times(1)
        .returning(|_, _, _| 2.0_f64.to_bits());

    let mut driver = Driver::new(CheckedUnit::with_reference(
        DoubleAdd::default(),
        reference,
        ReferenceMode::Report,
    ));
    let _ = driver.run(FpOp::Sub, bits(5.0), bits(3.0)).unwrap();
    assert!(driver.unit().verify().is_ok());
}

#[test]
fn test_reference_consulted_once_per_completion() {
    let mut reference = MockReference::new();
    reference
        .expect_compute()
        .times(3)
        .returning(|op, a, b| HostReference.compute(op, a, b));

    let mut bench = TestBench::with_unit(CheckedUnit::with_reference(
        DoubleAdd::default(),
        reference,
        ReferenceMode::Report,
    ));
    let _ = bench.run(FpOp::Add, bits(1.0), bits(2.0));
    let _ = bench.run(FpOp::Lt, bits(1.0), bits(2.0));
    // Cancelled operations are never checked.
    let _ = bench.issue(FpOp::Add, bits(4.0), bits(4.0));
    let _ = bench.step(FpuInputs::reset());
    let _ = bench.idle(6);
    let _ = bench.run(FpOp::Min, bits(1.0), bits(2.0));

    assert_eq!(bench.unit.checked(), 3);
}

#[test]
fn test_off_mode_never_calls_reference() {
    let mut reference = MockReference::new();
    reference.expect_compute().never();

    let mut driver = Driver::new(CheckedUnit::with_reference(
        DoubleAdd::default(),
        reference,
        ReferenceMode::Off,
    ));
    let done = driver.run(FpOp::Max, bits(1.0), bits(2.0)).unwrap();
    assert_eq!(done.result, bits(2.0));
    assert_eq!(driver.unit().checked(), 0);
}

#[test]
fn test_take_mismatches_drains() {
    let mut reference = MockReference::new();
    reference.expect_compute().returning(|_, _, _| 7);

    let mut driver = Driver::new(CheckedUnit::with_reference(
        DoubleAdd::default(),
        reference,
        ReferenceMode::Report,
    ));
    let _ = driver.run(FpOp::Eq, bits(1.0), bits(1.0)).unwrap();
    let _ = driver.run(FpOp::Eq, bits(1.0), bits(2.0)).unwrap();

    let drained = driver.unit_mut().take_mismatches();
    assert_eq!(drained.len(), 2);
    assert_eq!(drained[1].pipeline, 0);
    assert!(driver.unit().mismatches().is_empty());
    assert!(driver.unit().verify().is_ok());
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "reference mismatch")]
fn test_fatal_mode_panics_in_debug_builds() {
    let mut reference = MockReference::new();
    reference.expect_compute().returning(|_, _, _| 0);

    let mut driver = Driver::new(CheckedUnit::with_reference(
        DoubleAdd::default(),
        reference,
        ReferenceMode::Fatal,
    ));
    let _ = driver.run(FpOp::Add, bits(1.0), bits(1.0));
}
