//! Blocking driver tests.

use pretty_assertions::assert_eq;
use rvfpu_core::common::FpuError;
use rvfpu_core::config::FpuConfig;
use rvfpu_core::core::pipeline::{ClockedUnit, FpOp, FpuInputs};
use rvfpu_core::core::units::fpu::DoubleAdd;
use rvfpu_core::sim::{Completion, Driver};

use crate::common::harness::bits;

#[test]
fn test_run_reports_result_and_cycles() {
    let mut driver = Driver::new(DoubleAdd::default());

    assert_eq!(
        driver.run(FpOp::Add, bits(1.0), bits(1.0)).unwrap(),
        Completion {
            result: bits(2.0),
            exception: false,
            cycles: 5,
        }
    );
    assert_eq!(
        driver.run(FpOp::Eq, 0x7FF8_0000_0000_0000, bits(1.0)).unwrap(),
        Completion {
            result: 0,
            exception: true,
            cycles: 3,
        }
    );
}

#[test]
fn test_run_all_back_to_back() {
    let mut driver = Driver::new(DoubleAdd::default());
    let results = driver
        .run_all(&[
            (FpOp::Add, bits(1.0), bits(2.0)),
            (FpOp::Sub, bits(1.0), bits(2.0)),
            (FpOp::Lt, bits(1.0), bits(2.0)),
            (FpOp::Min, bits(1.0), bits(2.0)),
        ])
        .unwrap();

    let values: Vec<u64> = results.iter().map(|c| c.result).collect();
    assert_eq!(values, vec![bits(3.0), bits(-1.0), 1, bits(1.0)]);
    assert_eq!(driver.unit().stats().completed(), 4);
    assert_eq!(driver.unit().stats().cycles, 5 + 5 + 3 + 3);
}

#[test]
fn test_run_while_busy_is_refused() {
    let mut driver = Driver::new(DoubleAdd::default());
    let _ = driver
        .unit_mut()
        .step(&FpuInputs::issue(FpOp::Add, bits(1.0), bits(1.0)));

    assert!(matches!(
        driver.run(FpOp::Sub, bits(1.0), bits(1.0)),
        Err(FpuError::Busy)
    ));
    // The in-flight operation is untouched.
    assert!(driver.unit().is_busy());
}

#[test]
fn test_timeout_below_latency() {
    let config = FpuConfig::from_json(r#"{ "latency": { "add_sub": 12 } }"#).unwrap();
    let mut driver = Driver::new(DoubleAdd::new(&config).unwrap()).with_max_cycles(6);

    assert!(matches!(
        driver.run(FpOp::Add, bits(1.0), bits(1.0)),
        Err(FpuError::Timeout { cycles: 6 })
    ));

    let mut unit = driver.into_inner();
    unit.reset();
    assert!(!unit.is_busy());
    assert_eq!(unit.stats().cancelled, 1);
}
