//! Debug snapshot tests.

use pretty_assertions::assert_eq;
use rvfpu_core::config::FpuConfig;
use rvfpu_core::core::pipeline::{FpOp, FpuInputs};
use rvfpu_core::core::units::fpu::{DoubleAdd, UnitState};
use serde_json::json;

use crate::common::harness::{TestBench, bits};

#[test]
fn test_adder_stage_progression() {
    let mut bench = TestBench::new();
    bench.issue(FpOp::Add, bits(1.5), bits(2.25));

    let mut stages = vec![bench.unit.snapshot().stage];
    while bench.unit.state() != UnitState::Complete {
        bench.step(FpuInputs::idle());
        stages.push(bench.unit.snapshot().stage);
    }
    assert_eq!(
        stages,
        vec![
            Some("unpacked"),
            Some("aligned"),
            Some("summed"),
            Some("normalized"),
            Some("done"),
        ]
    );

    bench.step(FpuInputs::idle());
    assert_eq!(bench.unit.snapshot().stage, None);
}

#[test]
fn test_compare_stage_progression() {
    let mut bench = TestBench::new();
    bench.issue(FpOp::Max, bits(1.0), bits(2.0));
    let first = bench.unit.snapshot();
    bench.step(FpuInputs::idle());
    let second = bench.unit.snapshot();
    bench.step(FpuInputs::idle());
    let last = bench.unit.snapshot();

    assert_eq!(first.stage, Some("unpacked"));
    assert_eq!(second.stage, Some("ordered"));
    assert_eq!(last.stage, Some("done"));
    assert_eq!(last.state, UnitState::Complete);
    assert_eq!(last.result, bits(2.0));
}

#[test]
fn test_snapshot_does_not_disturb_unit() {
    let mut observed = TestBench::new();
    let mut plain = TestBench::new();

    for (op, a, b) in [(FpOp::Add, bits(0.1), bits(0.2)), (FpOp::Le, bits(3.0), bits(3.0))] {
        observed.issue(op, a, b);
        plain.issue(op, a, b);
        for _ in 0..5 {
            let _ = observed.unit.snapshot();
            observed.step(FpuInputs::idle());
            plain.step(FpuInputs::idle());
        }
    }
    assert_eq!(observed.trace, plain.trace);
}

#[test]
fn test_snapshot_serializes_to_json() {
    let unit = DoubleAdd::default();
    let idle = serde_json::to_value(unit.snapshot()).unwrap();
    assert_eq!(
        idle,
        json!({ "state": "idle", "latch": null, "stage": null, "result": 0, "cause": 0 })
    );

    let mut bench = TestBench::with_unit(unit);
    bench.issue(FpOp::Sub, bits(2.0), bits(0.5));
    let busy = serde_json::to_value(bench.unit.snapshot()).unwrap();
    assert_eq!(
        busy,
        json!({
            "state": { "busy": 4 },
            "latch": { "op": "sub", "a": bits(2.0), "b": bits(0.5) },
            "stage": "unpacked",
            "result": 0,
            "cause": 0,
        })
    );
}

#[test]
fn test_trace_flag_still_computes() {
    // With tracing enabled every edge logs a snapshot; results are unchanged.
    let config = FpuConfig::from_json(r#"{ "trace": true }"#).unwrap();
    let mut bench = TestBench::with_config(&config);
    let (out, _) = bench.run(FpOp::Add, bits(2.0), bits(2.0));
    assert_eq!(out.result, bits(4.0));
}
