use mockall::mock;
use rvfpu_core::common::Binary64;
use rvfpu_core::core::pipeline::FpOp;
use rvfpu_core::core::units::fpu::ReferenceModel;

mock! {
    pub Reference {}

    impl ReferenceModel for Reference {
        fn compute(&self, op: FpOp, a: Binary64, b: Binary64) -> u64;
    }
}
