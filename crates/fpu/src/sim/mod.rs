//! Simulation helpers.
//!
//! The unit itself never advances time; these helpers stand in for the host
//! scheduler when a caller wants one operation at a time.

/// Blocking issue-and-wait driver.
pub mod driver;

pub use driver::{Completion, Driver};
