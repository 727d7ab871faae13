//! Configuration for the floating-point unit.
//!
//! This module defines the configuration structures used to parameterize a
//! unit instance. It provides:
//! 1. **Defaults:** Baseline latencies and reference-check mode.
//! 2. **Structures:** Latency, reference-check, and tracing settings.
//! 3. **Validation:** Latency bounds derived from the datapath stage counts and
//!    the width of the busy countdown register.
//!
//! Configuration is supplied as JSON by the host simulator, or use `FpuConfig::default()`.

use std::path::Path;

use serde::Deserialize;

use crate::common::error::FpuError;
use crate::common::field::U4;
use crate::core::pipeline::signals::OpClass;
use crate::core::units::fpu::{adder, compare};

/// Default configuration constants for the unit.
mod defaults {
    use crate::core::units::fpu::{adder, compare};

    /// Busy cycles for add/sub: align, add, normalize, round.
    pub const ADD_SUB_LATENCY: u8 = adder::STAGES;

    /// Busy cycles for comparisons and min/max: order, select.
    pub const COMPARE_LATENCY: u8 = compare::STAGES;
}

/// Root configuration for one unit instance.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FpuConfig {
    /// Per-class busy latencies.
    pub latency: LatencyConfig,
    /// Reference checker settings.
    pub reference: ReferenceConfig,
    /// Emit a `tracing` snapshot of the unit's registers on every edge.
    pub trace: bool,
}

impl FpuConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// [`FpuError::ConfigParse`] for malformed JSON and
    /// [`FpuError::InvalidLatency`] for out-of-range latencies.
    pub fn from_json(text: &str) -> Result<Self, FpuError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`FpuError::ConfigIo`] if the file cannot be read, plus everything
    /// [`Self::from_json`] can return.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FpuError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks every setting against the datapath's limits.
    ///
    /// # Errors
    ///
    /// [`FpuError::InvalidLatency`] for the first out-of-range latency.
    pub fn validate(&self) -> Result<(), FpuError> {
        let _ = self.latency.cycles(OpClass::AddSub)?;
        let _ = self.latency.cycles(OpClass::Compare)?;
        Ok(())
    }
}

/// Busy latency per operation class, in cycles.
///
/// A latency counts the cycles `busy` is high. It must cover the class's
/// datapath stages and fit in the 4-bit countdown register; cycles beyond
/// the stage count hold the finished result.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LatencyConfig {
    /// Addition and subtraction.
    pub add_sub: u8,
    /// Comparisons and min/max.
    pub compare: u8,
}

impl LatencyConfig {
    /// Smallest legal latency for a class (its datapath stage count).
    pub const fn min_cycles(class: OpClass) -> u8 {
        match class {
            OpClass::AddSub => adder::STAGES,
            OpClass::Compare => compare::STAGES,
        }
    }

    /// Validated latency for `class` as a countdown register value.
    ///
    /// # Errors
    ///
    /// [`FpuError::InvalidLatency`] if the value is below the stage count or
    /// does not fit the counter.
    pub fn cycles(&self, class: OpClass) -> Result<U4, FpuError> {
        let value = match class {
            OpClass::AddSub => self.add_sub,
            OpClass::Compare => self.compare,
        };
        let min = Self::min_cycles(class);
        match U4::new(value) {
            Some(c) if value >= min => Ok(c),
            _ => Err(FpuError::InvalidLatency {
                class,
                value,
                min,
                max: U4::MAX.get(),
            }),
        }
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            add_sub: defaults::ADD_SUB_LATENCY,
            compare: defaults::COMPARE_LATENCY,
        }
    }
}

/// How the reference checker reacts to a disagreement.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceMode {
    /// Do not run the reference model.
    Off,
    /// Record and log mismatches.
    #[default]
    Report,
    /// Record and log, then panic in debug builds. Release builds fall back to `Report`.
    Fatal,
}

/// Reference checker settings.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Reaction to a mismatch.
    pub mode: ReferenceMode,
}
