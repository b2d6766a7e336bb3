// Synthesis parameters - bucket and sample resolution

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::sequencer::SequenceError;

/// Smallest accepted bucket or sample step, in beats
pub const MIN_STEP: f64 = 1e-6;

/// Largest number of buckets or samples one grid may hold
pub const MAX_GRID_POINTS: usize = 50_000_000;

/// Tolerance (in steps) for floating-point noise at grid boundaries
pub const BOUNDARY_EPSILON: f64 = 1e-9;

/// Reject steps that are not finite or below `MIN_STEP` (zero, negative, subnormal)
pub fn check_step(name: &str, value: f64) -> Result<(), SequenceError> {
    if !value.is_finite() || value < MIN_STEP {
        return Err(SequenceError::InvalidConfig(format!(
            "{name} must be a finite number >= {MIN_STEP}, got {value}"
        )));
    }
    Ok(())
}

/// Number of grid points `origin + i * step` lying strictly before `origin + length`
///
/// Shares the `ceil(x - BOUNDARY_EPSILON)` rounding with `time_to_index` and the bucketer.
pub fn grid_len(length: f64, step: f64) -> Result<usize, SequenceError> {
    check_step("step", step)?;

    let points = (length / step - BOUNDARY_EPSILON).ceil().max(0.0);
    if !points.is_finite() || points > MAX_GRID_POINTS as f64 {
        return Err(SequenceError::InvalidConfig(format!(
            "{length} beats at step {step} needs {points} points, more than {MAX_GRID_POINTS}"
        )));
    }
    Ok(points as usize)
}

/// Resolution settings shared by the bucketer and the synthesizer
///
/// Can be loaded from JSON; missing fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Bucket width in beats (eighth notes in a 4-beat bar)
    pub bucket_step: f64,
    /// Distance between two output samples in beats
    pub sample_step: f64,
}

impl SynthesisConfig {
    pub const DEFAULT_BUCKET_STEP: f64 = 0.5;
    pub const DEFAULT_SAMPLE_STEP: f64 = 0.001;

    pub fn new(bucket_step: f64, sample_step: f64) -> Result<Self, SequenceError> {
        let config = Self {
            bucket_step,
            sample_step,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check both steps are usable
    pub fn validate(&self) -> Result<(), SequenceError> {
        check_step("bucket_step", self.bucket_step)?;
        check_step("sample_step", self.sample_step)?;

        if self.sample_step > self.bucket_step {
            return Err(SequenceError::InvalidConfig(format!(
                "sample_step ({}) must not exceed bucket_step ({})",
                self.sample_step, self.bucket_step
            )));
        }

        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, SequenceError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SequenceError::InvalidConfig(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: &Path) -> Result<Self, SequenceError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SequenceError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            bucket_step: Self::DEFAULT_BUCKET_STEP,
            sample_step: Self::DEFAULT_SAMPLE_STEP,
        }
    }
}
