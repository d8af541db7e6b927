// ABOUTME: Volume-response optimization from the discrete progression-vs-volume gradient
// ABOUTME: Maps gradient sign and magnitude to a bounded load adjustment with a fatigue penalty
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::cast_precision_loss)] // Safe: sample counts are small

use crate::config::VolumeOptimizerConfig;
use crate::errors::ConfigError;
use crate::models::PerformanceSample;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Samples used for the trailing fatigue check
const FATIGUE_LOOKBACK: usize = 3;

/// Steps between the gradient's two sample points
const GRADIENT_SPAN: usize = 3;

/// Samples at which adjustment confidence saturates
const CONFIDENCE_SATURATION: f64 = 10.0;

/// Result of one volume optimization pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeRecommendation {
    /// Proposed fractional load adjustment, always within [-0.35, 0.2]
    pub adjustment: f64,
    /// Observed progression-per-volume gradient
    pub gradient: f64,
    /// Whether the fatigue penalty reduced the adjustment
    pub fatigue_limited: bool,
    /// Confidence in the recommendation (0-1)
    pub confidence: f64,
    /// True when history was too short to estimate a gradient
    pub insufficient_data: bool,
}

impl VolumeRecommendation {
    const fn insufficient() -> Self {
        Self {
            adjustment: 0.0,
            gradient: 0.0,
            fatigue_limited: false,
            confidence: 0.0,
            insufficient_data: true,
        }
    }
}

/// Estimates volume-vs-progression sensitivity and proposes a bounded adjustment
#[derive(Debug, Clone)]
pub struct VolumeResponseOptimizer {
    config: VolumeOptimizerConfig,
}

impl Default for VolumeResponseOptimizer {
    fn default() -> Self {
        Self {
            config: VolumeOptimizerConfig::default(),
        }
    }
}

impl VolumeResponseOptimizer {
    /// Build an optimizer from validated configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` when the configuration is structurally invalid.
    pub fn new(config: VolumeOptimizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Propose a load adjustment from a chronologically ordered history.
    ///
    /// Returns a zero adjustment with zero confidence when fewer than
    /// `min_samples` samples exist.
    #[must_use]
    pub fn optimize(&self, history: &[PerformanceSample]) -> VolumeRecommendation {
        if history.len() < self.config.min_samples {
            debug!(
                samples = history.len(),
                required = self.config.min_samples,
                "volume optimization skipped, insufficient history"
            );
            return VolumeRecommendation::insufficient();
        }

        let latest = &history[history.len() - 1];
        let earlier = &history[history.len() - 1 - GRADIENT_SPAN];

        let delta_volume = latest.volume_tolerance - earlier.volume_tolerance;
        let delta_progression = latest.progression_rate - earlier.progression_rate;

        // Flat volume between the two points carries no slope information
        let gradient = if delta_volume.abs() < f64::EPSILON {
            0.0
        } else {
            delta_progression / delta_volume
        };

        let base_adjustment = if gradient > self.config.gradient_epsilon {
            (0.1 * gradient).min(self.config.max_increase)
        } else if gradient < -self.config.gradient_epsilon {
            -(0.1 * gradient.abs()).min(self.config.max_decrease)
        } else {
            0.0
        };

        let recent = &history[history.len() - FATIGUE_LOOKBACK..];
        let mean_fatigue = recent
            .iter()
            .map(|s| 1.0 - s.recovery_score)
            .sum::<f64>()
            / recent.len() as f64;
        let fatigue_limited = mean_fatigue > self.config.fatigue_threshold;

        let adjustment = if fatigue_limited {
            base_adjustment - self.config.fatigue_penalty
        } else {
            base_adjustment
        };

        let confidence = (history.len() as f64 / CONFIDENCE_SATURATION).min(1.0);

        debug!(
            gradient,
            adjustment, fatigue_limited, confidence, "volume optimization complete"
        );

        VolumeRecommendation {
            adjustment,
            gradient,
            fatigue_limited,
            confidence,
            insufficient_data: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_at, week};

    #[test]
    fn flat_volume_yields_neutral_gradient() {
        let optimizer = VolumeResponseOptimizer::default();
        let history: Vec<_> = (0..6)
            .map(|w| {
                let mut s = sample_at(week(w), 1.0);
                s.volume_tolerance = 0.7;
                s.progression_rate = 0.01;
                s
            })
            .collect();
        let result = optimizer.optimize(&history);
        assert!(result.gradient.abs() < f64::EPSILON);
        assert!(result.adjustment.abs() < f64::EPSILON);
    }
}
