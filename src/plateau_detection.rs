// ABOUTME: Plateau detection via rolling-window trend and variance analysis of strength indices
// ABOUTME: Classifies stalls as volume, intensity, or general plateaus with graded confidence
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::cast_precision_loss)] // Safe: sample counts are small

use crate::config::PlateauDetectionConfig;
use crate::errors::ConfigError;
use crate::models::PerformanceSample;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a detected plateau should be broken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlateauType {
    /// High volume tolerance: the user absorbs work but stopped adapting to it
    Volume,
    /// Low volume tolerance: current loading exceeds what the user recovers from
    Intensity,
    /// Neither signal dominates
    General,
}

/// Result of one plateau analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateauAnalysis {
    /// Whether a plateau was detected
    pub detected: bool,
    /// Classification, present only when detected
    pub plateau_type: Option<PlateauType>,
    /// Mean per-step fractional strength change across the window
    pub avg_change: f64,
    /// Variance of the per-step change series
    pub change_variance: f64,
    /// Mean volume tolerance across the analyzed window
    pub recent_volume_tolerance: f64,
    /// Samples actually analyzed
    pub samples_used: usize,
    /// Detection confidence (0-1), grows with window coverage
    pub confidence: f64,
    /// True when the history was too short to analyze
    pub insufficient_data: bool,
}

impl PlateauAnalysis {
    fn insufficient(samples_available: usize, window_size: usize) -> Self {
        Self {
            detected: false,
            plateau_type: None,
            avg_change: 0.0,
            change_variance: 0.0,
            recent_volume_tolerance: 0.0,
            samples_used: samples_available,
            confidence: (samples_available as f64 / window_size as f64).min(1.0),
            insufficient_data: true,
        }
    }
}

/// Detects stalled strength progression over a trailing sample window.
///
/// Pure function of its inputs; holds only validated configuration.
#[derive(Debug, Clone)]
pub struct PlateauDetector {
    config: PlateauDetectionConfig,
}

impl Default for PlateauDetector {
    fn default() -> Self {
        Self {
            config: PlateauDetectionConfig::default(),
        }
    }
}

impl PlateauDetector {
    /// Build a detector from validated configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` when the configuration is structurally invalid.
    pub fn new(config: PlateauDetectionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Analyze a chronologically ordered history for a strength plateau.
    ///
    /// Histories shorter than the configured window return an
    /// insufficient-data result rather than an error.
    #[must_use]
    pub fn detect(&self, history: &[PerformanceSample]) -> PlateauAnalysis {
        let window_size = self.config.window_size;
        if history.len() < window_size {
            debug!(
                samples = history.len(),
                window = window_size,
                "plateau analysis skipped, history shorter than window"
            );
            return PlateauAnalysis::insufficient(history.len(), window_size);
        }

        let window = &history[history.len() - window_size..];
        let strengths: Vec<f64> = window
            .iter()
            .filter_map(PerformanceSample::mean_strength_index)
            .collect();

        let changes = fractional_changes(&strengths);
        if changes.len() < self.config.minimum_plateau_duration {
            return PlateauAnalysis::insufficient(history.len(), window_size);
        }

        let avg_change = changes.iter().sum::<f64>() / changes.len() as f64;
        let change_variance = variance(&changes, avg_change);

        let recent_stalled = changes
            .iter()
            .rev()
            .take(self.config.minimum_plateau_duration)
            .all(|c| *c < self.config.significance_threshold);

        let detected = avg_change < self.config.significance_threshold
            && change_variance < self.config.strength_variance_threshold
            && recent_stalled;

        let recent_volume_tolerance =
            window.iter().map(|s| s.volume_tolerance).sum::<f64>() / window.len() as f64;

        let plateau_type = detected.then(|| {
            if recent_volume_tolerance > self.config.high_volume_tolerance {
                PlateauType::Volume
            } else if recent_volume_tolerance < self.config.low_volume_tolerance {
                PlateauType::Intensity
            } else {
                PlateauType::General
            }
        });

        let confidence = (window.len() as f64 / window_size as f64).min(1.0);

        debug!(
            detected,
            avg_change,
            change_variance,
            volume_tolerance = recent_volume_tolerance,
            "plateau analysis complete"
        );

        PlateauAnalysis {
            detected,
            plateau_type,
            avg_change,
            change_variance,
            recent_volume_tolerance,
            samples_used: window.len(),
            confidence,
            insufficient_data: false,
        }
    }
}

/// Per-step fractional changes of a value series, skipping non-positive bases
fn fractional_changes(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .filter_map(|pair| {
            if pair[0] > 0.0 {
                Some((pair[1] - pair[0]) / pair[0])
            } else {
                None
            }
        })
        .collect()
}

fn variance(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}
