// ABOUTME: Short-term overreaching risk scoring from four weighted decline indicators
// ABOUTME: Compares a recent sample window against a trailing baseline with explainable deltas
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::cast_precision_loss)] // Safe: sample counts are small

use crate::config::{IndicatorConfig, OverreachingConfig};
use crate::errors::ConfigError;
use crate::models::PerformanceSample;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How quickly the host should act on an assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationUrgency {
    /// No meaningful risk signal
    Low,
    /// Monitor closely, consider load reduction
    Medium,
    /// Intervene this training week
    High,
}

/// The four tracked overreaching indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverreachingIndicator {
    /// Progression rate falling versus baseline
    PerformanceDecline,
    /// Reported effort drifting easier than measured effort
    RpeInflation,
    /// Recovery scores degrading versus baseline
    RecoveryDegradation,
    /// Motivation falling versus baseline
    MotivationDrop,
}

/// One indicator's raw delta and its contribution to the risk total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorReading {
    /// Which indicator this reading describes
    pub indicator: OverreachingIndicator,
    /// Recent-vs-baseline delta (relative for rates, absolute RPE points for drift)
    pub delta: f64,
    /// Direction-specific trigger threshold from config
    pub threshold: f64,
    /// Whether the delta crossed the threshold
    pub triggered: bool,
    /// `|delta| * weight` when triggered, 0 otherwise
    pub contribution: f64,
}

/// Result of one overreaching assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverreachingAssessment {
    /// Overall risk in [0, 1]
    pub risk_score: f64,
    /// Urgency tier derived from the risk score
    pub urgency: RecommendationUrgency,
    /// Per-indicator readings, including untriggered ones, for explainability
    pub indicators: Vec<IndicatorReading>,
    /// Samples in the recent window
    pub recent_samples: usize,
    /// Samples in the baseline window
    pub baseline_samples: usize,
    /// True when history was too short to compare windows
    pub insufficient_data: bool,
}

impl OverreachingAssessment {
    const fn insufficient() -> Self {
        Self {
            risk_score: 0.0,
            urgency: RecommendationUrgency::Low,
            indicators: Vec::new(),
            recent_samples: 0,
            baseline_samples: 0,
            insufficient_data: true,
        }
    }
}

/// Scores short-term overtraining risk from recent-vs-baseline declines
#[derive(Debug, Clone)]
pub struct OverreachingRiskAnalyzer {
    config: OverreachingConfig,
}

impl Default for OverreachingRiskAnalyzer {
    fn default() -> Self {
        Self {
            config: OverreachingConfig::default(),
        }
    }
}

impl OverreachingRiskAnalyzer {
    /// Build an analyzer from validated configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` when the configuration is structurally invalid.
    pub fn new(config: OverreachingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Assess overreaching risk over a chronologically ordered history.
    ///
    /// Returns a zero-risk assessment with an empty factor list when the
    /// history cannot form both comparison windows.
    #[must_use]
    pub fn assess(&self, history: &[PerformanceSample]) -> OverreachingAssessment {
        let recent_window = self.config.recent_window;
        if history.len() <= recent_window {
            debug!(
                samples = history.len(),
                recent_window, "overreaching assessment skipped, no baseline available"
            );
            return OverreachingAssessment::insufficient();
        }

        let split = history.len() - recent_window;
        let recent = &history[split..];
        // Baseline shrinks with sparse older data but always has >= 1 sample
        let baseline_start = split.saturating_sub(self.config.baseline_window);
        let baseline = &history[baseline_start..split];

        let readings = vec![
            Self::reading(
                OverreachingIndicator::PerformanceDecline,
                self.config.performance_decline,
                relative_delta(
                    mean(recent, |s| s.progression_rate),
                    mean(baseline, |s| s.progression_rate),
                ),
            ),
            Self::reading(
                OverreachingIndicator::RpeInflation,
                self.config.rpe_inflation,
                mean(recent, |s| s.rpe_accuracy_drift) - mean(baseline, |s| s.rpe_accuracy_drift),
            ),
            Self::reading(
                OverreachingIndicator::RecoveryDegradation,
                self.config.recovery_degradation,
                relative_delta(
                    mean(recent, |s| s.recovery_score),
                    mean(baseline, |s| s.recovery_score),
                ),
            ),
            Self::reading(
                OverreachingIndicator::MotivationDrop,
                self.config.motivation_drop,
                relative_delta(
                    mean(recent, |s| s.motivation_level),
                    mean(baseline, |s| s.motivation_level),
                ),
            ),
        ];

        let risk_score = readings
            .iter()
            .map(|r| r.contribution)
            .sum::<f64>()
            .min(1.0);

        let urgency = if risk_score > self.config.high_urgency_threshold {
            RecommendationUrgency::High
        } else if risk_score > self.config.medium_urgency_threshold {
            RecommendationUrgency::Medium
        } else {
            RecommendationUrgency::Low
        };

        debug!(
            risk_score,
            ?urgency,
            triggered = readings.iter().filter(|r| r.triggered).count(),
            "overreaching assessment complete"
        );

        OverreachingAssessment {
            risk_score,
            urgency,
            indicators: readings,
            recent_samples: recent.len(),
            baseline_samples: baseline.len(),
            insufficient_data: false,
        }
    }

    fn reading(
        indicator: OverreachingIndicator,
        config: IndicatorConfig,
        delta: f64,
    ) -> IndicatorReading {
        // Declines trigger below negative thresholds, inflations above positive ones
        let triggered = if config.threshold < 0.0 {
            delta < config.threshold
        } else {
            delta > config.threshold
        };
        let contribution = if triggered {
            delta.abs() * config.weight
        } else {
            0.0
        };
        IndicatorReading {
            indicator,
            delta,
            threshold: config.threshold,
            triggered,
            contribution,
        }
    }
}

fn mean(samples: &[PerformanceSample], field: impl Fn(&PerformanceSample) -> f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(field).sum::<f64>() / samples.len() as f64
}

/// Relative change with a near-zero-baseline guard
fn relative_delta(recent: f64, baseline: f64) -> f64 {
    if baseline.abs() < f64::EPSILON {
        return 0.0;
    }
    (recent - baseline) / baseline.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_delta_guards_zero_baseline() {
        assert!(relative_delta(0.5, 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_threshold_triggers_on_decline() {
        let reading = OverreachingRiskAnalyzer::reading(
            OverreachingIndicator::RecoveryDegradation,
            IndicatorConfig {
                weight: 0.8,
                threshold: -0.15,
            },
            -0.25,
        );
        assert!(reading.triggered);
        assert!((reading.contribution - 0.2).abs() < 1e-9);
    }
}
