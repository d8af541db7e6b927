// ABOUTME: Typed configuration for every analyzer, replacing dictionary-driven parameters
// ABOUTME: Each config is validated once at detector construction, never re-parsed per call
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

fn require_unit(value: f64, name: &str) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) || !value.is_finite() {
        return Err(ConfigError::InvalidThreshold(format!(
            "{name} must be within [0, 1], got {value}"
        )));
    }
    Ok(())
}

fn require_positive(value: f64, name: &str) -> Result<(), ConfigError> {
    if value <= 0.0 || !value.is_finite() {
        return Err(ConfigError::InvalidThreshold(format!(
            "{name} must be > 0, got {value}"
        )));
    }
    Ok(())
}

/// Rolling-window plateau detection parameters.
///
/// The numeric defaults are carried over from the production tuning and
/// should be treated as tunable, not load-bearing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateauDetectionConfig {
    /// Number of trailing samples analyzed
    pub window_size: usize,
    /// Per-step fractional strength change below which progress counts as stalled
    pub significance_threshold: f64,
    /// How many of the most recent changes must individually be stalled
    pub minimum_plateau_duration: usize,
    /// Upper bound on change variance for a stall to count as a plateau
    pub strength_variance_threshold: f64,
    /// Recent volume tolerance above this classifies a volume plateau
    pub high_volume_tolerance: f64,
    /// Recent volume tolerance below this classifies an intensity plateau
    pub low_volume_tolerance: f64,
}

impl Default for PlateauDetectionConfig {
    fn default() -> Self {
        Self {
            window_size: 6,
            significance_threshold: 0.01,
            minimum_plateau_duration: 3,
            strength_variance_threshold: 0.005,
            high_volume_tolerance: 0.8,
            low_volume_tolerance: 0.6,
        }
    }
}

impl PlateauDetectionConfig {
    /// Validate structural soundness.
    ///
    /// # Errors
    /// Returns `ConfigError` for zero windows or out-of-range thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size < 2 {
            return Err(ConfigError::InvalidWindow(format!(
                "window_size must be >= 2, got {}",
                self.window_size
            )));
        }
        if self.minimum_plateau_duration == 0
            || self.minimum_plateau_duration >= self.window_size
        {
            return Err(ConfigError::InvalidWindow(format!(
                "minimum_plateau_duration must be within [1, window_size), got {}",
                self.minimum_plateau_duration
            )));
        }
        require_positive(self.significance_threshold, "significance_threshold")?;
        require_positive(self.strength_variance_threshold, "strength_variance_threshold")?;
        require_unit(self.high_volume_tolerance, "high_volume_tolerance")?;
        require_unit(self.low_volume_tolerance, "low_volume_tolerance")?;
        if self.low_volume_tolerance >= self.high_volume_tolerance {
            return Err(ConfigError::ValidationFailed(
                "low_volume_tolerance must be < high_volume_tolerance".into(),
            ));
        }
        Ok(())
    }
}

/// Weight and trigger threshold for one overreaching indicator
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Contribution weight once triggered
    pub weight: f64,
    /// Direction-specific trigger threshold (declines negative, inflations positive)
    pub threshold: f64,
}

/// Overreaching risk analyzer parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverreachingConfig {
    /// Relative progression-rate decline indicator
    pub performance_decline: IndicatorConfig,
    /// Absolute RPE-accuracy drift rise indicator (RPE points)
    pub rpe_inflation: IndicatorConfig,
    /// Relative recovery-score decline indicator
    pub recovery_degradation: IndicatorConfig,
    /// Relative motivation decline indicator
    pub motivation_drop: IndicatorConfig,
    /// Samples in the recent comparison window
    pub recent_window: usize,
    /// Maximum samples in the baseline window
    pub baseline_window: usize,
    /// Risk above this is high urgency
    pub high_urgency_threshold: f64,
    /// Risk above this is medium urgency
    pub medium_urgency_threshold: f64,
}

impl Default for OverreachingConfig {
    fn default() -> Self {
        Self {
            performance_decline: IndicatorConfig {
                weight: 1.0,
                threshold: -0.05,
            },
            rpe_inflation: IndicatorConfig {
                weight: 0.25,
                threshold: 1.5,
            },
            recovery_degradation: IndicatorConfig {
                weight: 0.8,
                threshold: -0.15,
            },
            motivation_drop: IndicatorConfig {
                weight: 0.6,
                threshold: -0.20,
            },
            recent_window: 4,
            baseline_window: 4,
            high_urgency_threshold: 0.7,
            medium_urgency_threshold: 0.4,
        }
    }
}

impl OverreachingConfig {
    /// Validate structural soundness.
    ///
    /// # Errors
    /// Returns `ConfigError` for zero windows, non-positive weights, or
    /// inverted urgency thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recent_window == 0 || self.baseline_window == 0 {
            return Err(ConfigError::InvalidWindow(
                "recent_window and baseline_window must be >= 1".into(),
            ));
        }
        for (indicator, name) in [
            (self.performance_decline, "performance_decline"),
            (self.rpe_inflation, "rpe_inflation"),
            (self.recovery_degradation, "recovery_degradation"),
            (self.motivation_drop, "motivation_drop"),
        ] {
            if indicator.weight <= 0.0 || !indicator.weight.is_finite() {
                return Err(ConfigError::InvalidWeight(format!(
                    "{name} weight must be > 0, got {}",
                    indicator.weight
                )));
            }
            if !indicator.threshold.is_finite() {
                return Err(ConfigError::InvalidThreshold(format!(
                    "{name} threshold must be finite"
                )));
            }
        }
        require_unit(self.high_urgency_threshold, "high_urgency_threshold")?;
        require_unit(self.medium_urgency_threshold, "medium_urgency_threshold")?;
        if self.medium_urgency_threshold >= self.high_urgency_threshold {
            return Err(ConfigError::ValidationFailed(
                "medium_urgency_threshold must be < high_urgency_threshold".into(),
            ));
        }
        Ok(())
    }
}

/// Volume-response optimizer parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeOptimizerConfig {
    /// Minimum samples before any adjustment is proposed
    pub min_samples: usize,
    /// Gradient magnitudes below this count as neutral
    pub gradient_epsilon: f64,
    /// Upper bound on a single upward adjustment
    pub max_increase: f64,
    /// Upper bound (magnitude) on a single downward adjustment before fatigue
    pub max_decrease: f64,
    /// Extra reduction applied under accumulated fatigue
    pub fatigue_penalty: f64,
    /// Mean (1 - recovery) over the last 3 samples above this triggers the penalty
    pub fatigue_threshold: f64,
}

impl Default for VolumeOptimizerConfig {
    fn default() -> Self {
        Self {
            min_samples: 6,
            gradient_epsilon: 0.01,
            max_increase: 0.2,
            max_decrease: 0.2,
            fatigue_penalty: 0.15,
            fatigue_threshold: 0.4,
        }
    }
}

impl VolumeOptimizerConfig {
    /// Validate structural soundness.
    ///
    /// # Errors
    /// Returns `ConfigError` for unusable windows or non-positive bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_samples < 4 {
            return Err(ConfigError::InvalidWindow(format!(
                "min_samples must be >= 4 (gradient spans 3 steps), got {}",
                self.min_samples
            )));
        }
        require_positive(self.gradient_epsilon, "gradient_epsilon")?;
        require_positive(self.max_increase, "max_increase")?;
        require_positive(self.max_decrease, "max_decrease")?;
        require_positive(self.fatigue_penalty, "fatigue_penalty")?;
        require_unit(self.fatigue_threshold, "fatigue_threshold")?;
        Ok(())
    }
}

/// Per-exercise fatigue accumulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueConfig {
    /// Weekly fatigue accrued per movement-pattern exposure
    pub movement_pattern_fatigue: f64,
    /// Weekly joint-stress accumulation rate
    pub joint_stress_accumulation: f64,
    /// Weekly neural fatigue rate, scaled by exercise complexity
    pub neural_fatigue_factor: f64,
    /// Total fatigue above this flags a rotation candidate
    pub rotation_threshold: f64,
    /// Weeks of data required before an exercise is evaluated
    pub min_weeks: usize,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            movement_pattern_fatigue: 0.05,
            joint_stress_accumulation: 0.04,
            neural_fatigue_factor: 0.06,
            rotation_threshold: 0.8,
            min_weeks: 4,
        }
    }
}

impl FatigueConfig {
    /// Validate structural soundness.
    ///
    /// # Errors
    /// Returns `ConfigError` for non-positive rates or a zero evaluation window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive(self.movement_pattern_fatigue, "movement_pattern_fatigue")?;
        require_positive(self.joint_stress_accumulation, "joint_stress_accumulation")?;
        require_positive(self.neural_fatigue_factor, "neural_fatigue_factor")?;
        require_positive(self.rotation_threshold, "rotation_threshold")?;
        if self.min_weeks < 2 {
            return Err(ConfigError::InvalidWindow(format!(
                "min_weeks must be >= 2 for trend estimation, got {}",
                self.min_weeks
            )));
        }
        Ok(())
    }
}

/// Substitution search parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstitutionConfig {
    /// Weight of primary-muscle overlap in effectiveness retention
    pub muscle_overlap_weight: f64,
    /// Weight of strength/hypertrophy carry-over retention
    pub correlation_retention_weight: f64,
    /// Minimum effectiveness retention to keep a candidate
    pub min_effectiveness: f64,
    /// Minimum safety improvement to keep a candidate regardless of effectiveness
    pub min_safety_improvement: f64,
    /// Safety bonus per avoided contraindication matching the user's history
    pub contraindication_bonus: f64,
    /// Maximum substitutions returned
    pub max_results: usize,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self {
            muscle_overlap_weight: 0.6,
            correlation_retention_weight: 0.4,
            min_effectiveness: 0.6,
            min_safety_improvement: 0.2,
            contraindication_bonus: 0.25,
            max_results: 3,
        }
    }
}

impl SubstitutionConfig {
    /// Validate structural soundness.
    ///
    /// # Errors
    /// Returns `ConfigError` when scoring weights do not sum to 1 or the
    /// result cap is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_unit(self.muscle_overlap_weight, "muscle_overlap_weight")?;
        require_unit(self.correlation_retention_weight, "correlation_retention_weight")?;
        let weight_sum = self.muscle_overlap_weight + self.correlation_retention_weight;
        if (weight_sum - 1.0).abs() > 0.01 {
            return Err(ConfigError::ValidationFailed(format!(
                "effectiveness weights must sum to 1.0, got {weight_sum}"
            )));
        }
        require_unit(self.min_effectiveness, "min_effectiveness")?;
        require_unit(self.min_safety_improvement, "min_safety_improvement")?;
        require_positive(self.contraindication_bonus, "contraindication_bonus")?;
        if self.max_results == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_results must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

/// Injury-risk predictor parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjuryRiskConfig {
    /// Acute risk floor in the absence of any signal
    pub acute_baseline: f64,
    /// Planned/trailing-mean load ratio above which the spike term applies
    pub load_spike_threshold: f64,
    /// Weight of the load-spike excess
    pub load_spike_weight: f64,
    /// Weight of the (1 - recovery) fatigue term
    pub fatigue_weight: f64,
    /// Additive penalty per planned exercise contraindicated by the user's history
    pub contraindication_penalty: f64,
    /// Multiplier applied when the user has any injury history
    pub injury_history_multiplier: f64,
    /// Acute:chronic workload ratio above which overuse risk accrues
    pub acwr_threshold: f64,
    /// Weight of the ACWR excess
    pub acwr_weight: f64,
    /// Overuse risk floor when the ratio is benign
    pub overuse_floor: f64,
    /// Overall score above this is reported as high risk
    pub high_risk_threshold: f64,
    /// Trailing workouts used for the acute load baseline
    pub acute_history_window: usize,
    /// Weeks in the chronic (rolling mean) load window
    pub chronic_weeks: usize,
}

impl Default for InjuryRiskConfig {
    fn default() -> Self {
        Self {
            acute_baseline: 0.05,
            load_spike_threshold: 1.5,
            load_spike_weight: 0.3,
            fatigue_weight: 0.25,
            contraindication_penalty: 0.15,
            injury_history_multiplier: 1.3,
            acwr_threshold: 1.3,
            acwr_weight: 0.5,
            overuse_floor: 0.05,
            high_risk_threshold: 0.7,
            acute_history_window: 4,
            chronic_weeks: 4,
        }
    }
}

impl InjuryRiskConfig {
    /// Validate structural soundness.
    ///
    /// # Errors
    /// Returns `ConfigError` for out-of-range baselines, ratios below 1,
    /// or zero history windows.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_unit(self.acute_baseline, "acute_baseline")?;
        require_unit(self.high_risk_threshold, "high_risk_threshold")?;
        require_unit(self.overuse_floor, "overuse_floor")?;
        require_positive(self.load_spike_weight, "load_spike_weight")?;
        require_positive(self.fatigue_weight, "fatigue_weight")?;
        require_positive(self.contraindication_penalty, "contraindication_penalty")?;
        require_positive(self.acwr_weight, "acwr_weight")?;
        if self.load_spike_threshold < 1.0 || self.acwr_threshold < 1.0 {
            return Err(ConfigError::InvalidThreshold(
                "load ratio thresholds must be >= 1.0".into(),
            ));
        }
        if self.injury_history_multiplier < 1.0 {
            return Err(ConfigError::InvalidThreshold(
                "injury_history_multiplier must be >= 1.0".into(),
            ));
        }
        if self.acute_history_window == 0 || self.chronic_weeks == 0 {
            return Err(ConfigError::InvalidWindow(
                "history windows must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

/// Composer-level thresholds and the full per-detector config set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Plateau detector parameters
    pub plateau: PlateauDetectionConfig,
    /// Overreaching analyzer parameters
    pub overreaching: OverreachingConfig,
    /// Volume optimizer parameters
    pub volume: VolumeOptimizerConfig,
    /// Fatigue analyzer parameters
    pub fatigue: FatigueConfig,
    /// Substitution advisor parameters
    pub substitution: SubstitutionConfig,
    /// Injury-risk predictor parameters
    pub injury: InjuryRiskConfig,
    /// Composer trigger thresholds
    pub triggers: TriggerConfig,
}

/// Thresholds at which the composer turns detector output into recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Overreaching risk above this emits a deload
    pub overreaching_risk: f64,
    /// Absolute volume adjustment above this emits a volume recommendation
    pub volume_adjustment: f64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            overreaching_risk: 0.6,
            volume_adjustment: 0.1,
        }
    }
}

impl EngineConfig {
    /// Validate every nested detector config.
    ///
    /// # Errors
    /// Returns the first `ConfigError` encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.plateau.validate()?;
        self.overreaching.validate()?;
        self.volume.validate()?;
        self.fatigue.validate()?;
        self.substitution.validate()?;
        self.injury.validate()?;
        require_unit(self.triggers.overreaching_risk, "triggers.overreaching_risk")?;
        require_positive(self.triggers.volume_adjustment, "triggers.volume_adjustment")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_window_rejected() {
        let config = PlateauDetectionConfig {
            window_size: 0,
            ..PlateauDetectionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWindow(_))
        ));
    }

    #[test]
    fn substitution_weights_must_sum_to_one() {
        let config = SubstitutionConfig {
            muscle_overlap_weight: 0.9,
            correlation_retention_weight: 0.4,
            ..SubstitutionConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
