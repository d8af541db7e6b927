// ABOUTME: Injury-risk prediction combining acute load spikes, overuse ratios, and joint loading
// ABOUTME: Produces clamped sub-scores, an overall score, and explainable risk factors
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::cast_precision_loss)] // Safe: window counts are small

use crate::catalog::{ExerciseCatalog, Joint, MovementPattern};
use crate::config::InjuryRiskConfig;
use crate::errors::ConfigError;
use crate::models::{PerformanceSample, PlannedWorkout, UserTrainingContext};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Recovery score assumed when no recent samples exist
const DEFAULT_RECOVERY: f64 = 0.7;

/// Recovery below this is itself reported as a risk factor
const LOW_RECOVERY_FLOOR: f64 = 0.5;

/// Extra knee loading attributed to squat-pattern volume
const SQUAT_KNEE_LOADING: f64 = 0.1;

/// Per-joint bonus when the user's history already names that joint
const HISTORY_JOINT_BONUS: f64 = 0.2;

/// Joint risk above which a mitigation is suggested
const JOINT_MITIGATION_THRESHOLD: f64 = 0.5;

/// Blend weights for the overall score
const ACUTE_SHARE: f64 = 0.5;
const OVERUSE_SHARE: f64 = 0.3;
const JOINT_SHARE: f64 = 0.2;

/// Injury-risk assessment for one planned workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjuryRiskProfile {
    /// Short-term risk from the planned session (0-1)
    pub acute_risk: f64,
    /// Overuse risk from the acute:chronic workload ratio (0-1)
    pub overuse_risk: f64,
    /// Per-joint risk scores (0-1)
    pub joint_risks: HashMap<Joint, f64>,
    /// Bounded combination of the sub-scores (0-1)
    pub overall_risk: f64,
    /// Whether any headline score crossed the high-risk threshold
    pub high_risk: bool,
    /// Explainable factors behind the scores, most significant first
    pub primary_risk_factors: Vec<String>,
    /// Actionable load-management suggestions
    pub mitigations: Vec<String>,
}

impl InjuryRiskProfile {
    fn baseline(config: &InjuryRiskConfig) -> Self {
        Self {
            acute_risk: config.acute_baseline,
            overuse_risk: config.overuse_floor,
            joint_risks: HashMap::new(),
            overall_risk: config.acute_baseline,
            high_risk: false,
            primary_risk_factors: Vec::new(),
            mitigations: Vec::new(),
        }
    }
}

/// Predicts injury risk for a planned workout against recent training history
#[derive(Debug, Clone)]
pub struct InjuryRiskPredictor {
    catalog: Arc<ExerciseCatalog>,
    config: InjuryRiskConfig,
}

impl InjuryRiskPredictor {
    /// Build a predictor over a shared catalog.
    ///
    /// # Errors
    /// Returns `ConfigError` when the configuration is structurally invalid.
    pub fn new(
        catalog: Arc<ExerciseCatalog>,
        config: InjuryRiskConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    /// Predictor over `catalog` with default configuration
    #[must_use]
    pub fn with_catalog(catalog: Arc<ExerciseCatalog>) -> Self {
        Self {
            catalog,
            config: InjuryRiskConfig::default(),
        }
    }

    /// Score a planned workout.
    ///
    /// `recent_samples` supplies the recovery signal and `weekly_loads`
    /// the trailing load series (oldest first). Absent history yields the
    /// baseline low-risk profile rather than an error.
    #[must_use]
    pub fn predict(
        &self,
        context: &UserTrainingContext,
        planned: &PlannedWorkout,
        recent_samples: &[PerformanceSample],
        weekly_loads: &[f64],
    ) -> InjuryRiskProfile {
        if weekly_loads.is_empty() && recent_samples.is_empty() {
            debug!("injury risk prediction with no history, returning baseline");
            return InjuryRiskProfile::baseline(&self.config);
        }

        let mut factors = Vec::new();
        let acute_risk = self.acute_risk(context, planned, recent_samples, weekly_loads, &mut factors);
        let overuse_risk = self.overuse_risk(weekly_loads, &mut factors);
        let joint_risks = self.joint_risks(context, planned);

        let max_joint = joint_risks.values().copied().fold(0.0_f64, f64::max);
        let overall_risk = OVERUSE_SHARE
            .mul_add(
                overuse_risk,
                ACUTE_SHARE.mul_add(acute_risk, JOINT_SHARE * max_joint),
            )
            .clamp(0.0, 1.0);

        let high_risk = acute_risk > self.config.high_risk_threshold
            || overall_risk > self.config.high_risk_threshold;

        let mitigations = build_mitigations(high_risk, &joint_risks);

        debug!(
            acute_risk,
            overuse_risk, overall_risk, high_risk, "injury risk prediction complete"
        );

        InjuryRiskProfile {
            acute_risk,
            overuse_risk,
            joint_risks,
            overall_risk,
            high_risk,
            primary_risk_factors: factors,
            mitigations,
        }
    }

    fn acute_risk(
        &self,
        context: &UserTrainingContext,
        planned: &PlannedWorkout,
        recent_samples: &[PerformanceSample],
        weekly_loads: &[f64],
        factors: &mut Vec<String>,
    ) -> f64 {
        let mut risk = self.config.acute_baseline;

        let window_start = weekly_loads
            .len()
            .saturating_sub(self.config.acute_history_window);
        let trailing = &weekly_loads[window_start..];
        if !trailing.is_empty() {
            let mean_load = trailing.iter().sum::<f64>() / trailing.len() as f64;
            if mean_load > 0.0 {
                let spike = planned.total_load() / mean_load;
                if spike > self.config.load_spike_threshold {
                    risk += (spike - 1.0) * self.config.load_spike_weight;
                    factors.push(format!(
                        "Planned load is {spike:.1}x the trailing {}-week average",
                        trailing.len()
                    ));
                }
            }
        }

        let recovery = recent_samples
            .last()
            .map_or(DEFAULT_RECOVERY, |s| s.recovery_score);
        risk += (1.0 - recovery) * self.config.fatigue_weight;
        if recovery < LOW_RECOVERY_FLOOR {
            factors.push(format!("Recovery score is low ({recovery:.2})"));
        }

        for exercise in &planned.exercises {
            let Some(profile) = self.catalog.get(&exercise.exercise_id) else {
                continue;
            };
            let conflicting: Vec<_> = profile
                .contraindications
                .intersection(&context.injury_history)
                .collect();
            if !conflicting.is_empty() {
                risk += self.config.contraindication_penalty;
                for tag in conflicting {
                    factors.push(format!(
                        "{} is contraindicated by prior {tag:?}",
                        profile.name
                    ));
                }
            }
        }

        if !context.injury_history.is_empty() {
            risk *= self.config.injury_history_multiplier;
        }

        risk.clamp(0.0, 1.0)
    }

    fn overuse_risk(&self, weekly_loads: &[f64], factors: &mut Vec<String>) -> f64 {
        if weekly_loads.len() < 2 {
            return self.config.overuse_floor;
        }
        let chronic_start = weekly_loads.len().saturating_sub(self.config.chronic_weeks);
        let chronic_window = &weekly_loads[chronic_start..];
        let chronic = chronic_window.iter().sum::<f64>() / chronic_window.len() as f64;
        let Some(&latest) = weekly_loads.last() else {
            return self.config.overuse_floor;
        };
        if chronic <= 0.0 {
            return self.config.overuse_floor;
        }

        let ratio = latest / chronic;
        if ratio > self.config.acwr_threshold {
            factors.push(format!(
                "Acute:chronic workload ratio is elevated ({ratio:.2})"
            ));
            ((ratio - 1.0) * self.config.acwr_weight).clamp(0.0, 1.0)
        } else {
            self.config.overuse_floor
        }
    }

    fn joint_risks(
        &self,
        context: &UserTrainingContext,
        planned: &PlannedWorkout,
    ) -> HashMap<Joint, f64> {
        let total_load = planned.total_load();
        let mut risks: HashMap<Joint, f64> = HashMap::new();

        for exercise in &planned.exercises {
            let Some(profile) = self.catalog.get(&exercise.exercise_id) else {
                continue;
            };
            let share = if total_load > 0.0 {
                exercise.load() / total_load
            } else {
                0.0
            };
            for (joint, stress) in &profile.joint_stress {
                *risks.entry(*joint).or_insert(0.0) += stress * share;
            }
            // Squat-pattern volume loads the knee beyond its listed stress
            if profile.movement_pattern == MovementPattern::Squat {
                *risks.entry(Joint::Knee).or_insert(0.0) += SQUAT_KNEE_LOADING * share;
            }
        }

        for tag in &context.injury_history {
            *risks.entry(tag.affected_joint()).or_insert(0.0) += HISTORY_JOINT_BONUS;
        }

        // Lifestyle factors: stress amplifies joint risk, sleep protects
        let lifestyle = 0.2_f64.mul_add(
            context.recovery_metrics.stress_level,
            0.1_f64.mul_add(-context.recovery_metrics.sleep_quality, 1.0),
        );
        for score in risks.values_mut() {
            *score = (*score * lifestyle).clamp(0.0, 1.0);
        }
        risks
    }

}

fn build_mitigations(high_risk: bool, joint_risks: &HashMap<Joint, f64>) -> Vec<String> {
    let mut mitigations = Vec::new();
    if high_risk {
        mitigations
            .push("Reduce planned session load toward the trailing weekly average".to_owned());
    }
    let mut elevated: Vec<_> = joint_risks
        .iter()
        .filter(|(_, score)| **score > JOINT_MITIGATION_THRESHOLD)
        .collect();
    elevated.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));
    for (joint, _) in elevated {
        mitigations.push(format!(
            "Swap or lighten exercises loading the {joint:?} this week"
        ));
    }
    mitigations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlannedExercise;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn context() -> UserTrainingContext {
        UserTrainingContext {
            user_id: Uuid::new_v4(),
            experience: crate::models::ExperienceLevel::Intermediate,
            goals: HashSet::new(),
            available_equipment: HashSet::new(),
            injury_history: HashSet::new(),
            recovery_metrics: crate::models::RecoveryMetrics::default(),
        }
    }

    #[test]
    fn empty_history_returns_baseline() {
        let predictor = InjuryRiskPredictor::new(
            Arc::new(ExerciseCatalog::builtin()),
            InjuryRiskConfig::default(),
        )
        .unwrap();
        let planned = PlannedWorkout {
            exercises: vec![PlannedExercise {
                exercise_id: "back_squat".to_owned(),
                volume: 10.0,
                intensity: 0.8,
            }],
        };
        let profile = predictor.predict(&context(), &planned, &[], &[]);
        assert!(!profile.high_risk);
        assert!((profile.acute_risk - 0.05).abs() < 1e-9);
    }
}
