// ABOUTME: Constrained substitution search within a movement pattern
// ABOUTME: Scores candidates on effectiveness retention and safety improvement under equipment limits
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::cast_precision_loss)] // Safe: tag counts are small

use crate::catalog::{ExerciseCatalog, ExerciseProfile};
use crate::config::SubstitutionConfig;
use crate::errors::ConfigError;
use crate::injury_risk::InjuryRiskProfile;
use crate::models::UserTrainingContext;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Injury-profile risk above which less-safe candidates are filtered out
const RISK_GUARD_THRESHOLD: f64 = 0.5;

/// One recommended substitute for an exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Substitution {
    /// Catalog id of the substitute
    pub exercise_id: String,
    /// Display name of the substitute
    pub name: String,
    /// How much training effect the substitute retains (0-1)
    pub effectiveness_retention: f64,
    /// Joint-risk reduction versus the original, may be negative
    pub safety_improvement: f64,
    /// Human-readable explanation of why this substitute fits
    pub reason: String,
}

/// Finds safe, equipment-compatible alternatives within a movement pattern
#[derive(Debug, Clone)]
pub struct SubstitutionAdvisor {
    catalog: Arc<ExerciseCatalog>,
    config: SubstitutionConfig,
}

impl SubstitutionAdvisor {
    /// Build an advisor over a shared catalog.
    ///
    /// # Errors
    /// Returns `ConfigError` when the configuration is structurally invalid.
    pub fn new(
        catalog: Arc<ExerciseCatalog>,
        config: SubstitutionConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    /// Advisor over `catalog` with default configuration
    #[must_use]
    pub fn with_catalog(catalog: Arc<ExerciseCatalog>) -> Self {
        Self {
            catalog,
            config: SubstitutionConfig::default(),
        }
    }

    /// Find up to `max_results` substitutes for `exercise_id`.
    ///
    /// Unknown ids return an empty list; custom user-entered exercises
    /// are expected and are not an error. Candidates requiring equipment
    /// the user lacks are never returned, and neither is the original.
    #[must_use]
    pub fn find_substitutions(
        &self,
        exercise_id: &str,
        context: &UserTrainingContext,
        injury_profile: Option<&InjuryRiskProfile>,
    ) -> Vec<Substitution> {
        let Some(original) = self.catalog.get(exercise_id) else {
            debug!(exercise_id, "substitution lookup for unknown exercise");
            return Vec::new();
        };

        let mut scored: Vec<(f64, Substitution)> = self
            .catalog
            .by_pattern(original.movement_pattern, exercise_id)
            .into_iter()
            .filter(|candidate| {
                candidate
                    .required_equipment
                    .is_subset(&context.available_equipment)
            })
            .filter_map(|candidate| self.score_candidate(original, candidate, context, injury_profile))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        debug!(
            exercise_id,
            candidates = scored.len(),
            "substitution search complete"
        );

        scored
            .into_iter()
            .take(self.config.max_results)
            .map(|(_, substitution)| substitution)
            .collect()
    }

    fn score_candidate(
        &self,
        original: &ExerciseProfile,
        candidate: &ExerciseProfile,
        context: &UserTrainingContext,
        injury_profile: Option<&InjuryRiskProfile>,
    ) -> Option<(f64, Substitution)> {
        let overlap = original.primary_muscle_overlap(candidate);
        let retention = correlation_retention(original, candidate);
        let effectiveness = self
            .config
            .muscle_overlap_weight
            .mul_add(overlap, self.config.correlation_retention_weight * retention);

        // Contraindications the substitute avoids for this user's history
        let avoided: Vec<_> = context
            .injury_history
            .iter()
            .copied()
            .filter(|tag| {
                original.contraindications.contains(tag)
                    && !candidate.contraindications.contains(tag)
            })
            .collect();

        let safety = original.mean_joint_stress() - candidate.mean_joint_stress()
            + self.config.contraindication_bonus * avoided.len() as f64;

        // Under elevated injury risk, never trade safety away
        if injury_profile.is_some_and(|p| p.overall_risk >= RISK_GUARD_THRESHOLD) && safety < 0.0 {
            return None;
        }

        if effectiveness <= self.config.min_effectiveness
            && safety <= self.config.min_safety_improvement
        {
            return None;
        }

        let reason = build_reason(original, candidate, !avoided.is_empty());

        Some((
            effectiveness + safety,
            Substitution {
                exercise_id: candidate.id.clone(),
                name: candidate.name.clone(),
                effectiveness_retention: effectiveness.clamp(0.0, 1.0),
                safety_improvement: safety,
                reason,
            },
        ))
    }
}

/// Mean relative retention of strength and hypertrophy carry-over, capped at 1
fn correlation_retention(original: &ExerciseProfile, candidate: &ExerciseProfile) -> f64 {
    let strength = ratio_capped(candidate.strength_correlation, original.strength_correlation);
    let hypertrophy = ratio_capped(
        candidate.hypertrophy_correlation,
        original.hypertrophy_correlation,
    );
    (strength + hypertrophy) / 2.0
}

fn ratio_capped(numerator: f64, denominator: f64) -> f64 {
    if denominator <= f64::EPSILON {
        return 1.0;
    }
    (numerator / denominator).min(1.0)
}

fn build_reason(
    original: &ExerciseProfile,
    candidate: &ExerciseProfile,
    avoids_contraindication: bool,
) -> String {
    let mut clauses = Vec::new();
    if avoids_contraindication {
        clauses.push("avoids a movement contraindicated by your injury history".to_owned());
    }
    if candidate.difficulty < original.difficulty {
        clauses.push("lower technical difficulty".to_owned());
    } else if candidate.difficulty > original.difficulty {
        clauses.push("greater technical challenge".to_owned());
    }
    if candidate.required_equipment.len() < original.required_equipment.len() {
        clauses.push("needs less equipment".to_owned());
    }
    if candidate.recovery_demand < original.recovery_demand {
        clauses.push("lower recovery demand".to_owned());
    }
    if clauses.is_empty() {
        format!("Same movement pattern as {}", original.name)
    } else {
        format!(
            "Same movement pattern as {}: {}",
            original.name,
            clauses.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retention_caps_at_one() {
        let catalog = ExerciseCatalog::builtin();
        let squat = catalog.get("back_squat").unwrap();
        let goblet = catalog.get("goblet_squat").unwrap();
        // Goblet retains less carry-over than the back squat offers
        assert!(correlation_retention(squat, goblet) < 1.0);
        // Reverse direction cannot exceed full retention
        assert!((correlation_retention(goblet, squat) - 1.0).abs() < f64::EPSILON);
    }
}
