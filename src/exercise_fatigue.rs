// ABOUTME: Per-exercise fatigue accumulation scoring and rotation-candidate ranking
// ABOUTME: Scores movement, joint, and neural fatigue in parallel across tracked exercises
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::cast_precision_loss)] // Safe: week counts are small

use crate::catalog::ExerciseCatalog;
use crate::config::FatigueConfig;
use crate::errors::ConfigError;
use crate::models::ExerciseWeekRecord;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Addend when strength declined beyond the trend floor across the window
const DECLINING_STRENGTH_ADDEND: f64 = 0.2;

/// Fractional strength change below which the decline addend applies
const STRENGTH_DECLINE_FLOOR: f64 = -0.02;

/// Addend when average RPE rose beyond the drift ceiling across the window
const RISING_RPE_ADDEND: f64 = 0.15;

/// RPE-point rise above which the drift addend applies
const RPE_RISE_CEILING: f64 = 1.0;

/// Complexity assumed for exercises absent from the catalog
const FALLBACK_COMPLEXITY: f64 = 5.0;

/// Accumulated fatigue breakdown for one exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseFatigueScore {
    /// Catalog exercise id
    pub exercise_id: String,
    /// Weeks of history behind this score
    pub weeks_tracked: usize,
    /// Movement-pattern exposure component
    pub movement_fatigue: f64,
    /// Joint-stress accumulation component
    pub joint_stress: f64,
    /// Neural fatigue component, scaled by technical complexity
    pub neural_fatigue: f64,
    /// Fractional strength change across the window
    pub strength_trend: f64,
    /// RPE-point change across the window
    pub rpe_trend: f64,
    /// Total accumulated fatigue
    pub total: f64,
    /// Whether the total crossed the rotation threshold
    pub rotation_candidate: bool,
}

/// Ranked fatigue scores for one analysis call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FatigueAnalysis {
    /// Scores for every evaluated exercise, descending by total
    pub scores: Vec<ExerciseFatigueScore>,
}

impl FatigueAnalysis {
    /// Exercises flagged for rotation, in ranking order
    #[must_use]
    pub fn rotation_candidates(&self) -> Vec<&ExerciseFatigueScore> {
        self.scores.iter().filter(|s| s.rotation_candidate).collect()
    }
}

/// Accumulates per-exercise fatigue and flags rotation candidates.
///
/// Scoring is pure per exercise, so the evaluation fans out across the
/// tracked exercises with rayon.
#[derive(Debug, Clone)]
pub struct ExerciseFatigueAnalyzer {
    catalog: Arc<ExerciseCatalog>,
    config: FatigueConfig,
}

impl ExerciseFatigueAnalyzer {
    /// Build an analyzer over a shared catalog.
    ///
    /// # Errors
    /// Returns `ConfigError` when the configuration is structurally invalid.
    pub fn new(catalog: Arc<ExerciseCatalog>, config: FatigueConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    /// Analyzer over `catalog` with default configuration
    #[must_use]
    pub fn with_catalog(catalog: Arc<ExerciseCatalog>) -> Self {
        Self {
            catalog,
            config: FatigueConfig::default(),
        }
    }

    /// Score every tracked exercise and rank rotation candidates.
    ///
    /// Exercises with fewer than `min_weeks` weeks of data are silently
    /// skipped, not flagged and not errored.
    #[must_use]
    pub fn analyze(
        &self,
        exercise_history: &HashMap<String, Vec<ExerciseWeekRecord>>,
    ) -> FatigueAnalysis {
        let mut scores: Vec<ExerciseFatigueScore> = exercise_history
            .par_iter()
            .filter(|(_, weeks)| weeks.len() >= self.config.min_weeks)
            .map(|(exercise_id, weeks)| self.score_exercise(exercise_id, weeks))
            .collect();

        scores.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));

        debug!(
            evaluated = scores.len(),
            candidates = scores.iter().filter(|s| s.rotation_candidate).count(),
            "exercise fatigue analysis complete"
        );

        FatigueAnalysis { scores }
    }

    fn score_exercise(
        &self,
        exercise_id: &str,
        weeks: &[ExerciseWeekRecord],
    ) -> ExerciseFatigueScore {
        let week_count = weeks.len() as f64;
        let complexity = self.catalog.get(exercise_id).map_or_else(
            || {
                debug!(exercise_id, "exercise not in catalog, using fallback complexity");
                FALLBACK_COMPLEXITY
            },
            |p| p.technical_complexity,
        );

        let movement_fatigue = week_count * self.config.movement_pattern_fatigue;
        let joint_stress = week_count * self.config.joint_stress_accumulation;
        let neural_fatigue = week_count * self.config.neural_fatigue_factor * (complexity / 10.0);

        let strength_trend = fractional_trend(weeks.iter().map(|w| w.strength));
        let rpe_trend = absolute_trend(weeks.iter().map(|w| w.avg_rpe));

        let mut total = movement_fatigue + joint_stress + neural_fatigue;
        if strength_trend < STRENGTH_DECLINE_FLOOR {
            total += DECLINING_STRENGTH_ADDEND;
        }
        if rpe_trend > RPE_RISE_CEILING {
            total += RISING_RPE_ADDEND;
        }

        ExerciseFatigueScore {
            exercise_id: exercise_id.to_owned(),
            weeks_tracked: weeks.len(),
            movement_fatigue,
            joint_stress,
            neural_fatigue,
            strength_trend,
            rpe_trend,
            total,
            rotation_candidate: total > self.config.rotation_threshold,
        }
    }
}

/// First-to-last fractional change of a series, guarding a non-positive start
fn fractional_trend(values: impl Iterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.collect();
    match (values.first(), values.last()) {
        (Some(&first), Some(&last)) if first > 0.0 => (last - first) / first,
        _ => 0.0,
    }
}

/// First-to-last absolute change of a series
fn absolute_trend(values: impl Iterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.collect();
    match (values.first(), values.last()) {
        (Some(&first), Some(&last)) => last - first,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_trend_guards_zero_start() {
        assert!(fractional_trend([0.0, 1.0].into_iter()).abs() < f64::EPSILON);
        assert!((fractional_trend([1.0, 0.98].into_iter()) + 0.02).abs() < 1e-9);
    }

    #[test]
    fn short_histories_are_skipped() {
        let analyzer = ExerciseFatigueAnalyzer::new(
            Arc::new(ExerciseCatalog::builtin()),
            FatigueConfig::default(),
        )
        .unwrap();
        let mut history = HashMap::new();
        history.insert(
            "back_squat".to_owned(),
            vec![ExerciseWeekRecord {
                strength: 1.0,
                avg_rpe: 7.0,
                volume: 10.0,
            }],
        );
        assert!(analyzer.analyze(&history).scores.is_empty());
    }
}
