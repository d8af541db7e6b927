// ABOUTME: Core data model for the adaptive training decision engine
// ABOUTME: Performance samples, user training context, program state, and planned workouts
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::catalog::{Equipment, InjuryTag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// One performance observation per user per period (typically weekly).
///
/// Histories are append-only and chronologically ordered; the engine
/// only ever reads suffixes and windows, never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSample {
    /// When the sample was recorded
    pub recorded_at: DateTime<Utc>,
    /// Relative strength index per exercise id
    pub strength_index: HashMap<String, f64>,
    /// How well the user absorbed the period's volume (0-1)
    pub volume_tolerance: f64,
    /// Composite recovery quality for the period (0-1)
    pub recovery_score: f64,
    /// Self-reported motivation (0-1)
    pub motivation_level: f64,
    /// Fraction of prescribed sessions completed (0-1)
    pub adherence_rate: f64,
    /// Drift between reported and estimated RPE; positive means effort
    /// is being reported as easier than it measures
    pub rpe_accuracy_drift: f64,
    /// Fractional strength gain for the period (e.g. 0.01 = 1%/week)
    pub progression_rate: f64,
}

impl PerformanceSample {
    /// Mean strength index across all tracked exercises.
    ///
    /// Returns `None` for a sample with no strength entries so callers
    /// can skip it rather than treat it as zero strength.
    #[must_use]
    pub fn mean_strength_index(&self) -> Option<f64> {
        if self.strength_index.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = self.strength_index.len() as f64;
        Some(self.strength_index.values().sum::<f64>() / n)
    }

    /// True when every scalar field is finite and the unit-interval
    /// fields are inside [0, 1]
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let unit_fields = [
            self.volume_tolerance,
            self.recovery_score,
            self.motivation_level,
            self.adherence_rate,
        ];
        unit_fields
            .iter()
            .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
            && self.rpe_accuracy_drift.is_finite()
            && self.progression_rate.is_finite()
            && self.strength_index.values().all(|v| v.is_finite())
    }
}

/// Sort a sample history ascending by timestamp.
///
/// Detectors assume chronological order; the engine applies this
/// defensively since host APIs typically return newest-first.
pub fn sort_history(samples: &mut [PerformanceSample]) {
    samples.sort_by_key(|s| s.recorded_at);
}

/// Training experience tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    /// Under ~1 year of structured training
    Beginner,
    /// 1-3 years, established technique
    Intermediate,
    /// 3+ years, slow progression
    Advanced,
    /// Competitive strength athlete
    Elite,
}

/// Primary training goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainingGoal {
    /// Maximal strength
    Strength,
    /// Muscle growth
    Hypertrophy,
    /// Muscular endurance
    Endurance,
    /// Explosive power
    Power,
    /// General fitness and health
    GeneralFitness,
}

/// Lifestyle recovery inputs supplied by the host profile service
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RecoveryMetrics {
    /// Sleep quality (0-1)
    pub sleep_quality: f64,
    /// Life stress level (0-1, higher is worse)
    pub stress_level: f64,
}

impl Default for RecoveryMetrics {
    fn default() -> Self {
        Self {
            sleep_quality: 0.7,
            stress_level: 0.3,
        }
    }
}

/// Everything the engine needs to know about a user for one analysis call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTrainingContext {
    /// User identifier
    pub user_id: Uuid,
    /// Training experience tier
    pub experience: ExperienceLevel,
    /// Primary training goals
    pub goals: HashSet<TrainingGoal>,
    /// Equipment the user can actually access
    pub available_equipment: HashSet<Equipment>,
    /// Prior injuries, matched against catalog contraindications
    pub injury_history: HashSet<InjuryTag>,
    /// Sleep and stress context
    pub recovery_metrics: RecoveryMetrics,
}

/// One week of observed data for a single exercise
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExerciseWeekRecord {
    /// Relative strength index for the week
    pub strength: f64,
    /// Mean session RPE for the week
    pub avg_rpe: f64,
    /// Total volume for the week (sets x reps x load, normalized)
    pub volume: f64,
}

/// One exercise slot in a planned workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedExercise {
    /// Catalog exercise id
    pub exercise_id: String,
    /// Planned volume (normalized set-rep units)
    pub volume: f64,
    /// Planned intensity as fraction of estimated max (0-1)
    pub intensity: f64,
}

impl PlannedExercise {
    /// Training load contribution of this slot (volume x intensity)
    #[must_use]
    pub fn load(&self) -> f64 {
        self.volume * self.intensity
    }
}

/// A planned workout the injury-risk predictor evaluates before execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedWorkout {
    /// Exercises in planned order
    pub exercises: Vec<PlannedExercise>,
}

impl PlannedWorkout {
    /// Total planned training load
    #[must_use]
    pub fn total_load(&self) -> f64 {
        self.exercises.iter().map(PlannedExercise::load).sum()
    }
}

/// Macro-cycle stage governing volume/intensity emphasis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodizationPhase {
    /// Volume emphasis, building work capacity
    Accumulation,
    /// Intensity emphasis, reduced volume
    Intensification,
    /// Peak expression of accumulated fitness
    Realization,
    /// Planned recovery block
    Recovery,
    /// Long-term skill and base development
    Development,
}

/// Snapshot of the user's current program supplied by the host.
///
/// Carries exactly what the per-exercise detectors need; the engine
/// never reaches back to the host mid-analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentProgram {
    /// Weeks this program has been running
    pub weeks_running: u32,
    /// Current periodization phase
    pub phase: PeriodizationPhase,
    /// Weekly history per exercise id, oldest week first
    pub exercise_history: HashMap<String, Vec<ExerciseWeekRecord>>,
    /// Total training load per week, oldest first
    pub weekly_loads: Vec<f64>,
    /// The next planned workout, if one is scheduled
    pub next_workout: Option<PlannedWorkout>,
}
