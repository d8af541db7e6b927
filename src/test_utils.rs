// ABOUTME: Deterministic seeded builders for sample histories and training contexts
// ABOUTME: Centralizes test data creation; no wall-clock time and no unseeded randomness
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::catalog::Equipment;
use crate::models::{
    CurrentProgram, ExerciseWeekRecord, ExperienceLevel, PerformanceSample, PeriodizationPhase,
    RecoveryMetrics, TrainingGoal, UserTrainingContext,
};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use uuid::Uuid;

/// Fixed anchor so fixtures never depend on wall-clock time
fn epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + Duration::days(20_000)
}

/// Timestamp of fixture week `n`
#[must_use]
pub fn week(n: u32) -> DateTime<Utc> {
    epoch() + Duration::weeks(i64::from(n))
}

/// A healthy baseline sample with the given mean strength index
#[must_use]
pub fn sample_at(recorded_at: DateTime<Utc>, strength: f64) -> PerformanceSample {
    let mut strength_index = HashMap::new();
    strength_index.insert("back_squat".to_owned(), strength);
    strength_index.insert("bench_press".to_owned(), strength);
    PerformanceSample {
        recorded_at,
        strength_index,
        volume_tolerance: 0.7,
        recovery_score: 0.8,
        motivation_level: 0.8,
        adherence_rate: 0.9,
        rpe_accuracy_drift: 0.0,
        progression_rate: 0.01,
    }
}

/// History of `weeks` samples gaining `weekly_gain` strength per week
#[must_use]
pub fn steady_progress_history(weeks: u32, weekly_gain: f64) -> Vec<PerformanceSample> {
    (0..weeks)
        .map(|w| {
            let strength = (1.0 + weekly_gain).powi(w as i32);
            let mut sample = sample_at(week(w), strength);
            sample.progression_rate = weekly_gain;
            sample
        })
        .collect()
}

/// Twelve weeks of ~1%/week progress stalling to ~0.2%/week from week 9,
/// with volume tolerance climbing above 0.8 as the stall sets in
#[must_use]
pub fn stalling_history() -> Vec<PerformanceSample> {
    let mut strength = 1.0;
    (0..12)
        .map(|w| {
            let gain = if w < 9 { 0.01 } else { 0.002 };
            if w > 0 {
                strength *= 1.0 + gain;
            }
            let mut sample = sample_at(week(w), strength);
            sample.progression_rate = gain;
            sample.volume_tolerance = if w >= 7 { 0.85 } else { 0.7 };
            sample
        })
        .collect()
}

/// Eight weeks where the last four collapse versus the first four:
/// progression down 10%, RPE drift up 2.0, recovery down 25%, motivation down 35%
#[must_use]
pub fn overreached_history() -> Vec<PerformanceSample> {
    (0..8)
        .map(|w| {
            let mut sample = sample_at(week(w), 1.012_f64.powi(w as i32));
            if w < 4 {
                sample.progression_rate = 0.010;
                sample.rpe_accuracy_drift = 0.2;
                sample.recovery_score = 0.80;
                sample.motivation_level = 0.80;
            } else {
                sample.progression_rate = 0.009;
                sample.rpe_accuracy_drift = 2.2;
                sample.recovery_score = 0.60;
                sample.motivation_level = 0.52;
            }
            sample
        })
        .collect()
}

/// Seeded history builder adding bounded jitter to a steady trend.
///
/// Same seed, same history; fixtures stay reproducible across runs.
#[derive(Debug)]
pub struct SeededHistoryBuilder {
    rng: ChaCha8Rng,
    weeks: u32,
    weekly_gain: f64,
    jitter: f64,
}

impl SeededHistoryBuilder {
    /// Builder with the given seed and trend
    #[must_use]
    pub fn new(seed: u64, weeks: u32, weekly_gain: f64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            weeks,
            weekly_gain,
            jitter: 0.005,
        }
    }

    /// Override the jitter magnitude
    #[must_use]
    pub const fn jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    /// Produce the history
    #[must_use]
    pub fn build(mut self) -> Vec<PerformanceSample> {
        let mut strength = 1.0;
        (0..self.weeks)
            .map(|w| {
                let noise = self.rng.gen_range(-self.jitter..=self.jitter);
                let gain = self.weekly_gain + noise;
                if w > 0 {
                    strength *= 1.0 + gain;
                }
                let mut sample = sample_at(week(w), strength);
                sample.progression_rate = gain;
                sample.volume_tolerance =
                    (0.7_f64 + self.rng.gen_range(-0.15..=0.15)).clamp(0.0, 1.0);
                sample.recovery_score = (0.8_f64 + self.rng.gen_range(-0.3..=0.3)).clamp(0.0, 1.0);
                sample.motivation_level =
                    (0.8_f64 + self.rng.gen_range(-0.2..=0.2)).clamp(0.0, 1.0);
                sample
            })
            .collect()
    }
}

/// Intermediate lifter with a full barbell gym and no injury history
#[must_use]
pub fn default_context() -> UserTrainingContext {
    UserTrainingContext {
        user_id: Uuid::new_v4(),
        experience: ExperienceLevel::Intermediate,
        goals: [TrainingGoal::Strength, TrainingGoal::Hypertrophy].into(),
        available_equipment: [
            Equipment::Barbell,
            Equipment::Dumbbells,
            Equipment::SquatRack,
            Equipment::Bench,
            Equipment::PullUpBar,
            Equipment::CableStack,
        ]
        .into(),
        injury_history: std::collections::HashSet::new(),
        recovery_metrics: RecoveryMetrics::default(),
    }
}

/// Minimal program snapshot with steady weekly loads and no planned workout
#[must_use]
pub fn default_program() -> CurrentProgram {
    CurrentProgram {
        weeks_running: 8,
        phase: PeriodizationPhase::Accumulation,
        exercise_history: HashMap::new(),
        weekly_loads: vec![100.0; 8],
        next_workout: None,
    }
}

/// `weeks` uniform records for one exercise at the given RPE
#[must_use]
pub fn uniform_exercise_weeks(weeks: usize, strength: f64, avg_rpe: f64) -> Vec<ExerciseWeekRecord> {
    vec![
        ExerciseWeekRecord {
            strength,
            avg_rpe,
            volume: 10.0,
        };
        weeks
    ]
}
