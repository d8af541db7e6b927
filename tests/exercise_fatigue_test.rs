// ABOUTME: Integration tests for per-exercise fatigue accumulation and rotation flagging
// ABOUTME: Covers the minimum-week skip, trend addends, and candidate ranking
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use atlas_intelligence::test_utils::uniform_exercise_weeks;
use atlas_intelligence::{
    ExerciseCatalog, ExerciseFatigueAnalyzer, ExerciseWeekRecord, FatigueConfig,
};
use std::collections::HashMap;
use std::sync::Arc;

fn analyzer() -> ExerciseFatigueAnalyzer {
    ExerciseFatigueAnalyzer::new(
        Arc::new(ExerciseCatalog::builtin()),
        FatigueConfig::default(),
    )
    .unwrap()
}

#[test]
fn exercises_under_four_weeks_are_silently_skipped() {
    let analyzer = analyzer();
    let mut history = HashMap::new();
    history.insert("back_squat".to_owned(), uniform_exercise_weeks(3, 1.0, 7.0));
    history.insert("bench_press".to_owned(), uniform_exercise_weeks(2, 1.0, 7.0));

    let analysis = analyzer.analyze(&history);
    assert!(analysis.scores.is_empty());
    assert!(analysis.rotation_candidates().is_empty());
}

#[test]
fn long_running_complex_exercise_becomes_rotation_candidate() {
    let analyzer = analyzer();
    let mut history = HashMap::new();
    // Eight weeks of a high-complexity lift accumulates past the threshold
    history.insert("back_squat".to_owned(), uniform_exercise_weeks(8, 1.0, 7.0));
    // A low-complexity isolation lift at the same duration does not
    history.insert(
        "dumbbell_curl".to_owned(),
        uniform_exercise_weeks(8, 1.0, 7.0),
    );

    let analysis = analyzer.analyze(&history);
    let candidates = analysis.rotation_candidates();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].exercise_id, "back_squat");
}

#[test]
fn declining_strength_and_rising_rpe_add_fatigue() {
    let analyzer = analyzer();

    let declining: Vec<ExerciseWeekRecord> = (0..8)
        .map(|w| ExerciseWeekRecord {
            strength: 1.0 - 0.01 * f64::from(w),
            avg_rpe: 7.0 + 0.2 * f64::from(w),
            volume: 10.0,
        })
        .collect();

    let mut flat_history = HashMap::new();
    flat_history.insert(
        "dumbbell_curl".to_owned(),
        uniform_exercise_weeks(8, 1.0, 7.0),
    );
    let mut declining_history = HashMap::new();
    declining_history.insert("dumbbell_curl".to_owned(), declining);

    let flat_total = analyzer.analyze(&flat_history).scores[0].total;
    let declining_total = analyzer.analyze(&declining_history).scores[0].total;

    // Strength fell 7% and RPE rose 1.4 points: both addends apply
    assert!((declining_total - flat_total - 0.35).abs() < 1e-9);
}

#[test]
fn candidates_rank_descending_by_total_fatigue() {
    let analyzer = analyzer();
    let mut history = HashMap::new();
    history.insert("back_squat".to_owned(), uniform_exercise_weeks(10, 1.0, 8.0));
    history.insert("deadlift".to_owned(), uniform_exercise_weeks(8, 1.0, 8.0));
    history.insert("bench_press".to_owned(), uniform_exercise_weeks(6, 1.0, 7.0));

    let analysis = analyzer.analyze(&history);
    let totals: Vec<f64> = analysis.scores.iter().map(|s| s.total).collect();
    let mut sorted = totals.clone();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
    assert_eq!(totals, sorted);
    assert_eq!(analysis.scores[0].exercise_id, "back_squat");
}

#[test]
fn unknown_exercises_still_score_with_fallback_complexity() {
    let analyzer = analyzer();
    let mut history = HashMap::new();
    history.insert(
        "custom_machine_press".to_owned(),
        uniform_exercise_weeks(8, 1.0, 7.0),
    );
    let analysis = analyzer.analyze(&history);
    assert_eq!(analysis.scores.len(), 1);
    assert!(analysis.scores[0].total > 0.0);
}
