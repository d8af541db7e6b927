// ABOUTME: Integration tests for movement-pattern substitution search
// ABOUTME: Covers equipment feasibility, never-self guarantees, and injury-aware scoring
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use atlas_intelligence::test_utils::default_context;
use atlas_intelligence::{
    Equipment, ExerciseCatalog, InjuryTag, SubstitutionAdvisor, SubstitutionConfig,
};
use std::collections::HashSet;
use std::sync::Arc;

fn advisor() -> SubstitutionAdvisor {
    SubstitutionAdvisor::new(
        Arc::new(ExerciseCatalog::builtin()),
        SubstitutionConfig::default(),
    )
    .unwrap()
}

// A dumbbell-only user asking to replace a barbell-and-rack exercise only
// receives candidates whose equipment is a subset of what they own
// (bodyweight counts as always available).
#[test]
fn candidates_never_require_unavailable_equipment() {
    let advisor = advisor();
    let catalog = ExerciseCatalog::builtin();
    let mut context = default_context();
    context.available_equipment = [Equipment::Dumbbells].into();

    let substitutions = advisor.find_substitutions("back_squat", &context, None);
    assert!(!substitutions.is_empty());
    for substitution in &substitutions {
        let profile = catalog.get(&substitution.exercise_id).unwrap();
        assert!(
            profile
                .required_equipment
                .is_subset(&context.available_equipment),
            "{} requires equipment the user lacks",
            substitution.exercise_id
        );
    }
}

#[test]
fn original_exercise_is_never_its_own_substitute() {
    let advisor = advisor();
    let context = default_context();
    for exercise_id in ["back_squat", "deadlift", "bench_press", "pull_up"] {
        let substitutions = advisor.find_substitutions(exercise_id, &context, None);
        assert!(substitutions.iter().all(|s| s.exercise_id != exercise_id));
    }
}

#[test]
fn unknown_exercise_returns_empty_list_not_error() {
    let advisor = advisor();
    let context = default_context();
    let substitutions = advisor.find_substitutions("users_custom_lift", &context, None);
    assert!(substitutions.is_empty());
}

#[test]
fn at_most_three_substitutes_are_returned() {
    let advisor = advisor();
    let context = default_context();
    // Full gym access leaves four squat-pattern candidates in the catalog
    let substitutions = advisor.find_substitutions("back_squat", &context, None);
    assert!(substitutions.len() <= 3);
    assert!(!substitutions.is_empty());
}

#[test]
fn substitutes_stay_within_the_movement_pattern() {
    let advisor = advisor();
    let catalog = ExerciseCatalog::builtin();
    let context = default_context();
    let original_pattern = catalog.get("deadlift").unwrap().movement_pattern;

    for substitution in advisor.find_substitutions("deadlift", &context, None) {
        let profile = catalog.get(&substitution.exercise_id).unwrap();
        assert_eq!(profile.movement_pattern, original_pattern);
    }
}

#[test]
fn contraindication_avoidance_raises_safety_and_shows_in_reason() {
    let advisor = advisor();
    let mut context = default_context();
    context.injury_history = HashSet::from([InjuryTag::KneePain]);

    // Back squat is contraindicated for knee pain; the goblet squat is not
    let substitutions = advisor.find_substitutions("back_squat", &context, None);
    let goblet = substitutions
        .iter()
        .find(|s| s.exercise_id == "goblet_squat")
        .expect("goblet squat should be offered");
    assert!(goblet.safety_improvement > 0.2);
    assert!(goblet.reason.contains("injury history"));
}

#[test]
fn results_sort_by_combined_score() {
    let advisor = advisor();
    let context = default_context();
    let substitutions = advisor.find_substitutions("back_squat", &context, None);
    let scores: Vec<f64> = substitutions
        .iter()
        .map(|s| s.effectiveness_retention + s.safety_improvement)
        .collect();
    let mut sorted = scores.clone();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
    assert_eq!(scores, sorted);
}
