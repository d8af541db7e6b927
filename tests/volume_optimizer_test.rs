// ABOUTME: Integration tests for the volume-response optimizer
// ABOUTME: Covers adjustment bounds, gradient mapping, and the fatigue penalty
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use atlas_intelligence::test_utils::{sample_at, week, SeededHistoryBuilder};
use atlas_intelligence::{PerformanceSample, VolumeResponseOptimizer};

/// Six samples where the gradient endpoints carry the given volume
/// tolerance and progression rate
fn gradient_history(
    earlier: (f64, f64),
    latest: (f64, f64),
    recovery: f64,
) -> Vec<PerformanceSample> {
    (0..6)
        .map(|w| {
            let mut sample = sample_at(week(w), 1.0);
            sample.recovery_score = recovery;
            // Index 2 and index 5 are the gradient's two sample points
            if w == 2 {
                sample.volume_tolerance = earlier.0;
                sample.progression_rate = earlier.1;
            } else if w == 5 {
                sample.volume_tolerance = latest.0;
                sample.progression_rate = latest.1;
            }
            sample
        })
        .collect()
}

#[test]
fn short_history_yields_zero_adjustment_and_zero_confidence() {
    let optimizer = VolumeResponseOptimizer::default();
    for n in 0..6 {
        let history: Vec<_> = (0..n).map(|w| sample_at(week(w), 1.0)).collect();
        let result = optimizer.optimize(&history);
        assert!(result.adjustment.abs() < f64::EPSILON);
        assert!(result.confidence.abs() < f64::EPSILON);
        assert!(result.insufficient_data);
    }
}

#[test]
fn positive_gradient_proposes_bounded_increase() {
    let optimizer = VolumeResponseOptimizer::default();
    // Steep response: +0.04 progression for +0.02 volume
    let result = optimizer.optimize(&gradient_history((0.60, 0.01), (0.62, 0.05), 0.8));
    assert!(result.gradient > 0.0);
    assert!((result.adjustment - 0.2).abs() < 1e-9);
    assert!(!result.fatigue_limited);
}

#[test]
fn negative_gradient_under_fatigue_hits_the_floor() {
    let optimizer = VolumeResponseOptimizer::default();
    // Progression falling as volume rises, with poor recovery
    let result = optimizer.optimize(&gradient_history((0.60, 0.05), (0.62, 0.01), 0.3));
    assert!(result.gradient < 0.0);
    assert!(result.fatigue_limited);
    assert!((result.adjustment + 0.35).abs() < 1e-9);
}

#[test]
fn adjustment_is_always_within_documented_bounds() {
    let optimizer = VolumeResponseOptimizer::default();
    for seed in 0..25 {
        let history = SeededHistoryBuilder::new(seed, 12, 0.01).jitter(0.02).build();
        let result = optimizer.optimize(&history);
        assert!(
            (-0.35..=0.2).contains(&result.adjustment),
            "seed {seed} gave adjustment {}",
            result.adjustment
        );
    }
}

#[test]
fn confidence_saturates_at_ten_samples() {
    let optimizer = VolumeResponseOptimizer::default();
    let history: Vec<_> = (0..14).map(|w| sample_at(week(w), 1.0)).collect();
    assert!((optimizer.optimize(&history[..8]).confidence - 0.8).abs() < 1e-9);
    assert!((optimizer.optimize(&history).confidence - 1.0).abs() < f64::EPSILON);
}
