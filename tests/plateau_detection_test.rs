// ABOUTME: Integration tests for rolling-window plateau detection
// ABOUTME: Covers insufficient data, confidence monotonicity, and plateau classification
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use atlas_intelligence::test_utils::{sample_at, stalling_history, steady_progress_history, week};
use atlas_intelligence::{PlateauDetectionConfig, PlateauDetector, PlateauType};

#[test]
fn short_history_returns_insufficient_not_error() {
    let detector = PlateauDetector::default();
    for n in 0..6 {
        let history = steady_progress_history(n, 0.01);
        let analysis = detector.detect(&history);
        assert!(!analysis.detected);
        assert!(analysis.insufficient_data);
        assert!(analysis.plateau_type.is_none());
    }
}

#[test]
fn confidence_is_monotone_in_history_length() {
    let detector = PlateauDetector::default();
    let history = steady_progress_history(12, 0.02);
    let mut previous = 0.0;
    for n in 0..=history.len() {
        let confidence = detector.detect(&history[..n]).confidence;
        assert!(
            confidence >= previous,
            "confidence dropped from {previous} to {confidence} at {n} samples"
        );
        assert!(confidence <= 1.0);
        previous = confidence;
    }
}

#[test]
fn steady_progress_is_not_a_plateau() {
    let detector = PlateauDetector::default();
    let analysis = detector.detect(&steady_progress_history(10, 0.02));
    assert!(!analysis.detected);
    assert!(!analysis.insufficient_data);
}

// Twelve weekly samples gaining ~1%/week through week 8 then ~0.2%/week,
// with volume tolerance above 0.8 as the stall sets in, classify as a
// volume plateau.
#[test]
fn stalling_progress_with_high_tolerance_is_volume_plateau() {
    let detector = PlateauDetector::default();
    let analysis = detector.detect(&stalling_history());
    assert!(analysis.detected);
    assert_eq!(analysis.plateau_type, Some(PlateauType::Volume));
    assert!((analysis.confidence - 1.0).abs() < f64::EPSILON);
}

#[test]
fn stall_under_low_tolerance_is_intensity_plateau() {
    let detector = PlateauDetector::default();
    let history: Vec<_> = (0..8)
        .map(|w| {
            let mut sample = sample_at(week(w), 1.002_f64.powi(w as i32));
            sample.volume_tolerance = 0.5;
            sample
        })
        .collect();
    let analysis = detector.detect(&history);
    assert!(analysis.detected);
    assert_eq!(analysis.plateau_type, Some(PlateauType::Intensity));
}

#[test]
fn stall_at_moderate_tolerance_is_general_plateau() {
    let detector = PlateauDetector::default();
    let history: Vec<_> = (0..8)
        .map(|w| {
            let mut sample = sample_at(week(w), 1.002_f64.powi(w as i32));
            sample.volume_tolerance = 0.7;
            sample
        })
        .collect();
    let analysis = detector.detect(&history);
    assert!(analysis.detected);
    assert_eq!(analysis.plateau_type, Some(PlateauType::General));
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = PlateauDetectionConfig {
        significance_threshold: -0.1,
        ..PlateauDetectionConfig::default()
    };
    assert!(PlateauDetector::new(config).is_err());
}
