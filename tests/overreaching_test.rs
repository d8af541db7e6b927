// ABOUTME: Integration tests for the overreaching risk analyzer
// ABOUTME: Covers the sparse-history floor, score bounds, and multi-indicator escalation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use atlas_intelligence::test_utils::{
    overreached_history, sample_at, steady_progress_history, week, SeededHistoryBuilder,
};
use atlas_intelligence::{OverreachingRiskAnalyzer, RecommendationUrgency};

#[test]
fn sparse_history_scores_zero_risk() {
    let analyzer = OverreachingRiskAnalyzer::default();
    for n in 0..=4 {
        let assessment = analyzer.assess(&steady_progress_history(n, 0.01));
        assert!(assessment.risk_score.abs() < f64::EPSILON);
        assert!(assessment.indicators.is_empty());
        assert_eq!(assessment.urgency, RecommendationUrgency::Low);
    }
}

#[test]
fn risk_is_always_within_unit_interval() {
    let analyzer = OverreachingRiskAnalyzer::default();

    // Catastrophic collapse across every indicator still caps at 1.0
    let history: Vec<_> = (0..8)
        .map(|w| {
            let mut sample = sample_at(week(w), 1.0);
            if w < 4 {
                sample.progression_rate = 0.02;
                sample.recovery_score = 0.9;
                sample.motivation_level = 0.9;
            } else {
                sample.progression_rate = -0.05;
                sample.rpe_accuracy_drift = 4.0;
                sample.recovery_score = 0.1;
                sample.motivation_level = 0.05;
            }
            sample
        })
        .collect();
    let assessment = analyzer.assess(&history);
    assert!((0.0..=1.0).contains(&assessment.risk_score));
    assert!((assessment.risk_score - 1.0).abs() < f64::EPSILON);

    for seed in 0..20 {
        let history = SeededHistoryBuilder::new(seed, 10, 0.01).build();
        let risk = analyzer.assess(&history).risk_score;
        assert!((0.0..=1.0).contains(&risk), "seed {seed} gave risk {risk}");
    }
}

// Last four samples: progression down 10%, RPE drift up 2.0, recovery down
// 25%, motivation down 35% versus the prior four. All four indicators
// trigger and the urgency is high.
#[test]
fn multi_indicator_collapse_is_high_urgency() {
    let analyzer = OverreachingRiskAnalyzer::default();
    let assessment = analyzer.assess(&overreached_history());

    assert!(assessment.risk_score > 0.6);
    assert_eq!(assessment.urgency, RecommendationUrgency::High);
    assert_eq!(assessment.indicators.len(), 4);
    assert!(assessment.indicators.iter().all(|r| r.triggered));
}

#[test]
fn stable_training_is_low_urgency_with_raw_deltas_reported() {
    let analyzer = OverreachingRiskAnalyzer::default();
    let assessment = analyzer.assess(&steady_progress_history(10, 0.01));

    assert_eq!(assessment.urgency, RecommendationUrgency::Low);
    assert!(assessment.risk_score < 0.1);
    // Untriggered indicators still expose their deltas for explainability
    assert_eq!(assessment.indicators.len(), 4);
    assert!(assessment.indicators.iter().all(|r| !r.triggered));
}

#[test]
fn baseline_shrinks_with_limited_older_data() {
    let analyzer = OverreachingRiskAnalyzer::default();
    // Six samples: four recent, only two available for the baseline
    let assessment = analyzer.assess(&steady_progress_history(6, 0.01));
    assert_eq!(assessment.recent_samples, 4);
    assert_eq!(assessment.baseline_samples, 2);
}
