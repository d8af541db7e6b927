// ABOUTME: Adaptive training decision engine turning performance history into program adjustments
// ABOUTME: Plateau, overreaching, volume, fatigue, substitution, and injury-risk analysis
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Atlas Intelligence
//!
//! The decision engine behind the Atlas strength coaching platform. Takes a
//! user's chronologically ordered performance samples plus their current
//! program and produces typed, explainable training recommendations:
//! plateau breaks, deload protocols, volume nudges, exercise rotation, and
//! injury-risk flags.
//!
//! The engine is purely functional. Every analyzer computes from its
//! arguments alone, the exercise catalog is shared read-only, and no state
//! persists between calls, so the host layer can run any number of
//! analyses concurrently with zero coordination.
//!
//! ## Modules
//!
//! - **catalog**: immutable exercise registry keyed by stable id
//! - **plateau_detection / overreaching / volume_optimizer**: history detectors
//! - **exercise_fatigue / substitution**: rotation flagging and alternatives
//! - **injury_risk**: planned-workout risk scoring
//! - **recommendation_engine**: the composed `analyze` entry point

/// Static exercise catalog: profiles, movement patterns, equipment, joints
pub mod catalog;

/// Typed per-analyzer configuration, validated at construction
pub mod config;

/// Engine error taxonomy
pub mod errors;

/// Performance samples, user context, and program snapshot types
pub mod models;

/// Per-exercise fatigue accumulation and rotation flagging
pub mod exercise_fatigue;

/// Injury-risk prediction for planned workouts
pub mod injury_risk;

/// Overreaching risk scoring from weighted decline indicators
pub mod overreaching;

/// Rolling-window plateau detection
pub mod plateau_detection;

/// Recommendation composition and the top-level engine
pub mod recommendation_engine;

/// Movement-pattern substitution search
pub mod substitution;

/// Volume-response optimization
pub mod volume_optimizer;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use catalog::{
    Equipment, ExerciseCatalog, ExerciseProfile, InjuryTag, Joint, MovementPattern, MuscleGroup,
};
pub use config::{
    EngineConfig, FatigueConfig, IndicatorConfig, InjuryRiskConfig, OverreachingConfig,
    PlateauDetectionConfig, SubstitutionConfig, TriggerConfig, VolumeOptimizerConfig,
};
pub use errors::{ConfigError, EngineError};
pub use exercise_fatigue::{ExerciseFatigueAnalyzer, ExerciseFatigueScore, FatigueAnalysis};
pub use injury_risk::{InjuryRiskPredictor, InjuryRiskProfile};
pub use models::{
    CurrentProgram, ExerciseWeekRecord, ExperienceLevel, PerformanceSample, PeriodizationPhase,
    PlannedExercise, PlannedWorkout, RecoveryMetrics, TrainingGoal, UserTrainingContext,
};
pub use overreaching::{
    IndicatorReading, OverreachingAssessment, OverreachingIndicator, OverreachingRiskAnalyzer,
    RecommendationUrgency,
};
pub use plateau_detection::{PlateauAnalysis, PlateauDetector, PlateauType};
pub use recommendation_engine::{
    AdaptationParameters, AdaptationType, AdaptiveTrainingEngine, ExerciseRotationPlan,
    Recommendation, SetScheme, TrainingDecisionEngine,
};
pub use substitution::{Substitution, SubstitutionAdvisor};
pub use volume_optimizer::{VolumeRecommendation, VolumeResponseOptimizer};
