// ABOUTME: Recommendation composer orchestrating every detector into typed program adjustments
// ABOUTME: Runs the periodization state machine and converts triggered conditions into recommendations
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::cast_precision_loss)] // Safe: sample counts are small

use crate::catalog::ExerciseCatalog;
use crate::config::EngineConfig;
use crate::errors::{ConfigError, EngineError};
use crate::exercise_fatigue::{ExerciseFatigueAnalyzer, FatigueAnalysis};
use crate::injury_risk::{InjuryRiskPredictor, InjuryRiskProfile};
use crate::models::{
    CurrentProgram, ExperienceLevel, PerformanceSample, PeriodizationPhase, UserTrainingContext,
};
use crate::overreaching::{
    OverreachingAssessment, OverreachingRiskAnalyzer, RecommendationUrgency,
};
use crate::plateau_detection::{PlateauAnalysis, PlateauDetector, PlateauType};
use crate::substitution::{Substitution, SubstitutionAdvisor};
use crate::volume_optimizer::{VolumeRecommendation, VolumeResponseOptimizer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Overreaching risk above which the aggressive deload tier applies
const AGGRESSIVE_DELOAD_RISK: f64 = 0.8;

/// Sample coverage at which overreaching confidence saturates
const OVERREACHING_CONFIDENCE_SAMPLES: f64 = 8.0;

/// Weeks tracked at which rotation confidence saturates
const ROTATION_CONFIDENCE_WEEKS: f64 = 8.0;

/// The structured adjustment a recommendation proposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdaptationType {
    /// Raise intensity while trimming volume to break an intensity plateau
    IntensityIncrease,
    /// Undulating volume wave to break a volume plateau
    VolumePeriodization,
    /// Multi-week overhaul with partial exercise rotation
    ProgramOverhaul,
    /// 50% volume cut over two weeks
    AggressiveDeload,
    /// 30% volume cut over one week
    StandardDeload,
    /// 15% volume trim with intensity maintained
    LightAdjustment,
    /// Rotate fatigued exercises to fresh substitutes
    ExerciseRotation,
    /// Nudge weekly volume by a bounded fraction
    VolumeAdjustment,
    /// Move the program to a different periodization phase
    PeriodizationPhaseChange,
}

impl AdaptationType {
    /// Metrics the host should track while this adaptation runs
    #[must_use]
    pub fn monitoring_metrics(self) -> Vec<String> {
        let metrics: &[&str] = match self {
            Self::IntensityIncrease => &["weekly_strength_index", "session_rpe", "bar_speed"],
            Self::VolumePeriodization => {
                &["volume_tolerance", "weekly_strength_index", "recovery_score"]
            }
            Self::ProgramOverhaul => {
                &["weekly_strength_index", "motivation_level", "adherence_rate"]
            }
            Self::AggressiveDeload | Self::StandardDeload => {
                &["recovery_score", "sleep_quality", "session_rpe", "motivation_level"]
            }
            Self::LightAdjustment => &["recovery_score", "session_rpe"],
            Self::ExerciseRotation => {
                &["exercise_strength_index", "session_rpe", "joint_comfort"]
            }
            Self::VolumeAdjustment => {
                &["volume_tolerance", "recovery_score", "progression_rate"]
            }
            Self::PeriodizationPhaseChange => {
                &["weekly_strength_index", "volume_tolerance", "recovery_score"]
            }
        };
        metrics.iter().map(|m| (*m).to_owned()).collect()
    }
}

/// Set-manipulation variants for intensity-focused plateau responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetScheme {
    /// Heavy top set followed by lighter back-off sets
    TopSetBackoff,
    /// Short intra-set rests to extend heavy exposure
    ClusterSets,
    /// Ascending/descending intensity waves across sets
    WaveLoading,
}

/// One exercise flagged for rotation together with its ranked substitutes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRotationPlan {
    /// Exercise to rotate out
    pub exercise_id: String,
    /// Accumulated fatigue that triggered the rotation
    pub fatigue_score: f64,
    /// Ranked substitutes, possibly empty for custom exercises
    pub substitutes: Vec<Substitution>,
}

/// Parameters typed per adaptation; the variant shape is statically tied
/// to the recommendation's adaptation type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AdaptationParameters {
    /// Parameters for `IntensityIncrease`
    IntensityProtocol {
        /// Fractional intensity raise
        intensity_increase: f64,
        /// Fractional volume trim funding the intensity raise
        volume_reduction: f64,
        /// Set-manipulation variant to apply
        set_scheme: SetScheme,
        /// Protocol length
        duration_weeks: u32,
    },
    /// Parameters for `VolumePeriodization`
    VolumeWave {
        /// Week-by-week volume multipliers
        weekly_multipliers: Vec<f64>,
        /// Wave length
        duration_weeks: u32,
    },
    /// Parameters for `ProgramOverhaul`
    Overhaul {
        /// Fraction of exercises to rotate during the overhaul
        rotation_percentage: f64,
        /// Phase the rebuilt program should start in
        target_phase: PeriodizationPhase,
        /// Overhaul length
        duration_weeks: u32,
    },
    /// Parameters for the deload tiers
    Deload {
        /// Fractional volume cut
        volume_reduction: f64,
        /// Fractional intensity cut (zero maintains intensity)
        intensity_reduction: f64,
        /// Deload length
        duration_weeks: u32,
    },
    /// Parameters for `VolumeAdjustment`
    VolumeNudge {
        /// Signed fractional load adjustment
        adjustment: f64,
    },
    /// Parameters for `ExerciseRotation`
    Rotation {
        /// Per-exercise rotation plans, ranked by fatigue
        rotations: Vec<ExerciseRotationPlan>,
    },
    /// Parameters for `PeriodizationPhaseChange`
    PhaseChange {
        /// Phase the program is currently in
        from: PeriodizationPhase,
        /// Phase the program should move to
        to: PeriodizationPhase,
    },
}

/// One structured training-program adjustment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// What kind of adjustment this is
    pub adaptation: AdaptationType,
    /// Originating detector's confidence (0-1)
    pub confidence: f64,
    /// Explanation assembled from the detector's explainable fields
    pub rationale: String,
    /// Typed parameter block matching the adaptation type
    pub parameters: AdaptationParameters,
    /// What the user should expect if they follow the recommendation
    pub expected_outcome: String,
    /// Fixed monitoring metrics for this adaptation type
    pub monitoring_metrics: Vec<String>,
}

/// Async seam the host layer drives; detectors themselves are synchronous
#[async_trait::async_trait]
pub trait TrainingDecisionEngine {
    /// Run every detector over the supplied history and compose the
    /// triggered conditions into recommendations, in trigger order.
    async fn analyze(
        &self,
        context: &UserTrainingContext,
        history: &[PerformanceSample],
        program: &CurrentProgram,
    ) -> Result<Vec<Recommendation>, EngineError>;
}

/// The composed adaptive training decision engine.
///
/// Stateless between calls; safe to share behind an `Arc` across
/// concurrently running analyses.
pub struct AdaptiveTrainingEngine {
    config: EngineConfig,
    plateau: PlateauDetector,
    overreaching: OverreachingRiskAnalyzer,
    volume: VolumeResponseOptimizer,
    fatigue: ExerciseFatigueAnalyzer,
    substitution: SubstitutionAdvisor,
    injury: InjuryRiskPredictor,
}

impl AdaptiveTrainingEngine {
    /// Engine over `catalog` with default configuration
    #[must_use]
    pub fn new(catalog: Arc<ExerciseCatalog>) -> Self {
        Self {
            config: EngineConfig::default(),
            plateau: PlateauDetector::default(),
            overreaching: OverreachingRiskAnalyzer::default(),
            volume: VolumeResponseOptimizer::default(),
            fatigue: ExerciseFatigueAnalyzer::with_catalog(Arc::clone(&catalog)),
            substitution: SubstitutionAdvisor::with_catalog(Arc::clone(&catalog)),
            injury: InjuryRiskPredictor::with_catalog(catalog),
        }
    }

    /// Engine with custom configuration, validated once here.
    ///
    /// # Errors
    /// Returns `ConfigError` when any nested configuration is invalid.
    pub fn with_config(
        catalog: Arc<ExerciseCatalog>,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            plateau: PlateauDetector::new(config.plateau.clone())?,
            overreaching: OverreachingRiskAnalyzer::new(config.overreaching.clone())?,
            volume: VolumeResponseOptimizer::new(config.volume.clone())?,
            fatigue: ExerciseFatigueAnalyzer::new(
                Arc::clone(&catalog),
                config.fatigue.clone(),
            )?,
            substitution: SubstitutionAdvisor::new(
                Arc::clone(&catalog),
                config.substitution.clone(),
            )?,
            injury: InjuryRiskPredictor::new(catalog, config.injury.clone())?,
            config,
        })
    }

    /// Recommended next periodization phase for the observed state
    fn next_phase(
        &self,
        context: &UserTrainingContext,
        current: PeriodizationPhase,
        plateau: &PlateauAnalysis,
        overreaching: &OverreachingAssessment,
    ) -> PeriodizationPhase {
        if overreaching.urgency == RecommendationUrgency::High {
            return PeriodizationPhase::Recovery;
        }
        if plateau.detected {
            return PeriodizationPhase::Intensification;
        }
        let strong_trend = !plateau.insufficient_data
            && plateau.avg_change > self.config.plateau.significance_threshold
            && plateau.recent_volume_tolerance > self.config.plateau.high_volume_tolerance;
        if strong_trend {
            return PeriodizationPhase::Realization;
        }
        match (current, context.experience) {
            (PeriodizationPhase::Recovery | PeriodizationPhase::Realization, _) => {
                PeriodizationPhase::Accumulation
            }
            (_, ExperienceLevel::Beginner) => PeriodizationPhase::Development,
            (current_phase, _) => current_phase,
        }
    }

    fn plateau_recommendation(&self, plateau: &PlateauAnalysis) -> Option<Recommendation> {
        let plateau_type = plateau.plateau_type?;
        let rationale = format!(
            "Mean weekly strength change {:.2}% with variance {:.5} over the last {} samples; \
             volume tolerance averaged {:.2}",
            plateau.avg_change * 100.0,
            plateau.change_variance,
            plateau.samples_used,
            plateau.recent_volume_tolerance,
        );
        let recommendation = match plateau_type {
            PlateauType::Intensity => Recommendation {
                adaptation: AdaptationType::IntensityIncrease,
                confidence: plateau.confidence,
                rationale,
                parameters: AdaptationParameters::IntensityProtocol {
                    intensity_increase: 0.05,
                    volume_reduction: 0.1,
                    set_scheme: SetScheme::TopSetBackoff,
                    duration_weeks: 4,
                },
                expected_outcome: "Renewed strength progression within 3-4 weeks as heavier \
                                   exposure drives new adaptation"
                    .to_owned(),
                monitoring_metrics: AdaptationType::IntensityIncrease.monitoring_metrics(),
            },
            PlateauType::Volume => Recommendation {
                adaptation: AdaptationType::VolumePeriodization,
                confidence: plateau.confidence,
                rationale,
                parameters: AdaptationParameters::VolumeWave {
                    weekly_multipliers: vec![1.2, 0.8, 1.1, 0.7],
                    duration_weeks: 4,
                },
                expected_outcome: "Undulating volume restores a progression stimulus the \
                                   current steady loading no longer provides"
                    .to_owned(),
                monitoring_metrics: AdaptationType::VolumePeriodization.monitoring_metrics(),
            },
            PlateauType::General => Recommendation {
                adaptation: AdaptationType::ProgramOverhaul,
                confidence: plateau.confidence,
                rationale,
                parameters: AdaptationParameters::Overhaul {
                    rotation_percentage: 0.4,
                    target_phase: PeriodizationPhase::Accumulation,
                    duration_weeks: 6,
                },
                expected_outcome: "A rebuilt program with fresh movements breaks the \
                                   accommodation driving the stall"
                    .to_owned(),
                monitoring_metrics: AdaptationType::ProgramOverhaul.monitoring_metrics(),
            },
        };
        Some(recommendation)
    }

    fn deload_recommendation(
        &self,
        overreaching: &OverreachingAssessment,
        injury: Option<&InjuryRiskProfile>,
    ) -> Option<Recommendation> {
        let risk = overreaching.risk_score;
        let injury_high = injury.is_some_and(|p| p.high_risk);

        // Injury risk feeds the severity choice: a high-risk session plan
        // escalates the tier, and can justify a light deload on its own
        // when overreaching is borderline.
        let tier = if risk > AGGRESSIVE_DELOAD_RISK {
            AdaptationType::AggressiveDeload
        } else if risk > self.config.triggers.overreaching_risk {
            if injury_high {
                AdaptationType::AggressiveDeload
            } else {
                AdaptationType::StandardDeload
            }
        } else if injury_high && overreaching.urgency == RecommendationUrgency::Medium {
            AdaptationType::LightAdjustment
        } else {
            return None;
        };

        let triggered: Vec<String> = overreaching
            .indicators
            .iter()
            .filter(|r| r.triggered)
            .map(|r| format!("{:?} ({:+.2})", r.indicator, r.delta))
            .collect();
        let mut rationale = format!(
            "Overreaching risk {:.2} from {} triggered indicators: {}",
            risk,
            triggered.len(),
            triggered.join(", ")
        );
        if injury_high {
            rationale.push_str("; elevated injury risk for the planned session");
        }

        let parameters = match tier {
            AdaptationType::AggressiveDeload => AdaptationParameters::Deload {
                volume_reduction: 0.5,
                intensity_reduction: 0.15,
                duration_weeks: 2,
            },
            AdaptationType::StandardDeload => AdaptationParameters::Deload {
                volume_reduction: 0.3,
                intensity_reduction: 0.1,
                duration_weeks: 1,
            },
            // Light tier trims volume only; intensity is maintained
            _ => AdaptationParameters::Deload {
                volume_reduction: 0.15,
                intensity_reduction: 0.0,
                duration_weeks: 1,
            },
        };

        let coverage = (overreaching.recent_samples + overreaching.baseline_samples) as f64;
        Some(Recommendation {
            adaptation: tier,
            confidence: (coverage / OVERREACHING_CONFIDENCE_SAMPLES).min(1.0),
            rationale,
            parameters,
            expected_outcome: "Accumulated fatigue dissipates and performance markers \
                               rebound within the deload window"
                .to_owned(),
            monitoring_metrics: tier.monitoring_metrics(),
        })
    }

    fn volume_recommendation(&self, volume: &VolumeRecommendation) -> Option<Recommendation> {
        if volume.adjustment.abs() <= self.config.triggers.volume_adjustment {
            return None;
        }
        let direction = if volume.adjustment > 0.0 {
            "increase"
        } else {
            "decrease"
        };
        let mut rationale = format!(
            "Progression-per-volume gradient {:.3} supports a {:.0}% volume {}",
            volume.gradient,
            volume.adjustment.abs() * 100.0,
            direction,
        );
        if volume.fatigue_limited {
            rationale.push_str("; reduced further for accumulated fatigue");
        }
        Some(Recommendation {
            adaptation: AdaptationType::VolumeAdjustment,
            confidence: volume.confidence,
            rationale,
            parameters: AdaptationParameters::VolumeNudge {
                adjustment: volume.adjustment,
            },
            expected_outcome: "Training volume moves toward the dose the user currently \
                               responds to best"
                .to_owned(),
            monitoring_metrics: AdaptationType::VolumeAdjustment.monitoring_metrics(),
        })
    }

    fn rotation_recommendation(
        &self,
        context: &UserTrainingContext,
        fatigue: &FatigueAnalysis,
        injury: Option<&InjuryRiskProfile>,
    ) -> Option<Recommendation> {
        let candidates = fatigue.rotation_candidates();
        if candidates.is_empty() {
            return None;
        }

        let rotations: Vec<ExerciseRotationPlan> = candidates
            .iter()
            .map(|score| ExerciseRotationPlan {
                exercise_id: score.exercise_id.clone(),
                fatigue_score: score.total,
                substitutes: self
                    .substitution
                    .find_substitutions(&score.exercise_id, context, injury),
            })
            .collect();

        let names: Vec<&str> = rotations.iter().map(|r| r.exercise_id.as_str()).collect();
        let top_weeks = candidates
            .first()
            .map_or(0, |score| score.weeks_tracked) as f64;

        Some(Recommendation {
            adaptation: AdaptationType::ExerciseRotation,
            confidence: (top_weeks / ROTATION_CONFIDENCE_WEEKS).min(1.0),
            rationale: format!(
                "Accumulated fatigue crossed the rotation threshold for: {}",
                names.join(", ")
            ),
            parameters: AdaptationParameters::Rotation { rotations },
            expected_outcome: "Fresh movement variations relieve accumulated joint and \
                               neural fatigue while training the same patterns"
                .to_owned(),
            monitoring_metrics: AdaptationType::ExerciseRotation.monitoring_metrics(),
        })
    }

    fn phase_recommendation(
        &self,
        context: &UserTrainingContext,
        program: &CurrentProgram,
        plateau: &PlateauAnalysis,
        overreaching: &OverreachingAssessment,
    ) -> Option<Recommendation> {
        let next = self.next_phase(context, program.phase, plateau, overreaching);
        if next == program.phase {
            return None;
        }
        Some(Recommendation {
            adaptation: AdaptationType::PeriodizationPhaseChange,
            confidence: plateau.confidence,
            rationale: format!(
                "Observed trend and recovery state favor {next:?} over the current {:?} phase",
                program.phase
            ),
            parameters: AdaptationParameters::PhaseChange {
                from: program.phase,
                to: next,
            },
            expected_outcome: "Phase emphasis realigns weekly volume and intensity with \
                               the user's current adaptive state"
                .to_owned(),
            monitoring_metrics: AdaptationType::PeriodizationPhaseChange.monitoring_metrics(),
        })
    }
}

#[async_trait::async_trait]
impl TrainingDecisionEngine for AdaptiveTrainingEngine {
    async fn analyze(
        &self,
        context: &UserTrainingContext,
        history: &[PerformanceSample],
        program: &CurrentProgram,
    ) -> Result<Vec<Recommendation>, EngineError> {
        if let Some(bad) = history.iter().position(|s| !s.is_well_formed()) {
            return Err(EngineError::MalformedInput(format!(
                "sample at index {bad} has non-finite or out-of-range fields"
            )));
        }

        // Host APIs typically return newest-first; detectors assume oldest-first
        let mut ordered = history.to_vec();
        crate::models::sort_history(&mut ordered);

        let plateau = self.plateau.detect(&ordered);
        let overreaching = self.overreaching.assess(&ordered);
        let volume = self.volume.optimize(&ordered);
        let fatigue = self.fatigue.analyze(&program.exercise_history);
        let injury = program.next_workout.as_ref().map(|workout| {
            self.injury
                .predict(context, workout, &ordered, &program.weekly_loads)
        });

        // Fixed trigger order; no cross-type deduplication or ranking
        let mut recommendations = Vec::new();
        recommendations.extend(self.plateau_recommendation(&plateau));
        recommendations.extend(self.deload_recommendation(&overreaching, injury.as_ref()));
        recommendations.extend(self.volume_recommendation(&volume));
        recommendations.extend(self.rotation_recommendation(context, &fatigue, injury.as_ref()));
        recommendations.extend(self.phase_recommendation(
            context,
            program,
            &plateau,
            &overreaching,
        ));

        debug!(
            user_id = %context.user_id,
            samples = ordered.len(),
            recommendations = recommendations.len(),
            "analysis complete"
        );

        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitoring_metrics_are_fixed_per_type() {
        let deload = AdaptationType::StandardDeload.monitoring_metrics();
        assert!(deload.contains(&"recovery_score".to_owned()));
        assert_eq!(
            AdaptationType::AggressiveDeload.monitoring_metrics(),
            deload
        );
    }
}
