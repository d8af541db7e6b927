// ABOUTME: Static exercise catalog with movement patterns, equipment, and risk metadata
// ABOUTME: Immutable id-keyed registry shared read-only across all analysis calls
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Biomechanical movement category used to group interchangeable exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementPattern {
    /// Knee-dominant squatting
    Squat,
    /// Hip-dominant hinging
    Hinge,
    /// Overhead pressing
    VerticalPush,
    /// Horizontal pressing
    HorizontalPush,
    /// Overhead pulling
    VerticalPull,
    /// Rowing
    HorizontalPull,
    /// Single-leg knee-dominant work
    Lunge,
    /// Loaded carries
    Carry,
    /// Single-joint accessory work
    Isolation,
}

/// Muscle groups referenced by exercise profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum MuscleGroup {
    Quadriceps,
    Hamstrings,
    Glutes,
    Erectors,
    Lats,
    UpperBack,
    Traps,
    Chest,
    FrontDelts,
    SideDelts,
    RearDelts,
    Biceps,
    Triceps,
    Forearms,
    Core,
    Calves,
}

/// Equipment an exercise requires; an empty requirement set means bodyweight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Equipment {
    Barbell,
    Dumbbells,
    Kettlebell,
    SquatRack,
    Bench,
    PullUpBar,
    CableStack,
    Machine,
    ResistanceBands,
}

/// Joints tracked for injury-risk scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Joint {
    Knee,
    Hip,
    LowerBack,
    Shoulder,
    Elbow,
    Wrist,
    Ankle,
}

/// Injury-history tags matched against catalog contraindications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum InjuryTag {
    KneePain,
    HipImpingement,
    LowerBackStrain,
    ShoulderImpingement,
    ElbowTendinitis,
    WristPain,
    AnkleSprain,
}

impl InjuryTag {
    /// Joint this injury primarily affects
    #[must_use]
    pub const fn affected_joint(self) -> Joint {
        match self {
            Self::KneePain => Joint::Knee,
            Self::HipImpingement => Joint::Hip,
            Self::LowerBackStrain => Joint::LowerBack,
            Self::ShoulderImpingement => Joint::Shoulder,
            Self::ElbowTendinitis => Joint::Elbow,
            Self::WristPain => Joint::Wrist,
            Self::AnkleSprain => Joint::Ankle,
        }
    }
}

/// Static metadata for one catalog exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseProfile {
    /// Stable catalog id; every cross-reference uses this, never position
    pub id: String,
    /// Display name
    pub name: String,
    /// Movement pattern for substitution grouping
    pub movement_pattern: MovementPattern,
    /// Prime movers
    pub primary_muscles: HashSet<MuscleGroup>,
    /// Assisting muscles
    pub secondary_muscles: HashSet<MuscleGroup>,
    /// Equipment the exercise cannot be performed without
    pub required_equipment: HashSet<Equipment>,
    /// Overall difficulty (1-10)
    pub difficulty: f64,
    /// Technical complexity (1-10), drives neural fatigue accumulation
    pub technical_complexity: f64,
    /// Per-joint loading weights (0-1), sparse; absent joints load zero
    pub joint_stress: HashMap<Joint, f64>,
    /// Systemic fatigue cost scalar (0-1)
    pub fatigue_factor: f64,
    /// Recovery demand scalar (0-1)
    pub recovery_demand: f64,
    /// Neural demand scalar (0-1)
    pub neural_demand: f64,
    /// Injury tags that make this exercise unsafe
    pub contraindications: HashSet<InjuryTag>,
    /// Curated substitution hints (catalog ids)
    pub alternatives: Vec<String>,
    /// Carry-over to maximal strength expression (0-1)
    pub strength_correlation: f64,
    /// Carry-over to hypertrophy outcomes (0-1)
    pub hypertrophy_correlation: f64,
}

impl ExerciseProfile {
    /// Mean joint loading across all joints this exercise stresses
    #[must_use]
    pub fn mean_joint_stress(&self) -> f64 {
        if self.joint_stress.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = self.joint_stress.len() as f64;
        self.joint_stress.values().sum::<f64>() / n
    }

    /// Fraction of this exercise's primary muscles also primary in `other`
    #[must_use]
    pub fn primary_muscle_overlap(&self, other: &Self) -> f64 {
        if self.primary_muscles.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let total = self.primary_muscles.len() as f64;
        #[allow(clippy::cast_precision_loss)]
        let shared = self
            .primary_muscles
            .intersection(&other.primary_muscles)
            .count() as f64;
        shared / total
    }
}

/// Immutable registry of exercise profiles keyed by stable id.
///
/// Safe to share across concurrent analysis calls; nothing mutates it
/// after construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseCatalog {
    exercises: HashMap<String, ExerciseProfile>,
}

impl ExerciseCatalog {
    /// Empty catalog, populated via `insert`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a profile, keyed by its id
    pub fn insert(&mut self, profile: ExerciseProfile) {
        self.exercises.insert(profile.id.clone(), profile);
    }

    /// Look up a profile by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ExerciseProfile> {
        self.exercises.get(id)
    }

    /// Number of registered exercises
    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    /// True when no exercises are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Iterate all profiles
    pub fn iter(&self) -> impl Iterator<Item = &ExerciseProfile> {
        self.exercises.values()
    }

    /// All profiles sharing a movement pattern, excluding `except`
    #[must_use]
    pub fn by_pattern(&self, pattern: MovementPattern, except: &str) -> Vec<&ExerciseProfile> {
        self.exercises
            .values()
            .filter(|p| p.movement_pattern == pattern && p.id != except)
            .collect()
    }

    /// The built-in barbell-gym catalog used by the default engine
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for profile in builtin_profiles() {
            catalog.insert(profile);
        }
        catalog
    }
}

fn base_profile(
    id: &str,
    name: &str,
    pattern: MovementPattern,
    primary: &[MuscleGroup],
    secondary: &[MuscleGroup],
    equipment: &[Equipment],
) -> ExerciseProfile {
    ExerciseProfile {
        id: id.to_owned(),
        name: name.to_owned(),
        movement_pattern: pattern,
        primary_muscles: primary.iter().copied().collect(),
        secondary_muscles: secondary.iter().copied().collect(),
        required_equipment: equipment.iter().copied().collect(),
        difficulty: 5.0,
        technical_complexity: 5.0,
        joint_stress: HashMap::new(),
        fatigue_factor: 0.5,
        recovery_demand: 0.5,
        neural_demand: 0.5,
        contraindications: HashSet::new(),
        alternatives: Vec::new(),
        strength_correlation: 0.7,
        hypertrophy_correlation: 0.7,
    }
}

#[allow(clippy::too_many_lines)]
fn builtin_profiles() -> Vec<ExerciseProfile> {
    use Equipment::{Barbell, Bench, CableStack, Dumbbells, Machine, PullUpBar, SquatRack};
    use MovementPattern::{
        Hinge, HorizontalPull, HorizontalPush, Isolation, Lunge, Squat, VerticalPull, VerticalPush,
    };
    use MuscleGroup::{
        Biceps, Chest, Core, Erectors, Forearms, FrontDelts, Glutes, Hamstrings, Lats, Quadriceps,
        SideDelts, Triceps, UpperBack,
    };

    let mut profiles = Vec::new();

    let mut p = base_profile(
        "back_squat",
        "Barbell Back Squat",
        Squat,
        &[Quadriceps, Glutes],
        &[Hamstrings, Erectors, Core],
        &[Barbell, SquatRack],
    );
    p.difficulty = 7.0;
    p.technical_complexity = 8.0;
    p.joint_stress = [(Joint::Knee, 0.8), (Joint::Hip, 0.6), (Joint::LowerBack, 0.6)].into();
    p.fatigue_factor = 0.9;
    p.recovery_demand = 0.9;
    p.neural_demand = 0.9;
    p.contraindications = [InjuryTag::KneePain, InjuryTag::LowerBackStrain].into();
    p.alternatives = vec!["front_squat".to_owned(), "goblet_squat".to_owned()];
    p.strength_correlation = 0.95;
    p.hypertrophy_correlation = 0.85;
    profiles.push(p);

    let mut p = base_profile(
        "front_squat",
        "Barbell Front Squat",
        Squat,
        &[Quadriceps, Core],
        &[Glutes, Erectors],
        &[Barbell, SquatRack],
    );
    p.difficulty = 8.0;
    p.technical_complexity = 9.0;
    p.joint_stress = [(Joint::Knee, 0.8), (Joint::Wrist, 0.5), (Joint::LowerBack, 0.4)].into();
    p.fatigue_factor = 0.85;
    p.recovery_demand = 0.8;
    p.neural_demand = 0.9;
    p.contraindications = [InjuryTag::KneePain, InjuryTag::WristPain].into();
    p.alternatives = vec!["goblet_squat".to_owned()];
    p.strength_correlation = 0.9;
    p.hypertrophy_correlation = 0.8;
    profiles.push(p);

    let mut p = base_profile(
        "goblet_squat",
        "Goblet Squat",
        Squat,
        &[Quadriceps, Glutes],
        &[Core],
        &[Dumbbells],
    );
    p.difficulty = 3.0;
    p.technical_complexity = 3.0;
    p.joint_stress = [(Joint::Knee, 0.5), (Joint::Hip, 0.3)].into();
    p.fatigue_factor = 0.4;
    p.recovery_demand = 0.3;
    p.neural_demand = 0.3;
    p.strength_correlation = 0.6;
    p.hypertrophy_correlation = 0.7;
    profiles.push(p);

    let mut p = base_profile(
        "leg_press",
        "Leg Press",
        Squat,
        &[Quadriceps, Glutes],
        &[Hamstrings],
        &[Machine],
    );
    p.difficulty = 2.0;
    p.technical_complexity = 2.0;
    p.joint_stress = [(Joint::Knee, 0.6), (Joint::Hip, 0.3)].into();
    p.fatigue_factor = 0.5;
    p.recovery_demand = 0.4;
    p.neural_demand = 0.2;
    p.strength_correlation = 0.55;
    p.hypertrophy_correlation = 0.8;
    profiles.push(p);

    let mut p = base_profile(
        "bodyweight_squat",
        "Bodyweight Squat",
        Squat,
        &[Quadriceps, Glutes],
        &[Core],
        &[],
    );
    p.difficulty = 1.0;
    p.technical_complexity = 2.0;
    p.joint_stress = [(Joint::Knee, 0.2)].into();
    p.fatigue_factor = 0.2;
    p.recovery_demand = 0.1;
    p.neural_demand = 0.1;
    p.strength_correlation = 0.3;
    p.hypertrophy_correlation = 0.4;
    profiles.push(p);

    let mut p = base_profile(
        "deadlift",
        "Conventional Deadlift",
        Hinge,
        &[Hamstrings, Glutes, Erectors],
        &[Quadriceps, UpperBack, Core],
        &[Barbell],
    );
    p.difficulty = 8.0;
    p.technical_complexity = 8.0;
    p.joint_stress = [(Joint::LowerBack, 0.9), (Joint::Hip, 0.7), (Joint::Knee, 0.4)].into();
    p.fatigue_factor = 1.0;
    p.recovery_demand = 1.0;
    p.neural_demand = 1.0;
    p.contraindications = [InjuryTag::LowerBackStrain].into();
    p.alternatives = vec!["romanian_deadlift".to_owned(), "dumbbell_rdl".to_owned()];
    p.strength_correlation = 0.95;
    p.hypertrophy_correlation = 0.8;
    profiles.push(p);

    let mut p = base_profile(
        "romanian_deadlift",
        "Romanian Deadlift",
        Hinge,
        &[Hamstrings, Glutes],
        &[Erectors, Core],
        &[Barbell],
    );
    p.difficulty = 6.0;
    p.technical_complexity = 6.0;
    p.joint_stress = [(Joint::LowerBack, 0.7), (Joint::Hip, 0.6)].into();
    p.fatigue_factor = 0.7;
    p.recovery_demand = 0.7;
    p.neural_demand = 0.6;
    p.contraindications = [InjuryTag::LowerBackStrain].into();
    p.alternatives = vec!["dumbbell_rdl".to_owned()];
    p.strength_correlation = 0.8;
    p.hypertrophy_correlation = 0.85;
    profiles.push(p);

    let mut p = base_profile(
        "dumbbell_rdl",
        "Dumbbell Romanian Deadlift",
        Hinge,
        &[Hamstrings, Glutes],
        &[Erectors],
        &[Dumbbells],
    );
    p.difficulty = 4.0;
    p.technical_complexity = 4.0;
    p.joint_stress = [(Joint::LowerBack, 0.5), (Joint::Hip, 0.5)].into();
    p.fatigue_factor = 0.5;
    p.recovery_demand = 0.4;
    p.neural_demand = 0.4;
    p.strength_correlation = 0.65;
    p.hypertrophy_correlation = 0.8;
    profiles.push(p);

    let mut p = base_profile(
        "bench_press",
        "Barbell Bench Press",
        HorizontalPush,
        &[Chest, Triceps],
        &[FrontDelts],
        &[Barbell, Bench],
    );
    p.difficulty = 6.0;
    p.technical_complexity = 6.0;
    p.joint_stress = [(Joint::Shoulder, 0.7), (Joint::Elbow, 0.5), (Joint::Wrist, 0.3)].into();
    p.fatigue_factor = 0.7;
    p.recovery_demand = 0.6;
    p.neural_demand = 0.7;
    p.contraindications = [InjuryTag::ShoulderImpingement].into();
    p.alternatives = vec!["dumbbell_bench_press".to_owned(), "push_up".to_owned()];
    p.strength_correlation = 0.9;
    p.hypertrophy_correlation = 0.85;
    profiles.push(p);

    let mut p = base_profile(
        "dumbbell_bench_press",
        "Dumbbell Bench Press",
        HorizontalPush,
        &[Chest, Triceps],
        &[FrontDelts],
        &[Dumbbells, Bench],
    );
    p.difficulty = 5.0;
    p.technical_complexity = 4.0;
    p.joint_stress = [(Joint::Shoulder, 0.5), (Joint::Elbow, 0.4)].into();
    p.fatigue_factor = 0.6;
    p.recovery_demand = 0.5;
    p.neural_demand = 0.5;
    p.strength_correlation = 0.75;
    p.hypertrophy_correlation = 0.85;
    profiles.push(p);

    let mut p = base_profile(
        "push_up",
        "Push-Up",
        HorizontalPush,
        &[Chest, Triceps],
        &[FrontDelts, Core],
        &[],
    );
    p.difficulty = 2.0;
    p.technical_complexity = 2.0;
    p.joint_stress = [(Joint::Shoulder, 0.3), (Joint::Wrist, 0.3)].into();
    p.fatigue_factor = 0.3;
    p.recovery_demand = 0.2;
    p.neural_demand = 0.2;
    p.strength_correlation = 0.4;
    p.hypertrophy_correlation = 0.5;
    profiles.push(p);

    let mut p = base_profile(
        "overhead_press",
        "Overhead Press",
        VerticalPush,
        &[FrontDelts, SideDelts, Triceps],
        &[UpperBack, Core],
        &[Barbell],
    );
    p.difficulty = 6.0;
    p.technical_complexity = 6.0;
    p.joint_stress = [(Joint::Shoulder, 0.8), (Joint::Elbow, 0.4), (Joint::LowerBack, 0.3)].into();
    p.fatigue_factor = 0.6;
    p.recovery_demand = 0.5;
    p.neural_demand = 0.6;
    p.contraindications = [InjuryTag::ShoulderImpingement].into();
    p.alternatives = vec!["dumbbell_shoulder_press".to_owned()];
    p.strength_correlation = 0.85;
    p.hypertrophy_correlation = 0.75;
    profiles.push(p);

    let mut p = base_profile(
        "dumbbell_shoulder_press",
        "Dumbbell Shoulder Press",
        VerticalPush,
        &[FrontDelts, SideDelts, Triceps],
        &[Core],
        &[Dumbbells],
    );
    p.difficulty = 4.0;
    p.technical_complexity = 4.0;
    p.joint_stress = [(Joint::Shoulder, 0.6), (Joint::Elbow, 0.3)].into();
    p.fatigue_factor = 0.5;
    p.recovery_demand = 0.4;
    p.neural_demand = 0.4;
    p.strength_correlation = 0.7;
    p.hypertrophy_correlation = 0.75;
    profiles.push(p);

    let mut p = base_profile(
        "pull_up",
        "Pull-Up",
        VerticalPull,
        &[Lats, Biceps],
        &[UpperBack, Core],
        &[PullUpBar],
    );
    p.difficulty = 6.0;
    p.technical_complexity = 4.0;
    p.joint_stress = [(Joint::Shoulder, 0.5), (Joint::Elbow, 0.5)].into();
    p.fatigue_factor = 0.5;
    p.recovery_demand = 0.4;
    p.neural_demand = 0.5;
    p.contraindications = [InjuryTag::ElbowTendinitis].into();
    p.alternatives = vec!["lat_pulldown".to_owned()];
    p.strength_correlation = 0.8;
    p.hypertrophy_correlation = 0.8;
    profiles.push(p);

    let mut p = base_profile(
        "lat_pulldown",
        "Lat Pulldown",
        VerticalPull,
        &[Lats, Biceps],
        &[UpperBack],
        &[CableStack],
    );
    p.difficulty = 3.0;
    p.technical_complexity = 3.0;
    p.joint_stress = [(Joint::Shoulder, 0.4), (Joint::Elbow, 0.3)].into();
    p.fatigue_factor = 0.4;
    p.recovery_demand = 0.3;
    p.neural_demand = 0.3;
    p.strength_correlation = 0.6;
    p.hypertrophy_correlation = 0.75;
    profiles.push(p);

    let mut p = base_profile(
        "barbell_row",
        "Barbell Row",
        HorizontalPull,
        &[Lats, UpperBack],
        &[Biceps, Erectors],
        &[Barbell],
    );
    p.difficulty = 6.0;
    p.technical_complexity = 6.0;
    p.joint_stress = [(Joint::LowerBack, 0.6), (Joint::Shoulder, 0.4), (Joint::Elbow, 0.3)].into();
    p.fatigue_factor = 0.6;
    p.recovery_demand = 0.6;
    p.neural_demand = 0.5;
    p.contraindications = [InjuryTag::LowerBackStrain].into();
    p.alternatives = vec!["dumbbell_row".to_owned(), "seated_cable_row".to_owned()];
    p.strength_correlation = 0.8;
    p.hypertrophy_correlation = 0.8;
    profiles.push(p);

    let mut p = base_profile(
        "dumbbell_row",
        "One-Arm Dumbbell Row",
        HorizontalPull,
        &[Lats, UpperBack],
        &[Biceps],
        &[Dumbbells, Bench],
    );
    p.difficulty = 3.0;
    p.technical_complexity = 3.0;
    p.joint_stress = [(Joint::Shoulder, 0.3), (Joint::Elbow, 0.3)].into();
    p.fatigue_factor = 0.4;
    p.recovery_demand = 0.3;
    p.neural_demand = 0.3;
    p.strength_correlation = 0.65;
    p.hypertrophy_correlation = 0.8;
    profiles.push(p);

    let mut p = base_profile(
        "seated_cable_row",
        "Seated Cable Row",
        HorizontalPull,
        &[Lats, UpperBack],
        &[Biceps, Erectors],
        &[CableStack],
    );
    p.difficulty = 3.0;
    p.technical_complexity = 3.0;
    p.joint_stress = [(Joint::LowerBack, 0.3), (Joint::Elbow, 0.3)].into();
    p.fatigue_factor = 0.4;
    p.recovery_demand = 0.3;
    p.neural_demand = 0.3;
    p.strength_correlation = 0.65;
    p.hypertrophy_correlation = 0.8;
    profiles.push(p);

    let mut p = base_profile(
        "walking_lunge",
        "Walking Lunge",
        Lunge,
        &[Quadriceps, Glutes],
        &[Hamstrings, Core],
        &[Dumbbells],
    );
    p.difficulty = 4.0;
    p.technical_complexity = 4.0;
    p.joint_stress = [(Joint::Knee, 0.6), (Joint::Ankle, 0.3)].into();
    p.fatigue_factor = 0.5;
    p.recovery_demand = 0.5;
    p.neural_demand = 0.3;
    p.contraindications = [InjuryTag::KneePain, InjuryTag::AnkleSprain].into();
    p.alternatives = vec!["split_squat".to_owned()];
    p.strength_correlation = 0.55;
    p.hypertrophy_correlation = 0.75;
    profiles.push(p);

    let mut p = base_profile(
        "split_squat",
        "Bulgarian Split Squat",
        Lunge,
        &[Quadriceps, Glutes],
        &[Hamstrings],
        &[Dumbbells, Bench],
    );
    p.difficulty = 5.0;
    p.technical_complexity = 4.0;
    p.joint_stress = [(Joint::Knee, 0.7), (Joint::Ankle, 0.3)].into();
    p.fatigue_factor = 0.5;
    p.recovery_demand = 0.5;
    p.neural_demand = 0.4;
    p.contraindications = [InjuryTag::KneePain].into();
    p.strength_correlation = 0.6;
    p.hypertrophy_correlation = 0.8;
    profiles.push(p);

    let mut p = base_profile(
        "barbell_curl",
        "Barbell Curl",
        Isolation,
        &[Biceps],
        &[Forearms],
        &[Barbell],
    );
    p.difficulty = 2.0;
    p.technical_complexity = 2.0;
    p.joint_stress = [(Joint::Elbow, 0.4), (Joint::Wrist, 0.3)].into();
    p.fatigue_factor = 0.2;
    p.recovery_demand = 0.2;
    p.neural_demand = 0.1;
    p.contraindications = [InjuryTag::ElbowTendinitis].into();
    p.alternatives = vec!["dumbbell_curl".to_owned()];
    p.strength_correlation = 0.3;
    p.hypertrophy_correlation = 0.7;
    profiles.push(p);

    let mut p = base_profile(
        "dumbbell_curl",
        "Dumbbell Curl",
        Isolation,
        &[Biceps],
        &[Forearms],
        &[Dumbbells],
    );
    p.difficulty = 1.0;
    p.technical_complexity = 1.0;
    p.joint_stress = [(Joint::Elbow, 0.3)].into();
    p.fatigue_factor = 0.2;
    p.recovery_demand = 0.1;
    p.neural_demand = 0.1;
    p.strength_correlation = 0.3;
    p.hypertrophy_correlation = 0.7;
    profiles.push(p);

    profiles
}
