//! Core domain types for the Repcycle planning engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercises and their measurement/training modes
//! - Max records (latest personal bests)
//! - Cycle configuration (groups, rotations, goals)
//! - Generated workouts and sets
//! - The injected id-source capability

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// Exercise Types
// ============================================================================

/// Movement category an exercise belongs to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    Push,
    Pull,
    Legs,
    Core,
    Balance,
    Mobility,
    Other,
}

impl ExerciseType {
    /// All exercise types in canonical order.
    ///
    /// Scheduling iterates this array rather than map keys so that
    /// identical inputs always produce an identical schedule.
    pub const ALL: [ExerciseType; 7] = [
        ExerciseType::Push,
        ExerciseType::Pull,
        ExerciseType::Legs,
        ExerciseType::Core,
        ExerciseType::Balance,
        ExerciseType::Mobility,
        ExerciseType::Other,
    ];

    /// Lowercase label used in messages and CSV/TOML keys
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseType::Push => "push",
            ExerciseType::Pull => "pull",
            ExerciseType::Legs => "legs",
            ExerciseType::Core => "core",
            ExerciseType::Balance => "balance",
            ExerciseType::Mobility => "mobility",
            ExerciseType::Other => "other",
        }
    }
}

/// How an exercise is trained
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrainingMode {
    /// Progresses by working near a personal maximum
    #[default]
    Standard,
    /// Progresses by adding volume/time weekly
    Conditioning,
}

/// What a set of this exercise counts
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementType {
    #[default]
    Reps,
    Time,
}

/// A catalog exercise definition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub exercise_type: ExerciseType,
    #[serde(default)]
    pub training_mode: TrainingMode,
    #[serde(default)]
    pub measurement: MeasurementType,
}

impl Exercise {
    pub fn is_conditioning(&self) -> bool {
        self.training_mode == TrainingMode::Conditioning
    }
}

/// The most recently recorded personal best for one exercise
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct MaxRecord {
    pub exercise_id: String,
    pub max_reps: Option<i32>,
    pub max_time_seconds: Option<i32>,
    pub weight: Option<f64>,
    pub recorded_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Cycle Configuration
// ============================================================================

/// How targets progress over the cycle
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionMode {
    /// Progressive underload against a personal max
    #[default]
    Rfem,
    /// Fixed base plus linear increment
    Simple,
    /// Per-assignment choice between rfem and simple
    Mixed,
}

/// Cadence for simple-mode increments
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SimpleInterval {
    #[default]
    Constant,
    PerWorkout,
    PerWeek,
}

/// How generated workouts are ordered
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingMode {
    /// Ordinal sequence only
    #[default]
    Sequence,
    /// Concrete calendar dates from a start date and weekday selection
    Date,
}

/// One exercise bound to a group, with its progression parameters.
///
/// `rep_increment`/`time_increment` serve both simple progression (per
/// `progression_interval`) and conditioning progression (per week,
/// overriding the cycle-level default).
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ExerciseAssignment {
    pub exercise_id: String,
    /// Per-assignment mode, honored only when the cycle is `mixed`
    pub progression_mode: Option<ProgressionMode>,
    pub base_reps: Option<i32>,
    pub base_time_seconds: Option<i32>,
    pub progression_interval: Option<SimpleInterval>,
    pub rep_increment: Option<i32>,
    pub time_increment: Option<i32>,
    pub base_weight: Option<f64>,
    pub weight_increment: Option<f64>,
}

/// A named bundle of exercises assigned to day slots via rotation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub assignments: Vec<ExerciseAssignment>,
}

/// A multi-week training plan configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cycle {
    pub name: String,
    pub number_of_weeks: u32,
    pub workout_days_per_week: u32,
    #[serde(default)]
    pub weekly_set_goals: HashMap<ExerciseType, u32>,
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Group ids cycled per day-in-week; indices reset every week
    #[serde(default)]
    pub group_rotation: Vec<String>,
    /// Effort margins cycled per day-in-week; indices reset every week
    #[serde(default)]
    pub rfem_rotation: Vec<i32>,
    #[serde(default)]
    pub progression_mode: ProgressionMode,
    pub conditioning_weekly_rep_increment: Option<i32>,
    pub conditioning_weekly_time_increment: Option<i32>,
    #[serde(default)]
    pub scheduling_mode: SchedulingMode,
    pub start_date: Option<NaiveDate>,
    /// Weekdays hosting workouts when date-scheduled; 0 = Sunday .. 6 = Saturday
    #[serde(default)]
    pub selected_weekdays: Vec<u8>,
}

impl Cycle {
    /// Load a cycle configuration from a TOML file
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let cycle: Cycle = toml::from_str(&contents)?;
        tracing::debug!("Loaded cycle '{}' from {:?}", cycle.name, path);
        Ok(cycle)
    }

    /// Group definition for a rotation entry, if it exists
    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    /// Effective progression mode for one assignment.
    ///
    /// Cycle-level mode wins outright except in `mixed`, where each
    /// assignment carries its own choice (missing override means rfem,
    /// matching the cycle default's backward-compatible meaning).
    pub fn effective_mode(&self, assignment: &ExerciseAssignment) -> ProgressionMode {
        match self.progression_mode {
            ProgressionMode::Mixed => match assignment.progression_mode {
                Some(ProgressionMode::Simple) => ProgressionMode::Simple,
                _ => ProgressionMode::Rfem,
            },
            mode => mode,
        }
    }
}

// ============================================================================
// Generated Schedule Types
// ============================================================================

/// Execution state of a workout.
///
/// The generator always emits `Pending`; later transitions belong to
/// the execution layer, never to this engine.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    #[default]
    Pending,
    Partial,
    Completed,
    Skipped,
}

/// Denormalized progression parameters carried by each generated set.
///
/// Copied from the assignment at generation time so that target
/// calculation is a function of `(set, workout, max record)` alone and
/// never re-reads a possibly-edited cycle.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SetProgression {
    /// Target derives from the workout's effort margin and the live max
    #[default]
    Rfem,
    /// Fixed base plus linear increment at a configured cadence
    Simple {
        base_reps: Option<i32>,
        base_time_seconds: Option<i32>,
        interval: SimpleInterval,
        rep_increment: i32,
        time_increment: i32,
        base_weight: Option<f64>,
        weight_increment: Option<f64>,
    },
    /// Weekly volume ramp; increments fall back to the cycle defaults
    Conditioning {
        base_reps: Option<i32>,
        base_time_seconds: Option<i32>,
        rep_increment: Option<i32>,
        time_increment: Option<i32>,
    },
}

/// One set instance inside a generated workout
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduledSet {
    pub id: String,
    pub exercise_id: String,
    pub exercise_type: ExerciseType,
    pub measurement: MeasurementType,
    pub is_conditioning: bool,
    /// 1-based within this exercise inside the workout; warm-ups occupy
    /// 1 and 2, pushing working sets to start at 3
    pub set_number: u32,
    #[serde(default)]
    pub is_warmup: bool,
    /// 20 or 40 for normal warm-ups; absent on max-test warm-ups
    pub warmup_percentage: Option<u8>,
    #[serde(default)]
    pub is_max_test: bool,
    /// Max snapshotted at generation time, in this set's measurement unit
    pub prior_max: Option<i32>,
    #[serde(default)]
    pub progression: SetProgression,
}

/// One generated session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduledWorkout {
    pub id: String,
    /// Global 1-based ordinal across the whole cycle
    pub sequence_number: u32,
    pub week_number: u32,
    pub day_in_week: u32,
    pub group_id: String,
    pub rfem: i32,
    #[serde(default)]
    pub status: WorkoutStatus,
    pub scheduled_date: Option<NaiveDate>,
    pub sets: Vec<ScheduledSet>,
}

// ============================================================================
// Catalog and Id Source
// ============================================================================

/// The exercise catalog the engine schedules from; never mutated here
#[derive(Clone, Debug, Default)]
pub struct ExerciseCatalog {
    pub exercises: HashMap<String, Exercise>,
}

impl ExerciseCatalog {
    pub fn get(&self, exercise_id: &str) -> Option<&Exercise> {
        self.exercises.get(exercise_id)
    }

    pub fn insert(&mut self, exercise: Exercise) {
        self.exercises.insert(exercise.id.clone(), exercise);
    }
}

/// Injected capability supplying ids for generated workouts and sets
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Default id source backed by UUID v4
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic id source for tests and fixtures
#[derive(Clone, Debug)]
pub struct SequentialIdSource {
    prefix: String,
    next: u64,
}

impl SequentialIdSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
