//! Default catalog of exercises.
//!
//! This module provides the built-in exercises cycles can schedule from.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<ExerciseCatalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static ExerciseCatalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with built-in exercises
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalog creation.
pub fn build_default_catalog() -> ExerciseCatalog {
    build_default_catalog_internal()
}

fn exercise(
    id: &str,
    name: &str,
    exercise_type: ExerciseType,
    training_mode: TrainingMode,
    measurement: MeasurementType,
) -> (String, Exercise) {
    (
        id.to_string(),
        Exercise {
            id: id.to_string(),
            name: name.to_string(),
            exercise_type,
            training_mode,
            measurement,
        },
    )
}

/// Internal function that actually builds the catalog
fn build_default_catalog_internal() -> ExerciseCatalog {
    use ExerciseType::*;
    use MeasurementType::{Reps, Time};
    use TrainingMode::{Conditioning, Standard};

    let exercises: HashMap<String, Exercise> = [
        // Push
        exercise("pushup", "Push-up", Push, Standard, Reps),
        exercise("dip", "Dip", Push, Standard, Reps),
        exercise("pike_pushup", "Pike Push-up", Push, Standard, Reps),
        // Pull
        exercise("pullup", "Pull-up", Pull, Standard, Reps),
        exercise("chinup", "Chin-up", Pull, Standard, Reps),
        exercise("inverted_row", "Inverted Row", Pull, Standard, Reps),
        // Legs
        exercise("squat", "Bodyweight Squat", Legs, Standard, Reps),
        exercise("lunge", "Lunge", Legs, Standard, Reps),
        exercise("pistol_squat", "Pistol Squat", Legs, Standard, Reps),
        // Core
        exercise("plank", "Plank", Core, Standard, Time),
        exercise("hollow_hold", "Hollow Hold", Core, Standard, Time),
        exercise("hanging_leg_raise", "Hanging Leg Raise", Core, Standard, Reps),
        // Balance
        exercise(
            "single_leg_stand",
            "Single-leg Stand",
            Balance,
            Standard,
            Time,
        ),
        exercise("handstand_hold", "Handstand Hold", Balance, Standard, Time),
        // Mobility
        exercise("deep_squat_hold", "Deep Squat Hold", Mobility, Standard, Time),
        exercise(
            "shoulder_dislocate",
            "Shoulder Dislocate",
            Mobility,
            Standard,
            Reps,
        ),
        // Conditioning staples
        exercise("burpee", "Burpee", Other, Conditioning, Reps),
        exercise("jumping_jack", "Jumping Jack", Other, Conditioning, Reps),
        exercise(
            "mountain_climber",
            "Mountain Climber",
            Core,
            Conditioning,
            Reps,
        ),
        exercise("jump_rope", "Jump Rope", Other, Conditioning, Time),
    ]
    .into_iter()
    .collect();

    ExerciseCatalog { exercises }
}

impl ExerciseCatalog {
    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (id, ex) in &self.exercises {
            if id.is_empty() || ex.id.is_empty() {
                errors.push("Exercise has empty ID".to_string());
            }
            if id != &ex.id {
                errors.push(format!(
                    "Exercise key '{}' doesn't match exercise.id '{}'",
                    id, ex.id
                ));
            }
            if ex.name.is_empty() {
                errors.push(format!("Exercise '{}' has empty name", id));
            }
        }

        errors
    }
}
