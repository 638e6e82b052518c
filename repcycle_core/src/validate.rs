//! Structural and semantic validation for candidate cycles.
//!
//! Validation runs before schedule generation. Errors block generation;
//! warnings are informational and never affect the generated result.

use crate::{Cycle, ExerciseCatalog, MeasurementType, ProgressionMode};

/// Outcome of validating a candidate cycle
#[derive(Clone, Debug, Default)]
pub struct Validation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Validate a candidate cycle against the exercise catalog.
///
/// Weekly set goals for exercise types absent from every group are a
/// legitimate no-op (the generator drops the quota) and are deliberately
/// not warned about here.
pub fn validate_cycle(cycle: &Cycle, catalog: &ExerciseCatalog) -> Validation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if cycle.name.trim().is_empty() {
        errors.push("Cycle name is required".to_string());
    }

    if cycle.number_of_weeks < 1 {
        errors.push("Number of weeks must be at least 1".to_string());
    }

    if !(1..=7).contains(&cycle.workout_days_per_week) {
        errors.push("Workout days per week must be between 1 and 7".to_string());
    }

    if cycle.groups.is_empty() {
        errors.push("At least one group is required".to_string());
    }

    if cycle.group_rotation.is_empty() {
        errors.push("Group rotation is required".to_string());
    }

    for group_id in &cycle.group_rotation {
        if cycle.group(group_id).is_none() {
            errors.push(format!(
                "Group rotation references unknown group '{}'",
                group_id
            ));
        }
    }

    // Mixed and rfem cycles both need an effort-margin rotation;
    // a pure simple cycle is the only configuration that does not.
    if cycle.rfem_rotation.is_empty() && cycle.progression_mode != ProgressionMode::Simple {
        errors.push("RFEM rotation is required".to_string());
    }

    for group in &cycle.groups {
        if group.assignments.is_empty() {
            warnings.push(format!("Group '{}' has no exercises assigned", group.name));
        }

        for assignment in &group.assignments {
            let exercise = match catalog.get(&assignment.exercise_id) {
                Some(exercise) => exercise,
                None => {
                    warnings.push(format!(
                        "Group '{}' references unknown exercise '{}'",
                        group.name, assignment.exercise_id
                    ));
                    continue;
                }
            };

            if cycle.effective_mode(assignment) != ProgressionMode::Simple {
                continue;
            }

            match exercise.measurement {
                MeasurementType::Reps if assignment.base_reps.is_none() => {
                    warnings.push(format!(
                        "{} in group '{}' has no base reps configured",
                        exercise.name, group.name
                    ));
                }
                MeasurementType::Time if assignment.base_time_seconds.is_none() => {
                    warnings.push(format!(
                        "{} in group '{}' has no base time configured",
                        exercise.name, group.name
                    ));
                }
                _ => {}
            }
        }
    }

    if !errors.is_empty() {
        tracing::debug!("Cycle '{}' failed validation: {:?}", cycle.name, errors);
    }

    Validation {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}
