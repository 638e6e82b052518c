//! Schedule generation: turning a validated cycle into concrete workouts.
//!
//! The generator walks weeks and days, assigns a group and an effort
//! margin to each day via rotation, distributes each exercise type's
//! weekly set quota across the days that can host it, and expands each
//! day into concrete sets including fixed warm-up sets.
//!
//! Rotation indices are keyed by day-in-week and reset at the start of
//! every week. This is an observable contract of the engine, not an
//! accident: a rotation longer than `workout_days_per_week` never
//! advances past its first `workout_days_per_week` entries.

use crate::calendar::dates_for;
use crate::{
    Cycle, Exercise, ExerciseAssignment, ExerciseCatalog, ExerciseType, Group, IdSource,
    MaxRecord, MeasurementType, ProgressionMode, SchedulingMode, ScheduledSet, ScheduledWorkout,
    SetProgression, WorkoutStatus,
};
use std::collections::HashMap;

/// Warm-up percentages prepended to every non-conditioning exercise
const WARMUP_PERCENTAGES: [u8; 2] = [20, 40];

/// A generated schedule plus the non-fatal warnings produced on the way.
///
/// Warnings are human-readable strings for the caller's warning sink;
/// they never affect the workouts themselves.
#[derive(Clone, Debug)]
pub struct GeneratedSchedule {
    pub workouts: Vec<ScheduledWorkout>,
    pub warnings: Vec<String>,
}

/// One day slot resolved from the rotations
struct DayPlan<'a> {
    day_in_week: u32,
    group: &'a Group,
    rfem: i32,
}

/// Generate the full workout sequence for a cycle.
///
/// `max_records` supplies the latest known personal bests (used to
/// snapshot each set's prior max); absence is a valid input. Pass
/// `start_from_workout = 1` for a full generation, or a higher ordinal
/// to regenerate the tail of an in-progress cycle: sequence numbers are
/// computed globally first, so the retained workouts' numbering and
/// dates are unaffected by the truncation.
///
/// The input cycle is expected to have passed `validate_cycle`;
/// structurally broken input degrades (skipped days, dropped quotas)
/// rather than panicking.
pub fn generate_schedule(
    cycle: &Cycle,
    catalog: &ExerciseCatalog,
    max_records: &HashMap<String, MaxRecord>,
    start_from_workout: u32,
    ids: &mut dyn IdSource,
) -> GeneratedSchedule {
    let mut warnings = Vec::new();

    let day_plans = resolve_day_plans(cycle, &mut warnings);

    // Rotations reset weekly, so eligibility and per-day quotas are the
    // same for every week; compute the distribution once.
    let allocations = distribute_weekly_goals(cycle, catalog, &day_plans, &mut warnings);

    let dates = match cycle.scheduling_mode {
        SchedulingMode::Date => match cycle.start_date {
            Some(start) => dates_for(start, cycle.number_of_weeks, &cycle.selected_weekdays),
            None => {
                warn(
                    &mut warnings,
                    "Date scheduling selected but the cycle has no start date; workouts left undated".to_string(),
                );
                Vec::new()
            }
        },
        SchedulingMode::Sequence => Vec::new(),
    };

    let mut workouts = Vec::new();
    let mut sequence_number = 0u32;

    for week_number in 1..=cycle.number_of_weeks {
        for (day_index, plan) in day_plans.iter().enumerate() {
            sequence_number += 1;

            let sets = expand_day_sets(
                cycle,
                catalog,
                plan,
                &allocations[day_index],
                max_records,
                ids,
            );

            workouts.push(ScheduledWorkout {
                id: ids.next_id(),
                sequence_number,
                week_number,
                day_in_week: plan.day_in_week,
                group_id: plan.group.id.clone(),
                rfem: plan.rfem,
                status: WorkoutStatus::Pending,
                scheduled_date: dates.get(sequence_number as usize - 1).copied(),
                sets,
            });
        }
    }

    let start_from = start_from_workout.max(1);
    if start_from > 1 {
        workouts.retain(|w| w.sequence_number >= start_from);
    }

    tracing::info!(
        "Generated {} workouts for cycle '{}' ({} weeks x {} days)",
        workouts.len(),
        cycle.name,
        cycle.number_of_weeks,
        cycle.workout_days_per_week
    );

    GeneratedSchedule { workouts, warnings }
}

fn warn(warnings: &mut Vec<String>, message: String) {
    tracing::warn!("{}", message);
    warnings.push(message);
}

/// Resolve group and effort margin for each day-in-week slot
fn resolve_day_plans<'a>(cycle: &'a Cycle, warnings: &mut Vec<String>) -> Vec<DayPlan<'a>> {
    let mut plans = Vec::new();

    for day in 1..=cycle.workout_days_per_week {
        let slot = (day - 1) as usize;

        let group_id = match cycle.group_rotation.get(slot % cycle.group_rotation.len().max(1)) {
            Some(id) => id,
            None => {
                warn(
                    warnings,
                    format!("No group rotation entry for day {}; day skipped", day),
                );
                continue;
            }
        };

        let group = match cycle.group(group_id) {
            Some(group) => group,
            None => {
                warn(
                    warnings,
                    format!("Group '{}' in rotation is not defined; day {} skipped", group_id, day),
                );
                continue;
            }
        };

        let rfem = if cycle.rfem_rotation.is_empty() {
            // Pure simple cycles carry no effort margins; nothing reads this
            0
        } else {
            cycle.rfem_rotation[slot % cycle.rfem_rotation.len()]
        };

        plans.push(DayPlan {
            day_in_week: day,
            group,
            rfem,
        });
    }

    plans
}

/// Split each exercise type's weekly quota across its eligible days.
///
/// Every eligible day receives `goal / n` sets; the `goal % n` extras go
/// one each to the days with the highest effort margin, ties broken by
/// original day order. Types with a quota but no eligible day are
/// dropped for the week with a warning.
fn distribute_weekly_goals(
    cycle: &Cycle,
    catalog: &ExerciseCatalog,
    day_plans: &[DayPlan<'_>],
    warnings: &mut Vec<String>,
) -> Vec<Vec<(ExerciseType, u32)>> {
    let mut allocations: Vec<Vec<(ExerciseType, u32)>> = vec![Vec::new(); day_plans.len()];

    for exercise_type in ExerciseType::ALL {
        let goal = match cycle.weekly_set_goals.get(&exercise_type) {
            Some(&goal) if goal > 0 => goal,
            _ => continue,
        };

        let eligible: Vec<usize> = day_plans
            .iter()
            .enumerate()
            .filter(|(_, plan)| group_hosts_type(plan.group, catalog, exercise_type))
            .map(|(index, _)| index)
            .collect();

        if eligible.is_empty() {
            warn(
                warnings,
                format!(
                    "No scheduled day's group contains a {} exercise; weekly goal of {} dropped",
                    exercise_type.label(),
                    goal
                ),
            );
            continue;
        }

        let base = goal / eligible.len() as u32;
        let remainder = (goal % eligible.len() as u32) as usize;

        let mut counts: HashMap<usize, u32> =
            eligible.iter().map(|&index| (index, base)).collect();

        // Stable sort keeps original day order among equal margins
        let mut by_rfem = eligible.clone();
        by_rfem.sort_by_key(|&index| std::cmp::Reverse(day_plans[index].rfem));
        for &index in by_rfem.iter().take(remainder) {
            *counts.entry(index).or_insert(0) += 1;
        }

        for &index in &eligible {
            let count = counts[&index];
            if count > 0 {
                allocations[index].push((exercise_type, count));
            }
        }
    }

    allocations
}

fn group_hosts_type(group: &Group, catalog: &ExerciseCatalog, exercise_type: ExerciseType) -> bool {
    group.assignments.iter().any(|assignment| {
        catalog
            .get(&assignment.exercise_id)
            .map(|exercise| exercise.exercise_type == exercise_type)
            .unwrap_or(false)
    })
}

/// Expand one day's allocations into concrete sets.
///
/// Working sets are assigned round-robin across the group's exercises
/// of each type; each full pass is one set number. Non-conditioning
/// exercises get two warm-up sets at 20% and 40%, occupying set numbers
/// 1 and 2 and pushing their working sets to start at 3.
fn expand_day_sets(
    cycle: &Cycle,
    catalog: &ExerciseCatalog,
    plan: &DayPlan<'_>,
    allocations: &[(ExerciseType, u32)],
    max_records: &HashMap<String, MaxRecord>,
    ids: &mut dyn IdSource,
) -> Vec<ScheduledSet> {
    let mut sets = Vec::new();

    for &(exercise_type, count) in allocations {
        let pairs: Vec<(&ExerciseAssignment, &Exercise)> = plan
            .group
            .assignments
            .iter()
            .filter_map(|assignment| {
                catalog
                    .get(&assignment.exercise_id)
                    .filter(|exercise| exercise.exercise_type == exercise_type)
                    .map(|exercise| (assignment, exercise))
            })
            .collect();

        if pairs.is_empty() {
            continue;
        }

        let appearing = pairs.len().min(count as usize);

        // Warm-ups first, for every non-conditioning exercise that will
        // actually receive a working set today
        for &(assignment, exercise) in &pairs[..appearing] {
            if exercise.is_conditioning() {
                continue;
            }
            for (offset, &percentage) in WARMUP_PERCENTAGES.iter().enumerate() {
                let mut set = new_set(
                    cycle,
                    assignment,
                    exercise,
                    max_records,
                    offset as u32 + 1,
                    ids,
                );
                set.is_warmup = true;
                set.warmup_percentage = Some(percentage);
                sets.push(set);
            }
        }

        for set_index in 0..count {
            let (assignment, exercise) = pairs[set_index as usize % pairs.len()];
            let mut set_number = set_index / pairs.len() as u32 + 1;
            if !exercise.is_conditioning() {
                set_number += WARMUP_PERCENTAGES.len() as u32;
            }
            sets.push(new_set(
                cycle,
                assignment,
                exercise,
                max_records,
                set_number,
                ids,
            ));
        }
    }

    sets
}

fn new_set(
    cycle: &Cycle,
    assignment: &ExerciseAssignment,
    exercise: &Exercise,
    max_records: &HashMap<String, MaxRecord>,
    set_number: u32,
    ids: &mut dyn IdSource,
) -> ScheduledSet {
    let prior_max = max_records
        .get(&exercise.id)
        .and_then(|record| match exercise.measurement {
            MeasurementType::Reps => record.max_reps,
            MeasurementType::Time => record.max_time_seconds,
        });

    ScheduledSet {
        id: ids.next_id(),
        exercise_id: exercise.id.clone(),
        exercise_type: exercise.exercise_type,
        measurement: exercise.measurement,
        is_conditioning: exercise.is_conditioning(),
        set_number,
        is_warmup: false,
        warmup_percentage: None,
        is_max_test: false,
        prior_max,
        progression: denormalized_progression(cycle, assignment, exercise),
    }
}

/// Copy the applicable progression parameters onto the set, selected by
/// the effective per-set mode
fn denormalized_progression(
    cycle: &Cycle,
    assignment: &ExerciseAssignment,
    exercise: &Exercise,
) -> SetProgression {
    match cycle.effective_mode(assignment) {
        ProgressionMode::Simple => SetProgression::Simple {
            base_reps: assignment.base_reps,
            base_time_seconds: assignment.base_time_seconds,
            interval: assignment.progression_interval.unwrap_or_default(),
            rep_increment: assignment.rep_increment.unwrap_or(0),
            time_increment: assignment.time_increment.unwrap_or(0),
            base_weight: assignment.base_weight,
            weight_increment: assignment.weight_increment,
        },
        _ if exercise.is_conditioning() => SetProgression::Conditioning {
            base_reps: assignment.base_reps,
            base_time_seconds: assignment.base_time_seconds,
            rep_increment: assignment.rep_increment,
            time_increment: assignment.time_increment,
        },
        _ => SetProgression::Rfem,
    }
}
