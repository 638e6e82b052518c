//! Target calculation for generated sets.
//!
//! A pure function from a set plus the user's current best performance
//! to the number the user should attempt. Invoked every time a target
//! is displayed or a session previewed; nothing here mutates state.
//!
//! The integer `0` is a reserved sentinel meaning "attempt personal
//! maximum, no numeric target" and is returned only for max-test sets.

use crate::{
    Config, Cycle, MaxRecord, MeasurementType, ScheduledSet, ScheduledWorkout, SetProgression,
    SimpleInterval,
};

/// Minimum rep target ever prescribed
const MIN_REPS: i32 = 1;
/// Minimum time target ever prescribed, in seconds
const MIN_TIME_SECONDS: i32 = 5;
/// Seconds a time target degrades per unit of effort margin
const TIME_DROP_PER_RFEM: i32 = 3;
/// Fraction of the previous max used for max-test warm-ups
const MAX_TEST_WARMUP_FRACTION: f64 = 0.20;

/// Compute the numeric target (reps or seconds) for a set.
///
/// `max_record` is the live record for the set's exercise; absence is a
/// valid input and falls back to the configured defaults. `cycle` is
/// consulted only for cycle-level conditioning increments; sets carry
/// every other parameter themselves.
pub fn target_for(
    set: &ScheduledSet,
    workout: &ScheduledWorkout,
    max_record: Option<&MaxRecord>,
    cycle: Option<&Cycle>,
    config: &Config,
) -> i32 {
    if let SetProgression::Simple {
        base_reps,
        base_time_seconds,
        interval,
        rep_increment,
        time_increment,
        ..
    } = &set.progression
    {
        let (base, increment) = match set.measurement {
            MeasurementType::Reps => (*base_reps, *rep_increment),
            MeasurementType::Time => (*base_time_seconds, *time_increment),
        };
        let base = base.unwrap_or_else(|| measurement_floor(set.measurement));
        let target = base + increment * elapsed_intervals(*interval, workout);
        return target.max(measurement_floor(set.measurement));
    }

    // RFEM semantics from here on
    if set.is_max_test {
        return 0;
    }

    if set.is_warmup {
        return match set.warmup_percentage {
            // Normal warm-up: a percentage of this set's working target
            Some(percentage) => {
                let mut working = set.clone();
                working.is_warmup = false;
                working.warmup_percentage = None;
                let target = target_for(&working, workout, max_record, cycle, config);
                ((f64::from(target) * f64::from(percentage)) / 100.0).ceil() as i32
            }
            // Max-testing warm-up: a fixed fraction of the previous max
            None => {
                let previous = set
                    .prior_max
                    .or_else(|| recorded_max(set, max_record))
                    .unwrap_or_else(|| fallback_max(set, config));
                let target = (f64::from(previous) * MAX_TEST_WARMUP_FRACTION).round() as i32;
                target.max(measurement_floor(set.measurement))
            }
        };
    }

    if let SetProgression::Conditioning {
        base_reps,
        base_time_seconds,
        rep_increment,
        time_increment,
    } = &set.progression
    {
        let (base, increment) = match set.measurement {
            MeasurementType::Reps => (
                *base_reps,
                (*rep_increment)
                    .or_else(|| cycle.and_then(|c| c.conditioning_weekly_rep_increment)),
            ),
            MeasurementType::Time => (
                *base_time_seconds,
                (*time_increment)
                    .or_else(|| cycle.and_then(|c| c.conditioning_weekly_time_increment)),
            ),
        };
        if increment.is_none() {
            tracing::debug!(
                "No conditioning increment for {}; target stays flat",
                set.exercise_id
            );
        }
        let base = base.unwrap_or_else(|| measurement_floor(set.measurement));
        let target = base + (workout.week_number as i32 - 1) * increment.unwrap_or(0);
        return target.max(measurement_floor(set.measurement));
    }

    // Standard progressive underload against the personal max
    let max = recorded_max(set, max_record).unwrap_or_else(|| fallback_max(set, config));
    match set.measurement {
        MeasurementType::Reps => (max - workout.rfem).max(MIN_REPS),
        MeasurementType::Time => (max - workout.rfem * TIME_DROP_PER_RFEM).max(MIN_TIME_SECONDS),
    }
}

/// Weight target for a set, when one is configured.
///
/// Follows the simple-progression formula against the separate weight
/// base/increment pair; `None` whenever no base weight is configured
/// (RFEM and conditioning sets never carry one).
pub fn weight_for(set: &ScheduledSet, workout: &ScheduledWorkout) -> Option<f64> {
    match &set.progression {
        SetProgression::Simple {
            base_weight: Some(base),
            weight_increment,
            interval,
            ..
        } => {
            let elapsed = f64::from(elapsed_intervals(*interval, workout));
            Some(base + (*weight_increment).unwrap_or(0.0) * elapsed)
        }
        _ => None,
    }
}

fn elapsed_intervals(interval: SimpleInterval, workout: &ScheduledWorkout) -> i32 {
    match interval {
        SimpleInterval::Constant => 0,
        SimpleInterval::PerWorkout => workout.sequence_number as i32 - 1,
        SimpleInterval::PerWeek => workout.week_number as i32 - 1,
    }
}

fn recorded_max(set: &ScheduledSet, max_record: Option<&MaxRecord>) -> Option<i32> {
    max_record.and_then(|record| match set.measurement {
        MeasurementType::Reps => record.max_reps,
        MeasurementType::Time => record.max_time_seconds,
    })
}

fn fallback_max(set: &ScheduledSet, config: &Config) -> i32 {
    match set.measurement {
        MeasurementType::Reps => config.defaults.fallback_max_reps,
        MeasurementType::Time => config.defaults.fallback_max_time_seconds,
    }
}

fn measurement_floor(measurement: MeasurementType) -> i32 {
    match measurement {
        MeasurementType::Reps => MIN_REPS,
        MeasurementType::Time => MIN_TIME_SECONDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExerciseType;

    fn workout(sequence_number: u32, week_number: u32, rfem: i32) -> ScheduledWorkout {
        ScheduledWorkout {
            id: "w".into(),
            sequence_number,
            week_number,
            day_in_week: 1,
            group_id: "a".into(),
            rfem,
            status: Default::default(),
            scheduled_date: None,
            sets: vec![],
        }
    }

    fn set(measurement: MeasurementType, progression: SetProgression) -> ScheduledSet {
        ScheduledSet {
            id: "s".into(),
            exercise_id: "pushup".into(),
            exercise_type: ExerciseType::Push,
            measurement,
            is_conditioning: matches!(progression, SetProgression::Conditioning { .. }),
            set_number: 3,
            is_warmup: false,
            warmup_percentage: None,
            is_max_test: false,
            prior_max: None,
            progression,
        }
    }

    fn reps_record(max_reps: i32) -> MaxRecord {
        MaxRecord {
            exercise_id: "pushup".into(),
            max_reps: Some(max_reps),
            ..Default::default()
        }
    }

    fn time_record(max_time: i32) -> MaxRecord {
        MaxRecord {
            exercise_id: "plank".into(),
            max_time_seconds: Some(max_time),
            ..Default::default()
        }
    }

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn test_rfem_reps_target() {
        let set = set(MeasurementType::Reps, SetProgression::Rfem);
        let record = reps_record(20);

        let target = target_for(&set, &workout(1, 1, 4), Some(&record), None, &config());
        assert_eq!(target, 16);

        // Floors at one rep
        let target = target_for(&set, &workout(1, 1, 15), Some(&record), None, &config());
        assert_eq!(target, 1);
        let target = target_for(&set, &workout(1, 1, 25), Some(&record), None, &config());
        assert_eq!(target, 1);
    }

    #[test]
    fn test_rfem_time_target_degrades_three_per_margin() {
        let set = set(MeasurementType::Time, SetProgression::Rfem);
        let record = time_record(60);

        let target = target_for(&set, &workout(1, 1, 2), Some(&record), None, &config());
        assert_eq!(target, 54);
        let target = target_for(&set, &workout(1, 1, 4), Some(&record), None, &config());
        assert_eq!(target, 48);

        // Floors at five seconds
        let record = time_record(20);
        let target = target_for(&set, &workout(1, 1, 10), Some(&record), None, &config());
        assert_eq!(target, 5);
    }

    #[test]
    fn test_rfem_falls_back_to_configured_default_max() {
        let set = set(MeasurementType::Reps, SetProgression::Rfem);
        // No record: fallback max is 10
        let target = target_for(&set, &workout(1, 1, 4), None, None, &config());
        assert_eq!(target, 6);
    }

    #[test]
    fn test_max_test_returns_sentinel_zero() {
        let mut set = set(MeasurementType::Reps, SetProgression::Rfem);
        set.is_max_test = true;

        let record = reps_record(20);
        let target = target_for(&set, &workout(1, 1, 4), Some(&record), None, &config());
        assert_eq!(target, 0);
        let target = target_for(&set, &workout(1, 1, 4), None, None, &config());
        assert_eq!(target, 0);
    }

    #[test]
    fn test_max_test_warmup_prefers_snapshot() {
        let mut set = set(MeasurementType::Reps, SetProgression::Rfem);
        set.is_warmup = true;
        set.prior_max = Some(30);

        let record = reps_record(10);
        let target = target_for(&set, &workout(1, 1, 4), Some(&record), None, &config());
        assert_eq!(target, 6); // 20% of the snapshot, not the live record

        set.prior_max = None;
        let target = target_for(&set, &workout(1, 1, 4), Some(&record), None, &config());
        assert_eq!(target, 2);

        // No snapshot, no record: configured fallback of 10
        let target = target_for(&set, &workout(1, 1, 4), None, None, &config());
        assert_eq!(target, 2);
    }

    #[test]
    fn test_max_test_warmup_floors() {
        let mut set = set(MeasurementType::Reps, SetProgression::Rfem);
        set.is_warmup = true;
        set.prior_max = Some(2); // 20% rounds to 0

        let target = target_for(&set, &workout(1, 1, 4), None, None, &config());
        assert_eq!(target, 1);

        let mut set = set;
        set.measurement = MeasurementType::Time;
        set.prior_max = Some(10); // 20% is 2 seconds
        let target = target_for(&set, &workout(1, 1, 4), None, None, &config());
        assert_eq!(target, 5);
    }

    #[test]
    fn test_normal_warmup_is_ceiled_percentage_of_working_target() {
        let mut set = set(MeasurementType::Reps, SetProgression::Rfem);
        set.is_warmup = true;
        set.set_number = 1;
        let record = reps_record(20);
        let workout = workout(1, 1, 4); // working target 16

        set.warmup_percentage = Some(20);
        assert_eq!(
            target_for(&set, &workout, Some(&record), None, &config()),
            4 // ceil(3.2)
        );

        set.warmup_percentage = Some(40);
        assert_eq!(
            target_for(&set, &workout, Some(&record), None, &config()),
            7 // ceil(6.4)
        );
    }

    #[test]
    fn test_simple_per_week() {
        let set = set(
            MeasurementType::Reps,
            SetProgression::Simple {
                base_reps: Some(8),
                base_time_seconds: None,
                interval: SimpleInterval::PerWeek,
                rep_increment: 1,
                time_increment: 0,
                base_weight: None,
                weight_increment: None,
            },
        );

        let target = target_for(&set, &workout(10, 4, 0), None, None, &config());
        assert_eq!(target, 11);
    }

    #[test]
    fn test_simple_per_workout_and_constant() {
        let mut set = set(
            MeasurementType::Reps,
            SetProgression::Simple {
                base_reps: Some(5),
                base_time_seconds: None,
                interval: SimpleInterval::PerWorkout,
                rep_increment: 2,
                time_increment: 0,
                base_weight: None,
                weight_increment: None,
            },
        );

        assert_eq!(target_for(&set, &workout(4, 2, 0), None, None, &config()), 11);

        set.progression = SetProgression::Simple {
            base_reps: Some(5),
            base_time_seconds: None,
            interval: SimpleInterval::Constant,
            rep_increment: 2,
            time_increment: 0,
            base_weight: None,
            weight_increment: None,
        };
        assert_eq!(target_for(&set, &workout(4, 2, 0), None, None, &config()), 5);
    }

    #[test]
    fn test_simple_without_base_degrades_to_floor() {
        let set = set(
            MeasurementType::Time,
            SetProgression::Simple {
                base_reps: None,
                base_time_seconds: None,
                interval: SimpleInterval::Constant,
                rep_increment: 0,
                time_increment: 0,
                base_weight: None,
                weight_increment: None,
            },
        );

        assert_eq!(target_for(&set, &workout(1, 1, 0), None, None, &config()), 5);
    }

    #[test]
    fn test_conditioning_uses_cycle_default_increment() {
        let set = set(
            MeasurementType::Reps,
            SetProgression::Conditioning {
                base_reps: Some(10),
                base_time_seconds: None,
                rep_increment: None,
                time_increment: None,
            },
        );

        let mut cycle = crate::Cycle {
            name: "c".into(),
            number_of_weeks: 4,
            workout_days_per_week: 3,
            weekly_set_goals: Default::default(),
            groups: vec![],
            group_rotation: vec![],
            rfem_rotation: vec![],
            progression_mode: Default::default(),
            conditioning_weekly_rep_increment: Some(5),
            conditioning_weekly_time_increment: None,
            scheduling_mode: Default::default(),
            start_date: None,
            selected_weekdays: vec![],
        };

        let target = target_for(&set, &workout(7, 3, 4), None, Some(&cycle), &config());
        assert_eq!(target, 20);

        // A per-exercise increment wins over the cycle default
        let mut set = set;
        set.progression = SetProgression::Conditioning {
            base_reps: Some(10),
            base_time_seconds: None,
            rep_increment: Some(2),
            time_increment: None,
        };
        let target = target_for(&set, &workout(7, 3, 4), None, Some(&cycle), &config());
        assert_eq!(target, 14);

        // Missing everywhere: flat progression
        cycle.conditioning_weekly_rep_increment = None;
        set.progression = SetProgression::Conditioning {
            base_reps: Some(10),
            base_time_seconds: None,
            rep_increment: None,
            time_increment: None,
        };
        let target = target_for(&set, &workout(7, 3, 4), None, Some(&cycle), &config());
        assert_eq!(target, 10);
    }

    #[test]
    fn test_conditioning_ignores_rfem_and_max() {
        let set = set(
            MeasurementType::Reps,
            SetProgression::Conditioning {
                base_reps: Some(12),
                base_time_seconds: None,
                rep_increment: Some(3),
                time_increment: None,
            },
        );

        let record = reps_record(50);
        let target = target_for(&set, &workout(1, 2, 9), Some(&record), None, &config());
        assert_eq!(target, 15);
    }

    #[test]
    fn test_weight_target_follows_simple_formula() {
        let set = set(
            MeasurementType::Reps,
            SetProgression::Simple {
                base_reps: Some(8),
                base_time_seconds: None,
                interval: SimpleInterval::PerWeek,
                rep_increment: 1,
                time_increment: 0,
                base_weight: Some(10.0),
                weight_increment: Some(2.5),
            },
        );

        assert_eq!(weight_for(&set, &workout(7, 3, 0)), Some(15.0));
    }

    #[test]
    fn test_weight_target_absent_without_base_weight() {
        let simple = set(
            MeasurementType::Reps,
            SetProgression::Simple {
                base_reps: Some(8),
                base_time_seconds: None,
                interval: SimpleInterval::PerWeek,
                rep_increment: 1,
                time_increment: 0,
                base_weight: None,
                weight_increment: Some(2.5),
            },
        );
        assert_eq!(weight_for(&simple, &workout(7, 3, 0)), None);

        let rfem = set(MeasurementType::Reps, SetProgression::Rfem);
        assert_eq!(weight_for(&rfem, &workout(7, 3, 0)), None);
    }
}
