use clap::{Parser, Subcommand};
use repcycle_core::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "repcycle")]
#[command(about = "Training cycle planning and progression system", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a cycle configuration
    Validate {
        /// Cycle TOML file
        cycle: PathBuf,
    },

    /// Generate the workout schedule for a cycle
    Generate {
        /// Cycle TOML file
        cycle: PathBuf,

        /// CSV of recorded maxes
        #[arg(long)]
        maxes: Option<PathBuf>,

        /// Regenerate only workouts at or after this sequence number
        #[arg(long, default_value_t = 1)]
        start_from: u32,

        /// Write the schedule as JSON to this file
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print the schedule as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Show computed targets for one workout of a stored schedule
    Targets {
        /// Stored schedule JSON file
        schedule: PathBuf,

        /// Sequence number of the workout to preview
        #[arg(long, default_value_t = 1)]
        workout: u32,

        /// CSV of recorded maxes
        #[arg(long)]
        maxes: Option<PathBuf>,

        /// Cycle TOML file, for cycle-level conditioning increments
        #[arg(long)]
        cycle: Option<PathBuf>,
    },

    /// Print the calendar dates a date-scheduled cycle maps to
    Dates {
        /// Cycle TOML file
        cycle: PathBuf,
    },
}

fn main() -> Result<()> {
    repcycle_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Validate { cycle } => cmd_validate(&cycle),
        Commands::Generate {
            cycle,
            maxes,
            start_from,
            out,
            json,
        } => cmd_generate(&cycle, maxes.as_deref(), start_from, out.as_deref(), json),
        Commands::Targets {
            schedule,
            workout,
            maxes,
            cycle,
        } => cmd_targets(
            &schedule,
            workout,
            maxes.as_deref(),
            cycle.as_deref(),
            &config,
        ),
        Commands::Dates { cycle } => cmd_dates(&cycle),
    }
}

/// Load a cycle configuration from a TOML file
fn load_cycle(path: &Path) -> Result<Cycle> {
    Cycle::load_from(path)
}

/// Load max records, or an empty set when no file was given
fn load_maxes(path: Option<&Path>) -> Result<HashMap<String, MaxRecord>> {
    match path {
        Some(path) => load_max_records(path),
        None => Ok(HashMap::new()),
    }
}

fn cmd_validate(cycle_path: &Path) -> Result<()> {
    let cycle = load_cycle(cycle_path)?;
    let catalog = get_default_catalog();

    let result = validate_cycle(&cycle, catalog);

    for warning in &result.warnings {
        println!("warning: {}", warning);
    }

    if result.valid {
        println!("Cycle '{}' is valid", cycle.name);
        Ok(())
    } else {
        for error in &result.errors {
            println!("error: {}", error);
        }
        Err(Error::CycleValidation(format!(
            "{} error(s) found",
            result.errors.len()
        )))
    }
}

fn cmd_generate(
    cycle_path: &Path,
    maxes_path: Option<&Path>,
    start_from: u32,
    out: Option<&Path>,
    json: bool,
) -> Result<()> {
    let cycle = load_cycle(cycle_path)?;
    let catalog = get_default_catalog();

    let validation = validate_cycle(&cycle, catalog);
    for warning in &validation.warnings {
        println!("warning: {}", warning);
    }
    if !validation.valid {
        for error in &validation.errors {
            println!("error: {}", error);
        }
        return Err(Error::CycleValidation(
            "cycle failed validation, no schedule generated".into(),
        ));
    }
    tracing::debug!("Cycle '{}' validated, generating schedule", cycle.name);

    let max_records = load_maxes(maxes_path)?;
    let mut ids = UuidIdSource;
    let generated = generate_schedule(&cycle, catalog, &max_records, start_from, &mut ids);

    for warning in &generated.warnings {
        println!("warning: {}", warning);
    }

    if let Some(out) = out {
        save_schedule(out, &generated.workouts)?;
        println!(
            "Saved {} workouts to {}",
            generated.workouts.len(),
            out.display()
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&generated.workouts)?);
    } else {
        print_schedule_summary(&generated.workouts);
    }

    Ok(())
}

fn print_schedule_summary(workouts: &[ScheduledWorkout]) {
    for workout in workouts {
        let date = workout
            .scheduled_date
            .map(|d| format!(" on {}", d))
            .unwrap_or_default();
        println!(
            "Workout {:>3}  week {} day {}  group {}  rfem {}  {} sets{}",
            workout.sequence_number,
            workout.week_number,
            workout.day_in_week,
            workout.group_id,
            workout.rfem,
            workout.sets.len(),
            date
        );
    }
}

fn cmd_targets(
    schedule_path: &Path,
    workout_number: u32,
    maxes_path: Option<&Path>,
    cycle_path: Option<&Path>,
    config: &Config,
) -> Result<()> {
    let workouts = load_schedule(schedule_path)?;
    let workout = workouts
        .iter()
        .find(|w| w.sequence_number == workout_number)
        .ok_or_else(|| {
            Error::Schedule(format!("No workout with sequence number {}", workout_number))
        })?;

    let max_records = load_maxes(maxes_path)?;
    let cycle = match cycle_path {
        Some(path) => Some(load_cycle(path)?),
        None => None,
    };

    let date = workout
        .scheduled_date
        .map(|d| format!(" on {}", d))
        .unwrap_or_default();
    println!(
        "Workout {} (week {}, day {}) group {} rfem {}{}",
        workout.sequence_number,
        workout.week_number,
        workout.day_in_week,
        workout.group_id,
        workout.rfem,
        date
    );

    let catalog = get_default_catalog();
    for set in &workout.sets {
        let name = catalog
            .get(&set.exercise_id)
            .map(|e| e.name.as_str())
            .unwrap_or(set.exercise_id.as_str());

        let target = target_for(
            set,
            workout,
            max_records.get(&set.exercise_id),
            cycle.as_ref(),
            config,
        );

        let unit = match set.measurement {
            MeasurementType::Reps => "reps",
            MeasurementType::Time => "sec",
        };

        let kind = if set.is_max_test {
            "max test"
        } else if set.is_warmup {
            "warm-up"
        } else {
            "working"
        };

        // 0 is the "attempt personal maximum" sentinel, never a literal target
        let shown = if set.is_max_test {
            "to max".to_string()
        } else {
            format!("{} {}", target, unit)
        };

        let weight = weight_for(set, workout)
            .map(|w| format!(" @ {}", w))
            .unwrap_or_default();

        println!(
            "  {:<8} {:<24} set {}  {}{}",
            kind, name, set.set_number, shown, weight
        );
    }

    Ok(())
}

fn cmd_dates(cycle_path: &Path) -> Result<()> {
    let cycle = load_cycle(cycle_path)?;

    if cycle.scheduling_mode != SchedulingMode::Date {
        return Err(Error::Config(format!(
            "Cycle '{}' uses sequence scheduling; no dates to map",
            cycle.name
        )));
    }
    let start_date = cycle.start_date.ok_or_else(|| {
        Error::Config(format!("Cycle '{}' has no start date", cycle.name))
    })?;

    let dates = dates_for(start_date, cycle.number_of_weeks, &cycle.selected_weekdays);
    if dates.is_empty() {
        println!("No dates mapped (check selected weekdays)");
        return Ok(());
    }

    for (index, date) in dates.iter().enumerate() {
        println!("{:>3}  {}", index + 1, date);
    }

    Ok(())
}
