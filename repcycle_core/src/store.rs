//! Generated-schedule persistence for callers.
//!
//! The engine itself never touches disk; this module is the caller-side
//! persistence collaborator. Saves are atomic (temp file + rename) and
//! file-locked to prevent concurrent writers corrupting a schedule.

use crate::{Result, ScheduledWorkout};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Load a schedule from a file with shared locking.
///
/// Returns an empty schedule if the file doesn't exist; a present but
/// unreadable file is an error (a stored schedule is the source of
/// truth for targets and must not silently vanish).
pub fn load_schedule(path: &Path) -> Result<Vec<ScheduledWorkout>> {
    if !path.exists() {
        tracing::info!("No schedule file at {:?}, starting empty", path);
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let mut contents = String::new();
    let mut reader = std::io::BufReader::new(&file);
    let read_result = reader.read_to_string(&mut contents);
    file.unlock()?;
    read_result?;

    let workouts: Vec<ScheduledWorkout> = serde_json::from_str(&contents)?;
    tracing::debug!("Loaded {} workouts from {:?}", workouts.len(), path);
    Ok(workouts)
}

/// Save a schedule to a file with exclusive locking.
///
/// Atomically writes by:
/// 1. Writing to a temp file in the same directory
/// 2. Syncing to disk
/// 3. Renaming over the original
pub fn save_schedule(path: &Path, workouts: &[ScheduledWorkout]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "schedule path missing parent")
    })?)?;

    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        let contents = serde_json::to_string(workouts)?;
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;
    temp.persist(path)
        .map_err(|e| crate::Error::Schedule(format!("Failed to persist schedule: {}", e)))?;

    tracing::debug!("Saved {} workouts to {:?}", workouts.len(), path);
    Ok(())
}

/// Sink for appending workouts to an export stream
pub trait WorkoutSink {
    fn append(&mut self, workout: &ScheduledWorkout) -> Result<()>;
}

/// JSONL-based workout sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl WorkoutSink for JsonlSink {
    fn append(&mut self, workout: &ScheduledWorkout) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(workout)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended workout {} to {:?}", workout.id, self.path);
        Ok(())
    }
}
