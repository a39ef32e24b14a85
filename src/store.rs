//! Data access for workouts, exercises, programs and muscle reference data
//!
//! The computations in `schedule` and `muscle_progress` never touch the
//! database; everything they need is gathered here first.

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{
  ExerciseMuscleMapping, ExerciseRecord, MuscleGroupRecord, ProgramRecord, WorkoutRecord,
};
use crate::muscle_progress::{CompletedWorkout, SubstringClassifier};

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("{entity} not found: {id}")]
  NotFound { entity: &'static str, id: i64 },

  #[error("Invalid data in {field}: {reason}")]
  InvalidData { field: &'static str, reason: String },
}

/// ---------------------------------------------------------------------------
/// Store Interface
/// ---------------------------------------------------------------------------

#[allow(async_fn_in_trait)]
pub trait WorkoutStore {
  /// Completed workouts for a user created at or after `since`, oldest first
  async fn list_completed_workouts_since(
    &self,
    user_id: i64,
    since: DateTime<Utc>,
  ) -> Result<Vec<WorkoutRecord>, StoreError>;

  async fn list_exercises_for_workout(
    &self,
    workout_id: i64,
  ) -> Result<Vec<ExerciseRecord>, StoreError>;

  /// Every exercise of the user's workouts, open or completed, with no
  /// muscle-group tags yet
  async fn list_untagged_exercises(&self, user_id: i64) -> Result<Vec<ExerciseRecord>, StoreError>;

  /// Mappings whose stored exercise name contains `name` (case-insensitive)
  async fn find_muscle_mappings_for_exercise_name(
    &self,
    name: &str,
  ) -> Result<Vec<ExerciseMuscleMapping>, StoreError>;

  async fn get_program(&self, program_id: i64) -> Result<ProgramRecord, StoreError>;

  /// The user's active program, if any. The newest wins if several are flagged.
  async fn get_active_program(&self, user_id: i64) -> Result<Option<ProgramRecord>, StoreError>;

  async fn list_muscle_groups(&self) -> Result<Vec<MuscleGroupRecord>, StoreError>;

  async fn list_muscle_mappings(&self) -> Result<Vec<ExerciseMuscleMapping>, StoreError>;

  async fn set_exercise_muscle_groups(
    &self,
    exercise_id: i64,
    groups: &[String],
  ) -> Result<(), StoreError>;
}

/// ---------------------------------------------------------------------------
/// Gathering Helpers
/// ---------------------------------------------------------------------------

/// Completed workouts since `since`, each with its exercises
pub async fn load_completed_history<S: WorkoutStore>(
  store: &S,
  user_id: i64,
  since: DateTime<Utc>,
) -> Result<Vec<CompletedWorkout>, StoreError> {
  let workouts = store.list_completed_workouts_since(user_id, since).await?;
  let mut history = Vec::with_capacity(workouts.len());

  for workout in workouts {
    let exercises = store.list_exercises_for_workout(workout.id).await?;
    history.push(CompletedWorkout { workout, exercises });
  }

  debug!(user_id, workouts = history.len(), "loaded completed workout history");
  Ok(history)
}

/// Workouts completed since a program was created. Recomputed on every call
/// so the day cycle never drifts from the log.
pub async fn count_completed_since<S: WorkoutStore>(
  store: &S,
  user_id: i64,
  since: DateTime<Utc>,
) -> Result<u64, StoreError> {
  Ok(store.list_completed_workouts_since(user_id, since).await?.len() as u64)
}

/// ---------------------------------------------------------------------------
/// SQLite Implementation
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SqliteWorkoutStore {
  pool: SqlitePool,
}

impl SqliteWorkoutStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }
}

fn exercise_from_row(row: &SqliteRow) -> Result<ExerciseRecord, StoreError> {
  let id: i64 = row.try_get("id")?;
  let muscle_groups_json: Option<String> = row.try_get("muscle_groups_json")?;

  // Unreadable tags are re-derived later rather than failing the read
  let muscle_groups = muscle_groups_json.and_then(|json| match serde_json::from_str(&json) {
    Ok(groups) => Some(groups),
    Err(e) => {
      warn!(exercise_id = id, error = %e, "ignoring unreadable muscle_groups_json");
      None
    }
  });

  Ok(ExerciseRecord {
    id,
    workout_id: row.try_get("workout_id")?,
    name: row.try_get("name")?,
    sets: row.try_get("sets")?,
    reps: row.try_get("reps")?,
    weight: row.try_get("weight")?,
    rpe: row.try_get("rpe")?,
    muscle_groups,
  })
}

fn program_from_row(row: &SqliteRow) -> Result<ProgramRecord, StoreError> {
  let schedule_json: String = row.try_get("schedule_json")?;
  let schedule = serde_json::from_str(&schedule_json).map_err(|e| StoreError::InvalidData {
    field: "programs.schedule_json",
    reason: e.to_string(),
  })?;

  Ok(ProgramRecord {
    id: row.try_get("id")?,
    user_id: row.try_get("user_id")?,
    name: row.try_get("name")?,
    is_active: row.try_get("is_active")?,
    created_at: row.try_get("created_at")?,
    schedule,
  })
}

impl WorkoutStore for SqliteWorkoutStore {
  async fn list_completed_workouts_since(
    &self,
    user_id: i64,
    since: DateTime<Utc>,
  ) -> Result<Vec<WorkoutRecord>, StoreError> {
    let workouts = sqlx::query_as::<_, WorkoutRecord>(
      r#"
      SELECT id, user_id, completed, completed_at, created_at
      FROM workouts
      WHERE user_id = ?1 AND completed = 1 AND created_at >= ?2
      ORDER BY created_at, id
      "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(&self.pool)
    .await?;

    Ok(workouts)
  }

  async fn list_exercises_for_workout(
    &self,
    workout_id: i64,
  ) -> Result<Vec<ExerciseRecord>, StoreError> {
    let rows = sqlx::query(
      r#"
      SELECT id, workout_id, name, sets, reps, weight, rpe, muscle_groups_json
      FROM exercises
      WHERE workout_id = ?1
      ORDER BY id
      "#,
    )
    .bind(workout_id)
    .fetch_all(&self.pool)
    .await?;

    rows.iter().map(exercise_from_row).collect()
  }

  async fn list_untagged_exercises(&self, user_id: i64) -> Result<Vec<ExerciseRecord>, StoreError> {
    let rows = sqlx::query(
      r#"
      SELECT e.id, e.workout_id, e.name, e.sets, e.reps, e.weight, e.rpe, e.muscle_groups_json
      FROM exercises e
      JOIN workouts w ON w.id = e.workout_id
      WHERE w.user_id = ?1 AND e.muscle_groups_json IS NULL
      ORDER BY e.id
      "#,
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;

    rows.iter().map(exercise_from_row).collect()
  }

  async fn find_muscle_mappings_for_exercise_name(
    &self,
    name: &str,
  ) -> Result<Vec<ExerciseMuscleMapping>, StoreError> {
    // Matched in Rust: SQLite's LOWER() only folds ASCII, so accented names
    // would disagree with the classifier used for scoring
    let classifier = SubstringClassifier::new(self.list_muscle_mappings().await?);
    Ok(classifier.matching(name).into_iter().cloned().collect())
  }

  async fn get_program(&self, program_id: i64) -> Result<ProgramRecord, StoreError> {
    let row = sqlx::query(
      r#"
      SELECT id, user_id, name, is_active, schedule_json, created_at
      FROM programs
      WHERE id = ?1
      "#,
    )
    .bind(program_id)
    .fetch_optional(&self.pool)
    .await?
    .ok_or(StoreError::NotFound {
      entity: "Program",
      id: program_id,
    })?;

    program_from_row(&row)
  }

  async fn get_active_program(&self, user_id: i64) -> Result<Option<ProgramRecord>, StoreError> {
    let row = sqlx::query(
      r#"
      SELECT id, user_id, name, is_active, schedule_json, created_at
      FROM programs
      WHERE user_id = ?1 AND is_active = 1
      ORDER BY created_at DESC, id DESC
      LIMIT 1
      "#,
    )
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await?;

    row.as_ref().map(program_from_row).transpose()
  }

  async fn list_muscle_groups(&self) -> Result<Vec<MuscleGroupRecord>, StoreError> {
    let groups = sqlx::query_as::<_, MuscleGroupRecord>(
      "SELECT id, name, body_region, display_name, svg_id FROM muscle_groups ORDER BY id",
    )
    .fetch_all(&self.pool)
    .await?;

    Ok(groups)
  }

  async fn list_muscle_mappings(&self) -> Result<Vec<ExerciseMuscleMapping>, StoreError> {
    let mappings = sqlx::query_as::<_, ExerciseMuscleMapping>(
      r#"
      SELECT id, exercise_name, muscle_group_id, is_primary
      FROM exercise_muscle_mappings
      ORDER BY id
      "#,
    )
    .fetch_all(&self.pool)
    .await?;

    Ok(mappings)
  }

  async fn set_exercise_muscle_groups(
    &self,
    exercise_id: i64,
    groups: &[String],
  ) -> Result<(), StoreError> {
    let json = serde_json::to_string(groups).map_err(|e| StoreError::InvalidData {
      field: "exercises.muscle_groups_json",
      reason: e.to_string(),
    })?;

    let result = sqlx::query("UPDATE exercises SET muscle_groups_json = ?1 WHERE id = ?2")
      .bind(json)
      .bind(exercise_id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(StoreError::NotFound {
        entity: "Exercise",
        id: exercise_id,
      });
    }

    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
