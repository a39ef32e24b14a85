//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Seed helpers for workouts, exercises and programs
//! - Mock record factories
//! - Helper assertions

use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::SqlitePool;

use crate::models::{ExerciseMuscleMapping, ExerciseRecord, MuscleGroupRecord, WorkoutRecord};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Insert a workout. Completed workouts finish one hour after they were created.
/// Returns the new workout id
pub async fn seed_workout(
  pool: &SqlitePool,
  user_id: i64,
  completed: bool,
  created_at: DateTime<Utc>,
) -> i64 {
  let completed_at = completed.then(|| created_at + Duration::hours(1));

  sqlx::query(
    r#"
    INSERT INTO workouts (user_id, completed, completed_at, created_at)
    VALUES (?1, ?2, ?3, ?4)
    "#,
  )
  .bind(user_id)
  .bind(completed)
  .bind(completed_at)
  .bind(created_at)
  .execute(pool)
  .await
  .expect("Failed to insert test workout")
  .last_insert_rowid()
}

/// Insert an exercise into a workout. Returns the new exercise id
pub async fn seed_exercise(
  pool: &SqlitePool,
  workout_id: i64,
  name: &str,
  sets: Option<i64>,
  reps: Option<i64>,
  weight: Option<f64>,
) -> i64 {
  sqlx::query(
    r#"
    INSERT INTO exercises (workout_id, name, sets, reps, weight)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
  )
  .bind(workout_id)
  .bind(name)
  .bind(sets)
  .bind(reps)
  .bind(weight)
  .execute(pool)
  .await
  .expect("Failed to insert test exercise")
  .last_insert_rowid()
}

/// Insert a program with the given schedule. Returns the new program id
pub async fn seed_program(
  pool: &SqlitePool,
  user_id: i64,
  name: &str,
  is_active: bool,
  schedule: &serde_json::Value,
  created_at: DateTime<Utc>,
) -> i64 {
  sqlx::query(
    r#"
    INSERT INTO programs (user_id, name, is_active, schedule_json, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
  )
  .bind(user_id)
  .bind(name)
  .bind(is_active)
  .bind(schedule.to_string())
  .bind(created_at)
  .execute(pool)
  .await
  .expect("Failed to insert test program")
  .last_insert_rowid()
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// A workout record; completed exactly when `completed_at` is given
pub fn mock_workout(
  id: i64,
  user_id: i64,
  completed_at: Option<DateTime<Utc>>,
  created_at: DateTime<Utc>,
) -> WorkoutRecord {
  WorkoutRecord {
    id,
    user_id,
    completed: completed_at.is_some(),
    completed_at,
    created_at,
  }
}

pub fn mock_exercise(
  workout_id: i64,
  name: &str,
  sets: Option<i64>,
  reps: Option<i64>,
  weight: Option<f64>,
) -> ExerciseRecord {
  ExerciseRecord {
    id: workout_id * 100,
    workout_id,
    name: name.to_string(),
    sets,
    reps,
    weight,
    rpe: None,
    muscle_groups: None,
  }
}

pub fn mock_mapping(
  id: i64,
  exercise_name: &str,
  muscle_group_id: i64,
  is_primary: bool,
) -> ExerciseMuscleMapping {
  ExerciseMuscleMapping {
    id,
    exercise_name: exercise_name.to_string(),
    muscle_group_id,
    is_primary,
  }
}

/// Same ids and names as the seeded reference data
pub fn mock_muscle_groups() -> Vec<MuscleGroupRecord> {
  [
    (1, "chest", "upper", "Chest"),
    (2, "back", "upper", "Back"),
    (3, "shoulders", "upper", "Shoulders"),
    (4, "biceps", "arms", "Biceps"),
    (5, "triceps", "arms", "Triceps"),
    (6, "core", "core", "Core"),
    (7, "quadriceps", "lower", "Quadriceps"),
    (8, "hamstrings", "lower", "Hamstrings"),
    (9, "glutes", "lower", "Glutes"),
    (10, "calves", "lower", "Calves"),
  ]
  .into_iter()
  .map(|(id, name, body_region, display_name)| MuscleGroupRecord {
    id,
    name: name.to_string(),
    body_region: body_region.to_string(),
    display_name: display_name.to_string(),
    svg_id: format!("muscle-{}", name),
  })
  .collect()
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

/// Midnight UTC on the given date
pub fn datetime_at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
    .single()
    .expect("Valid test date")
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff: f64 = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    // Verify key tables exist
    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN \
       ('workouts', 'exercises', 'programs', 'muscle_groups', 'exercise_muscle_mappings')",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 5, "Expected 5 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_workout_sets_completion_pair() {
    let pool = setup_test_db().await;

    let done = seed_workout(&pool, 1, true, datetime_at(2025, 3, 1)).await;
    let open = seed_workout(&pool, 1, false, datetime_at(2025, 3, 2)).await;

    let rows: Vec<(i64, bool, Option<String>)> =
      sqlx::query_as("SELECT id, completed, completed_at FROM workouts ORDER BY id")
        .fetch_all(&pool)
        .await
        .expect("Failed to read workouts");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].0, done);
    assert!(rows[0].1 && rows[0].2.is_some());
    assert_eq!(rows[1].0, open);
    assert!(!rows[1].1 && rows[1].2.is_none());

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let open = mock_workout(1, 7, None, datetime_at(2025, 1, 1));
    assert!(!open.completed);

    let done = mock_workout(2, 7, Some(datetime_at(2025, 1, 2)), datetime_at(2025, 1, 2));
    assert!(done.completed);

    let groups = mock_muscle_groups();
    assert_eq!(groups.len(), 10);
    assert_eq!(groups[0].name, "chest");
  }
}
