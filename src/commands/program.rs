//! Commands for resolving today's workout from a training program

use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::db::AppState;
use crate::models::ProgramRecord;
use crate::schedule::{resolve_todays_entry, DayEntry, TodaysWorkout};
use crate::store::{count_completed_since, StoreError, WorkoutStore};

/// ---------------------------------------------------------------------------
/// Response Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TodaysWorkoutResponse {
  pub program_id: Option<i64>,
  pub program_name: Option<String>,
  pub workout: TodaysWorkout,
  /// 1-based position for "day N of M"
  pub day_number: u64,
  pub total_days: u64,
  pub completed_since_start: u64,
  /// True when the default workout was substituted
  pub is_fallback: bool,
}

/// Substituted when there is no active program or its schedule can't be read
pub fn default_workout() -> DayEntry {
  DayEntry(json!({
    "name": "Full Body Workout",
    "description": "A balanced session covering every major muscle group",
    "exercises": [
      { "name": "Back Squat", "sets": 3, "reps": 10 },
      { "name": "Bench Press", "sets": 3, "reps": 10 },
      { "name": "Barbell Row", "sets": 3, "reps": 10 },
      { "name": "Overhead Press", "sets": 3, "reps": 10 },
      { "name": "Plank", "sets": 3, "reps": 1 }
    ]
  }))
}

fn fallback_response(
  program: Option<&ProgramRecord>,
  completed_since_start: u64,
) -> TodaysWorkoutResponse {
  TodaysWorkoutResponse {
    program_id: program.map(|p| p.id),
    program_name: program.map(|p| p.name.clone()),
    workout: TodaysWorkout::Workout {
      entry: default_workout(),
      day_index: 0,
      cycle_length: 1,
    },
    day_number: 1,
    total_days: 1,
    completed_since_start,
    is_fallback: true,
  }
}

/// ---------------------------------------------------------------------------
/// Resolution
/// ---------------------------------------------------------------------------

/// Resolve today's entry for a program, counting only workouts the owner
/// completed since the program was created. Switching programs restarts the cycle.
pub async fn todays_workout_for_program<S: WorkoutStore>(
  store: &S,
  program: &ProgramRecord,
) -> Result<TodaysWorkoutResponse, StoreError> {
  let completed = count_completed_since(store, program.user_id, program.created_at).await?;

  match resolve_todays_entry(&program.schedule, completed) {
    Ok(workout) => Ok(TodaysWorkoutResponse {
      program_id: Some(program.id),
      program_name: Some(program.name.clone()),
      day_number: workout.day_index() + 1,
      total_days: workout.cycle_length(),
      workout,
      completed_since_start: completed,
      is_fallback: false,
    }),
    Err(e) => {
      warn!(
        program_id = program.id,
        error = %e,
        "Unreadable program schedule, using default workout"
      );
      Ok(fallback_response(Some(program), completed))
    }
  }
}

/// Today's workout for a user's active program
pub async fn todays_workout_for_user<S: WorkoutStore>(
  store: &S,
  user_id: i64,
) -> Result<TodaysWorkoutResponse, StoreError> {
  match store.get_active_program(user_id).await? {
    Some(program) => todays_workout_for_program(store, &program).await,
    None => {
      info!(user_id, "No active program, using default workout");
      Ok(fallback_response(None, 0))
    }
  }
}

/// ---------------------------------------------------------------------------
/// Commands
/// ---------------------------------------------------------------------------

/// Get today's workout from the user's active program
pub async fn get_todays_workout(
  state: &AppState,
  user_id: i64,
) -> Result<TodaysWorkoutResponse, String> {
  todays_workout_for_user(&state.store(), user_id)
    .await
    .map_err(|e| format!("Failed to resolve today's workout: {}", e))
}

/// Get the current day of a specific program
pub async fn get_program_day(
  state: &AppState,
  program_id: i64,
) -> Result<TodaysWorkoutResponse, String> {
  let store = state.store();
  let program = store
    .get_program(program_id)
    .await
    .map_err(|e| format!("Failed to load program: {}", e))?;

  todays_workout_for_program(&store, &program)
    .await
    .map_err(|e| format!("Failed to resolve program day: {}", e))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
