//! Commands for muscle-group progress and the body heat-map

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::db::AppState;
use crate::muscle_progress::{
  derive_muscle_groups, estimate_heatmap, estimate_muscle_progress, MuscleHeat, MuscleProgress,
  SubstringClassifier,
};
use crate::store::{load_completed_history, StoreError, WorkoutStore};

/// ---------------------------------------------------------------------------
/// Response Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct BackfillResult {
  pub scanned: usize,
  pub updated: usize,
}

/// A mapping row matched by an exercise-name lookup
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseMuscleMatch {
  pub exercise_name: String,
  pub muscle_group_id: i64,
  pub muscle_group: Option<String>,
  pub is_primary: bool,
}

/// ---------------------------------------------------------------------------
/// Store-level Operations
/// ---------------------------------------------------------------------------

async fn load_classifier<S: WorkoutStore>(store: &S) -> Result<SubstringClassifier, StoreError> {
  Ok(SubstringClassifier::new(store.list_muscle_mappings().await?))
}

/// Progress for one muscle group over the user's full completed history
pub async fn estimate_for_user<S: WorkoutStore>(
  store: &S,
  user_id: i64,
  muscle_group_id: i64,
  now: DateTime<Utc>,
) -> Result<MuscleProgress, StoreError> {
  let history = load_completed_history(store, user_id, DateTime::<Utc>::UNIX_EPOCH).await?;
  let classifier = load_classifier(store).await?;
  Ok(estimate_muscle_progress(&history, muscle_group_id, &classifier, now))
}

/// Progress for every muscle group
pub async fn heatmap_for_user<S: WorkoutStore>(
  store: &S,
  user_id: i64,
  now: DateTime<Utc>,
) -> Result<Vec<MuscleHeat>, StoreError> {
  let history = load_completed_history(store, user_id, DateTime::<Utc>::UNIX_EPOCH).await?;
  let groups = store.list_muscle_groups().await?;
  let classifier = load_classifier(store).await?;
  Ok(estimate_heatmap(&history, &groups, &classifier, now))
}

/// Fill in muscle-group tags for exercises that never had them, including
/// exercises in workouts that are still open
pub async fn backfill_for_user<S: WorkoutStore>(
  store: &S,
  user_id: i64,
) -> Result<BackfillResult, StoreError> {
  let untagged = store.list_untagged_exercises(user_id).await?;
  let groups = store.list_muscle_groups().await?;
  let classifier = load_classifier(store).await?;

  let mut result = BackfillResult { scanned: untagged.len(), updated: 0 };
  for exercise in &untagged {
    let names = derive_muscle_groups(&classifier, &groups, &exercise.name);
    store.set_exercise_muscle_groups(exercise.id, &names).await?;
    result.updated += 1;
  }

  info!(
    user_id,
    scanned = result.scanned,
    updated = result.updated,
    "Backfilled exercise muscle groups"
  );
  Ok(result)
}

/// ---------------------------------------------------------------------------
/// Commands
/// ---------------------------------------------------------------------------

pub async fn get_muscle_progress(
  state: &AppState,
  user_id: i64,
  muscle_group_id: i64,
  now: DateTime<Utc>,
) -> Result<MuscleProgress, String> {
  estimate_for_user(&state.store(), user_id, muscle_group_id, now)
    .await
    .map_err(|e| format!("Failed to estimate muscle progress: {}", e))
}

pub async fn get_muscle_heatmap(
  state: &AppState,
  user_id: i64,
  now: DateTime<Utc>,
) -> Result<Vec<MuscleHeat>, String> {
  heatmap_for_user(&state.store(), user_id, now)
    .await
    .map_err(|e| format!("Failed to build muscle heat-map: {}", e))
}

pub async fn backfill_exercise_muscle_groups(
  state: &AppState,
  user_id: i64,
) -> Result<BackfillResult, String> {
  backfill_for_user(&state.store(), user_id)
    .await
    .map_err(|e| format!("Failed to backfill muscle groups: {}", e))
}

/// Which muscle groups an exercise name maps to
pub async fn lookup_exercise_muscles(
  state: &AppState,
  name: String,
) -> Result<Vec<ExerciseMuscleMatch>, String> {
  let store = state.store();
  let mappings = store
    .find_muscle_mappings_for_exercise_name(&name)
    .await
    .map_err(|e| format!("Failed to look up exercise: {}", e))?;
  let groups = store
    .list_muscle_groups()
    .await
    .map_err(|e| format!("Failed to fetch muscle groups: {}", e))?;

  Ok(
    mappings
      .into_iter()
      .map(|m| ExerciseMuscleMatch {
        muscle_group: groups
          .iter()
          .find(|g| g.id == m.muscle_group_id)
          .map(|g| g.name.clone()),
        exercise_name: m.exercise_name,
        muscle_group_id: m.muscle_group_id,
        is_primary: m.is_primary,
      })
      .collect(),
  )
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
