pub mod program;
pub mod progress;

use crate::db::AppState;
use crate::models::MuscleGroupRecord;
use crate::store::WorkoutStore;

/// Static muscle-group reference data for the body diagram
pub async fn get_muscle_groups(state: &AppState) -> Result<Vec<MuscleGroupRecord>, String> {
  state
    .store()
    .list_muscle_groups()
    .await
    .map_err(|e| format!("Failed to fetch muscle groups: {}", e))
}
