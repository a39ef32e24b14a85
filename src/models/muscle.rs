use serde::{Deserialize, Serialize};

/// Anatomical region used for heat-map bucketing (static reference data)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MuscleGroupRecord {
  pub id: i64,
  pub name: String,
  pub body_region: String,
  pub display_name: String,
  /// Element key in the body diagram
  pub svg_id: String,
}

/// Associates a free-text exercise name with a muscle group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExerciseMuscleMapping {
  pub id: i64,
  pub exercise_name: String,
  pub muscle_group_id: i64,
  pub is_primary: bool,
}
