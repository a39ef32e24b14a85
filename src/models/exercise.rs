use serde::{Deserialize, Serialize};

/// One exercise performed within a workout.
///
/// Numeric fields come from uncurated user input and are independently optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
  pub id: i64,
  pub workout_id: i64,
  pub name: String,
  pub sets: Option<i64>,
  pub reps: Option<i64>,
  pub weight: Option<f64>,
  pub rpe: Option<f64>,
  /// Muscle-group names; `None` until derived from the mapping table
  pub muscle_groups: Option<Vec<String>>,
}

impl ExerciseRecord {
  /// `sets * reps * weight` when all three are present, otherwise zero.
  /// Negative entries (assisted or band-weight logging) count as zero, so
  /// volume never goes below zero.
  pub fn volume(&self) -> f64 {
    match (self.sets, self.reps, self.weight) {
      (Some(sets), Some(reps), Some(weight)) if sets >= 0 && reps >= 0 && weight >= 0.0 => {
        sets as f64 * reps as f64 * weight
      }
      _ => 0.0,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn exercise(sets: Option<i64>, reps: Option<i64>, weight: Option<f64>) -> ExerciseRecord {
    ExerciseRecord {
      id: 1,
      workout_id: 1,
      name: "Bench Press".to_string(),
      sets,
      reps,
      weight,
      rpe: None,
      muscle_groups: None,
    }
  }

  #[test]
  fn test_volume_requires_all_three_fields() {
    assert_eq!(exercise(Some(3), Some(10), None).volume(), 0.0);
    assert_eq!(exercise(None, Some(10), Some(135.0)).volume(), 0.0);
    assert_eq!(exercise(Some(3), None, Some(135.0)).volume(), 0.0);
  }

  #[test]
  fn test_volume_is_exact_product() {
    assert_eq!(exercise(Some(3), Some(10), Some(135.0)).volume(), 4050.0);
    assert_eq!(exercise(Some(5), Some(5), Some(102.5)).volume(), 2562.5);
  }

  #[test]
  fn test_negative_entries_contribute_no_volume() {
    let mut pull_up = exercise(Some(3), Some(8), Some(-20.0));
    pull_up.name = "Pull-Up".to_string();
    assert_eq!(pull_up.volume(), 0.0);

    // Two negatives would otherwise multiply back to a positive total
    assert_eq!(exercise(Some(-3), Some(8), Some(-20.0)).volume(), 0.0);
  }
}
