//! Muscle-group progress for the body heat-map
//!
//! Each muscle group is scored on its own (no cross-group normalization):
//! - frequency: matching exercise occurrences, not distinct workouts
//! - volume: sum of sets * reps * weight where all three were logged
//! - recency: linear decay to zero over 14 days
//! - intensity: 0.7 * frequency score + 0.3 * recency score

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ExerciseMuscleMapping, ExerciseRecord, MuscleGroupRecord, WorkoutRecord};

const MS_PER_DAY: i64 = 86_400_000;
const RECENCY_WINDOW_DAYS: f64 = 14.0;
const FREQUENCY_CAP: f64 = 10.0;
const FREQUENCY_WEIGHT: f64 = 0.7;
const RECENCY_WEIGHT: f64 = 0.3;

/// Reported in place of a day count when the group has never been trained
pub const NEVER_WORKED_DAYS: i64 = 999;

// ---------------------------------------------------------------------------
/// Exercise Classification
// ---------------------------------------------------------------------------

/// Maps a free-text exercise name to the muscle groups it trains
pub trait ExerciseClassifier {
    /// One muscle-group id per matching mapping row. Duplicates are kept: an
    /// exercise matched by two rows for the same group is counted twice.
    fn muscle_group_ids(&self, exercise_name: &str) -> Vec<i64>;
}

/// Case-insensitive substring lookup: a mapping matches when its stored
/// exercise name contains the queried name.
#[derive(Debug, Clone, Default)]
pub struct SubstringClassifier {
    mappings: Vec<(String, ExerciseMuscleMapping)>,
}

impl SubstringClassifier {
    pub fn new(mappings: Vec<ExerciseMuscleMapping>) -> Self {
        Self {
            mappings: mappings
                .into_iter()
                .map(|m| (m.exercise_name.to_lowercase(), m))
                .collect(),
        }
    }

    /// Mapping rows matching the name, in table order
    pub fn matching(&self, exercise_name: &str) -> Vec<&ExerciseMuscleMapping> {
        let query = exercise_name.trim().to_lowercase();
        // A blank name would be a substring of every row
        if query.is_empty() {
            return Vec::new();
        }
        self.mappings
            .iter()
            .filter(|(stored, _)| stored.contains(&query))
            .map(|(_, mapping)| mapping)
            .collect()
    }
}

impl ExerciseClassifier for SubstringClassifier {
    fn muscle_group_ids(&self, exercise_name: &str) -> Vec<i64> {
        self.matching(exercise_name)
            .into_iter()
            .map(|m| m.muscle_group_id)
            .collect()
    }
}

/// Distinct muscle-group names for an exercise, used to fill in
/// `ExerciseRecord::muscle_groups` when it was never set.
pub fn derive_muscle_groups<C: ExerciseClassifier>(
    classifier: &C,
    groups: &[MuscleGroupRecord],
    exercise_name: &str,
) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for id in classifier.muscle_group_ids(exercise_name) {
        if let Some(group) = groups.iter().find(|g| g.id == id) {
            if !names.contains(&group.name) {
                names.push(group.name.clone());
            }
        }
    }
    names
}

// ---------------------------------------------------------------------------
/// Progress Computation
// ---------------------------------------------------------------------------

/// A workout together with its logged exercises
#[derive(Debug, Clone)]
pub struct CompletedWorkout {
    pub workout: WorkoutRecord,
    pub exercises: Vec<ExerciseRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleProgress {
    pub frequency: u32,
    pub volume: f64,
    pub last_worked: Option<DateTime<Utc>>,
    /// 0.0 (untrained) to 1.0 (frequent and recent)
    pub intensity: f64,
}

impl MuscleProgress {
    pub fn empty() -> Self {
        Self {
            frequency: 0,
            volume: 0.0,
            last_worked: None,
            intensity: 0.0,
        }
    }
}

/// Whole days between `last_worked` and `now`, floored. Timestamps in the
/// future count as today.
pub fn days_since(last_worked: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    match last_worked {
        Some(last) => (now - last).num_milliseconds().div_euclid(MS_PER_DAY).max(0),
        None => NEVER_WORKED_DAYS,
    }
}

pub fn recency_score(days_since_last_worked: i64) -> f64 {
    (1.0 - days_since_last_worked as f64 / RECENCY_WINDOW_DAYS).clamp(0.0, 1.0)
}

pub fn frequency_score(frequency: u32) -> f64 {
    (frequency as f64 / FREQUENCY_CAP).min(1.0)
}

pub fn intensity(frequency: u32, days_since_last_worked: i64) -> f64 {
    FREQUENCY_WEIGHT * frequency_score(frequency)
        + RECENCY_WEIGHT * recency_score(days_since_last_worked)
}

/// Aggregate training signals for one muscle group over a user's history.
/// Workouts not flagged completed are skipped.
pub fn estimate_muscle_progress<C: ExerciseClassifier>(
    history: &[CompletedWorkout],
    muscle_group_id: i64,
    classifier: &C,
    now: DateTime<Utc>,
) -> MuscleProgress {
    let mut frequency: u32 = 0;
    let mut volume = 0.0;
    let mut last_worked: Option<DateTime<Utc>> = None;

    for item in history.iter().filter(|w| w.workout.completed) {
        for exercise in &item.exercises {
            let hits = classifier
                .muscle_group_ids(&exercise.name)
                .into_iter()
                .filter(|id| *id == muscle_group_id)
                .count();

            for _ in 0..hits {
                frequency += 1;
                volume += exercise.volume();
                if let Some(completed_at) = item.workout.completed_at {
                    last_worked =
                        Some(last_worked.map_or(completed_at, |prev| prev.max(completed_at)));
                }
            }
        }
    }

    if frequency == 0 {
        return MuscleProgress::empty();
    }

    MuscleProgress {
        frequency,
        volume,
        last_worked,
        intensity: intensity(frequency, days_since(last_worked, now)),
    }
}

/// One heat-map cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleHeat {
    pub muscle_group: MuscleGroupRecord,
    #[serde(flatten)]
    pub progress: MuscleProgress,
}

/// Progress for every muscle group, in the order given
pub fn estimate_heatmap<C: ExerciseClassifier>(
    history: &[CompletedWorkout],
    groups: &[MuscleGroupRecord],
    classifier: &C,
    now: DateTime<Utc>,
) -> Vec<MuscleHeat> {
    groups
        .iter()
        .map(|group| MuscleHeat {
            muscle_group: group.clone(),
            progress: estimate_muscle_progress(history, group.id, classifier, now),
        })
        .collect()
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
