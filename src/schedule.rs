//! Program Day Resolution
//!
//! Picks "today's" entry from a program schedule by cycling through it with
//! the number of workouts completed since the program was created.
//!
//! Key principles:
//! - Count-driven, not calendar-driven (skipped days don't advance the cycle)
//! - Pure: same schedule + same count = same day, no writes
//! - Programs repeat indefinitely (strict modulo, no terminal state)
//!
//! Accepted schedule shapes, detected in this order:
//! 1. `{ "days": [...] }`
//! 2. `{ "weeks": [ { "days": [...] }, ... ] }`
//! 3. `{ "0": {...}, "1": {...}, ... }` keyed by numeric strings

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

const DAYS_PER_WEEK: u64 = 7;

// ---------------------------------------------------------------------------
/// Errors
// ---------------------------------------------------------------------------

/// The schedule cannot produce a day. Callers decide whether to substitute a default workout.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MalformedScheduleError {
    #[error("schedule is not a JSON object")]
    NotAnObject,

    #[error("schedule matches no recognized shape (days, weeks, or numeric day keys)")]
    UnrecognizedShape,

    #[error("schedule has no days to cycle through")]
    EmptyCycle,
}

// ---------------------------------------------------------------------------
/// Schedule Shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Schedule {
    /// Flat list of days, cycled in order
    ArrayDays(Vec<Value>),
    /// Weeks of up to seven days; missing days are rest days
    WeeklyNested(Vec<Vec<Value>>),
    /// Numeric day keys, sorted numerically
    IndexedMap(Vec<(u64, Value)>),
}

impl Schedule {
    /// Classify a raw schedule value. Shape order matters: a value with both
    /// `days` and `weeks` is treated as a flat day list.
    pub fn detect(value: &Value) -> Result<Self, MalformedScheduleError> {
        let obj = value.as_object().ok_or(MalformedScheduleError::NotAnObject)?;

        if let Some(days) = obj.get("days").and_then(Value::as_array) {
            return Ok(Schedule::ArrayDays(days.clone()));
        }

        if let Some(weeks) = obj.get("weeks").and_then(Value::as_array) {
            let weeks = weeks
                .iter()
                .map(|week| {
                    week.get("days")
                        .and_then(Value::as_array)
                        .cloned()
                        .unwrap_or_default()
                })
                .collect();
            return Ok(Schedule::WeeklyNested(weeks));
        }

        let mut keyed: Vec<(u64, Value)> = obj
            .iter()
            .filter_map(|(key, entry)| {
                key.trim()
                    .parse::<u64>()
                    .ok()
                    .map(|idx| (idx, entry.clone()))
            })
            .collect();

        if keyed.is_empty() {
            return Err(MalformedScheduleError::UnrecognizedShape);
        }

        keyed.sort_by_key(|(idx, _)| *idx);
        Ok(Schedule::IndexedMap(keyed))
    }

    /// Number of completed workouts before the schedule repeats
    pub fn cycle_length(&self) -> u64 {
        match self {
            Schedule::ArrayDays(days) => days.len() as u64,
            Schedule::WeeklyNested(weeks) => {
                if weeks.iter().all(Vec::is_empty) {
                    0
                } else {
                    weeks.len() as u64 * DAYS_PER_WEEK
                }
            }
            Schedule::IndexedMap(keyed) => keyed.len() as u64,
        }
    }

    /// Select the entry for the given completed-workout count
    pub fn resolve(&self, completed_count: u64) -> Result<TodaysWorkout, MalformedScheduleError> {
        let cycle_length = self.cycle_length();
        if cycle_length == 0 {
            return Err(MalformedScheduleError::EmptyCycle);
        }

        let (day_index, entry) = match self {
            Schedule::ArrayDays(days) => {
                let idx = completed_count % cycle_length;
                (idx, days.get(idx as usize))
            }
            Schedule::WeeklyNested(weeks) => {
                let week_idx = (completed_count / DAYS_PER_WEEK) % weeks.len() as u64;
                let day_idx = completed_count % DAYS_PER_WEEK;
                let entry = weeks[week_idx as usize].get(day_idx as usize);
                (week_idx * DAYS_PER_WEEK + day_idx, entry)
            }
            Schedule::IndexedMap(keyed) => {
                let idx = completed_count % cycle_length;
                (idx, keyed.get(idx as usize).map(|(_, entry)| entry))
            }
        };

        Ok(match entry {
            Some(entry) if !is_rest_day(entry) => TodaysWorkout::Workout {
                entry: DayEntry(entry.clone()),
                day_index,
                cycle_length,
            },
            _ => TodaysWorkout::RestDay {
                day_index,
                cycle_length,
            },
        })
    }
}

/// Detect the schedule shape and pick today's entry in one step
pub fn resolve_todays_entry(
    schedule: &Value,
    completed_count: u64,
) -> Result<TodaysWorkout, MalformedScheduleError> {
    Schedule::detect(schedule)?.resolve(completed_count)
}

/// An entry is a rest day when it is null, the string "rest", or carries a
/// `rest`/`isRest`/`isRestDay` flag or `"type": "rest"`.
fn is_rest_day(entry: &Value) -> bool {
    match entry {
        Value::Null => true,
        Value::String(s) => s.trim().eq_ignore_ascii_case("rest"),
        Value::Object(obj) => {
            let flagged = ["rest", "isRest", "isRestDay"]
                .iter()
                .any(|key| obj.get(*key).and_then(Value::as_bool).unwrap_or(false));
            let typed = obj
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|t| t.eq_ignore_ascii_case("rest"));
            flagged || typed
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
/// Resolved Day
// ---------------------------------------------------------------------------

/// A schedule entry. Opaque JSON with accessors for the fields the UI reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayEntry(pub Value);

impl DayEntry {
    pub fn name(&self) -> Option<&str> {
        ["name", "title", "focus"]
            .iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_str))
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get("description").and_then(Value::as_str)
    }

    pub fn exercises(&self) -> &[Value] {
        self.0
            .get("exercises")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TodaysWorkout {
    Workout {
        entry: DayEntry,
        day_index: u64,
        cycle_length: u64,
    },
    RestDay {
        day_index: u64,
        cycle_length: u64,
    },
}

impl TodaysWorkout {
    pub fn day_index(&self) -> u64 {
        match self {
            Self::Workout { day_index, .. } | Self::RestDay { day_index, .. } => *day_index,
        }
    }

    pub fn cycle_length(&self) -> u64 {
        match self {
            Self::Workout { cycle_length, .. } | Self::RestDay { cycle_length, .. } => {
                *cycle_length
            }
        }
    }

    pub fn entry(&self) -> Option<&DayEntry> {
        match self {
            Self::Workout { entry, .. } => Some(entry),
            Self::RestDay { .. } => None,
        }
    }

    pub fn is_rest_day(&self) -> bool {
        matches!(self, Self::RestDay { .. })
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
