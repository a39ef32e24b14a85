use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One training session. `completed_at` is set exactly when `completed` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutRecord {
  pub id: i64,
  pub user_id: i64,
  pub completed: bool,
  pub completed_at: Option<DateTime<Utc>>,
  pub created_at: DateTime<Utc>,
}
