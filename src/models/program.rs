use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named training plan. `schedule` is kept as raw JSON and interpreted by
/// [`crate::schedule::Schedule::detect`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramRecord {
  pub id: i64,
  pub user_id: i64,
  pub name: String,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
  pub schedule: serde_json::Value,
}
