//! Command-line entry points. Each subcommand prints its result as JSON.

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::commands;
use crate::db::AppState;

#[derive(Debug, Parser)]
#[command(
  name = "workout-coach",
  version,
  about = "Program days and muscle progress from the workout log"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Today's workout from the user's active program
  Today {
    #[arg(long)]
    user: i64,
  },
  /// Current day of a specific program
  ProgramDay {
    #[arg(long)]
    program: i64,
  },
  /// Progress for one muscle group
  Muscle {
    #[arg(long)]
    user: i64,
    #[arg(long)]
    group: i64,
  },
  /// Progress for every muscle group
  Heatmap {
    #[arg(long)]
    user: i64,
  },
  /// List the muscle-group reference data
  Groups,
  /// Show which muscle groups an exercise name maps to
  Lookup {
    #[arg(long)]
    exercise: String,
  },
  /// Tag exercises that have no muscle groups yet
  Backfill {
    #[arg(long)]
    user: i64,
  },
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
  serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize output: {}", e))
}

/// Run one subcommand against the database
pub async fn execute(state: &AppState, command: Command) -> Result<String, String> {
  let now = Utc::now();
  match command {
    Command::Today { user } => to_json(&commands::program::get_todays_workout(state, user).await?),
    Command::ProgramDay { program } => {
      to_json(&commands::program::get_program_day(state, program).await?)
    }
    Command::Muscle { user, group } => {
      to_json(&commands::progress::get_muscle_progress(state, user, group, now).await?)
    }
    Command::Heatmap { user } => {
      to_json(&commands::progress::get_muscle_heatmap(state, user, now).await?)
    }
    Command::Groups => to_json(&commands::get_muscle_groups(state).await?),
    Command::Lookup { exercise } => {
      to_json(&commands::progress::lookup_exercise_muscles(state, exercise).await?)
    }
    Command::Backfill { user } => {
      to_json(&commands::progress::backfill_exercise_muscle_groups(state, user).await?)
    }
  }
}
