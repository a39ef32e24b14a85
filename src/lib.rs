mod cli;
mod db;

pub mod commands;
pub mod config;
pub mod logging;
pub mod models;
pub mod muscle_progress;
pub mod schedule;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use db::{initialize_db, AppState};
pub use muscle_progress::{estimate_muscle_progress, ExerciseClassifier, MuscleProgress};
pub use schedule::{resolve_todays_entry, MalformedScheduleError, TodaysWorkout};
pub use store::{StoreError, WorkoutStore};

use clap::Parser;
use tracing::error;

/// Load configuration, open the database and run the requested subcommand
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let config = config::AppConfig::from_env()?;
  logging::init(&config.logging);

  let cli = cli::Cli::parse();

  let runtime = tokio::runtime::Builder::new_multi_thread()
    .enable_all()
    .build()?;

  runtime.block_on(run_command(config, cli.command))
}

async fn run_command(
  config: config::AppConfig,
  command: cli::Command,
) -> Result<(), Box<dyn std::error::Error>> {
  let pool = db::initialize_db(&config).await?;
  let state = AppState::new(pool);

  let result = cli::execute(&state, command).await;
  state.db.close().await;

  match result {
    Ok(output) => {
      println!("{}", output);
      Ok(())
    }
    Err(e) => {
      error!("{}", e);
      Err(e.into())
    }
  }
}
