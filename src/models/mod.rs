pub mod exercise;
pub mod muscle;
pub mod program;
pub mod workout;

pub use exercise::ExerciseRecord;
pub use muscle::{ExerciseMuscleMapping, MuscleGroupRecord};
pub use program::ProgramRecord;
pub use workout::WorkoutRecord;
