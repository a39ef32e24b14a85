fn main() {
  if let Err(e) = workout_coach_lib::run() {
    eprintln!("workout-coach: {}", e);
    std::process::exit(1);
  }
}
