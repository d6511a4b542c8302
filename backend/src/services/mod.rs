//! Business logic services
//!
//! Services receive validated input, call exactly the repositories they need
//! and return explicit `Result`s; handlers only map those to HTTP.

pub mod exercise;
pub mod user;

pub use exercise::ExerciseService;
pub use user::UserService;
