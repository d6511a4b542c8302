//! ExerciseDB Shared Library
//!
//! Request/response types, domain models and validation rules shared by the
//! API server and its clients.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use types::*;

pub use models::{Exercise, User, UserRole};
