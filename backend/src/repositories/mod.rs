//! Persistence collections
//!
//! The `exercises` and `users` collections sit behind async traits so the
//! services never see a concrete store. Uniqueness (exercise name and id,
//! user email) is enforced by each store, not by the services.

pub mod exercise;
pub mod memory;
pub mod user;

use async_trait::async_trait;
use exercisedb_shared::{Exercise, User, UserRole};
use thiserror::Error;

pub use exercise::PgExerciseRepository;
pub use memory::InMemoryStore;
pub use user::PgUserRepository;

/// Storage failures
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// A unique constraint rejected the write; carries the client-facing field name
    #[error("duplicate value for unique field `{0}`")]
    Duplicate(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Input for creating a user; the store assigns `id` and `created_at`
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub role: UserRole,
    pub otp_secret: String,
}

#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Insert one exercise, failing with `Duplicate` on a taken name or id
    async fn insert(&self, exercise: Exercise) -> RepositoryResult<Exercise>;

    /// Up to `limit` exercises after skipping `offset`, in insertion order
    async fn list(&self, offset: u64, limit: u64) -> RepositoryResult<Vec<Exercise>>;

    async fn count(&self) -> RepositoryResult<u64>;

    async fn ping(&self) -> RepositoryResult<()>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user, failing with `Duplicate("email")` on a taken email
    async fn insert(&self, user: NewUser) -> RepositoryResult<User>;

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    async fn ping(&self) -> RepositoryResult<()>;
}
