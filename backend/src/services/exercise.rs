//! Exercise service: create and paginate the exercise catalog

use crate::error::ApiError;
use crate::repositories::{ExerciseRepository, RepositoryError};
use exercisedb_shared::{CreateExerciseRequest, Exercise, ExercisePage};
use tracing::{debug, info};

/// Exercise service
pub struct ExerciseService;

impl ExerciseService {
    /// Persist one exercise
    ///
    /// Fails with `Conflict` when the name or exercise id is already taken.
    pub async fn create_exercise(
        repo: &dyn ExerciseRepository,
        req: CreateExerciseRequest,
    ) -> Result<Exercise, ApiError> {
        let exercise = repo
            .insert(Exercise::from(req))
            .await
            .map_err(|e| match e {
                RepositoryError::Duplicate("exerciseId") => {
                    ApiError::Conflict("An exercise with this exerciseId already exists".to_string())
                }
                RepositoryError::Duplicate(_) => {
                    ApiError::Conflict("An exercise with this name already exists".to_string())
                }
                other => other.into(),
            })?;

        info!(exercise_id = %exercise.exercise_id, name = %exercise.name, "Exercise created");
        Ok(exercise)
    }

    /// One page of exercises in insertion order
    ///
    /// `limit` arrives already validated by `ExerciseListQuery`.
    pub async fn list_exercises(
        repo: &dyn ExerciseRepository,
        offset: u64,
        limit: u64,
    ) -> Result<ExercisePage, ApiError> {
        let total = repo.count().await?;
        let exercises = repo.list(offset, limit).await?;
        debug!(offset, limit, total, returned = exercises.len(), "Listed exercises");

        Ok(ExercisePage {
            current_page: Self::current_page(offset, limit),
            total_pages: Self::total_pages(total, limit),
            total_exercises: total,
            exercises,
        })
    }

    /// `floor(offset / limit) + 1`
    pub fn current_page(offset: u64, limit: u64) -> u64 {
        offset / limit.max(1) + 1
    }

    /// `ceil(total / limit)`
    pub fn total_pages(total: u64, limit: u64) -> u64 {
        total.div_ceil(limit.max(1))
    }
}
