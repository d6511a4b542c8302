//! Exercise repository backed by PostgreSQL

use super::{ExerciseRepository, RepositoryError, RepositoryResult};
use crate::db;
use async_trait::async_trait;
use exercisedb_shared::Exercise;
use sqlx::PgPool;

/// Exercise record from database
#[derive(Debug, Clone, sqlx::FromRow)]
struct ExerciseRecord {
    exercise_id: String,
    name: String,
    gif_url: String,
    target_muscles: Vec<String>,
    body_parts: Vec<String>,
    equipments: Vec<String>,
    secondary_muscles: Vec<String>,
    instructions: Vec<String>,
}

impl From<ExerciseRecord> for Exercise {
    fn from(record: ExerciseRecord) -> Self {
        Self {
            exercise_id: record.exercise_id,
            name: record.name,
            gif_url: record.gif_url,
            target_muscles: record.target_muscles,
            body_parts: record.body_parts,
            equipments: record.equipments,
            secondary_muscles: record.secondary_muscles,
            instructions: record.instructions,
        }
    }
}

/// Translate unique violations into `Duplicate`, naming the offending field
fn map_insert_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some("exercises_exercise_id_key") => "exerciseId",
                _ => "name",
            };
            return RepositoryError::Duplicate(field);
        }
    }
    RepositoryError::Database(err)
}

/// Exercise repository
#[derive(Clone)]
pub struct PgExerciseRepository {
    pool: PgPool,
}

impl PgExerciseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExerciseRepository for PgExerciseRepository {
    async fn insert(&self, exercise: Exercise) -> RepositoryResult<Exercise> {
        let record = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            INSERT INTO exercises (exercise_id, name, gif_url, target_muscles, body_parts,
                                   equipments, secondary_muscles, instructions)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING exercise_id, name, gif_url, target_muscles, body_parts,
                      equipments, secondary_muscles, instructions
            "#,
        )
        .bind(&exercise.exercise_id)
        .bind(&exercise.name)
        .bind(&exercise.gif_url)
        .bind(&exercise.target_muscles)
        .bind(&exercise.body_parts)
        .bind(&exercise.equipments)
        .bind(&exercise.secondary_muscles)
        .bind(&exercise.instructions)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(record.into())
    }

    async fn list(&self, offset: u64, limit: u64) -> RepositoryResult<Vec<Exercise>> {
        let records = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT exercise_id, name, gif_url, target_muscles, body_parts,
                   equipments, secondary_muscles, instructions
            FROM exercises
            ORDER BY seq
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Exercise::from).collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exercises")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        db::ping(&self.pool).await?;
        Ok(())
    }
}
