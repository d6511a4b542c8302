//! User repository backed by PostgreSQL

use super::{NewUser, RepositoryError, RepositoryResult, UserRepository};
use crate::db;
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use exercisedb_shared::{User, UserRole};
use sqlx::PgPool;
use uuid::Uuid;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRecord {
    id: Uuid,
    email: String,
    role: String,
    is_activated: bool,
    otp_secret: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRecord> for User {
    type Error = RepositoryError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let role = record
            .role
            .parse::<UserRole>()
            .map_err(|e| RepositoryError::Other(anyhow!(e)))?;

        Ok(User {
            id: record.id,
            email: record.email,
            role,
            is_activated: record.is_activated,
            otp_secret: record.otp_secret,
            created_at: record.created_at,
        })
    }
}

/// User repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: NewUser) -> RepositoryResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (id, email, role, otp_secret)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, role, is_activated, otp_secret, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(&user.otp_secret)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepositoryError::Duplicate("email")
            }
            _ => RepositoryError::Database(err),
        })?;

        record.try_into()
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, role, is_activated, otp_secret, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        record.map(User::try_from).transpose()
    }

    async fn ping(&self) -> RepositoryResult<()> {
        db::ping(&self.pool).await?;
        Ok(())
    }
}
