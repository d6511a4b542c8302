//! In-process store implementing both collections
//!
//! Used by the test suites and by `database.backend = "memory"` for local
//! development. Each write takes the collection's lock for the whole
//! check-and-insert, so uniqueness holds under concurrent requests.

use super::{
    ExerciseRepository, NewUser, RepositoryError, RepositoryResult, UserRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use exercisedb_shared::{Exercise, User};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct ExerciseCollection {
    items: Vec<Exercise>,
    names: HashSet<String>,
    exercise_ids: HashSet<String>,
}

/// Exercises and users held in memory
#[derive(Default)]
pub struct InMemoryStore {
    exercises: RwLock<ExerciseCollection>,
    /// Keyed by email
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExerciseRepository for InMemoryStore {
    async fn insert(&self, exercise: Exercise) -> RepositoryResult<Exercise> {
        let mut collection = self.exercises.write().await;

        if collection.exercise_ids.contains(&exercise.exercise_id) {
            return Err(RepositoryError::Duplicate("exerciseId"));
        }
        if collection.names.contains(&exercise.name) {
            return Err(RepositoryError::Duplicate("name"));
        }

        collection.exercise_ids.insert(exercise.exercise_id.clone());
        collection.names.insert(exercise.name.clone());
        collection.items.push(exercise.clone());

        Ok(exercise)
    }

    async fn list(&self, offset: u64, limit: u64) -> RepositoryResult<Vec<Exercise>> {
        let collection = self.exercises.read().await;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(collection
            .items
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.exercises.read().await.items.len() as u64)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: NewUser) -> RepositoryResult<User> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.email) {
            return Err(RepositoryError::Duplicate("email"));
        }

        let record = User {
            id: Uuid::new_v4(),
            email: user.email,
            role: user.role,
            is_activated: false,
            otp_secret: user.otp_secret,
            created_at: Utc::now(),
        };
        users.insert(record.email.clone(), record.clone());

        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exercisedb_shared::UserRole;
    use std::sync::Arc;

    fn exercise(id: &str, name: &str) -> Exercise {
        Exercise {
            exercise_id: id.to_string(),
            name: name.to_string(),
            gif_url: format!("https://example.com/{}.gif", id),
            target_muscles: vec!["abs".to_string()],
            body_parts: vec!["waist".to_string()],
            equipments: vec!["band".to_string()],
            secondary_muscles: vec![],
            instructions: vec!["Step 1".to_string()],
        }
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            role: UserRole::Member,
            otp_secret: "JBSWY3DPEHPK3PXPJBSWY3DPEHPK3PXP".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = InMemoryStore::new();
        for i in 0..5 {
            ExerciseRepository::insert(&store, exercise(&format!("id{}", i), &format!("ex {}", i)))
                .await
                .unwrap();
        }

        let page = store.list(1, 3).await.unwrap();
        let names: Vec<_> = page.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["ex 1", "ex 2", "ex 3"]);
        assert_eq!(store.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_list_past_end_is_empty() {
        let store = InMemoryStore::new();
        ExerciseRepository::insert(&store, exercise("a", "A")).await.unwrap();
        assert!(store.list(10, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let store = InMemoryStore::new();
        ExerciseRepository::insert(&store, exercise("a", "Squat")).await.unwrap();

        let err = ExerciseRepository::insert(&store, exercise("b", "Squat"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate("name")));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_exercise_id_rejected() {
        let store = InMemoryStore::new();
        ExerciseRepository::insert(&store, exercise("a", "Squat")).await.unwrap();

        let err = ExerciseRepository::insert(&store, exercise("a", "Lunge"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate("exerciseId")));
    }

    #[tokio::test]
    async fn test_user_insert_and_lookup() {
        let store = InMemoryStore::new();
        let created = UserRepository::insert(&store, new_user("a@example.com"))
            .await
            .unwrap();
        assert!(!created.is_activated);

        let found = store.find_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(store.find_by_email("b@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_registrations_have_one_winner() {
        let store = Arc::new(InMemoryStore::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    UserRepository::insert(store.as_ref(), new_user("race@example.com")).await
                })
            })
            .collect();

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(RepositoryError::Duplicate("email")) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 7);
    }
}
