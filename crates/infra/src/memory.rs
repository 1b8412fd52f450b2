//! # インメモリストア
//!
//! プロセス内に記録を保持するリポジトリ実装。`STORE_BACKEND=memory` で
//! 起動した場合と、HTTP レベルのテストで使用する。
//!
//! プロセス終了時に内容は失われる。

use std::sync::Arc;

use async_trait::async_trait;
use fittrack_domain::{
    exercise::Exercise,
    exercise_log::ExerciseLogQuery,
    user::{User, UserId},
};
use tokio::sync::RwLock;

use crate::{
    error::InfraError,
    repository::{ExerciseRepository, UserRepository},
};

// ===== InMemoryUserRepository =====

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), InfraError> {
        self.users.write().await.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.id() == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, InfraError> {
        // 挿入順 = 作成順
        Ok(self.users.read().await.clone())
    }
}

// ===== InMemoryExerciseRepository =====

#[derive(Clone, Default)]
pub struct InMemoryExerciseRepository {
    exercises: Arc<RwLock<Vec<Exercise>>>,
}

impl InMemoryExerciseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExerciseRepository for InMemoryExerciseRepository {
    async fn insert(&self, exercise: &Exercise) -> Result<(), InfraError> {
        self.exercises.write().await.push(exercise.clone());
        Ok(())
    }

    async fn find_log(&self, query: &ExerciseLogQuery) -> Result<Vec<Exercise>, InfraError> {
        let limit = query.limit.get().map_or(usize::MAX, |n| n as usize);

        Ok(self
            .exercises
            .read()
            .await
            .iter()
            .filter(|e| e.user_id() == &query.user_id && query.range.contains(e.date()))
            .take(limit)
            .cloned()
            .collect())
    }
}
