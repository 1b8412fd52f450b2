//! # ストアハンドル
//!
//! リポジトリ群とその背後の接続を 1 つにまとめたハンドル。
//! 起動時に開き、アプリケーション状態として各ハンドラに渡し、
//! シャットダウン時に閉じる。

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    db,
    error::InfraError,
    memory::{InMemoryExerciseRepository, InMemoryUserRepository},
    repository::{
        ExerciseRepository,
        PostgresExerciseRepository,
        PostgresUserRepository,
        UserRepository,
    },
};

#[derive(Clone)]
enum Backend {
    Postgres(PgPool),
    Memory,
}

/// 開かれたストア
#[derive(Clone)]
pub struct Store {
    backend:   Backend,
    users:     Arc<dyn UserRepository>,
    exercises: Arc<dyn ExerciseRepository>,
}

impl Store {
    /// PostgreSQL に接続し、マイグレーションを適用して開く
    pub async fn connect_postgres(database_url: &str) -> Result<Self, InfraError> {
        let pool = db::create_pool(database_url).await?;
        tracing::info!("データベースに接続しました");

        db::run_migrations(&pool).await?;
        tracing::info!("マイグレーションを適用しました");

        Ok(Self::from_pool(pool))
    }

    /// 既存の接続プールから開く（マイグレーションは実行しない）
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            exercises: Arc::new(PostgresExerciseRepository::new(pool.clone())),
            backend: Backend::Postgres(pool),
        }
    }

    /// 空のインメモリストアを開く
    pub fn in_memory() -> Self {
        Self {
            backend:   Backend::Memory,
            users:     Arc::new(InMemoryUserRepository::new()),
            exercises: Arc::new(InMemoryExerciseRepository::new()),
        }
    }

    pub fn users(&self) -> Arc<dyn UserRepository> {
        Arc::clone(&self.users)
    }

    pub fn exercises(&self) -> Arc<dyn ExerciseRepository> {
        Arc::clone(&self.exercises)
    }

    /// バックエンド名（ログ・Readiness Check のキー用）
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "database",
            Backend::Memory => "memory",
        }
    }

    /// 疎通確認
    pub async fn ping(&self) -> Result<(), InfraError> {
        match &self.backend {
            Backend::Postgres(pool) => db::ping(pool).await,
            Backend::Memory => Ok(()),
        }
    }

    /// ストアを閉じる
    ///
    /// 以降のクエリは失敗する。インメモリストアでは何もしない。
    pub async fn close(&self) {
        if let Backend::Postgres(pool) = &self.backend {
            pool.close().await;
            tracing::info!("データベース接続を閉じました");
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_インメモリストアは常に疎通できる() {
        let store = Store::in_memory();

        assert!(store.ping().await.is_ok());
        assert_eq!(store.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_クローンしたハンドルは同じデータを共有する() {
        use chrono::Utc;
        use fittrack_domain::user::{User, UserId, UserName};

        let store = Store::in_memory();
        let other = store.clone();
        let user = User::new(UserId::new(), UserName::new("alice").unwrap(), Utc::now());

        store.users().insert(&user).await.unwrap();

        assert_eq!(other.users().find_all().await.unwrap(), vec![user]);
    }
}
