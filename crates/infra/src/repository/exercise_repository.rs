//! # ExerciseRepository
//!
//! 運動記録の永続化と、ユーザー単位のログ検索を担当するリポジトリ。
//!
//! ログ検索は日付範囲（両端を含む）で絞り込み、記録の作成順
//! （作成日時、同時刻は ID）で返す。件数上限は順序付け後に適用する。

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use fittrack_domain::{
    exercise::{Description, DurationMinutes, Exercise, ExerciseDate, ExerciseId},
    exercise_log::ExerciseLogQuery,
    user::{UserId, UserName},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// 運動記録リポジトリトレイト
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// 運動記録を保存する
    async fn insert(&self, exercise: &Exercise) -> Result<(), InfraError>;

    /// ユーザーの運動記録を検索する
    ///
    /// 該当がなければ空の Vec を返す。ユーザーの存在確認は行わない。
    async fn find_log(&self, query: &ExerciseLogQuery) -> Result<Vec<Exercise>, InfraError>;
}

/// PostgreSQL 実装の ExerciseRepository
#[derive(Debug, Clone)]
pub struct PostgresExerciseRepository {
    pool: PgPool,
}

impl PostgresExerciseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ExerciseRow {
    id:          Uuid,
    user_id:     Uuid,
    username:    String,
    description: String,
    duration:    i32,
    date:        NaiveDate,
    created_at:  DateTime<Utc>,
}

impl TryFrom<ExerciseRow> for Exercise {
    type Error = InfraError;

    fn try_from(row: ExerciseRow) -> Result<Self, Self::Error> {
        let unexpected = |e: fittrack_domain::DomainError| InfraError::unexpected(e.to_string());

        Ok(Exercise::from_db(
            ExerciseId::from_uuid(row.id),
            UserId::from_uuid(row.user_id),
            UserName::new(row.username).map_err(unexpected)?,
            Description::new(row.description).map_err(unexpected)?,
            DurationMinutes::new(i64::from(row.duration)).map_err(unexpected)?,
            ExerciseDate::from_naive(row.date),
            row.created_at,
        ))
    }
}

#[async_trait]
impl ExerciseRepository for PostgresExerciseRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(exercise_id = %exercise.id()))]
    async fn insert(&self, exercise: &Exercise) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO exercises (
                id, user_id, username, description, duration, date, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(exercise.id().as_uuid())
        .bind(exercise.user_id().as_uuid())
        .bind(exercise.username().as_str())
        .bind(exercise.description().as_str())
        .bind(exercise.duration().as_i32())
        .bind(exercise.date().as_naive())
        .bind(exercise.created_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(user_id = %query.user_id))]
    async fn find_log(&self, query: &ExerciseLogQuery) -> Result<Vec<Exercise>, InfraError> {
        // LIMIT NULL は上限なしとして扱われる
        let rows = sqlx::query_as::<_, ExerciseRow>(
            r#"
            SELECT id, user_id, username, description, duration, date, created_at
            FROM exercises
            WHERE user_id = $1
              AND date >= $2
              AND date <= $3
            ORDER BY created_at ASC, id ASC
            LIMIT $4
            "#,
        )
        .bind(query.user_id.as_uuid())
        .bind(query.range.from().as_naive())
        .bind(query.range.to().as_naive())
        .bind(query.limit.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Exercise::try_from).collect()
    }
}
