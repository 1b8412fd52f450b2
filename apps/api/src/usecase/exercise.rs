//! # 運動記録ユースケース
//!
//! 運動記録の追加と、ユーザー単位の運動ログ取得を提供する。
//!
//! どちらの操作もユーザーの存在を先に確認し、存在しなければ
//! `NotFound` を返す。運動記録の追加は確認に失敗した場合何も保存しない。

use std::sync::Arc;

use fittrack_domain::{
    DomainError,
    clock::Clock,
    exercise::{Description, DurationMinutes, Exercise, ExerciseDate, ExerciseId, NewExercise},
    exercise_log::{DateRange, ExerciseLogQuery, LogLimit},
    user::{User, UserId},
};
use fittrack_infra::repository::{ExerciseRepository, UserRepository};

use crate::error::ApiError;

/// 運動記録追加の入力
///
/// 値はリクエストから受け取った文字列のまま。検証はユースケースで行う。
pub struct AddExerciseInput {
    pub user_id:     String,
    pub description: Option<String>,
    pub duration:    Option<String>,
    pub date:        Option<String>,
}

/// 運動ログ取得の入力
pub struct GetExerciseLogInput {
    pub user_id: String,
    pub from:    Option<String>,
    pub to:      Option<String>,
    pub limit:   Option<String>,
}

/// ユーザーと、その条件に合う運動記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseLog {
    pub user:      User,
    pub exercises: Vec<Exercise>,
}

impl ExerciseLog {
    pub fn count(&self) -> usize {
        self.exercises.len()
    }
}

/// 運動記録ユースケース
pub struct ExerciseUseCaseImpl {
    user_repository:     Arc<dyn UserRepository>,
    exercise_repository: Arc<dyn ExerciseRepository>,
    clock:               Arc<dyn Clock>,
}

impl ExerciseUseCaseImpl {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        exercise_repository: Arc<dyn ExerciseRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repository,
            exercise_repository,
            clock,
        }
    }

    /// 運動記録を追加する
    ///
    /// 1. ユーザーの存在確認
    /// 2. `date` 省略時は今日（UTC）
    /// 3. `description` / `duration` の検証
    /// 4. ユーザー名をコピーして保存
    #[tracing::instrument(skip_all, fields(user_id = %input.user_id))]
    pub async fn add_exercise(&self, input: AddExerciseInput) -> Result<Exercise, ApiError> {
        let user = self.require_user(&input.user_id).await?;

        let date = match input.date.as_deref().map(str::trim) {
            Some(date) if !date.is_empty() => ExerciseDate::parse(date)?,
            _ => ExerciseDate::from_naive(self.clock.today()),
        };
        let description = Description::new(input.description.unwrap_or_default())?;
        let duration = DurationMinutes::parse(input.duration.as_deref().unwrap_or_default())?;

        let exercise = Exercise::new(NewExercise {
            id: ExerciseId::new(),
            user_id: user.id().clone(),
            username: user.username().clone(),
            description,
            duration,
            date,
            now: self.clock.now(),
        });

        self.exercise_repository.insert(&exercise).await?;
        tracing::info!(exercise_id = %exercise.id(), "運動記録を追加しました");

        Ok(exercise)
    }

    /// 運動ログを取得する
    ///
    /// `from` / `to` は省略時 `1970-01-01` / 今日。`limit` は不正値なら無制限。
    #[tracing::instrument(skip_all, fields(user_id = %input.user_id))]
    pub async fn get_exercise_log(
        &self,
        input: GetExerciseLogInput,
    ) -> Result<ExerciseLog, ApiError> {
        let user_id = UserId::parse(&input.user_id)?;
        let range = DateRange::resolve(
            input.from.as_deref(),
            input.to.as_deref(),
            self.clock.today(),
        )?;
        let limit = LogLimit::parse(input.limit.as_deref());

        let user = self.find_user(&user_id).await?;

        let query = ExerciseLogQuery {
            user_id,
            range,
            limit,
        };
        let exercises = self.exercise_repository.find_log(&query).await?;

        Ok(ExerciseLog { user, exercises })
    }

    async fn require_user(&self, raw_id: &str) -> Result<User, ApiError> {
        let user_id = UserId::parse(raw_id)?;
        self.find_user(&user_id).await
    }

    async fn find_user(&self, user_id: &UserId) -> Result<User, ApiError> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound {
                    entity_type: "ユーザー",
                    id:          user_id.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, NaiveDate, Utc};
    use fittrack_domain::{clock::FixedClock, user::UserName};
    use fittrack_infra::memory::{InMemoryExerciseRepository, InMemoryUserRepository};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    /// 2023-06-15T12:00:00Z
    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_686_830_400, 0).unwrap()
    }

    struct Fixture {
        sut:       ExerciseUseCaseImpl,
        users:     Arc<InMemoryUserRepository>,
        exercises: Arc<InMemoryExerciseRepository>,
        alice:     User,
    }

    async fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserRepository::new());
        let exercises = Arc::new(InMemoryExerciseRepository::new());
        let alice = User::new(UserId::new(), UserName::new("alice").unwrap(), fixed_now());
        users.insert(&alice).await.unwrap();

        let sut = ExerciseUseCaseImpl::new(
            users.clone(),
            exercises.clone(),
            Arc::new(FixedClock::new(fixed_now())),
        );

        Fixture {
            sut,
            users,
            exercises,
            alice,
        }
    }

    fn add_input(
        user: &User,
        description: &str,
        duration: &str,
        date: Option<&str>,
    ) -> AddExerciseInput {
        AddExerciseInput {
            user_id:     user.id().to_string(),
            description: Some(description.to_string()),
            duration:    Some(duration.to_string()),
            date:        date.map(str::to_string),
        }
    }

    fn log_input(
        user: &User,
        from: Option<&str>,
        to: Option<&str>,
        limit: Option<&str>,
    ) -> GetExerciseLogInput {
        GetExerciseLogInput {
            user_id: user.id().to_string(),
            from:    from.map(str::to_string),
            to:      to.map(str::to_string),
            limit:   limit.map(str::to_string),
        }
    }

    async fn stored_count(fx: &Fixture) -> usize {
        let query = ExerciseLogQuery {
            user_id: fx.alice.id().clone(),
            range:   DateRange::new(
                ExerciseDate::epoch(),
                ExerciseDate::parse("2999-12-31").unwrap(),
            ),
            limit:   LogLimit::unbounded(),
        };
        fx.exercises.find_log(&query).await.unwrap().len()
    }

    #[tokio::test]
    async fn test_運動記録を追加するとユーザー名がコピーされる() {
        let fx = fixture().await;

        let exercise = fx
            .sut
            .add_exercise(add_input(&fx.alice, "run", "30", Some("2023-01-05")))
            .await
            .unwrap();

        assert_eq!(exercise.user_id(), fx.alice.id());
        assert_eq!(exercise.username(), fx.alice.username());
        assert_eq!(exercise.duration().as_i32(), 30);
        assert_eq!(exercise.date().to_human_string(), "Thu Jan 05 2023");
        assert_eq!(exercise.created_at(), fixed_now());
    }

    #[rstest]
    #[case::未指定(None)]
    #[case::空文字列(Some(""))]
    #[tokio::test]
    async fn test_date省略時は今日になる(#[case] date: Option<&str>) {
        let fx = fixture().await;

        let exercise = fx
            .sut
            .add_exercise(add_input(&fx.alice, "run", "30", date))
            .await
            .unwrap();

        assert_eq!(
            exercise.date().as_naive(),
            NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()
        );
    }

    #[tokio::test]
    async fn test_存在しないユーザーへの追加はnot_foundで何も保存しない() {
        let fx = fixture().await;
        let ghost = User::new(UserId::new(), UserName::new("ghost").unwrap(), fixed_now());

        let result = fx
            .sut
            .add_exercise(add_input(&ghost, "run", "30", None))
            .await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
        assert_eq!(stored_count(&fx).await, 0);
        assert_eq!(fx.users.find_all().await.unwrap().len(), 1);
    }

    #[rstest]
    #[case::数値でないduration("run", "thirty", None)]
    #[case::負のduration("run", "-5", None)]
    #[case::空のdescription("  ", "30", None)]
    #[case::不正な日付("run", "30", Some("2023-13-01"))]
    #[case::形式違いの日付("run", "30", Some("01/05/2023"))]
    #[tokio::test]
    async fn test_不正な入力はvalidationエラーで何も保存しない(
        #[case] description: &str,
        #[case] duration: &str,
        #[case] date: Option<&str>,
    ) {
        let fx = fixture().await;

        let result = fx
            .sut
            .add_exercise(add_input(&fx.alice, description, duration, date))
            .await;

        assert!(matches!(result, Err(ApiError::Validation(_))), "{result:?}");
        assert_eq!(stored_count(&fx).await, 0);
    }

    #[tokio::test]
    async fn test_不正な形式のユーザーidはvalidationエラー() {
        let fx = fixture().await;

        let result = fx
            .sut
            .add_exercise(AddExerciseInput {
                user_id:     "not-a-uuid".to_string(),
                description: Some("run".to_string()),
                duration:    Some("30".to_string()),
                date:        None,
            })
            .await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    async fn seed_log(fx: &Fixture) {
        for (description, date) in [
            ("a", "2023-01-01"),
            ("b", "2023-01-10"),
            ("c", "2023-01-05"),
            ("d", "2023-02-01"),
        ] {
            fx.sut
                .add_exercise(add_input(&fx.alice, description, "10", Some(date)))
                .await
                .unwrap();
        }
    }

    fn descriptions(log: &ExerciseLog) -> Vec<&str> {
        log.exercises
            .iter()
            .map(|e| e.description().as_str())
            .collect()
    }

    #[rstest]
    #[case::条件なし(None, None, None, vec!["a", "b", "c", "d"])]
    #[case::fromとtoは両端を含む(Some("2023-01-05"), Some("2023-01-10"), None, vec!["b", "c"])]
    #[case::limitで件数を制限(None, None, Some("3"), vec!["a", "b", "c"])]
    #[case::limitは範囲の絞り込み後に適用(Some("2023-01-02"), None, Some("1"), vec!["b"])]
    #[case::limitが0なら無制限(None, None, Some("0"), vec!["a", "b", "c", "d"])]
    #[case::limitが数値でなければ無制限(None, None, Some("many"), vec!["a", "b", "c", "d"])]
    #[case::fromがtoより後なら空(Some("2023-02-01"), Some("2023-01-01"), None, vec![])]
    #[tokio::test]
    async fn test_運動ログの絞り込み(
        #[case] from: Option<&str>,
        #[case] to: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] expected: Vec<&str>,
    ) {
        let fx = fixture().await;
        seed_log(&fx).await;

        let log = fx
            .sut
            .get_exercise_log(log_input(&fx.alice, from, to, limit))
            .await
            .unwrap();

        assert_eq!(descriptions(&log), expected);
        assert_eq!(log.count(), expected.len());
        assert_eq!(log.user, fx.alice);
    }

    #[tokio::test]
    async fn test_toの省略時は今日までに絞り込まれる() {
        let fx = fixture().await;
        fx.sut
            .add_exercise(add_input(&fx.alice, "past", "10", Some("2023-06-15")))
            .await
            .unwrap();
        fx.sut
            .add_exercise(add_input(&fx.alice, "future", "10", Some("2023-06-16")))
            .await
            .unwrap();

        let log = fx
            .sut
            .get_exercise_log(log_input(&fx.alice, None, None, None))
            .await
            .unwrap();

        assert_eq!(descriptions(&log), vec!["past"]);
    }

    #[tokio::test]
    async fn test_存在しないユーザーのログはnot_found() {
        let fx = fixture().await;
        let ghost = User::new(
            UserId::new(),
            UserName::new("ghost").unwrap(),
            fixed_now() - Duration::days(1),
        );

        let result = fx
            .sut
            .get_exercise_log(log_input(&ghost, None, None, None))
            .await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_不正なfromはvalidationエラー() {
        let fx = fixture().await;

        let result = fx
            .sut
            .get_exercise_log(log_input(&fx.alice, Some("yesterday"), None, None))
            .await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_同じ条件の取得は同じ結果を返す() {
        let fx = fixture().await;
        seed_log(&fx).await;

        let first = fx
            .sut
            .get_exercise_log(log_input(&fx.alice, None, None, Some("2")))
            .await
            .unwrap();
        let second = fx
            .sut
            .get_exercise_log(log_input(&fx.alice, None, None, Some("2")))
            .await
            .unwrap();

        assert_eq!(first, second);
    }
}
