//! # 運動記録ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /api/users/{_id}/exercises` - 運動記録の追加
//! - `GET /api/users/{_id}/logs` - 運動ログの取得（`from`, `to`, `limit`）
//!
//! 日付はレスポンスで `Thu Jan 05 2023` 形式に整形する。

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};
use fittrack_domain::exercise::Exercise;
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    extract::{ApiPath, ApiQuery, FormOrJson, string_or_number},
    usecase::{AddExerciseInput, ExerciseLog, ExerciseUseCaseImpl, GetExerciseLogInput},
};

/// 運動記録 API の共有状態
pub struct ExerciseState {
    pub usecase: ExerciseUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 運動記録追加リクエスト
#[derive(Debug, Deserialize)]
pub struct AddExerciseRequest {
    #[serde(default, deserialize_with = "string_or_number")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub duration:    Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub date:        Option<String>,
}

/// 運動ログのクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ExerciseLogQueryParams {
    pub from:  Option<String>,
    pub to:    Option<String>,
    pub limit: Option<String>,
}

/// 運動記録追加レスポンス
///
/// `_id` は運動記録ではなくユーザーの ID。
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AddedExerciseDto {
    pub username:    String,
    pub description: String,
    pub duration:    i32,
    pub date:        String,
    #[serde(rename = "_id")]
    pub user_id:     String,
}

impl From<&Exercise> for AddedExerciseDto {
    fn from(exercise: &Exercise) -> Self {
        Self {
            username:    exercise.username().as_str().to_string(),
            description: exercise.description().as_str().to_string(),
            duration:    exercise.duration().as_i32(),
            date:        exercise.date().to_human_string(),
            user_id:     exercise.user_id().to_string(),
        }
    }
}

/// 運動ログの 1 件
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LogEntryDto {
    pub description: String,
    pub duration:    i32,
    pub date:        String,
}

/// 運動ログレスポンス
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseLogDto {
    #[serde(rename = "_id")]
    pub id:       String,
    pub username: String,
    pub count:    usize,
    pub log:      Vec<LogEntryDto>,
}

impl From<&ExerciseLog> for ExerciseLogDto {
    fn from(log: &ExerciseLog) -> Self {
        Self {
            id:       log.user.id().to_string(),
            username: log.user.username().as_str().to_string(),
            count:    log.count(),
            log:      log
                .exercises
                .iter()
                .map(|e| LogEntryDto {
                    description: e.description().as_str().to_string(),
                    duration:    e.duration().as_i32(),
                    date:        e.date().to_human_string(),
                })
                .collect(),
        }
    }
}

// --- ハンドラ ---

/// POST /api/users/{_id}/exercises
///
/// ## レスポンス
///
/// - `200 OK`: `{username, description, duration, date, _id}`
/// - `400 Bad Request`: 不正な ID・description・duration・date
/// - `404 Not Found`: ユーザーが存在しない
#[tracing::instrument(skip_all, fields(%user_id))]
pub async fn add_exercise(
    State(state): State<Arc<ExerciseState>>,
    ApiPath(user_id): ApiPath<String>,
    FormOrJson(req): FormOrJson<AddExerciseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = AddExerciseInput {
        user_id,
        description: req.description,
        duration: req.duration,
        date: req.date,
    };

    let exercise = state.usecase.add_exercise(input).await?;

    Ok(Json(AddedExerciseDto::from(&exercise)))
}

/// GET /api/users/{_id}/logs
///
/// ## レスポンス
///
/// - `200 OK`: `{_id, username, count, log}`
/// - `400 Bad Request`: 不正な ID・from・to
/// - `404 Not Found`: ユーザーが存在しない
#[tracing::instrument(skip_all, fields(%user_id))]
pub async fn get_exercise_log(
    State(state): State<Arc<ExerciseState>>,
    ApiPath(user_id): ApiPath<String>,
    ApiQuery(params): ApiQuery<ExerciseLogQueryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let input = GetExerciseLogInput {
        user_id,
        from: params.from,
        to: params.to,
        limit: params.limit,
    };

    let log = state.usecase.get_exercise_log(input).await?;

    Ok(Json(ExerciseLogDto::from(&log)))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use fittrack_domain::{
        exercise::{Description, DurationMinutes, ExerciseDate, ExerciseId, NewExercise},
        user::{User, UserId, UserName},
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn sample() -> (User, Exercise) {
        let user = User::new(UserId::new(), UserName::new("alice").unwrap(), now());
        let exercise = Exercise::new(NewExercise {
            id:          ExerciseId::new(),
            user_id:     user.id().clone(),
            username:    user.username().clone(),
            description: Description::new("run").unwrap(),
            duration:    DurationMinutes::new(30).unwrap(),
            date:        ExerciseDate::parse("2023-01-05").unwrap(),
            now:         now(),
        });
        (user, exercise)
    }

    #[test]
    fn test_追加レスポンスの_idはユーザーid() {
        let (user, exercise) = sample();

        let dto = AddedExerciseDto::from(&exercise);

        assert_eq!(
            dto,
            AddedExerciseDto {
                username:    "alice".to_string(),
                description: "run".to_string(),
                duration:    30,
                date:        "Thu Jan 05 2023".to_string(),
                user_id:     user.id().to_string(),
            }
        );
        assert_ne!(dto.user_id, exercise.id().to_string());
    }

    #[test]
    fn test_ログレスポンスのcountはlogの件数() {
        let (user, exercise) = sample();
        let log = ExerciseLog {
            user:      user.clone(),
            exercises: vec![exercise.clone(), exercise],
        };

        let json = serde_json::to_value(ExerciseLogDto::from(&log)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "_id": user.id().to_string(),
                "username": "alice",
                "count": 2,
                "log": [
                    {"description": "run", "duration": 30, "date": "Thu Jan 05 2023"},
                    {"description": "run", "duration": 30, "date": "Thu Jan 05 2023"},
                ],
            })
        );
    }
}
