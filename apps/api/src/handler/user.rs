//! # ユーザーハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /api/users` - ユーザー一覧（作成順）
//! - `POST /api/users` - ユーザー作成

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use fittrack_domain::user::User;
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    extract::FormOrJson,
    usecase::{CreateUserInput, UserUseCaseImpl},
};

/// ユーザー API の共有状態
pub struct UserState {
    pub usecase: UserUseCaseImpl,
}

/// ユーザー作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
}

/// ユーザー DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserDto {
    pub username: String,
    #[serde(rename = "_id")]
    pub id:       String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            username: user.username().as_str().to_string(),
            id:       user.id().to_string(),
        }
    }
}

/// GET /api/users
///
/// ユーザーがいない場合は空配列を返す。
#[tracing::instrument(skip_all)]
pub async fn list_users(
    State(state): State<Arc<UserState>>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.usecase.list_users().await?;

    let items: Vec<UserDto> = users.iter().map(UserDto::from).collect();
    Ok(Json(items))
}

/// POST /api/users
///
/// ## レスポンス
///
/// - `200 OK`: `{username, _id}`
/// - `400 Bad Request`: username が未指定・空
#[tracing::instrument(skip_all)]
pub async fn create_user(
    State(state): State<Arc<UserState>>,
    FormOrJson(req): FormOrJson<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .usecase
        .create_user(CreateUserInput {
            username: req.username,
        })
        .await?;

    Ok(Json(UserDto::from(&user)))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use chrono::{DateTime, Utc};
    use fittrack_domain::{clock::FixedClock, user::UserId};
    use fittrack_infra::{InfraError, repository::UserRepository};
    use fittrack_shared::ErrorResponse;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    // --- スタブ ---

    /// 常に失敗するリポジトリ
    struct FailingUserRepository;

    #[async_trait]
    impl UserRepository for FailingUserRepository {
        async fn insert(&self, _user: &User) -> Result<(), InfraError> {
            Err(InfraError::unexpected("insert failed"))
        }

        async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, InfraError> {
            Err(InfraError::unexpected("find failed"))
        }

        async fn find_all(&self) -> Result<Vec<User>, InfraError> {
            Err(InfraError::unexpected("find failed"))
        }
    }

    // --- ヘルパー ---

    fn create_test_app() -> Router {
        let usecase = UserUseCaseImpl::new(
            Arc::new(FailingUserRepository),
            Arc::new(FixedClock::new(
                DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
            )),
        );

        Router::new()
            .route("/api/users", get(list_users).post(create_user))
            .with_state(Arc::new(UserState { usecase }))
    }

    async fn error_body(response: axum::response::Response) -> ErrorResponse {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_一覧取得でストアが失敗すると500() {
        let request = Request::builder()
            .uri("/api/users")
            .body(Body::empty())
            .unwrap();

        let response = create_test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_body(response).await, ErrorResponse::internal_error());
    }

    #[tokio::test]
    async fn test_作成でストアが失敗すると500() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/users")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"username":"alice"}"#))
            .unwrap();

        let response = create_test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_user_dtoは_idキーで出力される() {
        let dto = UserDto {
            username: "alice".to_string(),
            id:       "0190a7d4-0000-7000-8000-000000000000".to_string(),
        };

        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "username": "alice",
                "_id": "0190a7d4-0000-7000-8000-000000000000",
            })
        );
    }
}
