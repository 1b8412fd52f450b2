//! ユーザー管理ユースケース

use std::sync::Arc;

use fittrack_domain::{
    clock::Clock,
    user::{User, UserId, UserName},
};
use fittrack_infra::repository::UserRepository;

use crate::error::ApiError;

/// ユーザー作成の入力
pub struct CreateUserInput {
    pub username: Option<String>,
}

/// ユーザー管理ユースケース
pub struct UserUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
    clock:           Arc<dyn Clock>,
}

impl UserUseCaseImpl {
    pub fn new(user_repository: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_repository,
            clock,
        }
    }

    /// 全ユーザーを作成順で取得する
    #[tracing::instrument(skip_all)]
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let users = self.user_repository.find_all().await?;
        tracing::debug!(count = users.len(), "登録済みユーザー数");
        Ok(users)
    }

    /// ユーザーを作成する
    ///
    /// username は前後の空白を除いて空でないこと。重複は許可する。
    #[tracing::instrument(skip_all)]
    pub async fn create_user(&self, input: CreateUserInput) -> Result<User, ApiError> {
        let username = UserName::new(input.username.unwrap_or_default())?;
        let user = User::new(UserId::new(), username, self.clock.now());

        self.user_repository.insert(&user).await?;
        tracing::info!(user_id = %user.id(), "ユーザーを作成しました");

        Ok(user)
    }
}
