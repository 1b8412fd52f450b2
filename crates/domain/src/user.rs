//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: [`UserId`] は UUID v7 をラップし、生成順にソート可能
//! - **不変性**: ユーザーは作成後に更新・削除されない
//! - **一意性なし**: 同じ `username` のユーザーを複数作成できる
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use fittrack_domain::user::{User, UserId, UserName};
//!
//! let user = User::new(UserId::new(), UserName::new("alice")?, chrono::Utc::now());
//! assert_eq!(user.username().as_str(), "alice");
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};

define_uuid_id! {
    /// ユーザー ID（一意識別子）
    ///
    /// API 上は `_id` として公開される。
    pub struct UserId { label: "ユーザー ID" }
}

define_validated_string! {
    /// ユーザー名（値オブジェクト）
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない（前後の空白はトリム）
    /// - 最大 255 文字
    pub struct UserName {
        label: "username",
        max_length: 255,
    }
}

/// ユーザーエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:         UserId,
    username:   UserName,
    created_at: DateTime<Utc>,
}

impl User {
    /// 新しいユーザーを作成する
    pub fn new(id: UserId, username: UserName, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username,
            created_at: now,
        }
    }

    /// 既存のデータから復元する
    pub fn from_db(id: UserId, username: UserName, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            username,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &UserName {
        &self.username
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
