//! # ドメイン層エラー定義
//!
//! 入力検証の失敗や、参照先エンティティが存在しない状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//!
//! ## 使用例
//!
//! ```rust
//! use fittrack_domain::DomainError;
//!
//! fn find_user(id: &str) -> Result<(), DomainError> {
//!     Err(DomainError::NotFound {
//!         entity_type: "User",
//!         id:          id.to_string(),
//!     })
//! }
//!
//! assert!(find_user("u-1").is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、ステータスコード付きのレスポンスに変換する。
/// 成功レスポンスの本文にエラーメッセージを埋め込むことはしない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// - 必須フィールドが未入力（username, description, duration）
    /// - 数値でない duration
    /// - `YYYY-MM-DD` でない日付
    /// - UUID でない ID
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// エンティティが見つからない
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"User" など）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },
}
