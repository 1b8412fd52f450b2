//! # FitTrack ドメイン層
//!
//! ユーザーと運動記録のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`user::User`], [`exercise::Exercise`]）
//! - **値オブジェクト**: 生成時に検証される不変オブジェクト（[`user::UserName`],
//!   [`exercise::DurationMinutes`], [`exercise::ExerciseDate`] など）
//! - **ドメインエラー**: 入力検証失敗・存在しないエンティティを表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//!   ↘         ↗
//!     domain
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）には一切依存しない。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use fittrack_domain::exercise::ExerciseDate;
//!
//! let date = ExerciseDate::parse("2023-01-05")?;
//! assert_eq!(date.to_human_string(), "Thu Jan 05 2023");
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod exercise;
pub mod exercise_log;
pub mod user;

pub use error::DomainError;
