//! # HTTP リクエストハンドラ
//!
//! ```text
//! handler.rs
//! └── handler/
//!     ├── exercise.rs  # 運動記録の追加・ログ取得
//!     ├── health.rs    # Liveness / Readiness
//!     ├── landing.rs   # トップページ
//!     └── user.rs      # ユーザー一覧・作成
//! ```
//!
//! ハンドラは薄く保ち、検証とストア操作はユースケースに委譲する。

pub mod exercise;
pub mod health;
pub mod landing;
pub mod user;

pub use exercise::{ExerciseState, add_exercise, get_exercise_log};
pub use health::{ReadinessState, health_check, readiness_check};
pub use landing::index;
pub use user::{UserState, create_user, list_users};
