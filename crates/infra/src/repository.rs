//! # リポジトリ実装
//!
//! ユースケース層が利用するリポジトリトレイトと、その PostgreSQL 実装を提供する。
//! インメモリ実装は [`crate::memory`] にある。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイト（`Arc<dyn ...>`）にのみ依存する
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: インメモリ実装に差し替えて HTTP テストを実行できる

pub mod exercise_repository;
pub mod user_repository;

pub use exercise_repository::{ExerciseRepository, PostgresExerciseRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
