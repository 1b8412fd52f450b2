//! # ユースケース
//!
//! ハンドラから呼ばれるアプリケーションロジック。
//! リポジトリとクロックはトレイトオブジェクトで受け取る。

pub mod exercise;
pub mod user;

pub use exercise::{AddExerciseInput, ExerciseLog, ExerciseUseCaseImpl, GetExerciseLogInput};
pub use user::{CreateUserInput, UserUseCaseImpl};
