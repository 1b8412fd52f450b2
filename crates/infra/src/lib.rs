//! # FitTrack Infrastructure
//!
//! ストアへのアクセスを担当するインフラ層。
//!
//! ## モジュール構成
//!
//! - [`db`]: PostgreSQL 接続プール・マイグレーション
//! - [`error`]: インフラ層エラー
//! - [`memory`]: インメモリのリポジトリ実装
//! - [`repository`]: リポジトリトレイトと PostgreSQL 実装
//! - [`store`]: 起動時に開き、終了時に閉じるストアハンドル

pub mod db;
pub mod error;
pub mod memory;
pub mod repository;
pub mod store;

pub use error::{InfraError, InfraErrorKind};
pub use store::Store;
