//! # FitTrack API サーバー
//!
//! ユーザーと運動記録を扱う REST API。
//!
//! ```text
//! HTTP ─▶ handler ─▶ usecase ─▶ repository (PostgreSQL / メモリ)
//! ```
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - State の初期化とルーター構築
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - API エラーと HTTP レスポンスへの変換
//! - [`extract`] - JSON / フォーム両対応のボディ抽出
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`usecase`] - アプリケーションロジック

pub mod app_builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod usecase;
