//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `PORT` | No | `3000` | ポート番号 |
//! | `STORE_BACKEND` | No | `postgres` | `postgres` または `memory` |
//! | `DATABASE_URL` | `postgres` の場合 | - | PostgreSQL 接続 URL |
//! | `CORS_ALLOW_ANY_ORIGIN` | No | `true` | 全オリジンからのアクセスを許可するか |
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use fittrack_api::config::ApiConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = ApiConfig::from_env()?;
//! ```

use std::env;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// 設定の読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("環境変数 {0} が設定されていません")]
    Missing(&'static str),

    /// 値を解釈できない
    #[error("環境変数 {name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// ストアの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL（接続 URL）
    Postgres { database_url: String },
    /// プロセス内メモリ
    Memory,
}

/// API サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host:                  String,
    /// ポート番号
    pub port:                  u16,
    /// ストアの種類
    pub store:                 StoreBackend,
    /// CORS で全オリジンを許可するか
    pub cors_allow_any_origin: bool,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の取得関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match get("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let store = match get("STORE_BACKEND").as_deref().map(str::trim) {
            None | Some("postgres") => StoreBackend::Postgres {
                database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name:  "STORE_BACKEND",
                    value: other.to_string(),
                });
            }
        };

        let cors_allow_any_origin = match get("CORS_ALLOW_ANY_ORIGIN") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                name: "CORS_ALLOW_ANY_ORIGIN",
                value,
            })?,
            None => true,
        };

        Ok(Self {
            host,
            port,
            store,
            cors_allow_any_origin,
        })
    }

    /// バインド先の `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
