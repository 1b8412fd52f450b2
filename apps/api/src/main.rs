//! # FitTrack API サーバー
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `STORE_BACKEND` | No | `postgres`（デフォルト）または `memory` |
//! | `DATABASE_URL` | `postgres` の場合 | PostgreSQL 接続 URL |
//! | `CORS_ALLOW_ANY_ORIGIN` | No | 全オリジンを許可するか（デフォルト: `true`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト） |
//!
//! ## 起動方法
//!
//! ```bash
//! # PostgreSQL
//! DATABASE_URL=postgres://... cargo run -p fittrack-api
//!
//! # インメモリ
//! STORE_BACKEND=memory cargo run -p fittrack-api
//! ```

use std::sync::Arc;

use fittrack_api::{
    app_builder::{AppOptions, build_app},
    config::{ApiConfig, StoreBackend},
};
use fittrack_domain::clock::SystemClock;
use fittrack_infra::Store;
use fittrack_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("fittrack-api");
    init_tracing(&tracing_config);
    let _tracing_guard =
        tracing::info_span!("app", service = %tracing_config.service_name).entered();

    let config = ApiConfig::from_env()?;

    tracing::info!(
        "FitTrack API サーバーを起動します: {}",
        config.bind_address()
    );

    let store = match &config.store {
        StoreBackend::Postgres { database_url } => Store::connect_postgres(database_url).await?,
        StoreBackend::Memory => {
            tracing::warn!("インメモリストアで起動します（再起動でデータは失われます）");
            Store::in_memory()
        }
    };

    let app = build_app(
        &store,
        Arc::new(SystemClock),
        AppOptions {
            cors_allow_any_origin: config.cors_allow_any_origin,
        },
    );

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!("FitTrack API サーバーが起動しました: {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("FitTrack API サーバーを停止しました");

    Ok(())
}

/// Ctrl+C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Ctrl+C を受信しました。シャットダウンします"),
        () = terminate => tracing::info!("SIGTERM を受信しました。シャットダウンします"),
    }
}
