//! # ヘルスチェックハンドラ
//!
//! - `/health`: Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready`: Readiness Check（ストアへの疎通を確認）
//!
//! レスポンス型は [`fittrack_shared::HealthResponse`] / [`fittrack_shared::ReadinessResponse`] を参照。

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use fittrack_infra::Store;
use fittrack_shared::{CheckStatus, HealthResponse, ReadinessResponse};

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub store: Store,
}

/// ストアの疎通を確認する（タイムアウト: 5 秒）
///
/// OK → 200、失敗またはタイムアウト → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let store_status = match tokio::time::timeout(CHECK_TIMEOUT, state.store.ping()).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check: store ping failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("readiness check: store check timed out");
            CheckStatus::Error
        }
    };

    let mut checks = BTreeMap::new();
    checks.insert(state.store.backend_name().to_string(), store_status);

    let response = ReadinessResponse::from_checks(checks);
    let http_status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(response))
}
