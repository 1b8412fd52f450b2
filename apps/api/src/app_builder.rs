//! # アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` はストアの初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use fittrack_domain::clock::Clock;
use fittrack_infra::Store;
use fittrack_shared::canonical_log::CanonicalLogLineLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handler::{
        ExerciseState,
        ReadinessState,
        UserState,
        add_exercise,
        create_user,
        get_exercise_log,
        health_check,
        index,
        list_users,
        readiness_check,
    },
    usecase::{ExerciseUseCaseImpl, UserUseCaseImpl},
};

/// ルーター構築時のオプション
#[derive(Debug, Clone, Copy)]
pub struct AppOptions {
    /// 全オリジンからの CORS リクエストを許可する
    pub cors_allow_any_origin: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            cors_allow_any_origin: true,
        }
    }
}

/// State の構築とルーター定義を行う
///
/// 開かれたストアとクロックを受け取り、ユースケース → State → Router の
/// 順に組み立てる。
pub fn build_app(store: &Store, clock: Arc<dyn Clock>, options: AppOptions) -> Router {
    let user_state = Arc::new(UserState {
        usecase: UserUseCaseImpl::new(store.users(), clock.clone()),
    });
    let exercise_state = Arc::new(ExerciseState {
        usecase: ExerciseUseCaseImpl::new(store.users(), store.exercises(), clock),
    });
    let readiness_state = Arc::new(ReadinessState {
        store: store.clone(),
    });

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(readiness_state)
        .route("/api/users", get(list_users).post(create_user))
        .with_state(user_state)
        .route("/api/users/{user_id}/exercises", post(add_exercise))
        .route("/api/users/{user_id}/logs", get(get_exercise_log))
        .with_state(exercise_state)
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http());

    if options.cors_allow_any_origin {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
