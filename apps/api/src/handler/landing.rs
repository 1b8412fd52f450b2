//! トップページ
//!
//! 3 つの操作を試せる HTML フォームをバイナリに埋め込んで返す。

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
