use axum::response::Html;

/// The single-page frontend, embedded at compile time.
static INDEX_HTML: &str = include_str!("../../static/index.html");

pub async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}
