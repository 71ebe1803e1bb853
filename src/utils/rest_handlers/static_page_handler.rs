use axum::{
    http::header,
    response::{Html, IntoResponse},
};

// Page assets are compiled into the binary.
const INDEX_HTML: &str = include_str!("../../../static/index.html");
const APP_JS: &str = include_str!("../../../static/js/app.js");
const STYLE_CSS: &str = include_str!("../../../static/css/style.css");

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn app_js_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_JS,
    )
}

pub async fn style_css_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}
