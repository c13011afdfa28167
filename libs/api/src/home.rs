use axum::response::Html;

static INDEX: &str = include_str!("home/index.html");

pub async fn get_home() -> Html<&'static str> {
    Html(INDEX)
}
