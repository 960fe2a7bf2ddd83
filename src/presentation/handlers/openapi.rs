use axum::http::header;
use axum::response::IntoResponse;

const OPENAPI_DOCUMENT: &str = include_str!("../../../openapi.json");

pub async fn openapi_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], OPENAPI_DOCUMENT)
}
