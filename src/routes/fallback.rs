use axum::Json;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Answers every request no route claimed, including requests whose path
/// matched but whose method has no handler.
pub async fn unmatched(method: Method, uri: Uri) -> Response {
    match method {
        Method::GET | Method::HEAD => {
            tracing::info!("unhandled get route: {}", uri);
            StatusCode::OK.into_response()
        }
        Method::POST => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "unhandled post route" })),
        )
            .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}
