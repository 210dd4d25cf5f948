use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

fn handle_panic(error: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = error.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = error.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };

    tracing::error!("handler panicked: {}", message);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

pub fn middleware() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(handle_panic)
}
