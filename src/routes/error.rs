use axum::extract::rejection::RawPathParamsRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::locals::LocalsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("reading path parameters: {0}")]
    PathParams(#[from] RawPathParamsRejection),
    #[error("resolving locals: {0}")]
    Locals(#[from] LocalsError),
    #[error("no view named `{0}`")]
    UnknownView(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Malformed request, answered the way the extractor would.
            AppError::PathParams(rejection) => {
                tracing::debug!("rejected path parameters: {}", rejection);
                rejection.into_response()
            }
            err => {
                tracing::error!("request failed: {}", err);
                let message = format!("{}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}
