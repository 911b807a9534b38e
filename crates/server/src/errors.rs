use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Plain-text failure body, as the place endpoints have always answered.
#[derive(Debug)]
pub struct PlainError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl PlainError {
    pub fn internal(message: &'static str) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message }
    }

    pub fn not_found() -> Self {
        Self { status: StatusCode::NOT_FOUND, message: "Place not found" }
    }
}

impl IntoResponse for PlainError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

/// Fatal problems found before the listener is bound.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
