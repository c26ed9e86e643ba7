// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponseBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum Error {
    /// The registrar answered with a non-2xx status.
    #[error("API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The registrar could not be reached or its answer could not be decoded.
    #[error("registrar request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unsupported record type: {0}")]
    UnsupportedType(String),

    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    pub fn unsupported(record_type: impl Into<String>) -> Self {
        Error::UnsupportedType(record_type.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedRequest(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// True for failures caused by the registrar rather than by the request.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::Upstream { .. } | Error::Transport(_))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!(status = status.as_u16(), "request failed: {}", self);

        let msg = match &self {
            Error::MalformedRequest(msg) => msg.clone(),
            _ => "internal server error".into(),
        };

        let body = Json(ErrorResponseBody { error: msg });
        (status, body).into_response()
    }
}
