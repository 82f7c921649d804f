// HTTP error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::backtrace::Backtrace;
use thiserror::Error;

use crate::database::StoreError;
use crate::templates::TemplateError;

/// Failure of a request, mapped onto a status code at the HTTP boundary.
///
/// Clients only ever see the canonical status text. The detail of a server
/// error is logged together with a backtrace and never sent in the response.
#[derive(Debug, Error)]
pub enum AppError {
    // 400 Bad Request
    #[error("bad request: {0}")]
    BadRequest(String),

    // 404 Not Found
    #[error("not found")]
    NotFound,

    // 500 Internal Server Error
    #[error(transparent)]
    Server(#[from] anyhow::Error),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    pub fn server(err: impl Into<anyhow::Error>) -> Self {
        AppError::Server(err.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NoRecord => AppError::NotFound,
            other => AppError::server(other),
        }
    }
}

impl From<TemplateError> for AppError {
    fn from(err: TemplateError) -> Self {
        AppError::server(err)
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AppError::server(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Server(err) => {
                tracing::error!("{:?}\n{}", err, Backtrace::force_capture());
            }
            AppError::BadRequest(msg) => {
                tracing::debug!("Rejected request: {}", msg);
            }
            AppError::NotFound => {}
        }

        client_error(status)
    }
}

/// Plain-text response carrying only the canonical reason phrase
pub fn client_error(status: StatusCode) -> Response {
    let body = status.canonical_reason().unwrap_or("Unknown Error");
    (status, body).into_response()
}
