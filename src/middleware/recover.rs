use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use std::any::Any;

use super::headers::insert_security_headers;
use crate::error::AppError;

/// Last-resort handler for panics escaping a handler or inner middleware.
///
/// The panic becomes a logged server error and the connection is closed
/// after the response, since its state can no longer be trusted. The
/// security headers stage never sees this response, so they are added here.
pub fn recover_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    let mut response = AppError::server(anyhow::anyhow!("handler panicked: {}", detail)).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONNECTION, HeaderValue::from_static("close"));
    insert_security_headers(headers);
    response
}
