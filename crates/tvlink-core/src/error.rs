use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Implemented by service error enums so they share one JSON body shape:
/// `{"success": false, "kind": "...", "message": "..."}`.
pub trait ErrorKind: std::fmt::Display {
    fn kind(&self) -> &'static str;
    fn status(&self) -> StatusCode;
}

/// Render any [`ErrorKind`] as a JSON response.
///
/// Only 5xx are logged here. TraceLayer already records method/uri/status for
/// every request.
pub fn json_error<E: ErrorKind + std::fmt::Debug>(error: &E) -> Response {
    let status = error.status();
    if status.is_server_error() {
        tracing::error!(error = ?error, kind = error.kind(), "internal error");
    }
    let body = serde_json::json!({
        "success": false,
        "kind": error.kind(),
        "message": error.to_string(),
    });
    (status, axum::Json(body)).into_response()
}
