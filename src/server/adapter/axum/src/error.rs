/* src/server/adapter/axum/src/error.rs */

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use plinth_server::PlinthError;

/// Newtype wrapper to implement `IntoResponse` for `PlinthError`.
/// Required because Rust's orphan rule prevents `impl IntoResponse for
/// PlinthError` when both types are foreign to this crate.
pub(crate) struct AxumError {
  err: PlinthError,
  development: bool,
}

impl AxumError {
  pub(crate) fn new(err: PlinthError, development: bool) -> Self {
    Self { err, development }
  }
}

fn escape_html(s: &str) -> String {
  s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

impl IntoResponse for AxumError {
  fn into_response(self) -> Response {
    let status =
      StatusCode::from_u16(self.err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    // Developer exception page only in development mode; production gets the
    // bare status with the error code.
    if self.development {
      let body = format!(
        "<!doctype html>\n<html>\n<head><title>{status}</title></head>\n<body>\n\
         <h1>{status}</h1>\n<h2>{code}</h2>\n<pre>{message}</pre>\n</body>\n</html>\n",
        code = escape_html(self.err.code()),
        message = escape_html(self.err.message()),
      );
      (status, Html(body)).into_response()
    } else {
      (status, self.err.code().to_string()).into_response()
    }
  }
}
