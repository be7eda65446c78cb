//! HTTP-facing errors.
//!
//! Missing snippets become 404; every other failure becomes a bare 500 with
//! the detail kept in the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The route matched but the resource does not exist.
    #[error("NOT_FOUND")]
    NotFound,

    #[error(transparent)]
    Core(#[from] snippety_core::Error),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Core(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            ServerError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let reason = status.canonical_reason().unwrap_or("Error");
        (status, reason).into_response()
    }
}
