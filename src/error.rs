use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nextpwd_session::{AuthError, SessionError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("invalid password")]
    InvalidCredentials,

    #[error("invalid request")]
    BadRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl From<AuthError> for GateError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => GateError::InvalidCredentials,
            AuthError::Session(e) => GateError::Session(e),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let (status_code, error) = match self {
            GateError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid password"),
            GateError::BadRequest(reason) => {
                tracing::debug!(%reason, "Rejected malformed sign-in payload");
                (StatusCode::BAD_REQUEST, "invalid request")
            }
            GateError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
            GateError::Session(e) => {
                tracing::error!("Session error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
            GateError::Template(e) => {
                tracing::error!("Failed to render template: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        };

        (status_code, Json(ErrorBody { error })).into_response()
    }
}
