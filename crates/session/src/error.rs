use thiserror::Error;

/// Reasons a session token could not be issued or accepted.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session expired")]
    Expired,

    #[error("session is not authenticated")]
    NotAuthenticated,

    #[error("invalid session token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("failed to sign session token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid password")]
    InvalidCredentials,

    #[error(transparent)]
    Session(#[from] SessionError),
}
