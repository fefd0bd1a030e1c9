//! Session token contract for the password gate.
//!
//! A session is a signed HS256 token carrying `{authenticated: true}` and an
//! expiry. There is no user identity: the only question a token answers is
//! whether its bearer once presented the shared password.

mod error;
mod password;
mod token;

pub use error::{AuthError, SessionError};
pub use password::Password;
pub use token::{Claims, SessionKeys, unix_now};

/// Checks the shared password and mints session tokens on success.
#[derive(Debug, Clone)]
pub struct Authenticator {
    password: Password,
    keys: SessionKeys,
}

impl Authenticator {
    pub fn new(password: Password, keys: SessionKeys) -> Self {
        Self { password, keys }
    }

    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    /// Compare `candidate` against the configured password and, when it
    /// matches, issue a token valid from `now` for the configured lifetime.
    pub fn authenticate(&self, candidate: &str, now: u64) -> Result<String, AuthError> {
        if !self.password.matches(candidate) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(self.keys.issue(now)?)
    }
}
