//! JWT issuing and verification

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::SessionError;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub authenticated: bool,
    /// Issued at (unix seconds)
    pub iat: u64,
    /// Expiration (unix seconds), exclusive
    pub exp: u64,
}

/// Signing material derived from the shared secret, plus the session lifetime.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime_seconds: u64,
}

impl SessionKeys {
    pub fn new(secret: &str, lifetime_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        // Expiry is checked against the caller's clock in `verify`.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime_seconds,
        }
    }

    pub fn lifetime_seconds(&self) -> u64 {
        self.lifetime_seconds
    }

    /// Sign a new session token valid from `now` until `now + lifetime`.
    pub fn issue(&self, now: u64) -> Result<String, SessionError> {
        let claims = Claims {
            authenticated: true,
            iat: now,
            exp: now.saturating_add(self.lifetime_seconds),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(SessionError::Encode)
    }

    /// Check signature, claims and expiry of `token` at time `now`.
    ///
    /// A token is accepted strictly before its `exp`.
    pub fn verify(&self, token: &str, now: u64) -> Result<Claims, SessionError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(SessionError::Invalid)?;

        if now >= data.claims.exp {
            return Err(SessionError::Expired);
        }

        if !data.claims.authenticated {
            return Err(SessionError::NotAuthenticated);
        }

        Ok(data.claims)
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("secret", &"[REDACTED]")
            .field("lifetime_seconds", &self.lifetime_seconds)
            .finish()
    }
}

/// Current wall-clock time in unix seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
