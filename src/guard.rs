//! Route guard deciding pass-through vs redirect for protected paths

use axum_extra::extract::CookieJar;
use nextpwd_session::SessionKeys;
use regex::Regex;

use crate::auth::SESSION_COOKIE_NAME;

/// Query parameter carrying the originally requested path to the login page
pub const CALLBACK_PARAM: &str = "callbackURL";

/// Liveness endpoint, never guarded
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardResult {
    /// Path is not protected; nothing was checked
    NotApplicable,
    Authenticated,
    Unauthenticated { redirect_url: String },
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    protected: Regex,
    keys: SessionKeys,
    signin_path: String,
    signout_path: String,
}

impl RouteGuard {
    /// `base_path` is where the signin/signout endpoints live. Only those two
    /// endpoints stay reachable without a session; the rest of the base path is
    /// guarded like any other path.
    pub fn new(protected: Regex, keys: SessionKeys, base_path: &str) -> Self {
        let base_path = base_path.trim_end_matches('/').to_owned();

        Self {
            protected,
            keys,
            signin_path: format!("{base_path}/signin"),
            signout_path: format!("{base_path}/signout"),
        }
    }

    fn is_exempt(&self, path: &str) -> bool {
        path == HEALTH_PATH || path == self.signin_path || path == self.signout_path
    }

    pub fn is_protected(&self, path: &str) -> bool {
        !self.is_exempt(path) && self.protected.is_match(path)
    }

    /// Check a request for `path` carrying `jar` at time `now`.
    pub fn check(&self, path: &str, jar: &CookieJar, now: u64) -> GuardResult {
        if !self.is_protected(path) {
            return GuardResult::NotApplicable;
        }

        let token = jar
            .get(SESSION_COOKIE_NAME)
            .map(|cookie| cookie.value())
            .unwrap_or_default();

        match self.keys.verify(token, now) {
            Ok(_) => GuardResult::Authenticated,
            Err(e) => {
                tracing::debug!(path, error = %e, "Session rejected");
                GuardResult::Unauthenticated {
                    redirect_url: self.login_url(path),
                }
            }
        }
    }

    pub fn login_url(&self, path: &str) -> String {
        format!(
            "{}?{}={}",
            self.signin_path,
            CALLBACK_PARAM,
            urlencoding::encode(path)
        )
    }
}
