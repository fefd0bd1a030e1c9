use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::GateConfig;

/// Cookie carrying the session token
pub const SESSION_COOKIE_NAME: &str = "nextpwd_token";

pub fn build_cookie<'a>(config: &GateConfig, token: String) -> Cookie<'a> {
    let max_age = i64::try_from(config.max_age).unwrap_or(i64::MAX);

    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookie)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(max_age))
        .build()
}

/// Expired, empty session cookie on path `/`, overwriting whatever the browser holds.
pub fn removal_cookie<'a>() -> Cookie<'a> {
    let mut cookie = Cookie::build(SESSION_COOKIE_NAME).path("/").build();
    cookie.make_removal();
    cookie
}
