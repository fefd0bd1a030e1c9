use askama::Template;
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    response::Html,
};
use axum_extra::extract::CookieJar;
use nextpwd_session::{AuthError, unix_now};
use serde::Deserialize;

use super::{AppState, Success};
use crate::auth::build_cookie;
use crate::error::GateError;

pub const INVALID_PASSWORD_MESSAGE: &str = "密碼錯誤";

#[derive(Template)]
#[template(path = "signin.html")]
pub struct SignInTemplate<'a> {
    pub action: &'a str,
    pub callback_url: &'a str,
    pub error_message: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub error: Option<String>,
    #[serde(rename = "callbackURL")]
    pub callback_url: Option<String>,
}

impl PageQuery {
    pub fn has_error(&self) -> bool {
        self.error.as_deref() == Some("1")
    }
}

/// Only same-origin absolute paths may be used as post-login destinations.
///
/// Browsers drop tabs and newlines from URLs before parsing them, so any
/// control character or whitespace disqualifies the path outright.
pub fn safe_callback(raw: Option<&str>) -> &str {
    match raw {
        Some(path) if is_local_path(path) => path,
        _ => "/",
    }
}

fn is_local_path(path: &str) -> bool {
    !path.chars().any(|c| c.is_control() || c.is_whitespace())
        && path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
}

pub fn render_login_page(
    action: &str,
    error: bool,
    callback_url: Option<&str>,
) -> Result<String, askama::Error> {
    SignInTemplate {
        action,
        callback_url: safe_callback(callback_url),
        error_message: error.then_some(INVALID_PASSWORD_MESSAGE),
    }
    .render()
}

/// GET {base}/signin - Display the password form
pub async fn page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, GateError> {
    let html = render_login_page(
        &state.config.signin_path(),
        query.has_error(),
        query.callback_url.as_deref(),
    )?;

    Ok(Html(html))
}

#[derive(Deserialize)]
pub struct ActionInput {
    pub password: String,
}

/// POST {base}/signin - Check the password and set the session cookie
pub async fn action(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<ActionInput>, JsonRejection>,
) -> Result<(CookieJar, Json<Success>), GateError> {
    let Json(input) = payload.map_err(|e| GateError::BadRequest(e.body_text()))?;

    let token = match state.authenticator.authenticate(&input.password, unix_now()) {
        Ok(token) => token,
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Failed sign-in attempt (incorrect password)");
            return Err(GateError::InvalidCredentials);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(max_age = state.config.max_age, "Session issued");

    Ok((
        jar.add(build_cookie(&state.config, token)),
        Json(Success::ok()),
    ))
}
