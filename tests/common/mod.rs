#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
    routing::get,
};
use http_body_util::BodyExt;
use nextpwd::{AppState, config::GateConfig};
use tower::ServiceExt;

pub const SECRET: &str = "s3cr3t";
pub const PASSWORD: &str = "hunter2";

pub fn gate_config() -> GateConfig {
    let mut config = GateConfig::new(SECRET, PASSWORD);
    config.protected_paths = "^/(dashboard|admin)".to_string();
    config
}

/// Application routes sitting behind the gate
pub fn site() -> Router {
    Router::new()
        .route("/", get(|| async { "home" }))
        .route("/dashboard", get(|| async { "dashboard" }))
        .route("/admin/settings", get(|| async { "settings" }))
}

pub fn create_test_app(config: GateConfig) -> Router {
    let state = AppState::new(config).unwrap();
    nextpwd::router(state, site())
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn signin_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/pwd/signin")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn set_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set a cookie")
        .to_str()
        .unwrap()
        .to_string()
}

/// `name=value` pair of a Set-Cookie header, usable as a Cookie request header
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().trim().to_string()
}

/// Sign in with the test password and return the session cookie pair
pub async fn sign_in(app: &Router) -> String {
    let response = send(app, signin_request(r#"{"password":"hunter2"}"#)).await;
    cookie_pair(&set_cookie(&response))
}
