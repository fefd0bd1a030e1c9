//! Route guard in front of application routes

use axum::http::{StatusCode, header};
use nextpwd::config::GateConfig;
use nextpwd_session::{SessionKeys, unix_now};

mod common;

use common::*;

fn location(response: &axum::http::Response<axum::body::Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn test_protected_path_without_session_redirects_to_signin() {
    let app = create_test_app(gate_config());

    let response = send(&app, get_request("/dashboard", None)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/api/pwd/signin?callbackURL=%2Fdashboard"
    );
}

#[tokio::test]
async fn test_redirect_preserves_nested_path() {
    let app = create_test_app(gate_config());

    let response = send(&app, get_request("/admin/settings?tab=1", None)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/api/pwd/signin?callbackURL=%2Fadmin%2Fsettings"
    );
}

#[tokio::test]
async fn test_session_from_signin_is_accepted() {
    let app = create_test_app(gate_config());
    let session = sign_in(&app).await;

    let response = send(&app, get_request("/dashboard", Some(&session))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "dashboard");
}

#[tokio::test]
async fn test_unprotected_path_ignores_cookies() {
    let app = create_test_app(gate_config());

    let response = send(&app, get_request("/", Some("nextpwd_token=garbage"))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "home");
}

#[tokio::test]
async fn test_tampered_session_redirects() {
    let app = create_test_app(gate_config());
    let session = format!("{}x", sign_in(&app).await);

    let response = send(&app, get_request("/dashboard", Some(&session))).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_expired_session_redirects() {
    let app = create_test_app(gate_config());
    let token = SessionKeys::new(SECRET, 1200)
        .issue(unix_now() - 1300)
        .unwrap();

    let response = send(
        &app,
        get_request("/dashboard", Some(&format!("nextpwd_token={token}"))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_session_signed_with_other_secret_redirects() {
    let app = create_test_app(gate_config());
    let token = SessionKeys::new("another-secret", 1200)
        .issue(unix_now())
        .unwrap();

    let response = send(
        &app,
        get_request("/dashboard", Some(&format!("nextpwd_token={token}"))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_signout_then_guard_redirects() {
    let app = create_test_app(gate_config());
    let session = sign_in(&app).await;

    let response = send(
        &app,
        axum::http::Request::builder()
            .method("POST")
            .uri("/api/pwd/signout")
            .header(header::COOKIE, &session)
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await;
    // The browser replaces the session with the removal cookie
    let cleared = cookie_pair(&set_cookie(&response));
    assert_eq!(cleared, "nextpwd_token=");

    let response = send(&app, get_request("/dashboard", Some(&cleared))).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_catch_all_pattern_leaves_gate_endpoints_open() {
    let app = create_test_app(GateConfig::new(SECRET, PASSWORD));

    let response = send(&app, get_request("/api/pwd/signin", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, get_request("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, get_request("/", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/pwd/signin?callbackURL=%2F");
}

#[tokio::test]
async fn test_guard_covers_unrouted_paths() {
    let app = create_test_app(gate_config());

    let response = send(&app, get_request("/dashboard/missing", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let session = sign_in(&app).await;
    let response = send(&app, get_request("/dashboard/missing", Some(&session))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_custom_base_path() {
    let mut config = gate_config();
    config.base_path = "/auth/".to_string();
    let app = create_test_app(config);

    let response = send(&app, get_request("/dashboard", None)).await;
    assert_eq!(location(&response), "/auth/signin?callbackURL=%2Fdashboard");

    let response = send(&app, get_request("/auth/signin", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

const UNROUTED_GATE_PATHS: [&str; 4] = [
    "/api/pwd",
    "/api/pwd/",
    "/api/pwd/signin/extra",
    "/api/pwd/a/b",
];

#[tokio::test]
async fn test_rest_of_base_path_is_guarded() {
    let app = create_test_app(GateConfig::new(SECRET, PASSWORD));

    for uri in UNROUTED_GATE_PATHS {
        let response = send(&app, get_request(uri, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
    }

    let session = sign_in(&app).await;
    for uri in UNROUTED_GATE_PATHS {
        let response = send(&app, get_request(uri, Some(&session))).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{uri}");
    }
}

#[tokio::test]
async fn test_base_path_never_reaches_the_site() {
    let site = axum::Router::new().fallback(|| async { "site file" });
    let app = nextpwd::router(nextpwd::AppState::new(gate_config()).unwrap(), site);

    for uri in UNROUTED_GATE_PATHS {
        let response = send(&app, get_request(uri, None)).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Method not allowed" })
        );
    }

    let response = send(&app, get_request("/anything", None)).await;
    assert_eq!(body_string(response).await, "site file");
}
