use axum::Json;
use axum_extra::extract::CookieJar;

use super::Success;
use crate::auth::removal_cookie;

/// POST {base}/signout - Clear the session cookie, whether or not one was sent
pub async fn action(jar: CookieJar) -> (CookieJar, Json<Success>) {
    tracing::info!("Session cleared");
    (jar.add(removal_cookie()), Json(Success::ok()))
}
