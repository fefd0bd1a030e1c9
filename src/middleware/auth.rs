use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use nextpwd_session::unix_now;

use crate::guard::GuardResult;
use crate::routes::AppState;

/// Gate middleware placed in front of application routes
///
/// Requests whose path matches the protected pattern must carry a valid
/// session cookie; otherwise they are redirected (303) to the signin page
/// with the original path as `callbackURL`.
pub async fn gate_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    match state.guard.check(req.uri().path(), &jar, unix_now()) {
        GuardResult::NotApplicable | GuardResult::Authenticated => next.run(req).await,
        GuardResult::Unauthenticated { redirect_url } => {
            tracing::debug!(path = req.uri().path(), "Redirecting to signin");
            Redirect::to(&redirect_url).into_response()
        }
    }
}
