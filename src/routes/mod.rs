use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{any, get, post},
};
use nextpwd_session::{Authenticator, Password, SessionKeys};
use serde::Serialize;

use crate::config::GateConfig;
use crate::error::GateError;
use crate::guard::{HEALTH_PATH, RouteGuard};
use crate::middleware::gate_middleware;

pub mod health;
pub mod signin;
pub mod signout;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GateConfig>,
    pub authenticator: Arc<Authenticator>,
    pub guard: Arc<RouteGuard>,
}

impl AppState {
    /// Build the shared gate state; fails if the protected-path pattern does not compile.
    pub fn new(config: GateConfig) -> Result<Self, regex::Error> {
        let keys = SessionKeys::new(&config.secret, config.max_age);
        let guard = RouteGuard::new(config.protected_pattern()?, keys.clone(), &config.base_path);
        let authenticator = Authenticator::new(Password::new(config.password.clone()), keys);

        Ok(Self {
            config: Arc::new(config),
            authenticator: Arc::new(authenticator),
            guard: Arc::new(guard),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

pub async fn method_not_allowed() -> GateError {
    GateError::MethodNotAllowed
}

/// Put `app` behind the gate and mount the signin/signout endpoints.
///
/// The gate endpoints and `/health` are never guarded, whatever the
/// protected-path pattern matches. The rest of the base path belongs to the
/// gate: it answers 405 and never reaches `app`.
pub fn router(state: AppState, app: Router) -> Router {
    let base = state.config.base_path.trim_end_matches('/').to_owned();

    Router::new()
        .route(HEALTH_PATH, get(health::health))
        .route(
            &state.config.signin_path(),
            get(signin::page)
                .post(signin::action)
                .fallback(method_not_allowed),
        )
        .route(
            &state.config.signout_path(),
            post(signout::action).fallback(method_not_allowed),
        )
        .route(&base, any(method_not_allowed))
        .route(&format!("{base}/"), any(method_not_allowed))
        .route(&format!("{base}/{{*rest}}"), any(method_not_allowed))
        .with_state(state.clone())
        .merge(app)
        .layer(from_fn_with_state(state, gate_middleware))
}
