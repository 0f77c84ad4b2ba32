use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{login, register, whoami};
use crate::middleware::rate_limit::RateLimitLayer;
use crate::state::AppState;

pub fn init_auth_router(rate_limit: Option<RateLimitLayer>) -> Router<AppState> {
    let router = Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/whoami", get(whoami));

    match rate_limit {
        Some(layer) => router.route_layer(layer),
        None => router,
    }
}
