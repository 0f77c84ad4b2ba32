use axum::{Router, routing::get};

use super::controller::get_root;
use crate::state::AppState;

pub fn init_application_router() -> Router<AppState> {
    Router::new().route("/", get(get_root))
}
