use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{create_car, delete_car, get_car, list_cars, rent_car, update_car};
use crate::middleware::rate_limit::RateLimitLayer;
use crate::state::AppState;

pub fn init_cars_router(rate_limit: Option<RateLimitLayer>) -> Router<AppState> {
    let router = Router::new()
        .route("/", get(list_cars).post(create_car))
        .route("/{id}", get(get_car).put(update_car).delete(delete_car))
        .route("/{id}/rent", post(rent_car));

    match rate_limit {
        Some(layer) => router.route_layer(layer),
        None => router,
    }
}
