pub mod page;
pub mod routes;
pub mod validation;

use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/calculate", post(page::calculate))
        .route("/health", get(routes::health))
        .route("/api/price", get(routes::get_price))
        .route("/api/greeks", get(routes::get_greeks))
        .route("/api/quote", post(routes::post_quote))
        .route("/api/counters", get(routes::get_counters))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
