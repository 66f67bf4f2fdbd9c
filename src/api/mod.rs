use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::app::App;
use crate::client::RankingBackend;

pub mod handlers;
pub mod models;

pub fn create_router<B: RankingBackend>(app: App<B>) -> Router {
    // The dashboard page may be served from anywhere during development.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/rank", post(handlers::rank_handler::<B>))
        .route("/api/dashboard", get(handlers::dashboard_handler::<B>))
        .route(
            "/api/view",
            get(handlers::view_handler::<B>).put(handlers::switch_view_handler::<B>),
        )
        .route("/api/locations", get(handlers::locations_handler::<B>))
        .route("/api/reports", get(handlers::reports_handler::<B>))
        .route(
            "/api/reports/:id/rerun",
            post(handlers::rerun_handler::<B>),
        )
        .route(
            "/api/reports/:id/hover",
            post(handlers::hover_handler::<B>).delete(handlers::unhover_handler::<B>),
        )
        .route("/api/about", get(handlers::about_handler::<B>))
        .route("/api/settings", get(handlers::settings_handler::<B>))
        .with_state(app)
        .layer(cors)
}
