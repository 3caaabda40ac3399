//! Axum router wiring.
//!
//! Routes the visit counter (GET and POST, plus the local-host spelling),
//! health, contact, and metrics. CORS is permissive when `server.cors` is on,
//! since the page is served from a different origin.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let cors = state.cfg().server.cors;

    let router = Router::new()
        .route(
            api::visits::ROUTE,
            get(api::visits::record_visit).post(api::visits::record_visit),
        )
        .route(
            api::visits::ROUTE_LOCAL,
            get(api::visits::record_visit).post(api::visits::record_visit),
        )
        .route(api::contact::ROUTE, post(api::contact::submit))
        .route(ops::HEALTH_ROUTE, get(ops::health))
        .route(ops::METRICS_ROUTE, get(ops::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
