use crate::handlers::{invoke, ledger};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/ledgers", post(ledger::init_ledger))
        .route("/ledgers/{ledger_id}", get(ledger::read_ledger))
        .route("/ledgers/{ledger_id}/exists", get(ledger::ledger_exists))
        .route("/ledgers/{ledger_id}/ratings", post(ledger::register_rate))
        .route("/ledgers/{ledger_id}/history", get(ledger::get_all_ratings))
        .route("/invoke/{function}", post(invoke::invoke));

    Router::new()
        .nest("/v1", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
