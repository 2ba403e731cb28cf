pub mod participants;
pub mod trips;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(trips::router())
        .merge(participants::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
