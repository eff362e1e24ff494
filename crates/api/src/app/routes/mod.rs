use axum::{Router, routing::get};

pub mod inventory;
pub mod system;
pub mod voice;

/// Router for every pantry endpoint except `/health`.
pub fn router() -> Router {
    Router::new()
        .route("/feedback", get(system::feedback))
        .nest("/inventory", inventory::router())
        .nest("/voice", voice::router())
}
