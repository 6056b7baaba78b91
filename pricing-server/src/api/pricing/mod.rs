//! Stateless calculator API
//!
//! Runs the pricing engine on the submitted input only; nothing is read from
//! or written to the store.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pricing", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/suggest", post(handler::suggest))
        .route("/recalculate", post(handler::recalculate))
}
