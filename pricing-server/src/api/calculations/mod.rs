//! Saved Calculation API
//!
//! The result of a saved calculation is recomputed on the server from the
//! submitted input.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/companies/{id}/calculations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{calc_id}", get(handler::get_by_id).delete(handler::delete))
}
