//! Company API
//!
//! Companies are the tenant root; per-company resources are nested under
//! `/api/companies/{id}/...` by their own modules.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/companies", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/rates", get(handler::rates))
        .route("/{id}/quote", post(handler::quote))
}
