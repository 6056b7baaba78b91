//! Revenue API
//!
//! Revenue figures of a company. At most one MONTHLY revenue per company.

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/companies/{id}/revenues", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{revenue_id}", delete(handler::delete))
}
