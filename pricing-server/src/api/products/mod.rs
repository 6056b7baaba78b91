//! Product API
//!
//! Products store their priced figures. Creating or updating a product
//! reprices it from the cost inputs and the chosen driver
//! (`{"field": "markup" | "margin" | "price", "value": ...}`).

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/companies/{id}/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{product_id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
