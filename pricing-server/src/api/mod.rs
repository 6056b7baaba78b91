//! API routes
//!
//! - [`health`] - health check
//! - [`pricing`] - stateless calculator
//! - [`companies`] - companies, aggregated rates and quotes
//! - [`expenses`], [`revenues`], [`taxes`] - company finance configuration
//! - [`calculations`] - saved calculator runs
//! - [`products`] - priced product catalog

pub mod calculations;
pub mod companies;
pub mod expenses;
pub mod health;
pub mod pricing;
pub mod products;
pub mod revenues;
pub mod taxes;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(pricing::router())
        .merge(companies::router())
        .merge(expenses::router())
        .merge(revenues::router())
        .merge(taxes::router())
        .merge(calculations::router())
        .merge(products::router())
}

/// Build a fully configured application with all middleware
///
/// Used by the HTTP server and by tests (`.with_state(state)` then `oneshot`).
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    health::mark_started();

    let cors = if state.config.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    build_router()
        // ========== Tower HTTP Middleware ==========
        // Timeout - 408 when a request takes longer than configured
        .layer(TimeoutLayer::new(state.config.request_timeout()))
        // CORS - Handle cross-origin requests
        .layer(cors)
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response (inner, sees the generated ID)
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID - Generate unique ID for each request (outermost)
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
}
