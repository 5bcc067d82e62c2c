pub mod api;

use std::any::Any;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer,
};
use tracing::error;

use crate::{
    AppState,
    handlers::index,
    infra::errors::{AppError, INTERNAL_ERROR_MESSAGE},
};

/// A public endpoint, as advertised by `GET /`.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: &'static str,
    pub path: &'static str,
}

pub const ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        name: "submit",
        method: "POST",
        path: "/api/submit",
    },
    Endpoint {
        name: "pets",
        method: "GET",
        path: "/api/pets",
    },
    Endpoint {
        name: "stats",
        method: "GET",
        path: "/api/stats",
    },
    Endpoint {
        name: "clear",
        method: "POST",
        path: "/api/clear",
    },
];

pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config().body_limit;

    let router = Router::new()
        .route("/", get(index::root_handler))
        .route("/health", get(index::health_handler))
        .nest("/api", api::create_api_router());

    with_middleware(router, body_limit).with_state(state)
}

/// Wrap `router` in the shared HTTP middleware stack.
///
/// Layers are applied innermost first: body limit, panic capture, tracing,
/// then CORS on the outside.
pub fn with_middleware(
    router: Router<AppState>,
    body_limit: usize,
) -> Router<AppState> {
    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!(panic = detail, "handler panicked");

    AppError::internal(INTERNAL_ERROR_MESSAGE).into_response()
}
