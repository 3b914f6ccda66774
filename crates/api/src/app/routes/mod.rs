use axum::{Router, routing::MethodRouter};

pub mod categories;
pub mod parts;
pub mod system;

/// Router for the category and part resources.
pub fn router() -> Router {
    Router::new()
        .merge(categories::router())
        .merge(parts::router())
}

/// Register `handler` at `path` and at `path` with a trailing slash.
pub(crate) fn route_both(router: Router, path: &str, handler: MethodRouter) -> Router {
    router
        .route(path, handler.clone())
        .route(&format!("{path}/"), handler)
}
