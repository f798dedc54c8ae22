#![allow(non_snake_case)]

pub mod routes;

use axum::Router;

pub use crate::routes::proxy::ProxyState;

/// Router that relays `/api/*` to the upstream REST backend.
pub fn proxy_router(state: ProxyState) -> Router {
    Router::new()
        .merge(routes::proxy::routes())
        .with_state(state)
}
