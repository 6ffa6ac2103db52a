pub mod api;
pub mod bootstrap;
pub mod health;

use std::sync::Arc;

use axum::Router;
use storefront_core::{Catalog, OrderIntake};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

/// Shared, read-mostly handler state. The catalog is never mutated after startup and the
/// intake only touches an atomic id counter, so no locking is involved.
#[derive(Clone, Debug)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub intake: Arc<OrderIntake>,
}

impl AppState {
    pub fn new(catalog: Catalog, intake: OrderIntake) -> Self {
        Self { catalog: Arc::new(catalog), intake: Arc::new(intake) }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Catalog::reference(), OrderIntake::default())
    }
}

/// Full HTTP surface: API routes, health, JSON 404s, panic barrier and CORS.
pub fn app(state: AppState) -> Router {
    with_fault_barrier(
        Router::new()
            .merge(api::router(state.clone()))
            .merge(health::router(state))
            .fallback(api::not_found)
            .method_not_allowed_fallback(api::not_found),
    )
}

pub fn with_fault_barrier(router: Router) -> Router {
    router.layer(CatchPanicLayer::custom(api::panic_response)).layer(CorsLayer::permissive())
}
