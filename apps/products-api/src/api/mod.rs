//! API routes module

pub mod health;
pub mod index;

use axum::Router;
use domain_products::{handlers, PgProductRepository, ProductService};

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    let service = ProductService::new(PgProductRepository::new(state.db.clone()));

    Router::new()
        .nest("/products", handlers::router(service))
        .merge(index::router())
        .merge(health::router(state.clone()))
}
