use axum::Router;

pub mod orders;
pub mod products;
pub mod system;

/// Router for the `/api` resources.
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/orders", orders::router())
}
