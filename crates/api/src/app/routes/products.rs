use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use shopfloor_products::NewProduct;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", post(create_product).get(search_products))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let new_product = match NewProduct::from_json(&body) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().insert_product(new_product).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id, category = %product.category, "product created");
            (StatusCode::CREATED, Json(product)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn search_products(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::SearchProductsQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    let filter = match query.into_filter() {
        Ok(f) => f,
        Err(e) => return errors::validation_error_to_response(e),
    };

    match services.store().search_products(&filter).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
