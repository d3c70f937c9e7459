use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use shopfloor_orders::NewOrder;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", post(place_order).get(list_orders))
}

pub async fn place_order(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let new_order = match NewOrder::from_json(&body) {
        Ok(o) => o,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().insert_order(new_order).await {
        Ok(order) => {
            tracing::info!(order_id = %order.id, product_id = %order.product_id, "order placed");
            (StatusCode::CREATED, Json(order)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_orders(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.store().list_orders().await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
