use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use warehouse_core::CategoryId;

use crate::app::routes::route_both;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    let router = route_both(
        Router::new(),
        "/categories",
        get(list_categories).post(create_category),
    );
    route_both(
        router,
        "/categories/:id",
        get(get_category).put(update_category).delete(delete_category),
    )
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let categories = services.catalog().categories.list();
    Json(dto::category_views(&categories)).into_response()
}

pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateCategoryRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection_to_response(e),
    };

    let created = match services.catalog().categories.create(body.into()) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (StatusCode::CREATED, Json(dto::CategoryView::from(&created))).into_response()
}

pub async fn get_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let result = CategoryId::parse(&id).and_then(|id| services.catalog().categories.get(id));
    match result {
        Ok(c) => Json(dto::CategoryView::from(&c)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateCategoryRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match CategoryId::parse(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection_to_response(e),
    };

    match services.catalog().categories.update(id, body.into()) {
        Ok(c) => Json(dto::CategoryView::from(&c)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let result = CategoryId::parse(&id).and_then(|id| services.catalog().categories.delete(id));
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
