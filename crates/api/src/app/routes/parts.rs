use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::{Map, Value};

use warehouse_core::PartId;
use warehouse_parts::{PartPayload, SearchCriteria};

use crate::app::routes::route_both;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    let router = route_both(Router::new(), "/parts", get(list_parts).post(create_part));
    let router = route_both(router, "/parts/search", get(search_parts));
    route_both(
        router,
        "/parts/:id",
        get(get_part).put(update_part).delete(delete_part),
    )
}

type JsonObject = Result<Json<Map<String, Value>>, JsonRejection>;

fn payload_from(body: JsonObject) -> Result<PartPayload, axum::response::Response> {
    let Json(body) = body.map_err(errors::json_rejection_to_response)?;
    PartPayload::from_json(body).map_err(errors::domain_error_to_response)
}

pub async fn list_parts(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let parts = services.catalog().parts.list();
    Json(dto::part_views(&parts)).into_response()
}

pub async fn create_part(
    Extension(services): Extension<Arc<AppServices>>,
    body: JsonObject,
) -> axum::response::Response {
    let payload = match payload_from(body) {
        Ok(p) => p,
        Err(res) => return res,
    };

    match services.catalog().parts.create(payload) {
        Ok(p) => (StatusCode::CREATED, Json(dto::PartView::from(&p))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn search_parts(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> axum::response::Response {
    let Query(pairs) = match query {
        Ok(q) => q,
        Err(e) => return errors::query_rejection_to_response(e),
    };
    let criteria = match SearchCriteria::parse(pairs) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let parts = services.catalog().parts.search(&criteria);
    Json(dto::part_views(&parts)).into_response()
}

pub async fn get_part(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let result = PartId::parse(&id).and_then(|id| services.catalog().parts.get(id));
    match result {
        Ok(p) => Json(dto::PartView::from(&p)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_part(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: JsonObject,
) -> axum::response::Response {
    let id = match PartId::parse(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let payload = match payload_from(body) {
        Ok(p) => p,
        Err(res) => return res,
    };

    match services.catalog().parts.update(id, payload) {
        Ok(p) => Json(dto::PartView::from(&p)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_part(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let result = PartId::parse(&id).and_then(|id| services.catalog().parts.delete(id));
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
