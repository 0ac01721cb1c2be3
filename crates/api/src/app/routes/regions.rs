use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use adhera_auth::Principal;
use adhera_core::RegionId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_regions).post(create_region))
        .route(
            "/:id",
            get(get_region).patch(rename_region).delete(delete_region),
        )
}

pub async fn create_region(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::RegionNameRequest>,
) -> axum::response::Response {
    match services.regions.create(&principal, body.name) {
        Ok(region) => (StatusCode::CREATED, Json(region)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_regions(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    match services.regions.list(&principal) {
        Ok(regions) => Json(regions).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_region(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<RegionId>,
) -> axum::response::Response {
    match services.regions.get(&principal, id) {
        Ok(region) => Json(region).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn rename_region(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<RegionId>,
    Json(body): Json<dto::RegionNameRequest>,
) -> axum::response::Response {
    match services.regions.rename(&principal, id, body.name) {
        Ok(region) => Json(region).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_region(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<RegionId>,
) -> axum::response::Response {
    match services.regions.delete(&principal, id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
