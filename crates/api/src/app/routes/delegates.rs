use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use adhera_auth::Principal;
use adhera_core::DelegateId;
use adhera_services::{CreateDelegate, DelegateQuery, UpdateDelegate};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_delegates).post(create_delegate))
        .route(
            "/:id",
            get(get_delegate).patch(update_delegate).delete(delete_delegate),
        )
}

pub async fn create_delegate(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateDelegateRequest>,
) -> axum::response::Response {
    let input = CreateDelegate {
        name: body.name,
        phone: body.phone,
        region_id: body.region_id,
        assignment_id: body.assignment_id,
        user_id: body.user_id,
    };
    match services.delegates.create(&principal, input) {
        Ok(delegate) => (StatusCode::CREATED, Json(delegate)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_delegates(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<dto::DelegateListQuery>,
) -> axum::response::Response {
    let query = DelegateQuery {
        region_id: query.region_id,
        q: query.q,
    };
    match services.delegates.list(&principal, &query) {
        Ok(delegates) => Json(delegates).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_delegate(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<DelegateId>,
) -> axum::response::Response {
    match services.delegates.get(&principal, id) {
        Ok(delegate) => Json(delegate).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_delegate(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<DelegateId>,
    Json(body): Json<dto::UpdateDelegateRequest>,
) -> axum::response::Response {
    let input = UpdateDelegate {
        name: body.name,
        phone: body.phone,
    };
    match services.delegates.update(&principal, id, input) {
        Ok(delegate) => Json(delegate).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_delegate(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<DelegateId>,
) -> axum::response::Response {
    match services.delegates.delete(&principal, id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
