use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use adhera_auth::Principal;
use adhera_core::AssignmentId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_assignments).post(grant_assignment))
        .route("/:id", get(get_assignment))
        .route("/:id/revoke", post(revoke_assignment))
}

pub async fn grant_assignment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::GrantAssignmentRequest>,
) -> axum::response::Response {
    match services
        .assignments
        .grant(&principal, body.user_id, body.region_id, body.start_at)
    {
        Ok(assignment) => (StatusCode::CREATED, Json(assignment)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_assignments(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    match services.assignments.list(&principal) {
        Ok(assignments) => Json(assignments).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_assignment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<AssignmentId>,
) -> axum::response::Response {
    match services.assignments.get(&principal, id) {
        Ok(assignment) => Json(assignment).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn revoke_assignment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<AssignmentId>,
    Json(body): Json<dto::RevokeAssignmentRequest>,
) -> axum::response::Response {
    match services.assignments.revoke(&principal, id, body.end_at) {
        Ok(assignment) => Json(assignment).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
