use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use adhera_auth::Principal;
use adhera_core::MemberId;
use adhera_services::{CreateMember, MemberQuery, UpdateMember};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_members).post(create_member))
        .route(
            "/:id",
            get(get_member).patch(update_member).delete(delete_member),
        )
}

pub async fn create_member(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateMemberRequest>,
) -> axum::response::Response {
    let input = CreateMember {
        cin: body.cin,
        full_name: body.full_name,
        delegate_id: body.delegate_id,
    };
    match services.members.create(&principal, input) {
        Ok(member) => (StatusCode::CREATED, Json(member)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_members(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<dto::MemberListQuery>,
) -> axum::response::Response {
    let query = MemberQuery {
        status: query.status,
        q: query.q,
    };
    match services.members.list(&principal, &query) {
        Ok(members) => Json(members).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_member(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<MemberId>,
) -> axum::response::Response {
    match services.members.get(&principal, id) {
        Ok(member) => Json(member).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_member(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<MemberId>,
    Json(body): Json<dto::UpdateMemberRequest>,
) -> axum::response::Response {
    let input = UpdateMember {
        full_name: body.full_name,
        status: body.status,
    };
    match services.members.update(&principal, id, input) {
        Ok(member) => Json(member).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_member(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<MemberId>,
) -> axum::response::Response {
    match services.members.delete(&principal, id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
