use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use adhera_auth::Principal;
use adhera_core::UserId;
use adhera_services::{CreateUser, UpdateUser};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).patch(update_user).delete(delete_user))
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateUserRequest>,
) -> axum::response::Response {
    let input = CreateUser {
        name: body.name,
        email: body.email,
        password: body.password,
        role: body.role,
    };
    match services.users.create(&principal, input) {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    match services.users.list(&principal) {
        Ok(users) => Json(users).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<UserId>,
) -> axum::response::Response {
    match services.users.get(&principal, id) {
        Ok(user) => Json(user).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<UserId>,
    Json(body): Json<dto::UpdateUserRequest>,
) -> axum::response::Response {
    let input = UpdateUser {
        name: body.name,
        email: body.email,
        password: body.password,
        role: body.role,
    };
    match services.users.update(&principal, id, input) {
        Ok(user) => Json(user).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<UserId>,
) -> axum::response::Response {
    match services.users.soft_delete(&principal, id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
