use std::sync::Arc;

use axum::{
    extract::Extension,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    match services.session.login(&body.email, &body.password, Utc::now()) {
        Ok(pair) => Json(pair).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn refresh(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RefreshRequest>,
) -> axum::response::Response {
    match services.session.refresh(&body.refresh_token, Utc::now()) {
        Ok(pair) => Json(pair).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
