use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, routing::get, Json, Router};

use adhera_auth::Principal;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/summary", get(global_summary))
        .route("/regions", get(regions_report))
}

pub async fn global_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    match services.reports.global_summary(&principal) {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn regions_report(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    match services.reports.regions_report(&principal) {
        Ok(reports) => Json(reports).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
