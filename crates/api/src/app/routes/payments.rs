use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use adhera_auth::Principal;
use adhera_core::PaymentId;
use adhera_services::{CreatePayment, PaymentQuery, UpdatePayment};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route(
            "/:id",
            get(get_payment).patch(update_payment).delete(delete_payment),
        )
}

pub async fn create_payment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreatePaymentRequest>,
) -> axum::response::Response {
    let input = CreatePayment {
        member_id: body.member_id,
        amount_cents: body.amount_cents,
        paid_at: body.paid_at,
        note: body.note,
    };
    match services.payments.create(&principal, input) {
        Ok(payment) => (StatusCode::CREATED, Json(payment)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_payments(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<dto::PaymentListQuery>,
) -> axum::response::Response {
    let query = PaymentQuery {
        member_id: query.member_id,
        delegate_id: query.delegate_id,
        from: query.from,
        to: query.to,
    };
    match services.payments.list(&principal, &query) {
        Ok(payments) => Json(payments).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_payment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<PaymentId>,
) -> axum::response::Response {
    match services.payments.get(&principal, id) {
        Ok(payment) => Json(payment).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_payment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<PaymentId>,
    Json(body): Json<dto::UpdatePaymentRequest>,
) -> axum::response::Response {
    let input = UpdatePayment {
        amount_cents: body.amount_cents,
        paid_at: body.paid_at,
        note: body.note,
    };
    match services.payments.update(&principal, id, input) {
        Ok(payment) => Json(payment).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_payment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<PaymentId>,
) -> axum::response::Response {
    match services.payments.delete(&principal, id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
