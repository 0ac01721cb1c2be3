use axum::{routing::get, Router};

pub mod assignments;
pub mod auth;
pub mod delegates;
pub mod members;
pub mod payments;
pub mod regions;
pub mod reports;
pub mod system;
pub mod users;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/users", users::router())
        .nest("/regions", regions::router())
        .nest("/assignments", assignments::router())
        .nest("/delegates", delegates::router())
        .nest("/members", members::router())
        .nest("/payments", payments::router())
        .nest("/reports", reports::router())
}
