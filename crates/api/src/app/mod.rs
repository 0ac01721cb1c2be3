//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: service construction over a shared directory
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request DTOs and query-parameter structs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use adhera_auth::Hs256TokenCodec;
use adhera_directory::Directory;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router over an existing directory (public entrypoint
/// used by `main.rs` and the black-box tests).
pub fn build_app(dir: Directory, jwt_secret: &[u8]) -> Router {
    let codec = Arc::new(Hs256TokenCodec::new(jwt_secret));
    let auth_state = middleware::AuthState {
        codec: codec.clone(),
    };

    let services = Arc::new(services::AppServices::new(dir, codec));

    // Protected routes: require a valid bearer token.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/auth", routes::auth::router())
        .merge(protected)
        .layer(Extension(services))
}
