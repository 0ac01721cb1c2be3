use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use adhera_auth::{validate_claims, TokenCodec, TokenUse};

#[derive(Clone)]
pub struct AuthState {
    pub codec: Arc<dyn TokenCodec>,
}

/// Decode the bearer token and attach the resulting [`adhera_auth::Principal`]
/// to the request. Identity, role and expiry come from the token; everything
/// else is resolved live per request by the services.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())?;

    let claims = state
        .codec
        .decode(token)
        .map_err(|_e| StatusCode::UNAUTHORIZED)?;
    validate_claims(&claims, Utc::now()).map_err(|_e| StatusCode::UNAUTHORIZED)?;

    // Refresh tokens are only good for the refresh endpoint, never as a
    // bearer credential.
    if claims.typ != TokenUse::Access {
        return Err(StatusCode::UNAUTHORIZED);
    }

    req.extensions_mut().insert(claims.principal());

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}
