use chrono::Utc;

use adhera_auth::{hash_password, Role};
use adhera_core::UserId;
use adhera_directory::{Directory, UserRecord};

#[tokio::main]
async fn main() {
    adhera_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let dir = Directory::in_memory();
    seed_admin(&dir);

    let app = adhera_api::app::build_app(dir, jwt_secret.as_bytes());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

/// Bootstrap GM account so a fresh in-memory deployment is reachable.
fn seed_admin(dir: &Directory) {
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        tracing::warn!("ADMIN_PASSWORD not set; using insecure dev default");
        "admin".to_string()
    });
    if dir.user_by_email(&email).is_some() {
        return;
    }
    let now = Utc::now();
    let admin = UserRecord {
        id: UserId::new(),
        name: "Administrator".to_string(),
        email: email.clone(),
        password_hash: hash_password(&password).expect("failed to hash admin password"),
        role: Role::GlobalManager,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };
    dir.users.upsert(admin.id, admin);
    tracing::info!(%email, "seeded GM account");
}
