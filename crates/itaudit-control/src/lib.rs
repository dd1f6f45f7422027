use axum::{
    Json, Router,
    extract::State,
    middleware,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use serde::Serialize;

pub mod action;
pub mod api;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod security;
pub mod state;
pub mod store;

#[cfg(test)]
mod testing;

use crate::config::ControlConfig;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
    version: &'static str,
    read_only: bool,
    database_ok: bool,
    database_error: Option<String>,
}

async fn healthz(State(state): State<AppState>) -> Json<HealthzResponse> {
    let ping = state.db.ping().await;
    Json(HealthzResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        read_only: state.config.read_only,
        database_ok: ping.is_ok(),
        database_error: ping.err().map(|e| e.to_string()),
    })
}

/// Opens the database, applies migrations and seeds defaults.
///
/// Every step is idempotent, so this runs on every boot.
pub async fn init_db_and_migrate(config: &ControlConfig) -> anyhow::Result<DatabaseConnection> {
    let db = itaudit_db::connect(&config.database_url, config.db_max_connections).await?;

    itaudit_migration::Migrator::up(&db, None).await?;

    store::site_content::seed_defaults(&db).await?;
    if store::accounts::ensure_admin(&db, &config.admin_user, &config.admin_pass).await? {
        tracing::info!(username = %config.admin_user, "created bootstrap admin account");
    }

    Ok(db)
}

pub fn app(state: AppState) -> Router {
    // Only the POST handler sits behind the session gate; other methods get
    // the 405 fallback whether or not a session is present.
    let api_router = Router::new().route(
        "/db",
        post(api::db_action)
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                security::session_guard,
            ))
            .fallback(api::method_not_allowed),
    );

    let auth_router = Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/whoami", get(auth::whoami));

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", api_router)
        .nest("/auth", auth_router)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security::origin_guard,
        ))
        .layer(middleware::from_fn(security::request_id))
        .with_state(state)
}
